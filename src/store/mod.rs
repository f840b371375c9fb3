//! In-memory store for users, posts and comments.
//!
//! All three collections live behind one `RwLock`. Every operation takes the
//! lock exactly once, so a mutation either applies completely or not at all.
//! Lookups are linear scans; the collections are small.

pub mod seed;
pub mod types;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{BlogError, Result};
pub use seed::Seed;
pub use types::{
    Comment, CreateComment, CreatePost, CreateUser, DeletedPost, DeletedUser, Post, StoreStats,
    UpdateComment, UpdatePost, UpdateUser, User,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

/// Shared state reached by every resolver through the schema data.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Store {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with the built-in fixtures.
    pub fn seeded() -> Self {
        let seed = Seed::fixtures();
        Self::with_rows(seed.users, seed.posts, seed.comments)
    }

    /// Store populated from validated seed data.
    pub fn from_seed(seed: Seed) -> Result<Self> {
        seed.validate()?;
        Ok(Self::with_rows(seed.users, seed.posts, seed.comments))
    }

    fn with_rows(users: Vec<User>, posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                users,
                posts,
                comments,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| BlogError::StorePoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| BlogError::StorePoisoned)
    }

    // ─── Reads ─────────────────────────────────────────────

    /// All users, or those whose name contains `query` (case-insensitive).
    pub fn users(&self, query: Option<&str>) -> Result<Vec<User>> {
        let t = self.read()?;
        let users = match query.filter(|q| !q.is_empty()) {
            None => t.users.clone(),
            Some(q) => {
                let needle = q.to_lowercase();
                t.users
                    .iter()
                    .filter(|u| u.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        };
        debug!(query = ?query, count = users.len(), "users");
        Ok(users)
    }

    /// All posts, or the post whose id equals `query`.
    pub fn posts(&self, query: Option<&str>) -> Result<Vec<Post>> {
        let t = self.read()?;
        let posts: Vec<Post> = match query.filter(|q| !q.is_empty()) {
            None => t.posts.clone(),
            Some(id) => t.posts.iter().filter(|p| p.id == id).cloned().collect(),
        };
        debug!(query = ?query, count = posts.len(), "posts");
        Ok(posts)
    }

    /// All comments, or the comment whose id equals `pk`.
    pub fn comments(&self, pk: Option<&str>) -> Result<Vec<Comment>> {
        let t = self.read()?;
        let comments: Vec<Comment> = match pk.filter(|q| !q.is_empty()) {
            None => t.comments.clone(),
            Some(id) => t.comments.iter().filter(|c| c.id == id).cloned().collect(),
        };
        debug!(pk = ?pk, count = comments.len(), "comments");
        Ok(comments)
    }

    pub fn user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.read()?.users.iter().find(|u| u.id == id).cloned())
    }

    pub fn post(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.read()?.posts.iter().find(|p| p.id == id).cloned())
    }

    pub fn comment(&self, id: &str) -> Result<Option<Comment>> {
        Ok(self.read()?.comments.iter().find(|c| c.id == id).cloned())
    }

    /// Posts whose author is `user_id`.
    pub fn posts_by_author(&self, user_id: &str) -> Result<Vec<Post>> {
        let t = self.read()?;
        Ok(t.posts.iter().filter(|p| p.author == user_id).cloned().collect())
    }

    /// Comments whose author is `user_id`.
    pub fn comments_by_author(&self, user_id: &str) -> Result<Vec<Comment>> {
        let t = self.read()?;
        Ok(t.comments
            .iter()
            .filter(|c| c.author == user_id)
            .cloned()
            .collect())
    }

    /// Comments attached to `post_id`.
    pub fn comments_on_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        let t = self.read()?;
        Ok(t.comments
            .iter()
            .filter(|c| c.post == post_id)
            .cloned()
            .collect())
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let t = self.read()?;
        Ok(StoreStats {
            users: t.users.len(),
            posts: t.posts.len(),
            comments: t.comments.len(),
        })
    }

    // ─── Users ─────────────────────────────────────────────

    pub fn create_user(&self, data: CreateUser) -> Result<User> {
        let mut t = self.write()?;
        if t.users.iter().any(|u| u.email == data.email) {
            warn!(email = %data.email, "email already registered");
            return Err(BlogError::EmailInUse(data.email));
        }

        let user = User {
            id: new_id(),
            name: data.name,
            email: data.email,
            age: data.age,
        };
        t.users.push(user.clone());
        info!(id = %user.id, "user created");
        Ok(user)
    }

    pub fn update_user(&self, id: &str, data: UpdateUser) -> Result<User> {
        let mut t = self.write()?;
        let idx = t
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(BlogError::UserNotFound)?;

        if let Some(email) = &data.email {
            // The user keeping their own address is not a conflict
            if t.users.iter().any(|u| u.id != id && u.email == *email) {
                warn!(id, email = %email, "email already taken");
                return Err(BlogError::EmailTaken);
            }
        }

        let user = &mut t.users[idx];
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(age) = data.age {
            user.age = age;
        }
        info!(id, "user updated");
        Ok(user.clone())
    }

    /// Remove a user along with their posts, the comments on those posts,
    /// and every comment they wrote.
    pub fn delete_user(&self, id: &str) -> Result<DeletedUser> {
        let mut t = self.write()?;
        let idx = t
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(BlogError::UserNotFound)?;
        let user = t.users.remove(idx);

        let (posts, kept): (Vec<Post>, Vec<Post>) =
            t.posts.drain(..).partition(|p| p.author == id);
        t.posts = kept;

        let (comments, kept): (Vec<Comment>, Vec<Comment>) = t
            .comments
            .drain(..)
            .partition(|c| c.author == id || posts.iter().any(|p| p.id == c.post));
        t.comments = kept;

        info!(
            id,
            posts = posts.len(),
            comments = comments.len(),
            "user deleted"
        );
        Ok(DeletedUser {
            user,
            posts,
            comments,
        })
    }

    // ─── Posts ─────────────────────────────────────────────

    pub fn create_post(&self, data: CreatePost) -> Result<Post> {
        let mut t = self.write()?;
        if !t.users.iter().any(|u| u.id == data.author) {
            warn!(author = %data.author, "post author not found");
            return Err(BlogError::AuthorNotFound);
        }

        let post = Post {
            id: new_id(),
            title: data.title,
            body: data.body,
            author: data.author,
            published: data.published,
        };
        t.posts.push(post.clone());
        info!(id = %post.id, author = %post.author, "post created");
        Ok(post)
    }

    pub fn update_post(&self, id: &str, data: UpdatePost) -> Result<Post> {
        let mut t = self.write()?;
        let post = t
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BlogError::PostNotFound)?;

        if let Some(title) = data.title {
            post.title = title;
        }
        if let Some(body) = data.body {
            post.body = body;
        }
        if let Some(published) = data.published {
            post.published = published;
        }
        info!(id, "post updated");
        Ok(post.clone())
    }

    /// Remove a post and its comments.
    pub fn delete_post(&self, id: &str) -> Result<DeletedPost> {
        let mut t = self.write()?;
        let idx = t
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(BlogError::PostNotFound)?;
        let post = t.posts.remove(idx);

        let (comments, kept): (Vec<Comment>, Vec<Comment>) =
            t.comments.drain(..).partition(|c| c.post == id);
        t.comments = kept;

        info!(id, comments = comments.len(), "post deleted");
        Ok(DeletedPost { post, comments })
    }

    // ─── Comments ──────────────────────────────────────────

    pub fn create_comment(&self, data: CreateComment) -> Result<Comment> {
        let mut t = self.write()?;
        if !t.users.iter().any(|u| u.id == data.author) {
            warn!(author = %data.author, "comment author not found");
            return Err(BlogError::CommenterNotFound);
        }
        if !t.posts.iter().any(|p| p.id == data.post && p.published) {
            warn!(post = %data.post, "post missing or unpublished");
            return Err(BlogError::PostUnavailable);
        }
        if t.comments
            .iter()
            .any(|c| c.text == data.text && c.author == data.author && c.post == data.post)
        {
            warn!(author = %data.author, post = %data.post, "duplicate comment");
            return Err(BlogError::DuplicateComment);
        }

        let comment = Comment {
            id: new_id(),
            text: data.text,
            author: data.author,
            post: data.post,
        };
        t.comments.push(comment.clone());
        info!(id = %comment.id, post = %comment.post, "comment created");
        Ok(comment)
    }

    pub fn update_comment(&self, id: &str, data: UpdateComment) -> Result<Comment> {
        let mut t = self.write()?;
        let idx = t
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or(BlogError::CommentNotFound)?;

        if let Some(text) = data.text {
            let current = &t.comments[idx];
            let clash = t.comments.iter().any(|c| {
                c.id != id && c.text == text && c.author == current.author && c.post == current.post
            });
            if clash {
                warn!(id, "update would duplicate an existing comment");
                return Err(BlogError::DuplicateComment);
            }
            t.comments[idx].text = text;
        }
        info!(id, "comment updated");
        Ok(t.comments[idx].clone())
    }

    pub fn delete_comment(&self, id: &str) -> Result<Comment> {
        let mut t = self.write()?;
        let idx = t
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or(BlogError::CommentNotFound)?;
        let comment = t.comments.remove(idx);
        info!(id, "comment deleted");
        Ok(comment)
    }
}
