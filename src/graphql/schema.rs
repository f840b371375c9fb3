//! GraphQL object and input types.
//!
//! Object types carry foreign keys as skipped fields; the relational fields
//! (`User.posts`, `Post.author`, ...) resolve them against the store.

use async_graphql::{
    ComplexObject, Context, InputObject, MaybeUndefined, Result, SimpleObject, ID,
};
use std::sync::Arc;

use crate::store::{self, Store};

/// A registered user
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

#[ComplexObject]
impl User {
    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store
            .posts_by_author(&self.id)?
            .into_iter()
            .map(Post::from)
            .collect())
    }

    /// Comments written by this user
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store
            .comments_by_author(&self.id)?
            .into_iter()
            .map(Comment::from)
            .collect())
    }
}

/// A blog post
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Post {
    pub id: ID,
    pub title: String,
    pub body: String,
    pub published: bool,
    #[graphql(skip)]
    pub author_id: String,
}

#[ComplexObject]
impl Post {
    /// The user who wrote the post
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store.user(&self.author_id)?.map(User::from))
    }

    /// Comments left on the post
    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store
            .comments_on_post(&self.id)?
            .into_iter()
            .map(Comment::from)
            .collect())
    }
}

/// A comment on a post
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Comment {
    pub id: ID,
    pub text: String,
    #[graphql(skip)]
    pub author_id: String,
    #[graphql(skip)]
    pub post_id: String,
}

#[ComplexObject]
impl Comment {
    /// The user who wrote the comment
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store.user(&self.author_id)?.map(User::from))
    }

    /// The post the comment belongs to
    async fn post(&self, ctx: &Context<'_>) -> Result<Option<Post>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store.post(&self.post_id)?.map(Post::from))
    }
}

/// Row counts
#[derive(SimpleObject)]
pub struct Stats {
    pub users: i32,
    pub posts: i32,
    pub comments: i32,
}

impl From<store::User> for User {
    fn from(u: store::User) -> Self {
        Self {
            id: ID(u.id),
            name: u.name,
            email: u.email,
            age: u.age,
        }
    }
}

impl From<store::Post> for Post {
    fn from(p: store::Post) -> Self {
        Self {
            id: ID(p.id),
            title: p.title,
            body: p.body,
            published: p.published,
            author_id: p.author,
        }
    }
}

impl From<store::Comment> for Comment {
    fn from(c: store::Comment) -> Self {
        Self {
            id: ID(c.id),
            text: c.text,
            author_id: c.author,
            post_id: c.post,
        }
    }
}

impl From<store::StoreStats> for Stats {
    fn from(s: store::StoreStats) -> Self {
        Self {
            users: i32::try_from(s.users).unwrap_or(i32::MAX),
            posts: i32::try_from(s.posts).unwrap_or(i32::MAX),
            comments: i32::try_from(s.comments).unwrap_or(i32::MAX),
        }
    }
}

// ─── Inputs ────────────────────────────────────────────────

#[derive(InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

/// Fields left out are unchanged; `age: null` clears the age.
#[derive(InputObject)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: MaybeUndefined<i32>,
}

#[derive(InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub body: String,
    pub author: ID,
    pub published: bool,
}

#[derive(InputObject)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

#[derive(InputObject)]
pub struct CreateCommentInput {
    pub text: String,
    pub author: ID,
    pub post: ID,
}

#[derive(InputObject)]
pub struct UpdateCommentInput {
    pub text: Option<String>,
}

impl From<CreateUserInput> for store::CreateUser {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            age: input.age,
        }
    }
}

impl From<UpdateUserInput> for store::UpdateUser {
    fn from(input: UpdateUserInput) -> Self {
        let age = match input.age {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(age) => Some(Some(age)),
        };
        Self {
            name: input.name,
            email: input.email,
            age,
        }
    }
}

impl From<CreatePostInput> for store::CreatePost {
    fn from(input: CreatePostInput) -> Self {
        Self {
            title: input.title,
            body: input.body,
            author: input.author.0,
            published: input.published,
        }
    }
}

impl From<UpdatePostInput> for store::UpdatePost {
    fn from(input: UpdatePostInput) -> Self {
        Self {
            title: input.title,
            body: input.body,
            published: input.published,
        }
    }
}

impl From<CreateCommentInput> for store::CreateComment {
    fn from(input: CreateCommentInput) -> Self {
        Self {
            text: input.text,
            author: input.author.0,
            post: input.post.0,
        }
    }
}

impl From<UpdateCommentInput> for store::UpdateComment {
    fn from(input: UpdateCommentInput) -> Self {
        Self { text: input.text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_saturate_instead_of_wrapping() {
        let stats = Stats::from(store::StoreStats {
            users: usize::MAX,
            posts: i32::MAX as usize + 1,
            comments: 7,
        });
        assert_eq!(stats.users, i32::MAX);
        assert_eq!(stats.posts, i32::MAX);
        assert_eq!(stats.comments, 7);
    }
}
