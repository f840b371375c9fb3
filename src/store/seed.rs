//! Initial store contents: built-in fixtures or a JSON seed file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use super::types::{Comment, Post, User};
use crate::error::{BlogError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl Seed {
    /// Load a seed file. Validation happens in `Store::from_seed`.
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading seed data");
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| BlogError::ParseError(format!("seed: {}", e)))
    }

    /// Check id uniqueness, email uniqueness and that every reference resolves.
    ///
    /// Comments on unpublished posts are accepted; the published rule only
    /// gates new comments.
    pub fn validate(&self) -> Result<()> {
        let mut user_ids = HashSet::new();
        let mut emails = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.id.as_str()) {
                return Err(BlogError::InvalidSeed(format!("duplicate user id {}", user.id)));
            }
            if !emails.insert(user.email.as_str()) {
                return Err(BlogError::InvalidSeed(format!(
                    "duplicate email {}",
                    user.email
                )));
            }
        }

        let mut post_ids = HashSet::new();
        for post in &self.posts {
            if !post_ids.insert(post.id.as_str()) {
                return Err(BlogError::InvalidSeed(format!("duplicate post id {}", post.id)));
            }
            if !user_ids.contains(post.author.as_str()) {
                return Err(BlogError::InvalidSeed(format!(
                    "post {} references missing user {}",
                    post.id, post.author
                )));
            }
        }

        let mut comment_ids = HashSet::new();
        let mut triples = HashSet::new();
        for comment in &self.comments {
            if !comment_ids.insert(comment.id.as_str()) {
                return Err(BlogError::InvalidSeed(format!(
                    "duplicate comment id {}",
                    comment.id
                )));
            }
            if !user_ids.contains(comment.author.as_str()) {
                return Err(BlogError::InvalidSeed(format!(
                    "comment {} references missing user {}",
                    comment.id, comment.author
                )));
            }
            if !post_ids.contains(comment.post.as_str()) {
                return Err(BlogError::InvalidSeed(format!(
                    "comment {} references missing post {}",
                    comment.id, comment.post
                )));
            }
            if !triples.insert((&comment.text, &comment.author, &comment.post)) {
                return Err(BlogError::InvalidSeed(format!(
                    "comment {} duplicates an earlier comment",
                    comment.id
                )));
            }
        }
        Ok(())
    }

    /// The stock data set served when no seed file is configured.
    pub fn fixtures() -> Self {
        let user = |id: &str, name: &str, email: &str, age: i32| User {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age: Some(age),
        };
        let post = |id: &str, title: &str, body: &str, author: &str, published: bool| Post {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            author: author.into(),
            published,
        };
        let comment = |id: &str, text: &str, author: &str, post: &str| Comment {
            id: id.into(),
            text: text.into(),
            author: author.into(),
            post: post.into(),
        };

        Self {
            users: vec![
                user("1", "Nazli", "nazli@example.com", 33),
                user("2", "Moby", "moby@sample.com", 29),
                user("3", "Sarah", "sara@sample.com", 46),
            ],
            posts: vec![
                post(
                    "1",
                    "GraphQL Advantages",
                    "single endpoint, fast, flexible, efficient, self-documenting",
                    "1",
                    false,
                ),
                post(
                    "2",
                    "How to GraphQL ",
                    "It is easy to learn about graphQL since so many libraries are available",
                    "2",
                    false,
                ),
                post(
                    "3",
                    "GraphQL is futuristic",
                    "flexibility and lean nature of GraphQL make it ideal to use with clients \
                     with very little resource especially storage like smartphones and other \
                     device as part of IoT",
                    "1",
                    false,
                ),
                post(
                    "4",
                    "MERNG Stack",
                    "MERNG stands for Mongodb Express React Node GraphQL",
                    "2",
                    true,
                ),
            ],
            comments: vec![
                comment("1", "well this post is very informative", "1", "1"),
                comment(
                    "2",
                    "It seems the author lacks the knowledge of the subject",
                    "1",
                    "2",
                ),
                comment(
                    "3",
                    "You should better research on the topic before posting about it",
                    "2",
                    "1",
                ),
                comment("4", "to be honest, it is very funny", "3", "4"),
                comment("5", "Thank you, very informative and to the point", "2", "3"),
            ],
        }
    }
}
