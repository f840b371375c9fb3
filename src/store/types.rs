//! Row and input types held by the store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Id of the authoring user
    pub author: String,
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    /// Id of the commenting user
    pub author: String,
    /// Id of the post commented on
    pub post: String,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

/// Partial user update. `age: Some(None)` clears the age.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<Option<i32>>,
}

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub author: String,
    pub published: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub text: String,
    pub author: String,
    pub post: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateComment {
    pub text: Option<String>,
}

/// Row counts per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

/// Outcome of a cascading user delete.
#[derive(Debug, Clone)]
pub struct DeletedUser {
    pub user: User,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

/// Outcome of a cascading post delete.
#[derive(Debug, Clone)]
pub struct DeletedPost {
    pub post: Post,
    pub comments: Vec<Comment>,
}
