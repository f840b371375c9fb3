//! Error types for the blog API.
//!
//! The `Display` text of each variant is the message clients see in the
//! GraphQL `errors` array.

use thiserror::Error;

/// Errors raised by the store, the seed loader and config parsing.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("A user with {0} already exists")]
    EmailInUse(String),

    #[error("Email already taken")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Author not found!")]
    AuthorNotFound,

    #[error("The user does not exist")]
    CommenterNotFound,

    #[error("Post does not exist")]
    PostNotFound,

    #[error("The post not found")]
    PostUnavailable,

    #[error("You already posted the comment")]
    DuplicateComment,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("invalid seed data: {0}")]
    InvalidSeed(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("store lock poisoned")]
    StorePoisoned,

    #[error("parse error: {0}")]
    ParseError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BlogError>;
