//! GraphQL Query resolvers.
//!
//! Read operations over the store, plus two fixed-data fields.

use async_graphql::{Context, Object, Result, ID};
use std::sync::Arc;

use super::schema::{Comment, Post, Stats, User};
use crate::store::Store;

/// Root query type
pub struct Query;

#[Object]
impl Query {
    /// The signed-in user. Always the same demo profile; not read from the store.
    async fn me(&self) -> User {
        User {
            id: ID("1244".to_string()),
            name: "Django Khan".to_string(),
            email: "django@mail.com".to_string(),
            age: Some(21),
        }
    }

    /// A featured post. Fixed data; its author does not exist in the store.
    async fn post(&self) -> Post {
        Post {
            id: ID("558".to_string()),
            title: "Beginner's tutorial for GraphQL with NodeJs".to_string(),
            body: "GraphQL is a new technique that replaces RESTFul Api as it has several \
                   advantages for instance, it is faster, more flexilbe, cleaner, use less data, \
                   self-documenting etc. In this you will learn how to make your own graphql \
                   server in node from scratch using libraries like babel and graphql-yoga"
                .to_string(),
            published: false,
            author_id: String::new(),
        }
    }

    /// Users, optionally filtered by a case-insensitive substring of their name
    async fn users(&self, ctx: &Context<'_>, query: Option<String>) -> Result<Vec<User>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store
            .users(query.as_deref())?
            .into_iter()
            .map(User::from)
            .collect())
    }

    /// Posts, optionally filtered by exact id
    async fn posts(&self, ctx: &Context<'_>, query: Option<ID>) -> Result<Vec<Post>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store
            .posts(query.as_deref().map(String::as_str))?
            .into_iter()
            .map(Post::from)
            .collect())
    }

    /// Comments, optionally filtered by exact id
    async fn comments(&self, ctx: &Context<'_>, pk: Option<ID>) -> Result<Vec<Comment>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store
            .comments(pk.as_deref().map(String::as_str))?
            .into_iter()
            .map(Comment::from)
            .collect())
    }

    /// A single user by id
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store.user(&id)?.map(User::from))
    }

    /// Row counts per collection
    async fn stats(&self, ctx: &Context<'_>) -> Result<Stats> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store.stats()?.into())
    }
}
