//! # Blog
//!
//! A GraphQL API over three related collections: users, posts and comments.
//!
//! ## Key Features
//!
//! - **Relational**: every post and comment resolves its author, post and
//!   comments through foreign keys
//! - **Validated**: mutations check references before touching the store
//! - **Cascading**: deleting a user or post removes everything that hangs off it
//! - **Live**: subscriptions for a ticking counter and post/comment changes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blog::{build_schema, execute, Config, Store};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let schema = build_schema(Arc::new(Store::seeded()), &Config::default());
//! let json = execute(&schema, "{ users(query: \"na\") { name posts { title } } }").await;
//! # }
//! ```

pub mod config;
pub mod error;
pub mod graphql;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use config::Config;
pub use error::{BlogError, Result};
pub use graphql::{build_schema, execute, execute_with_variables, BlogSchema};
pub use store::{Seed, Store};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn schema() -> BlogSchema {
        build_schema(Arc::new(Store::seeded()), &Config::default())
    }

    async fn run(schema: &BlogSchema, query: &str) -> serde_json::Value {
        serde_json::from_str(&execute(schema, query).await).unwrap()
    }

    #[tokio::test]
    async fn test_user_relations_match_foreign_keys() {
        let schema = schema();
        let value = run(
            &schema,
            r#"{ users(query: "nazli") { id posts { id } comments { id post { id } } } }"#,
        )
        .await;

        let user = &value["data"]["users"][0];
        assert_eq!(user["id"], "1");

        let post_ids: Vec<&str> = user["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(post_ids, vec!["1", "3"]);

        let comment_ids: Vec<&str> = user["comments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(comment_ids, vec!["1", "2"]);
        assert_eq!(user["comments"][1]["post"]["id"], "2");
    }

    #[tokio::test]
    async fn test_post_relations_match_foreign_keys() {
        let schema = schema();
        let value = run(
            &schema,
            r#"{ posts(query: "1") { author { name } comments { id author { name } } } }"#,
        )
        .await;

        let post = &value["data"]["posts"][0];
        assert_eq!(post["author"]["name"], "Nazli");
        let comments = post["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0]["id"], "1");
        assert_eq!(comments[1]["author"]["name"], "Moby");
    }

    #[tokio::test]
    async fn test_comment_lookup_by_pk() {
        let schema = schema();
        let value = run(
            &schema,
            r#"{ comments(pk: "4") { text author { name } post { title } } }"#,
        )
        .await;

        let comment = &value["data"]["comments"][0];
        assert_eq!(comment["text"], "to be honest, it is very funny");
        assert_eq!(comment["author"]["name"], "Sarah");
        assert_eq!(comment["post"]["title"], "MERNG Stack");
    }

    #[tokio::test]
    async fn test_mutation_error_message_surfaces() {
        let schema = schema();
        let value = run(
            &schema,
            r#"mutation { createUser(data: { name: "X", email: "sara@sample.com" }) { id } }"#,
        )
        .await;

        assert!(value["data"].is_null());
        assert_eq!(
            value["errors"][0]["message"],
            "A user with sara@sample.com already exists"
        );
    }
}
