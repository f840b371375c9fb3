//! GraphQL API for the blog.
//!
//! ## Example
//!
//! ```graphql
//! # Filtered list with relations
//! { users(query: "mo") { name posts { title comments { text } } } }
//!
//! # Mutation with an input object
//! mutation { createPost(data: { title: "Hi", body: "...", author: "1", published: true }) { id } }
//!
//! # Ticking counter (over /ws)
//! subscription { count }
//! ```

pub mod mutation;
pub mod query;
pub mod schema;
pub mod subscription;

use async_graphql::{Request, Schema, Variables};
use std::sync::Arc;

use crate::config::Config;
use crate::store::Store;
use mutation::Mutation;
use query::Query;
use subscription::{create_event_channel, SubscriptionRoot};

pub use subscription::{BlogEvent, EventSender, MutationKind};

/// The blog GraphQL schema type
pub type BlogSchema = Schema<Query, Mutation, SubscriptionRoot>;

/// Build the GraphQL schema with the store and an event channel as context
pub fn build_schema(store: Arc<Store>, config: &Config) -> BlogSchema {
    let events = create_event_channel(config.subscription.channel_capacity);
    Schema::build(Query, Mutation, SubscriptionRoot)
        .data(store)
        .data(events)
        .data(config.subscription.clone())
        .limit_depth(config.schema.depth_limit)
        .limit_complexity(config.schema.complexity_limit)
        .finish()
}

/// Execute a GraphQL document and return the JSON response
pub async fn execute(schema: &BlogSchema, query: &str) -> String {
    execute_with_variables(schema, query, Variables::default()).await
}

pub async fn execute_with_variables(
    schema: &BlogSchema,
    query: &str,
    variables: Variables,
) -> String {
    let result = schema
        .execute(Request::new(query).variables(variables))
        .await;
    serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_schema() -> BlogSchema {
        build_schema(Arc::new(Store::seeded()), &Config::default())
    }

    #[tokio::test]
    async fn test_stats_query() {
        let schema = seeded_schema();

        let result = execute(&schema, "{ stats { users posts comments } }").await;

        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["data"]["stats"]["users"], 3);
        assert_eq!(value["data"]["stats"]["posts"], 4);
        assert_eq!(value["data"]["stats"]["comments"], 5);
    }

    #[tokio::test]
    async fn test_users_query_no_match() {
        let schema = seeded_schema();

        let result = execute(&schema, r#"{ users(query: "nonexistent") { name } }"#).await;

        // Should return empty array, no errors
        assert!(result.contains("users"));
        assert!(!result.contains("errors"));
    }

    #[tokio::test]
    async fn test_fixed_fields_ignore_store() {
        let schema = build_schema(Arc::new(Store::new()), &Config::default());

        let result = execute(&schema, "{ me { id name } post { id author { id } } }").await;
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["data"]["me"]["name"], "Django Khan");
        assert_eq!(value["data"]["post"]["id"], "558");
        assert!(value["data"]["post"]["author"].is_null());
    }

    #[tokio::test]
    async fn test_fixed_post_and_seeded_text() {
        let schema = seeded_schema();

        let result = execute(
            &schema,
            r#"{ post { title } posts(query: "2") { title body } }"#,
        )
        .await;
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(
            value["data"]["post"]["title"],
            "Beginner's tutorial for GraphQL with NodeJs"
        );
        assert_eq!(value["data"]["posts"][0]["title"], "How to GraphQL ");
        assert_eq!(
            value["data"]["posts"][0]["body"],
            "It is easy to learn about graphQL since so many libraries are available"
        );
    }

    #[tokio::test]
    async fn test_variables_are_passed_through() {
        let schema = seeded_schema();
        let vars = Variables::from_json(serde_json::json!({ "id": "3" }));

        let result =
            execute_with_variables(&schema, "query($id: ID!) { user(id: $id) { name } }", vars)
                .await;
        assert!(result.contains("Sarah"));
    }

    #[tokio::test]
    async fn test_depth_limit_rejects_deep_queries() {
        let mut config = Config::default();
        config.schema.depth_limit = 3;
        let schema = build_schema(Arc::new(Store::seeded()), &config);

        let result = execute(
            &schema,
            "{ users { posts { author { posts { title } } } } }",
        )
        .await;
        assert!(result.contains("errors"));
    }
}
