//! HTTP server: GraphQL over axum.
//!
//! Routes:
//! - `POST /graphql`: execute a request
//! - `GET /graphql`: GraphiQL playground
//! - `/ws`: GraphQL-over-WebSocket subscriptions
//! - `/health`: liveness probe

use anyhow::{Context as _, Result};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tracing::info;

use crate::graphql::BlogSchema;

async fn graphql_handler(State(schema): State<BlogSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/ws")
            .finish(),
    )
}

async fn health() -> &'static str {
    "OK"
}

/// Build the router for a schema.
pub fn router(schema: BlogSchema) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route_service("/ws", GraphQLSubscription::new(schema.clone()))
        .route("/health", get(health))
        .with_state(schema)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(schema: BlogSchema, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr, "GraphQL server listening at http://{}/graphql", addr);

    axum::serve(listener, router(schema))
        .await
        .context("server error")?;
    Ok(())
}
