//! GraphQL API exposure
//!
//! Builds the axum router serving the GraphQL endpoint and the playground.
//! All GraphQL-specific wiring lives here, separate from the core logic.

pub mod schema;

use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::ReceiverService;
pub use schema::{ReceiversSchema, build_schema};

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router for a service.
    ///
    /// Routes:
    /// - `POST /graphql` — the API endpoint
    /// - `GET /` — GraphQL playground pointed at `/graphql`
    pub fn build_router(service: Arc<ReceiverService>) -> Router {
        let schema = build_schema(service);

        Router::new()
            .route("/", get(playground))
            .route("/graphql", post(graphql_handler))
            .with_state(schema)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }
}

async fn graphql_handler(
    State(schema): State<ReceiversSchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

async fn playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
