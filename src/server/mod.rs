//! Server module exposing the API over HTTP transports

pub mod graphql;

pub use graphql::{GraphQLExposure, ReceiversSchema, build_schema};
