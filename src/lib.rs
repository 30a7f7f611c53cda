//! # Pix Receivers
//!
//! A GraphQL CRUD service for managing payment receivers with Pix keys,
//! backed by a document database.
//!
//! ## Architecture
//!
//! - **core**: pure domain logic — the `Receiver` entity, the Pix key-type
//!   registry, validation predicates, the cursor pagination engine, and the
//!   status-gated update policy
//! - **service**: `ReceiverService` use cases over an injected repository
//! - **storage**: the `ReceiverRepository` trait with in-memory (default)
//!   and MongoDB (`mongodb_backend` feature) implementations
//! - **server**: axum + async-graphql exposure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pix_receivers::prelude::*;
//!
//! let repository = Arc::new(InMemoryReceiverRepository::new());
//! let service = Arc::new(ReceiverService::new(repository));
//! let app = GraphQLExposure::build_router(service);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod service;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            NotFoundError, PolicyError, ReceiverError, ReceiverResult, StorageError,
            ValidationError,
        },
        pagination::{Connection, DEFAULT_PAGE_SIZE, Edge, PageInfo},
        pix::{Pix, PixKeyType},
        receiver::{Receiver, Status},
        update::{UpdateField, UpdateReceiverInput},
        validation::ValidationOptions,
    };

    // === Service ===
    pub use crate::service::{CreateReceiverInput, ReceiverService};

    // === Storage ===
    pub use crate::storage::{InMemoryReceiverRepository, ReceiverFilter, ReceiverRepository};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoReceiverRepository;

    // === Server ===
    pub use crate::server::{GraphQLExposure, ReceiversSchema, build_schema};

    // === Config ===
    pub use crate::config::AppConfig;

    // === External dependencies ===
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
