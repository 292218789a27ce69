//! # pets-api
//!
//! REST API over the paws pet registry. Exposes CRUD operations on the `Pet`
//! resource, backed by SurrealDB. The handlers are a thin mapping layer: the
//! store provides document storage and indexing, axum provides routing, and
//! this crate wires the two together with the usual service plumbing
//! (configuration, tracing, health probes, graceful shutdown).
//!
//! ## Example
//!
//! ```rust,no_run
//! use pets_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load_for_service("pets-api")?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     // Build application state (connects the store, bootstraps the schema)
//!     let state = AppState::builder()
//!         .config(config.clone())
//!         .build()
//!         .await?;
//!
//!     // Create router
//!     let app = Router::new()
//!         .nest("/api", handlers::routes())
//!         .route("/health", get(health))
//!         .route("/ready", get(readiness))
//!         .with_state(state);
//!
//!     // Run server
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod responses;
pub mod server;
pub mod state;
pub mod store;

/// Commonly used types for building and running the service
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handlers;
    pub use crate::health::{health, readiness};
    pub use crate::models::{CreatePetRequest, Pet, UpdatePetRequest};
    pub use crate::observability::init_tracing;
    pub use crate::responses::{Created, MessageResponse};
    pub use crate::server::Server;
    pub use crate::state::AppState;

    pub use axum::{
        extract::{Path, State},
        routing::{delete, get, post, put},
        Json, Router,
    };
    pub use tracing::{debug, error, info, warn};
}
