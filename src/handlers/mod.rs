//! HTTP handlers for the pets API

use axum::{routing::get, Router};

use crate::state::AppState;

mod pets;

pub use pets::{create_pet, delete_pet, fetch_pet, list_pets, update_pet};

/// API routes, meant to be nested under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route(
            "/pets/{uid}",
            get(fetch_pet).put(update_pet).delete(delete_pet),
        )
}
