//! Request handlers for the Pet resource

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{CreatePetRequest, Pet, UpdatePetRequest};
use crate::repository::RepositoryError;
use crate::responses::{Created, MessageResponse};
use crate::state::AppState;

const FETCH_NOT_FOUND: &str = "No Pet found with the specified UID";
const PET_NOT_FOUND: &str = "Pet not found";
const PET_DELETED: &str = "Pet Deleted Successfully!";
// Generic message earlier deployments returned for any failure on the
// by-UID routes; kept for legacy_error_mapping mode
const LEGACY_STORE_FAILURE: &str = "No Pet found with the specified name.";

/// List all pets
///
/// Returns every record in the pets table, store-defined order.
pub async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<Pet>>> {
    let pets = state.pets().find_all().await?;
    Ok(Json(pets))
}

/// Fetch a single pet by UID
///
/// The match is case-insensitive and exact: `ZEUS@1` finds `zeus@1`,
/// `zeus@1x` finds nothing.
pub async fn fetch_pet(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Pet>> {
    match state.pets().find_by_uid(&uid).await {
        Ok(Some(pet)) => Ok(Json(pet)),
        Ok(None) => Err(Error::NotFound(FETCH_NOT_FOUND.to_string())),
        Err(e) => Err(store_failure(&state, e)),
    }
}

/// Add a new pet
///
/// The store assigns the record id. No uniqueness check on `petUID` happens
/// here; when the store index is UNIQUE the engine rejects duplicates itself.
pub async fn create_pet(
    State(state): State<AppState>,
    Json(request): Json<CreatePetRequest>,
) -> Result<Created<Pet>> {
    let pet = state.pets().create(request).await?;

    info!(uid = %pet.pet_uid, id = %pet.id, "Pet created");

    let location = format!("/api/pets/{}", pet.pet_uid);
    Ok(Created::new(pet).with_location(location))
}

/// Update a pet by UID
///
/// Body fields that are present replace the stored values; absent fields are
/// kept. Lookup and merge are a single store statement, so the record id
/// never changes and there is no read-modify-write window.
pub async fn update_pet(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(request): Json<UpdatePetRequest>,
) -> Result<Json<Pet>> {
    match state.pets().update_by_uid(&uid, request).await {
        Ok(Some(pet)) => Ok(Json(pet)),
        Ok(None) => Err(Error::NotFound(PET_NOT_FOUND.to_string())),
        Err(e) => Err(store_failure(&state, e)),
    }
}

/// Delete a pet by UID
///
/// Deleting an already-removed UID reports NotFound, not a repeated success.
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<MessageResponse>> {
    match state.pets().delete_by_uid(&uid).await {
        Ok(true) => {
            info!(uid = %uid, "Pet deleted");
            Ok(Json(MessageResponse::new(PET_DELETED)))
        }
        Ok(false) => Err(Error::NotFound(PET_NOT_FOUND.to_string())),
        Err(e) => Err(store_failure(&state, e)),
    }
}

/// Map a store failure on the by-UID routes according to configuration.
///
/// Earlier deployments reported every failure on these routes as 404,
/// hiding real store errors from clients. `api.legacy_error_mapping` keeps
/// that behavior for clients that depend on it; otherwise the failure
/// surfaces as a 500 with the store error detail.
fn store_failure(state: &AppState, err: RepositoryError) -> Error {
    if state.config().api.legacy_error_mapping {
        tracing::error!(
            operation = %err.operation,
            kind = %err.kind,
            "Store failure reported as not-found for legacy clients: {}",
            err.message
        );
        Error::NotFound(LEGACY_STORE_FAILURE.to_string())
    } else {
        Error::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::repository::{RepositoryErrorKind, RepositoryOperation};

    async fn test_state(legacy_error_mapping: bool) -> AppState {
        let mut config = Config::default();
        config.store.url = "mem://".to_string();
        config.store.max_retries = 0;
        config.api.legacy_error_mapping = legacy_error_mapping;

        AppState::builder().config(config).build().await.unwrap()
    }

    fn zeus() -> CreatePetRequest {
        CreatePetRequest {
            pet_name: "Zeus".to_string(),
            pet_type: "Cat".to_string(),
            pet_uid: "zeus@1".to_string(),
            age: 5,
            vaccination_status: false,
            availability_status: true,
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let state = test_state(false).await;

        let created = create_pet(State(state.clone()), Json(zeus()))
            .await
            .unwrap()
            .into_inner();
        assert!(!created.id.is_empty());
        assert_eq!(created.pet_name, "Zeus");

        let Json(fetched) = fetch_pet(State(state), Path("zeus@1".to_string()))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_fetch_is_case_insensitive() {
        let state = test_state(false).await;
        create_pet(State(state.clone()), Json(zeus())).await.unwrap();

        let Json(fetched) = fetch_pet(State(state), Path("ZEUS@1".to_string()))
            .await
            .unwrap();
        assert_eq!(fetched.pet_uid, "zeus@1");
    }

    #[tokio::test]
    async fn test_fetch_unknown_uid_is_not_found() {
        let state = test_state(false).await;

        let err = fetch_pet(State(state), Path("unknown@1".to_string()))
            .await
            .unwrap_err();
        match err {
            Error::NotFound(msg) => assert_eq!(msg, FETCH_NOT_FOUND),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_contains_created_once() {
        let state = test_state(false).await;
        let created = create_pet(State(state.clone()), Json(zeus()))
            .await
            .unwrap()
            .into_inner();

        let Json(pets) = list_pets(State(state)).await.unwrap();
        let matches: Vec<_> = pets.iter().filter(|p| p.id == created.id).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pet_name, "Zeus");
    }

    #[tokio::test]
    async fn test_update_merges_partial_body() {
        let state = test_state(false).await;
        let created = create_pet(State(state.clone()), Json(zeus()))
            .await
            .unwrap()
            .into_inner();

        let patch = UpdatePetRequest {
            age: Some(6),
            ..Default::default()
        };
        let Json(updated) = update_pet(State(state), Path("zeus@1".to_string()), Json(patch))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.age, 6);
        assert_eq!(updated.pet_name, "Zeus");
        assert_eq!(updated.pet_type, "Cat");
    }

    #[tokio::test]
    async fn test_update_unknown_uid_is_not_found() {
        let state = test_state(false).await;

        let err = update_pet(
            State(state),
            Path("unknown@1".to_string()),
            Json(UpdatePetRequest::default()),
        )
        .await
        .unwrap_err();
        match err {
            Error::NotFound(msg) => assert_eq!(msg, PET_NOT_FOUND),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_then_fetch_is_not_found() {
        let state = test_state(false).await;
        create_pet(State(state.clone()), Json(zeus())).await.unwrap();

        let Json(body) = delete_pet(State(state.clone()), Path("zeus@1".to_string()))
            .await
            .unwrap();
        assert_eq!(body.message, PET_DELETED);

        assert!(fetch_pet(State(state), Path("zeus@1".to_string()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let state = test_state(false).await;
        create_pet(State(state.clone()), Json(zeus())).await.unwrap();

        delete_pet(State(state.clone()), Path("zeus@1".to_string()))
            .await
            .unwrap();

        let err = delete_pet(State(state), Path("zeus@1".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_uid_is_not_found() {
        let state = test_state(false).await;

        let err = delete_pet(State(state), Path("unknown@1".to_string()))
            .await
            .unwrap_err();
        match err {
            Error::NotFound(msg) => assert_eq!(msg, PET_NOT_FOUND),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_failure_mapping_strict() {
        let state = test_state(false).await;
        let err = RepositoryError::query_failed(RepositoryOperation::FindOne, "connection reset");

        match store_failure(&state, err) {
            Error::Store(e) => assert_eq!(e.kind, RepositoryErrorKind::QueryFailed),
            other => panic!("expected Store, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_failure_mapping_legacy() {
        let state = test_state(true).await;
        let err = RepositoryError::query_failed(RepositoryOperation::FindOne, "connection reset");

        match store_failure(&state, err) {
            Error::NotFound(msg) => assert_eq!(msg, LEGACY_STORE_FAILURE),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
