//! Pet repository over the SurrealDB client
//!
//! By-UID lookups are case-insensitive exact matches: the parameter is
//! lowercased in Rust and compared against `string::lowercase(pet_uid)` as
//! plain equality. User input is only ever bound as a query parameter, never
//! spliced into query text.

use std::sync::Arc;

use super::error::{
    RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult,
};
use crate::models::{CreatePetRequest, Pet, PetPatch, PetRecord, PetRow, UpdatePetRequest};
use crate::store::SurrealClient;

/// Store-capability handle for Pet records, passed to handlers through
/// application state
#[derive(Clone)]
pub struct PetRepository {
    client: Arc<SurrealClient>,
}

impl PetRepository {
    /// Create a new repository over the given client
    pub fn new(client: Arc<SurrealClient>) -> Self {
        Self { client }
    }

    /// Fetch every pet record, store-defined order
    pub async fn find_all(&self) -> RepositoryResult<Vec<Pet>> {
        let mut response = self
            .client
            .query("SELECT * FROM pets")
            .await
            .map_err(|e| {
                RepositoryError::from(e).with_operation(RepositoryOperation::FindAll)
            })?;

        let rows: Vec<PetRow> = response.take(0).map_err(|e| {
            RepositoryError::serialization_error(RepositoryOperation::FindAll, e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Find a single pet whose UID matches `uid` case-insensitively
    pub async fn find_by_uid(&self, uid: &str) -> RepositoryResult<Option<Pet>> {
        let mut response = self
            .client
            .query("SELECT * FROM pets WHERE string::lowercase(pet_uid) = $uid")
            .bind(("uid", uid.to_lowercase()))
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation(RepositoryOperation::FindOne)
                    .with_entity("Pet", uid)
            })?;

        let rows: Vec<PetRow> = response.take(0).map_err(|e| {
            RepositoryError::serialization_error(RepositoryOperation::FindOne, e.to_string())
        })?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    /// Insert a new pet record; the store assigns the record id
    pub async fn create(&self, data: CreatePetRequest) -> RepositoryResult<Pet> {
        let record = PetRecord::from(data);

        let mut response = self
            .client
            .query("CREATE pets CONTENT $data")
            .bind(("data", record))
            .await
            .map_err(|e| {
                RepositoryError::from(e).with_operation(RepositoryOperation::Create)
            })?;

        let rows: Vec<PetRow> = response.take(0).map_err(|e| {
            // Engine-level rejections (schema asserts, unique index) surface
            // here rather than on the statement itself
            RepositoryError::from(e).with_operation(RepositoryOperation::Create)
        })?;

        rows.into_iter().next().map(Into::into).ok_or_else(|| {
            RepositoryError::new(
                RepositoryOperation::Create,
                RepositoryErrorKind::Other,
                "Create returned no record",
            )
        })
    }

    /// Merge `patch` into the pet whose UID matches `uid` case-insensitively
    ///
    /// Lookup and merge happen in a single statement so there is no
    /// read-modify-write window. Returns the post-update record, or `None`
    /// when no record matched.
    pub async fn update_by_uid(
        &self,
        uid: &str,
        patch: UpdatePetRequest,
    ) -> RepositoryResult<Option<Pet>> {
        let mut response = self
            .client
            .query("UPDATE pets MERGE $patch WHERE string::lowercase(pet_uid) = $uid RETURN AFTER")
            .bind(("uid", uid.to_lowercase()))
            .bind(("patch", PetPatch::from(patch)))
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation(RepositoryOperation::Update)
                    .with_entity("Pet", uid)
            })?;

        let rows: Vec<PetRow> = response.take(0).map_err(|e| {
            RepositoryError::from(e).with_operation(RepositoryOperation::Update)
        })?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    /// Delete the pet whose UID matches `uid` case-insensitively
    ///
    /// Returns `true` if a record was removed, `false` if none matched.
    pub async fn delete_by_uid(&self, uid: &str) -> RepositoryResult<bool> {
        let mut response = self
            .client
            .query("DELETE pets WHERE string::lowercase(pet_uid) = $uid RETURN BEFORE")
            .bind(("uid", uid.to_lowercase()))
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation(RepositoryOperation::Delete)
                    .with_entity("Pet", uid)
            })?;

        let rows: Vec<PetRow> = response.take(0).map_err(|e| {
            RepositoryError::from(e).with_operation(RepositoryOperation::Delete)
        })?;

        Ok(!rows.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::store;

    fn mem_config(enforce_unique_uid: bool) -> StoreConfig {
        StoreConfig {
            url: "mem://".to_string(),
            namespace: "test".to_string(),
            database: "test".to_string(),
            username: None,
            password: None,
            max_retries: 0,
            retry_delay_secs: 1,
            enforce_unique_uid,
        }
    }

    async fn test_repo(enforce_unique_uid: bool) -> PetRepository {
        let config = mem_config(enforce_unique_uid);
        let client = store::create_client(&config).await.unwrap();
        store::init_schema(&client, &config).await.unwrap();
        PetRepository::new(Arc::new(client))
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

    fn bruno() -> CreatePetRequest {
        CreatePetRequest {
            pet_name: "Bruno".to_string(),
            pet_type: "Dog".to_string(),
            pet_uid: "bruno@1".to_string(),
            age: 2,
            vaccination_status: true,
            availability_status: true,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = test_repo(false).await;
        let pet = repo.create(zeus()).await.unwrap();
        assert!(!pet.id.is_empty());
        assert_eq!(pet.pet_name, "Zeus");
        assert_eq!(pet.pet_uid, "zeus@1");
        assert_eq!(pet.age, 5);
        assert!(!pet.vaccination_status);
        assert!(pet.availability_status);
    }

    #[tokio::test]
    async fn test_find_all_contains_created() {
        let repo = test_repo(false).await;
        let created = repo.create(zeus()).await.unwrap();
        repo.create(bruno()).await.unwrap();

        let pets = repo.find_all().await.unwrap();
        assert_eq!(pets.len(), 2);

        let matches: Vec<_> = pets.iter().filter(|p| p.pet_uid == "zeus@1").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, created.id);
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let repo = test_repo(false).await;
        let pets = repo.find_all().await.unwrap();
        assert!(pets.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_uid_exact_match() {
        let repo = test_repo(false).await;
        repo.create(bruno()).await.unwrap();

        let found = repo.find_by_uid("bruno@1").await.unwrap();
        assert_eq!(found.unwrap().pet_name, "Bruno");
    }

    #[tokio::test]
    async fn test_find_by_uid_is_case_insensitive() {
        let repo = test_repo(false).await;
        repo.create(bruno()).await.unwrap();

        let found = repo.find_by_uid("BRUNO@1").await.unwrap();
        assert_eq!(found.unwrap().pet_name, "Bruno");

        let found = repo.find_by_uid("Bruno@1").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_find_by_uid_rejects_partial_match() {
        let repo = test_repo(false).await;
        repo.create(bruno()).await.unwrap();

        assert!(repo.find_by_uid("bruno@1x").await.unwrap().is_none());
        assert!(repo.find_by_uid("bruno@").await.unwrap().is_none());
        assert!(repo.find_by_uid("runo@1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_uid_absent() {
        let repo = test_repo(false).await;
        assert!(repo.find_by_uid("nobody@1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_only_given_fields() {
        let repo = test_repo(false).await;
        let created = repo.create(zeus()).await.unwrap();

        let patch = UpdatePetRequest {
            age: Some(6),
            vaccination_status: Some(true),
            ..Default::default()
        };
        let updated = repo.update_by_uid("zeus@1", patch).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.age, 6);
        assert!(updated.vaccination_status);
        // Untouched fields keep their values
        assert_eq!(updated.pet_name, "Zeus");
        assert_eq!(updated.pet_type, "Cat");
        assert_eq!(updated.pet_uid, "zeus@1");
        assert!(updated.availability_status);
    }

    #[tokio::test]
    async fn test_update_is_case_insensitive() {
        let repo = test_repo(false).await;
        repo.create(zeus()).await.unwrap();

        let patch = UpdatePetRequest {
            availability_status: Some(false),
            ..Default::default()
        };
        let updated = repo.update_by_uid("ZEUS@1", patch).await.unwrap();
        assert!(!updated.unwrap().availability_status);
    }

    #[tokio::test]
    async fn test_update_absent_returns_none() {
        let repo = test_repo(false).await;
        let patch = UpdatePetRequest {
            age: Some(9),
            ..Default::default()
        };
        assert!(repo.update_by_uid("nobody@1", patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_then_find_returns_none() {
        let repo = test_repo(false).await;
        repo.create(zeus()).await.unwrap();

        assert!(repo.delete_by_uid("ZEUS@1").await.unwrap());
        assert!(repo.find_by_uid("zeus@1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_not_found() {
        let repo = test_repo(false).await;
        repo.create(zeus()).await.unwrap();

        assert!(repo.delete_by_uid("zeus@1").await.unwrap());
        // Second delete reports nothing removed
        assert!(!repo.delete_by_uid("zeus@1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_absent_returns_false() {
        let repo = test_repo(false).await;
        assert!(!repo.delete_by_uid("nobody@1").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_uid_allowed_by_default() {
        let repo = test_repo(false).await;
        repo.create(zeus()).await.unwrap();
        // No uniqueness enforcement unless the store index is UNIQUE
        assert!(repo.create(zeus()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate_uid() {
        let repo = test_repo(true).await;
        repo.create(zeus()).await.unwrap();

        let result = repo.create(zeus()).await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind,
            RepositoryErrorKind::ConstraintViolation
        );
    }
}
