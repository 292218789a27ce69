//! Pet data models
//!
//! Two shapes exist on purpose: the wire types (`Pet`, request bodies) carry
//! the published camelCase field names, while the store-side record types use
//! snake_case document fields. Conversions live here so neither the handlers
//! nor the queries deal with the other side's naming.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// A pet as served to API clients.
///
/// Field names are the published contract. `vacinationStatus` keeps its
/// historical spelling; deployed clients depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Store-assigned record key
    pub id: String,

    #[serde(rename = "petName")]
    pub pet_name: String,

    #[serde(rename = "petType")]
    pub pet_type: String,

    #[serde(rename = "petUID")]
    pub pet_uid: String,

    pub age: u32,

    #[serde(rename = "vacinationStatus")]
    pub vaccination_status: bool,

    #[serde(rename = "availabilityStatus")]
    pub availability_status: bool,
}

/// Create request body
///
/// Every field is required; deserialization is the only validation performed
/// at this layer, the store schema does the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePetRequest {
    #[serde(rename = "petName")]
    pub pet_name: String,

    #[serde(rename = "petType")]
    pub pet_type: String,

    #[serde(rename = "petUID")]
    pub pet_uid: String,

    pub age: u32,

    #[serde(rename = "vacinationStatus")]
    pub vaccination_status: bool,

    #[serde(rename = "availabilityStatus")]
    pub availability_status: bool,
}

/// Update request body
///
/// Fields left out of the body keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePetRequest {
    #[serde(rename = "petName")]
    pub pet_name: Option<String>,

    #[serde(rename = "petType")]
    pub pet_type: Option<String>,

    #[serde(rename = "petUID")]
    pub pet_uid: Option<String>,

    pub age: Option<u32>,

    #[serde(rename = "vacinationStatus")]
    pub vaccination_status: Option<bool>,

    #[serde(rename = "availabilityStatus")]
    pub availability_status: Option<bool>,
}

/// Store-side document for inserts
#[derive(Debug, Serialize)]
pub(crate) struct PetRecord {
    pub pet_name: String,
    pub pet_type: String,
    pub pet_uid: String,
    pub age: u32,
    pub vaccination_status: bool,
    pub availability_status: bool,
}

/// Store-side row returned from queries
#[derive(Debug, Deserialize)]
pub(crate) struct PetRow {
    pub id: RecordId,
    pub pet_name: String,
    pub pet_type: String,
    pub pet_uid: String,
    pub age: u32,
    pub vaccination_status: bool,
    pub availability_status: bool,
}

/// Merge patch for updates
///
/// `None` fields are omitted from the serialized object so the store keeps
/// their current values. The record id is never part of the patch.
#[derive(Debug, Default, Serialize)]
pub(crate) struct PetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_uid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccination_status: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<bool>,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Self {
            id: row.id.key().to_string(),
            pet_name: row.pet_name,
            pet_type: row.pet_type,
            pet_uid: row.pet_uid,
            age: row.age,
            vaccination_status: row.vaccination_status,
            availability_status: row.availability_status,
        }
    }
}

impl From<CreatePetRequest> for PetRecord {
    fn from(request: CreatePetRequest) -> Self {
        Self {
            pet_name: request.pet_name,
            pet_type: request.pet_type,
            pet_uid: request.pet_uid,
            age: request.age,
            vaccination_status: request.vaccination_status,
            availability_status: request.availability_status,
        }
    }
}

impl From<UpdatePetRequest> for PetPatch {
    fn from(request: UpdatePetRequest) -> Self {
        Self {
            pet_name: request.pet_name,
            pet_type: request.pet_type,
            pet_uid: request.pet_uid,
            age: request.age,
            vaccination_status: request.vaccination_status,
            availability_status: request.availability_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_wire_field_names() {
        let pet = Pet {
            id: "8z7qtc0b4kfabcdefghij".to_string(),
            pet_name: "Zeus".to_string(),
            pet_type: "Cat".to_string(),
            pet_uid: "zeus@1".to_string(),
            age: 5,
            vaccination_status: false,
            availability_status: true,
        };

        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["petName"], "Zeus");
        assert_eq!(json["petType"], "Cat");
        assert_eq!(json["petUID"], "zeus@1");
        assert_eq!(json["age"], 5);
        assert_eq!(json["vacinationStatus"], false);
        assert_eq!(json["availabilityStatus"], true);
        assert!(json.get("pet_name").is_none());
    }

    #[test]
    fn test_create_request_requires_all_fields() {
        let body = serde_json::json!({
            "petName": "Zeus",
            "petType": "Cat",
            "petUID": "zeus@1",
            "age": 5,
            "vacinationStatus": false
        });
        // availabilityStatus missing
        assert!(serde_json::from_value::<CreatePetRequest>(body).is_err());
    }

    #[test]
    fn test_create_request_rejects_negative_age() {
        let body = serde_json::json!({
            "petName": "Zeus",
            "petType": "Cat",
            "petUID": "zeus@1",
            "age": -1,
            "vacinationStatus": false,
            "availabilityStatus": true
        });
        assert!(serde_json::from_value::<CreatePetRequest>(body).is_err());
    }

    #[test]
    fn test_update_request_partial_body() {
        let body = serde_json::json!({"age": 6});
        let request: UpdatePetRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.age, Some(6));
        assert!(request.pet_name.is_none());
        assert!(request.vaccination_status.is_none());
    }

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = PetPatch::from(UpdatePetRequest {
            age: Some(6),
            ..Default::default()
        });
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"age": 6}));
    }

    #[test]
    fn test_empty_patch_serializes_to_empty_object() {
        let patch = PetPatch::from(UpdatePetRequest::default());
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
