//! Normalized shapes of backend responses
//!
//! Every body the dashboard consumes is decoded into one of these types. A
//! body that does not match fails with [`Error::UnexpectedResponse`] instead
//! of being probed for alternative layouts.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use venuedesk_core::{BulkResult, EntityId, Error, Result};

/// One row of an entity collection
///
/// Only `id` is interpreted; everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Backend identifier, numeric ids are kept in their decimal form
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,

    /// Remaining fields as the backend sent them
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EntityRecord {
    /// Record with an id and no other fields
    #[must_use]
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Text(id) if id.trim().is_empty() => Err(de::Error::custom("empty entity id")),
        RawId::Text(id) => Ok(id),
        RawId::Signed(id) => Ok(id.to_string()),
        RawId::Unsigned(id) => Ok(id.to_string()),
    }
}

/// List endpoint body: `{ "data": [...], "total": n }`
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    data: Vec<EntityRecord>,
    #[serde(default)]
    total: Option<u64>,
}

/// One page of an entity collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityPage {
    /// Rows on this page
    pub items: Vec<EntityRecord>,
    /// Size of the whole collection
    pub total: u64,
}

impl EntityPage {
    /// Decode a list response
    ///
    /// A missing `total` means the page holds the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the body is not a list
    /// envelope.
    pub fn from_response(endpoint: &str, body: Value) -> Result<Self> {
        let envelope: ListEnvelope = decode(endpoint, body)?;
        let total = envelope
            .total
            .unwrap_or(envelope.data.len() as u64)
            .max(envelope.data.len() as u64);
        Ok(Self {
            items: envelope.data,
            total,
        })
    }
}

/// Body of a bulk delete request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// Ids to delete
    pub ids: Vec<EntityId>,
}

/// Bulk delete endpoint body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkDeleteResponse {
    /// Ids the backend removed
    pub success_count: usize,
    /// Ids the backend rejected
    pub failed_count: usize,
    /// Which ids were rejected, when the backend says
    #[serde(default)]
    pub failed_ids: Vec<EntityId>,
}

impl BulkDeleteResponse {
    /// Decode a bulk delete response
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] if the body does not carry both
    /// counts.
    pub fn from_response(endpoint: &str, body: Value) -> Result<Self> {
        decode(endpoint, body)
    }

    /// Aggregate against the number of ids actually submitted
    ///
    /// Counts that do not add up to the submission are logged; the success
    /// count wins and the failures are derived from it.
    #[must_use]
    pub fn into_result(self, submitted: usize) -> BulkResult {
        if self.success_count + self.failed_count != submitted {
            warn!(
                submitted,
                success_count = self.success_count,
                failed_count = self.failed_count,
                "bulk delete counts do not match submission"
            );
        }
        BulkResult::new(submitted, self.success_count)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| Error::UnexpectedResponse {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_list_envelope_with_total() {
        let page = EntityPage::from_response(
            "/clubs",
            json!({"data": [{"id": 7, "name": "Riverside"}, {"id": "c-2"}], "total": 42}),
        )
        .unwrap();

        assert_eq!(page.total, 42);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items.first().unwrap().id, "7");
        assert_eq!(page.items.first().unwrap().fields.get("name"), Some(&json!("Riverside")));
        assert_eq!(page.items.get(1).unwrap().id, "c-2");
    }

    #[test]
    fn test_list_envelope_without_total() {
        let page = EntityPage::from_response("/clubs", json!({"data": [{"id": 1}]})).unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_bare_array_is_rejected() {
        let err = EntityPage::from_response("/clubs", json!([{"id": 1}])).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { ref endpoint, .. } if endpoint == "/clubs"));
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        let err = EntityPage::from_response("/players", json!({"data": [{"name": "x"}]})).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));

        let err = EntityPage::from_response("/players", json!({"data": [{"id": " "}]})).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_bulk_response() {
        let response = BulkDeleteResponse::from_response(
            "/clubs/bulk-delete",
            json!({"success_count": 3, "failed_count": 2, "failed_ids": ["4", "5"]}),
        )
        .unwrap();

        assert_eq!(response.failed_ids, vec!["4", "5"]);
        let result = response.into_result(5);
        assert_eq!(result.success_count(), 3);
        assert_eq!(result.failed_count(), 2);
    }

    #[test]
    fn test_bulk_response_counts_are_reconciled() {
        let response = BulkDeleteResponse::from_response(
            "/clubs/bulk-delete",
            json!({"success_count": 9, "failed_count": 0}),
        )
        .unwrap();

        let result = response.into_result(4);
        assert_eq!(result.success_count(), 4);
        assert_eq!(result.total(), 4);
    }

    #[test]
    fn test_bulk_response_requires_counts() {
        let err = BulkDeleteResponse::from_response("/clubs/bulk-delete", json!({"deleted": 3}))
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));
    }
}
