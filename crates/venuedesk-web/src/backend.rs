//! Entity operations the dashboard needs from the REST backend

use crate::dto::EntityPage;
use crate::pagination::Pagination;
use async_trait::async_trait;
use venuedesk_core::{BulkResult, EntityId, EntityKind, Result};

/// Backend collection operations
#[async_trait]
pub trait EntityBackend: Send + Sync {
    /// Fetch one page of a collection
    async fn list(&self, kind: EntityKind, pagination: &Pagination) -> Result<EntityPage>;

    /// Delete `ids` through the collection's bulk endpoint
    ///
    /// An `Err` means the call itself failed and no per-id outcome is known.
    async fn delete_batch(&self, kind: EntityKind, ids: &[EntityId]) -> Result<BulkResult>;

    /// Delete a single entity
    async fn delete_one(&self, kind: EntityKind, id: &str) -> Result<()>;
}
