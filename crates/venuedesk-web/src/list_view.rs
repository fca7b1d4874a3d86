//! Page state of one entity collection

use crate::backend::EntityBackend;
use crate::bulk::{BulkCoordinator, BulkOutcome};
use crate::dto::EntityRecord;
use crate::pagination::{Pagination, PaginationMeta};
use crate::selection::SelectionSet;
use tracing::debug;
use venuedesk_core::{EntityKind, Error, Result};

/// Displayed rows, their pagination and the user's selection
///
/// The selection only ever holds ids of rows currently displayed.
#[derive(Debug, Clone)]
pub struct EntityListView {
    kind: EntityKind,
    pagination: Pagination,
    items: Vec<EntityRecord>,
    meta: PaginationMeta,
    selection: SelectionSet,
}

impl EntityListView {
    /// Empty view of `kind`; call [`refresh`](Self::refresh) to load it
    #[must_use]
    pub fn new(kind: EntityKind, pagination: Pagination) -> Self {
        Self {
            kind,
            pagination,
            items: Vec::new(),
            meta: PaginationMeta::new(&pagination, 0),
            selection: SelectionSet::new(),
        }
    }

    /// Collection shown
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Rows on the current page
    #[must_use]
    pub fn items(&self) -> &[EntityRecord] {
        &self.items
    }

    /// Pagination metadata of the loaded page
    #[must_use]
    pub const fn meta(&self) -> &PaginationMeta {
        &self.meta
    }

    /// Selected rows
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Switch to another page; the selection is dropped with the old rows
    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination;
        self.selection.clear();
    }

    /// Load the current page
    ///
    /// Selected ids that are no longer displayed are deselected. On error
    /// the previous rows stay in place.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the page cannot be fetched.
    pub async fn refresh(&mut self, backend: &dyn EntityBackend) -> Result<()> {
        let page = backend.list(self.kind, &self.pagination).await?;
        debug!(kind = %self.kind, rows = page.items.len(), total = page.total, "list loaded");

        self.meta = PaginationMeta::new(&self.pagination, page.total);
        self.items = page.items;
        let items = &self.items;
        self.selection
            .retain(|id| items.iter().any(|record| record.id == id));
        Ok(())
    }

    fn is_displayed(&self, id: &str) -> bool {
        self.items.iter().any(|record| record.id == id)
    }

    /// Flip the selection of a displayed row, returning whether it is
    /// selected afterwards
    ///
    /// Ids that are not displayed are ignored.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.is_displayed(id) && self.selection.toggle(id)
    }

    /// Select the given ids
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first id that is not on the
    /// current page; the selection is left unchanged in that case.
    pub fn select<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let ids: Vec<&str> = ids.into_iter().collect();
        if let Some(unknown) = ids.iter().find(|id| !self.is_displayed(id)) {
            return Err(Error::Validation {
                field: "ids".to_string(),
                message: format!("{unknown} is not on the current page"),
            });
        }
        for id in ids {
            self.selection.insert(id);
        }
        Ok(())
    }

    /// Select every displayed row
    pub fn select_all(&mut self) {
        for record in &self.items {
            self.selection.insert(record.id.clone());
        }
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete the selection and reload the page once the backend answered
    ///
    /// The page is re-fetched exactly once after a completed action and not
    /// at all when the action failed or was skipped. A failed reload is
    /// reported through the coordinator's notifier.
    pub async fn bulk_delete(&mut self, coordinator: &BulkCoordinator<'_>) -> BulkOutcome {
        let outcome = coordinator.delete(self.kind, &mut self.selection).await;

        if outcome.is_completed()
            && let Err(e) = self.refresh(coordinator.backend()).await
        {
            coordinator.report_load_failure(self.kind, &e);
        }
        outcome
    }
}
