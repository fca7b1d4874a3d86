//! In-memory backend for unit tests

#![allow(clippy::unwrap_used)]

use crate::backend::EntityBackend;
use crate::dto::{EntityPage, EntityRecord};
use crate::pagination::Pagination;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use venuedesk_core::{BulkResult, EntityId, EntityKind, Error, Result};
use venuedesk_i18n::{Language, LanguageContext, MemoryStore, TranslationDictionary};

/// English context backed by a memory store
pub(crate) fn english() -> LanguageContext {
    LanguageContext::new(
        Arc::new(TranslationDictionary::builtin().unwrap()),
        Arc::new(MemoryStore::new()),
        Language::En,
    )
}

/// One collection held in memory; ids in `rejected` refuse to be deleted
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    records: Mutex<Vec<EntityRecord>>,
    rejected: HashSet<EntityId>,
    down: AtomicBool,
    down_after_delete: AtomicBool,
    list_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    delete_one_calls: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn with_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            records: Mutex::new(ids.into_iter().map(|id| EntityRecord::new(id.to_string())).collect()),
            ..Self::default()
        }
    }

    pub(crate) fn rejecting<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.rejected = ids.into_iter().map(ToString::to_string).collect();
        self
    }

    pub(crate) fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// The next delete goes through and takes the backend down with it
    pub(crate) fn go_down_after_delete(&self) {
        self.down_after_delete.store(true, Ordering::SeqCst);
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn delete_one_calls(&self) -> usize {
        self.delete_one_calls.load(Ordering::SeqCst)
    }

    fn check_up(&self) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(Error::Transport {
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn remove(&self, id: &str) -> bool {
        if self.rejected.contains(id) {
            return false;
        }
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|record| record.id != id);
        records.len() < before
    }
}

#[async_trait]
impl EntityBackend for FakeBackend {
    async fn list(&self, _kind: EntityKind, pagination: &Pagination) -> Result<EntityPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_up()?;
        let records = self.records.lock();
        let offset = usize::try_from(pagination.offset()).unwrap();
        let limit = usize::try_from(pagination.limit()).unwrap();
        Ok(EntityPage {
            items: records.iter().skip(offset).take(limit).cloned().collect(),
            total: records.len() as u64,
        })
    }

    async fn delete_batch(&self, _kind: EntityKind, ids: &[EntityId]) -> Result<BulkResult> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_up()?;
        let removed = ids.iter().filter(|id| self.remove(id)).count();
        if self.down_after_delete.load(Ordering::SeqCst) {
            self.set_down(true);
        }
        Ok(BulkResult::new(ids.len(), removed))
    }

    async fn delete_one(&self, _kind: EntityKind, id: &str) -> Result<()> {
        self.delete_one_calls.fetch_add(1, Ordering::SeqCst);
        self.check_up()?;
        if self.remove(id) {
            if self.down_after_delete.load(Ordering::SeqCst) {
                self.set_down(true);
            }
            Ok(())
        } else {
            Err(Error::Api {
                status: 409,
                message: format!("{id} cannot be deleted"),
            })
        }
    }
}
