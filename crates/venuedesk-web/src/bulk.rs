//! Bulk delete coordination
//!
//! The coordinator sends one bulk action, folds the backend's answer into a
//! [`BulkResult`] and reports it as a notification. Re-fetching the list
//! afterwards is left to the caller that owns the page, see
//! [`EntityListView::bulk_delete`](crate::list_view::EntityListView::bulk_delete).
//!
//! | Backend answer | Outcome | Notification | Selection |
//! |----------------|---------|--------------|-----------|
//! | every id deleted | `Completed` | success | cleared |
//! | some ids rejected | `Completed` | warning | cleared |
//! | call itself failed | `TransportFailed` | error | kept |
//! | per-item, unreachable before any delete | `TransportFailed` | error | kept |
//! | empty selection or action running | `Skipped` | none | kept |

use crate::backend::EntityBackend;
use crate::notify::{Notification, Notifier};
use crate::selection::SelectionSet;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};
use venuedesk_core::{BulkMode, BulkResult, EntityId, EntityKind, Error, Result};
use venuedesk_i18n::LanguageContext;

/// Why a bulk action did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing was selected
    EmptySelection,
    /// Another bulk action on the same collection has not settled
    InFlight,
}

/// What happened to a bulk action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// The backend answered; some ids may have failed
    Completed(BulkResult),
    /// The call never produced a per-id answer
    TransportFailed {
        /// Error as shown to the user
        message: String,
    },
    /// Nothing was sent
    Skipped(SkipReason),
}

impl BulkOutcome {
    /// Whether the backend answered
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Collections with a bulk action in flight
#[derive(Debug, Default)]
pub struct BulkGate {
    active: Mutex<HashSet<EntityKind>>,
}

impl BulkGate {
    /// Gate with nothing in flight
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `kind` until the returned permit is dropped
    ///
    /// Returns `None` while another permit for `kind` is alive.
    pub fn try_acquire(&self, kind: EntityKind) -> Option<BulkPermit<'_>> {
        let claimed = self.active.lock().insert(kind);
        claimed.then(|| BulkPermit { gate: self, kind })
    }

    /// Whether a bulk action on `kind` is running
    #[must_use]
    pub fn is_active(&self, kind: EntityKind) -> bool {
        self.active.lock().contains(&kind)
    }
}

/// Exclusive claim on one collection's bulk trigger
#[derive(Debug)]
pub struct BulkPermit<'a> {
    gate: &'a BulkGate,
    kind: EntityKind,
}

impl Drop for BulkPermit<'_> {
    fn drop(&mut self) {
        self.gate.active.lock().remove(&self.kind);
    }
}

/// Runs bulk deletes against a backend and reports the result
pub struct BulkCoordinator<'a> {
    backend: &'a dyn EntityBackend,
    language: &'a LanguageContext,
    notifier: &'a dyn Notifier,
    gate: &'a BulkGate,
    mode: BulkMode,
}

impl std::fmt::Debug for BulkCoordinator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkCoordinator")
            .field("language", &self.language.language())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<'a> BulkCoordinator<'a> {
    /// Coordinator using [`BulkMode::Batch`]
    pub fn new(
        backend: &'a dyn EntityBackend,
        language: &'a LanguageContext,
        notifier: &'a dyn Notifier,
        gate: &'a BulkGate,
    ) -> Self {
        Self {
            backend,
            language,
            notifier,
            gate,
            mode: BulkMode::Batch,
        }
    }

    /// Choose how deletes are sent
    #[must_use]
    pub const fn with_mode(mut self, mode: BulkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Backend the deletes go to
    #[must_use]
    pub const fn backend(&self) -> &'a dyn EntityBackend {
        self.backend
    }

    /// Delete every id in `selection`
    ///
    /// The selection is cleared once the backend has answered, whatever the
    /// per-id outcome, and left untouched otherwise.
    pub async fn delete(&self, kind: EntityKind, selection: &mut SelectionSet) -> BulkOutcome {
        if selection.is_empty() {
            debug!(%kind, "bulk delete with empty selection ignored");
            return BulkOutcome::Skipped(SkipReason::EmptySelection);
        }

        let Some(_permit) = self.gate.try_acquire(kind) else {
            debug!(%kind, "bulk delete already in flight");
            return BulkOutcome::Skipped(SkipReason::InFlight);
        };

        let ids = selection.to_vec();
        info!(%kind, count = ids.len(), mode = ?self.mode, "bulk delete started");

        let result = match self.mode {
            BulkMode::Batch => self.backend.delete_batch(kind, &ids).await,
            BulkMode::PerItem => self.delete_each(kind, &ids).await,
        };

        match result {
            Ok(result) => {
                self.report(kind, result);
                selection.clear();
                BulkOutcome::Completed(result)
            }
            Err(e) => self.report_failure(kind, &e),
        }
    }

    /// Report a bulk action on `kind` that never got a per-id answer
    ///
    /// Sends one error notification and returns the matching outcome.
    #[must_use]
    pub fn report_failure(&self, kind: EntityKind, error: &Error) -> BulkOutcome {
        error!(%kind, error = %error, "bulk delete failed");
        let message = self.describe(error);
        self.notifier.notify(Notification::error(
            self.language.t_with("bulk.deleteFailed", &[("error", message.as_str())]),
        ));
        BulkOutcome::TransportFailed { message }
    }

    /// Report that the list could not be reloaded after an action
    pub fn report_load_failure(&self, kind: EntityKind, error: &Error) {
        warn!(%kind, error = %error, "reloading list failed");
        let message = self.describe(error);
        self.notifier.notify(Notification::error(
            self.language.t_with("errors.loadFailed", &[("error", message.as_str())]),
        ));
    }

    /// Rejected ids count as failed. Losing the backend before anything was
    /// deleted fails the whole action; once something was deleted the ids
    /// not yet sent count as failed.
    async fn delete_each(&self, kind: EntityKind, ids: &[EntityId]) -> Result<BulkResult> {
        let mut succeeded = 0;
        for id in ids {
            match self.backend.delete_one(kind, id).await {
                Ok(()) => succeeded += 1,
                Err(e) if e.is_transport() => {
                    if succeeded == 0 {
                        return Err(e);
                    }
                    warn!(%kind, %id, error = %e, "backend lost mid-way, remaining ids not sent");
                    break;
                }
                Err(e) => debug!(%kind, %id, error = %e, "delete rejected"),
            }
        }
        Ok(BulkResult::new(ids.len(), succeeded))
    }

    fn report(&self, kind: EntityKind, result: BulkResult) {
        let success = result.success_count().to_string();
        let notification = if result.is_complete_success() {
            info!(%kind, deleted = result.success_count(), "bulk delete completed");
            Notification::success(
                self.language
                    .t_with("bulk.deleteSuccess", &[("count", success.as_str())]),
            )
        } else {
            warn!(
                %kind,
                deleted = result.success_count(),
                failed = result.failed_count(),
                "bulk delete partially failed"
            );
            let total = result.total().to_string();
            let failed = result.failed_count().to_string();
            Notification::warning(self.language.t_with(
                "bulk.deletePartial",
                &[
                    ("success", success.as_str()),
                    ("total", total.as_str()),
                    ("failed", failed.as_str()),
                ],
            ))
        };
        self.notifier.notify(notification);
    }

    fn describe(&self, error: &Error) -> String {
        match error {
            Error::Authentication(_) => self.language.t("errors.unauthorized"),
            Error::Transport { .. } => self.language.t("errors.network"),
            Error::Api { status, message } => {
                let status = status.to_string();
                self.language.t_with(
                    "errors.server",
                    &[("status", status.as_str()), ("message", message.as_str())],
                )
            }
            _ => self.language.t("errors.unexpected"),
        }
    }
}
