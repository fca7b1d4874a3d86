//! Portal collections: navigation, listing and bulk delete

use super::ApiResult;
use crate::bulk::{BulkCoordinator, BulkOutcome, SkipReason};
use crate::dto::EntityRecord;
use crate::list_view::EntityListView;
use crate::notify::{CollectingNotifier, Notification, Notifier};
use crate::pagination::{Pagination, PaginationMeta};
use crate::selection::SelectionSet;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use venuedesk_core::{BulkResult, EntityId, EntityKind, Error, Portal, Result};
use venuedesk_i18n::LanguageContext;

/// Resolve route segments and check the portal may manage the collection
fn authorize(portal: &str, kind: &str) -> Result<EntityKind> {
    let portal: Portal = portal.parse()?;
    let kind: EntityKind = kind.parse()?;
    if !portal.can_manage(kind) {
        return Err(Error::Forbidden(format!("the {portal} portal cannot manage {kind}")));
    }
    Ok(kind)
}

fn page_title_key(kind: EntityKind) -> String {
    let name = kind.nav_key().trim_start_matches("nav.");
    format!("pages.{name}.title")
}

/// Navigation entry of a portal
#[derive(Debug, Serialize)]
pub struct NavItem {
    /// Collection
    pub kind: EntityKind,
    /// Dashboard API path of the collection
    pub path: String,
    /// Label in the active language
    pub label: String,
}

/// A portal's title and navigation
#[derive(Debug, Serialize)]
pub struct PortalResponse {
    /// Portal
    pub portal: Portal,
    /// Title in the active language
    pub title: String,
    /// Collections the portal manages
    pub navigation: Vec<NavItem>,
}

/// One page of a collection, labelled in the active language
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// Collection
    pub kind: EntityKind,
    /// Page heading
    pub title: String,
    /// "Page x of y" line
    pub summary: String,
    /// Rows on the page
    pub items: Vec<EntityRecord>,
    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl PageResponse {
    fn from_view(view: &EntityListView, language: &LanguageContext) -> Self {
        let meta = view.meta().clone();
        let page = meta.page.to_string();
        let pages = meta.total_pages.to_string();
        Self {
            kind: view.kind(),
            title: language.t(&page_title_key(view.kind())),
            summary: language.t_with(
                "pagination.summary",
                &[("page", page.as_str()), ("pages", pages.as_str())],
            ),
            items: view.items().to_vec(),
            pagination: meta,
        }
    }
}

/// Title and navigation of a portal
#[allow(clippy::unused_async)]
pub async fn portal_overview(
    State(state): State<Arc<AppState>>,
    Path(portal): Path<String>,
) -> ApiResult<Json<PortalResponse>> {
    let portal: Portal = portal.parse()?;
    let language = &state.language;

    Ok(Json(PortalResponse {
        portal,
        title: language.t(&format!("portal.{portal}")),
        navigation: portal
            .entities()
            .iter()
            .map(|&kind| NavItem {
                kind,
                path: format!("/api/portals/{portal}/{kind}"),
                label: language.t(kind.nav_key()),
            })
            .collect(),
    }))
}

/// One page of a collection
pub async fn list_entities(
    State(state): State<Arc<AppState>>,
    Path((portal, kind)): Path<(String, String)>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<PageResponse>> {
    let kind = authorize(&portal, &kind)?;
    let pagination = pagination.checked()?;

    let mut view = EntityListView::new(kind, pagination);
    view.refresh(state.backend.as_ref()).await?;

    Ok(Json(PageResponse::from_view(&view, &state.language)))
}

/// Body of a bulk delete request
#[derive(Debug, Deserialize)]
pub struct BulkDeleteBody {
    /// Selected ids, all on the given page
    pub ids: Vec<EntityId>,
    /// Page the ids were selected on
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size the ids were selected with
    #[serde(default)]
    pub limit: Option<u32>,
}

/// How a bulk delete ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The backend answered
    Completed,
    /// The call failed before any per-id answer
    TransportFailed,
    /// Nothing was sent
    Skipped,
}

/// Everything the front end needs to update after a bulk delete
#[derive(Debug, Serialize)]
pub struct BulkDeleteReply {
    /// How the action ended
    pub outcome: OutcomeKind,
    /// Per-id counts when the backend answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<BulkResult>,
    /// Why nothing was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    /// Notifications to display
    pub notifications: Vec<Notification>,
    /// Ids still selected
    pub selection: Vec<EntityId>,
    /// The page as it is now
    pub page: PageResponse,
}

/// Delete the selected ids and return the reloaded page
///
/// Answers 200 when the backend answered (even if every id failed), 502
/// when the backend could not be reached or the call itself failed, 400 for
/// an empty selection and 409 while another bulk action on the collection
/// is running. A 502 still carries the notification and the selection.
pub async fn bulk_delete(
    State(state): State<Arc<AppState>>,
    Path((portal, kind)): Path<(String, String)>,
    Json(body): Json<BulkDeleteBody>,
) -> ApiResult<(StatusCode, Json<BulkDeleteReply>)> {
    let kind = authorize(&portal, &kind)?;
    let pagination = Pagination {
        page: body.page,
        limit: body.limit,
    }
    .checked()?;

    let notifier = CollectingNotifier::new();
    let coordinator = BulkCoordinator::new(
        state.backend.as_ref(),
        &state.language,
        &notifier,
        &state.bulk_gate,
    )
    .with_mode(state.config.backend.bulk_mode);

    let mut view = EntityListView::new(kind, pagination);
    if let Err(e) = view.refresh(state.backend.as_ref()).await {
        if !e.is_transport() {
            return Err(e.into());
        }
        // Nothing was sent, the submitted ids stay selected for a retry
        let _ = coordinator.report_failure(kind, &e);
        let selection: SelectionSet = body.ids.iter().map(String::as_str).collect();
        let reply = BulkDeleteReply {
            outcome: OutcomeKind::TransportFailed,
            result: None,
            skipped: None,
            notifications: notifier.take(),
            selection: selection.to_vec(),
            page: PageResponse::from_view(&view, &state.language),
        };
        return Ok((StatusCode::BAD_GATEWAY, Json(reply)));
    }
    view.select(body.ids.iter().map(String::as_str))?;

    let outcome = view.bulk_delete(&coordinator).await;

    let (status, outcome_kind, result, skipped) = match outcome {
        BulkOutcome::Completed(result) => (StatusCode::OK, OutcomeKind::Completed, Some(result), None),
        BulkOutcome::TransportFailed { .. } => {
            (StatusCode::BAD_GATEWAY, OutcomeKind::TransportFailed, None, None)
        }
        BulkOutcome::Skipped(reason) => {
            let status = match reason {
                SkipReason::EmptySelection => StatusCode::BAD_REQUEST,
                SkipReason::InFlight => {
                    notifier.notify(Notification::info(state.language.t("bulk.inProgress")));
                    StatusCode::CONFLICT
                }
            };
            (status, OutcomeKind::Skipped, None, Some(reason))
        }
    };

    let reply = BulkDeleteReply {
        outcome: outcome_kind,
        result,
        skipped,
        notifications: notifier.take(),
        selection: view.selection().to_vec(),
        page: PageResponse::from_view(&view, &state.language),
    };
    Ok((status, Json(reply)))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "risk-alerts", Some(EntityKind::RiskAlerts))]
    #[case("provider", "operators", Some(EntityKind::Operators))]
    #[case("operator", "players", Some(EntityKind::Players))]
    #[case("operator", "articles", None)]
    #[case("provider", "settings", None)]
    fn test_authorize_by_role(
        #[case] portal: &str,
        #[case] kind: &str,
        #[case] expected: Option<EntityKind>,
    ) {
        match (authorize(portal, kind), expected) {
            (Ok(kind), Some(expected)) => assert_eq!(kind, expected),
            (Err(Error::Forbidden(_)), None) => {}
            (other, _) => panic!("unexpected authorization result {other:?}"),
        }
    }

    #[test]
    fn test_authorize_unknown_segments() {
        assert!(matches!(authorize("guest", "clubs"), Err(Error::NotFound { .. })));
        assert!(matches!(authorize("admin", "tables"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_page_title_key() {
        assert_eq!(page_title_key(EntityKind::RiskAlerts), "pages.riskAlerts.title");
        assert_eq!(page_title_key(EntityKind::Clubs), "pages.clubs.title");
    }
}
