//! Core data types for the `VenueDesk` dashboard

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of an entity as the backend reports it
pub type EntityId = String;

/// Entity collections managed through the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Clubs and venues
    Clubs,
    /// Operators running clubs
    Operators,
    /// Registered players
    Players,
    /// Wallet and booking transactions
    Transactions,
    /// Marketing promotions
    Promotions,
    /// News and help articles
    Articles,
    /// Risk alerts raised by the backend
    RiskAlerts,
    /// System settings entries
    Settings,
}

impl EntityKind {
    /// Every entity kind, in navigation order
    pub const ALL: [Self; 8] = [
        Self::Clubs,
        Self::Operators,
        Self::Players,
        Self::Transactions,
        Self::Promotions,
        Self::Articles,
        Self::RiskAlerts,
        Self::Settings,
    ];

    /// Collection path segment on the REST backend
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Clubs => "clubs",
            Self::Operators => "operators",
            Self::Players => "players",
            Self::Transactions => "transactions",
            Self::Promotions => "promotions",
            Self::Articles => "articles",
            Self::RiskAlerts => "risk-alerts",
            Self::Settings => "settings",
        }
    }

    /// Translation key of the navigation label
    #[must_use]
    pub const fn nav_key(self) -> &'static str {
        match self {
            Self::Clubs => "nav.clubs",
            Self::Operators => "nav.operators",
            Self::Players => "nav.players",
            Self::Transactions => "nav.transactions",
            Self::Promotions => "nav.promotions",
            Self::Articles => "nav.articles",
            Self::RiskAlerts => "nav.riskAlerts",
            Self::Settings => "nav.settings",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for EntityKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_path() == s)
            .ok_or_else(|| crate::Error::NotFound {
                resource: format!("entity kind '{s}'"),
            })
    }
}

/// Dashboard portal the request is made from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Portal {
    /// Platform provider (manages operators and content)
    Provider,
    /// Operator running one or more clubs
    Operator,
    /// Platform administrator
    Admin,
}

impl Portal {
    /// Entity kinds this portal may list and modify
    #[must_use]
    pub const fn entities(self) -> &'static [EntityKind] {
        match self {
            Self::Admin => &EntityKind::ALL,
            Self::Operator => &[
                EntityKind::Clubs,
                EntityKind::Players,
                EntityKind::Transactions,
                EntityKind::Promotions,
                EntityKind::RiskAlerts,
            ],
            Self::Provider => &[
                EntityKind::Operators,
                EntityKind::Clubs,
                EntityKind::Transactions,
                EntityKind::Articles,
            ],
        }
    }

    /// Whether this portal manages the given entity kind
    #[must_use]
    pub fn can_manage(self, kind: EntityKind) -> bool {
        self.entities().contains(&kind)
    }

    /// Path segment used in dashboard routes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Operator => "operator",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Portal {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provider" => Ok(Self::Provider),
            "operator" => Ok(Self::Operator),
            "admin" => Ok(Self::Admin),
            other => Err(crate::Error::NotFound {
                resource: format!("portal '{other}'"),
            }),
        }
    }
}

/// How a bulk delete is sent to the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BulkMode {
    /// One request to the collection's `bulk-delete` endpoint
    #[default]
    Batch,
    /// One `DELETE` per selected id, issued sequentially
    PerItem,
}

/// Aggregated outcome of a bulk action
///
/// `success_count + failed_count` always equals the number of submitted ids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkResult {
    success_count: usize,
    failed_count: usize,
}

impl BulkResult {
    /// Build a result for `submitted` ids of which `succeeded` went through.
    ///
    /// A success count larger than the submission is clamped.
    #[must_use]
    pub fn new(submitted: usize, succeeded: usize) -> Self {
        let success_count = succeeded.min(submitted);
        Self {
            success_count,
            failed_count: submitted - success_count,
        }
    }

    /// Number of ids the backend processed
    #[must_use]
    pub const fn success_count(&self) -> usize {
        self.success_count
    }

    /// Number of ids the backend rejected
    #[must_use]
    pub const fn failed_count(&self) -> usize {
        self.failed_count
    }

    /// Size of the submitted selection
    #[must_use]
    pub const fn total(&self) -> usize {
        self.success_count + self.failed_count
    }

    /// Whether every id went through
    #[must_use]
    pub const fn is_complete_success(&self) -> bool {
        self.failed_count == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(EntityKind::Clubs, "clubs")]
    #[case(EntityKind::RiskAlerts, "risk-alerts")]
    #[case(EntityKind::Settings, "settings")]
    fn test_entity_kind_path_roundtrip(#[case] kind: EntityKind, #[case] path: &str) {
        assert_eq!(kind.as_path(), path);
        assert_eq!(path.parse::<EntityKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), path);
    }

    #[test]
    fn test_entity_kind_serde_matches_path() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_path()));
        }
    }

    #[test]
    fn test_unknown_entity_kind() {
        let err = "bookings".parse::<EntityKind>().unwrap_err();
        assert!(err.to_string().contains("bookings"));
    }

    #[test]
    fn test_portal_permissions() {
        assert!(Portal::Admin.can_manage(EntityKind::Settings));
        assert!(Portal::Operator.can_manage(EntityKind::Players));
        assert!(!Portal::Operator.can_manage(EntityKind::Operators));
        assert!(Portal::Provider.can_manage(EntityKind::Operators));
        assert!(!Portal::Provider.can_manage(EntityKind::RiskAlerts));
        assert_eq!(Portal::Admin.entities().len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_portal_parse() {
        assert_eq!("operator".parse::<Portal>().unwrap(), Portal::Operator);
        assert!("root".parse::<Portal>().is_err());
    }

    #[test]
    fn test_bulk_mode_serde() {
        assert_eq!(BulkMode::default(), BulkMode::Batch);
        let mode: BulkMode = serde_json::from_str("\"per_item\"").unwrap();
        assert_eq!(mode, BulkMode::PerItem);
    }

    #[test]
    fn test_bulk_result_partial() {
        let result = BulkResult::new(5, 3);
        assert_eq!(result.success_count(), 3);
        assert_eq!(result.failed_count(), 2);
        assert_eq!(result.total(), 5);
        assert!(!result.is_complete_success());
    }

    #[test]
    fn test_bulk_result_clamps_overreported_success() {
        let result = BulkResult::new(2, 7);
        assert_eq!(result.success_count(), 2);
        assert_eq!(result.failed_count(), 0);
        assert!(result.is_complete_success());
    }

    proptest! {
        #[test]
        fn bulk_result_counts_sum_to_submission(submitted in 0usize..10_000, succeeded in 0usize..20_000) {
            let result = BulkResult::new(submitted, succeeded);
            prop_assert_eq!(result.success_count() + result.failed_count(), submitted);
        }
    }
}
