//! Dashboard server for the `VenueDesk` venue and gaming admin portals
//!
//! The server sits between the browser front end and the REST backend. It
//! proxies entity listings per portal, runs bulk deletes through a
//! [`BulkCoordinator`](bulk::BulkCoordinator) and serves translations from a
//! shared [`LanguageContext`](venuedesk_i18n::LanguageContext).

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod backend;
pub mod bulk;
pub mod dto;
pub mod handlers;
pub mod list_view;
pub mod middleware;
pub mod notify;
pub mod pagination;
pub mod routes;
pub mod selection;
pub mod server;
pub mod state;

#[cfg(test)]
mod testing;

pub use api_client::RestClient;
pub use backend::EntityBackend;
pub use bulk::{BulkCoordinator, BulkGate, BulkOutcome, SkipReason};
pub use dto::{EntityPage, EntityRecord};
pub use list_view::EntityListView;
pub use notify::{CollectingNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use pagination::{Pagination, PaginationMeta};
pub use selection::SelectionSet;
pub use server::{build_app, build_router};
pub use state::AppState;
