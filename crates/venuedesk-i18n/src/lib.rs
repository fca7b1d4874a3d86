//! Translation support for the `VenueDesk` dashboard
//!
//! Display strings live in nested per-language JSON dictionaries and are
//! addressed by dot-separated key paths such as `pages.dashboard.title`.
//! A key that cannot be resolved is returned unchanged, so a missing
//! translation shows up as its raw key instead of blank text.
//!
//! The active language is held by a [`LanguageContext`] which persists every
//! change through a [`KeyValueStore`] and restores it on start.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod context;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod resolver;
pub mod storage;

pub use context::{LANGUAGE_STORAGE_KEY, LanguageContext};
pub use dictionary::TranslationDictionary;
pub use error::{I18nError, I18nResult};
pub use language::Language;
pub use resolver::{Lookup, interpolate, lookup, translate};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
