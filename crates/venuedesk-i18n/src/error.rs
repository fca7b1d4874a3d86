//! Error types for translation loading and language persistence

use crate::language::Language;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for translation operations
pub type I18nResult<T> = Result<T, I18nError>;

/// Errors that can occur while loading dictionaries or persisting the
/// active language
///
/// Lookups never fail: an unresolvable key is returned as-is.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Language code outside the supported set
    #[error("Unsupported language code: {code}")]
    UnsupportedLanguage {
        /// The rejected code
        code: String,
    },

    /// A dictionary could not be parsed
    #[error("Failed to parse {language} dictionary: {source}")]
    Parse {
        /// Language whose dictionary failed
        language: Language,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A dictionary file or entry is absent
    #[error("No dictionary for {language} (looked in {path})")]
    MissingLocale {
        /// Language without a dictionary
        language: Language,
        /// Where it was expected
        path: PathBuf,
    },

    /// A dictionary lacks key paths defined by the base language
    #[error("{language} dictionary is missing {} key(s): {}", .missing.len(), .missing.join(", "))]
    IncompleteLocale {
        /// Incomplete language
        language: Language,
        /// Key paths present in the base language only
        missing: Vec<String>,
    },

    /// Persisted preferences could not be read or written
    #[error("Preference storage error: {message}")]
    Storage {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<I18nError> for venuedesk_core::Error {
    fn from(err: I18nError) -> Self {
        match err {
            I18nError::UnsupportedLanguage { code } => Self::Validation {
                field: "language".to_string(),
                message: format!("unsupported language code '{code}'"),
            },
            I18nError::Io(e) => Self::Io(e),
            other => Self::Configuration {
                message: other.to_string(),
            },
        }
    }
}
