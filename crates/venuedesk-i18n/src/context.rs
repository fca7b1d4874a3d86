//! Active-language state shared by every consumer of display strings

use crate::dictionary::TranslationDictionary;
use crate::error::I18nResult;
use crate::language::Language;
use crate::resolver;
use crate::storage::{FileStore, KeyValueStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info, warn};
use venuedesk_core::config::I18nConfig;

/// Storage key the active language code is persisted under
pub const LANGUAGE_STORAGE_KEY: &str = "language";

/// Current language plus the dictionaries and storage it resolves against
///
/// Passed explicitly to whatever needs display strings; there is no global
/// instance.
#[derive(Debug)]
pub struct LanguageContext {
    dictionary: Arc<TranslationDictionary>,
    store: Arc<dyn KeyValueStore>,
    default_language: Language,
    current: RwLock<Language>,
}

impl LanguageContext {
    /// Create a context, restoring the persisted language from `store`
    ///
    /// A missing, unreadable or unsupported stored value selects
    /// `default_language`.
    pub fn new(
        dictionary: Arc<TranslationDictionary>,
        store: Arc<dyn KeyValueStore>,
        default_language: Language,
    ) -> Self {
        let restored = restore_language(store.as_ref(), default_language);
        Self {
            dictionary,
            store,
            default_language,
            current: RwLock::new(restored),
        }
    }

    /// Build a context from configuration
    ///
    /// Uses `locales_dir` when set, the embedded dictionaries otherwise, and
    /// a [`FileStore`] at `storage_path`. An unsupported `default_language`
    /// is replaced by [`Language::BASE`].
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionaries cannot be loaded or are
    /// inconsistent.
    pub fn from_config(config: &I18nConfig) -> I18nResult<Self> {
        let dictionary = match &config.locales_dir {
            Some(dir) => TranslationDictionary::from_dir(dir)?,
            None => TranslationDictionary::builtin()?,
        };
        dictionary.validate()?;

        let default_language =
            Language::from_code(&config.default_language).unwrap_or_else(|| {
                warn!(
                    configured = %config.default_language,
                    fallback = %Language::BASE,
                    "unsupported default language in configuration"
                );
                Language::BASE
            });

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage_path));
        Ok(Self::new(Arc::new(dictionary), store, default_language))
    }

    /// The active language
    #[must_use]
    pub fn language(&self) -> Language {
        *self.current.read()
    }

    /// The language used when nothing valid is stored
    #[must_use]
    pub const fn default_language(&self) -> Language {
        self.default_language
    }

    /// Dictionaries this context resolves against
    #[must_use]
    pub fn dictionary(&self) -> &TranslationDictionary {
        &self.dictionary
    }

    /// Switch the active language and persist it
    ///
    /// The in-memory switch always takes effect; the returned error only
    /// reports that the choice will not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn set_language(&self, language: Language) -> I18nResult<()> {
        let previous = std::mem::replace(&mut *self.current.write(), language);
        if previous != language {
            info!(from = %previous, to = %language, "language changed");
        }

        self.store
            .set_item(LANGUAGE_STORAGE_KEY, language.code())
            .inspect_err(|e| error!(%language, error = %e, "failed to persist language"))
    }

    /// Resolve `key` in the active language
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        resolver::translate(&self.dictionary, self.language(), key)
    }

    /// Resolve `key` in the active language and fill `{name}` placeholders
    #[must_use]
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        resolver::interpolate(&self.t(key), args)
    }

    /// Resolve `key` in an explicit language
    #[must_use]
    pub fn t_in(&self, language: Language, key: &str) -> String {
        resolver::translate(&self.dictionary, language, key)
    }
}

fn restore_language(store: &dyn KeyValueStore, default_language: Language) -> Language {
    match store.get_item(LANGUAGE_STORAGE_KEY) {
        Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|| {
            warn!(stored = %code, fallback = %default_language, "ignoring unsupported stored language");
            default_language
        }),
        Ok(None) => default_language,
        Err(e) => {
            warn!(error = %e, fallback = %default_language, "could not read stored language");
            default_language
        }
    }
}
