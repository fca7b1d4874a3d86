//! Per-language translation dictionaries
//!
//! Dictionaries are loaded once at start and never mutated afterwards. The
//! embedded set ships with the crate; a deployment may replace it with
//! `<code>.json` files from a directory.

use crate::error::{I18nError, I18nResult};
use crate::language::Language;
use crate::resolver;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

const EMBEDDED: [(Language, &str); 6] = [
    (Language::En, include_str!("../locales/en.json")),
    (Language::Zh, include_str!("../locales/zh.json")),
    (Language::Ja, include_str!("../locales/ja.json")),
    (Language::Ko, include_str!("../locales/ko.json")),
    (Language::Th, include_str!("../locales/th.json")),
    (Language::Vi, include_str!("../locales/vi.json")),
];

/// Immutable mapping from language to its nested namespace/key tree
#[derive(Debug, Clone, Default)]
pub struct TranslationDictionary {
    locales: HashMap<Language, Value>,
}

impl TranslationDictionary {
    /// Parse the dictionaries embedded in the crate
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Parse`] if an embedded file is not valid JSON.
    pub fn builtin() -> I18nResult<Self> {
        let mut locales = HashMap::with_capacity(EMBEDDED.len());
        for (language, source) in EMBEDDED {
            let value = serde_json::from_str(source)
                .map_err(|source| I18nError::Parse { language, source })?;
            locales.insert(language, value);
        }
        Ok(Self { locales })
    }

    /// Load `<code>.json` for every supported language from `dir`
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::MissingLocale`] if a file is absent and
    /// [`I18nError::Parse`] if one is malformed.
    pub fn from_dir(dir: &Path) -> I18nResult<Self> {
        let mut locales = HashMap::with_capacity(Language::ALL.len());
        for language in Language::ALL {
            let path = dir.join(format!("{}.json", language.code()));
            if !path.is_file() {
                return Err(I18nError::MissingLocale { language, path });
            }
            let source = std::fs::read_to_string(&path)?;
            let value = serde_json::from_str(&source)
                .map_err(|source| I18nError::Parse { language, source })?;
            debug!(%language, path = %path.display(), "loaded dictionary");
            locales.insert(language, value);
        }
        info!(dir = %dir.display(), "loaded dictionaries from directory");
        Ok(Self { locales })
    }

    /// Build a dictionary from already-parsed trees
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = (Language, Value)>) -> Self {
        Self {
            locales: values.into_iter().collect(),
        }
    }

    /// Root tree of a language, if loaded
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&Value> {
        self.locales.get(&language)
    }

    /// Languages with a loaded tree, in declaration order
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.locales.contains_key(language))
            .collect()
    }

    /// Resolve `key` under `language`, returning the key when unresolvable
    #[must_use]
    pub fn translate(&self, language: Language, key: &str) -> String {
        resolver::translate(self, language, key)
    }

    /// Every dot path that ends on a string, sorted
    #[must_use]
    pub fn key_paths(&self, language: Language) -> Vec<String> {
        let mut paths = BTreeSet::new();
        if let Some(root) = self.get(language) {
            collect_leaf_paths(root, &mut String::new(), &mut paths);
        }
        paths.into_iter().collect()
    }

    /// Key paths of the base language that `language` does not define
    #[must_use]
    pub fn missing_keys(&self, language: Language) -> Vec<String> {
        let present: BTreeSet<String> = self.key_paths(language).into_iter().collect();
        self.key_paths(Language::BASE)
            .into_iter()
            .filter(|path| !present.contains(path))
            .collect()
    }

    /// Check every supported language is loaded and covers the base key set
    ///
    /// # Errors
    ///
    /// Returns the first [`I18nError::MissingLocale`] or
    /// [`I18nError::IncompleteLocale`] found, in language order.
    pub fn validate(&self) -> I18nResult<()> {
        for language in Language::ALL {
            if !self.locales.contains_key(&language) {
                return Err(I18nError::MissingLocale {
                    language,
                    path: "<in-memory>".into(),
                });
            }
            let missing = self.missing_keys(language);
            if !missing.is_empty() {
                return Err(I18nError::IncompleteLocale { language, missing });
            }
        }
        Ok(())
    }
}

fn collect_leaf_paths(node: &Value, prefix: &mut String, out: &mut BTreeSet<String>) {
    match node {
        Value::Object(map) => {
            for (segment, child) in map {
                let restore = prefix.len();
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(segment);
                collect_leaf_paths(child, prefix, out);
                prefix.truncate(restore);
            }
        }
        Value::String(_) => {
            out.insert(prefix.clone());
        }
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_builtin_loads_every_language() {
        let dictionary = TranslationDictionary::builtin().unwrap();
        assert_eq!(dictionary.languages(), Language::ALL.to_vec());
    }

    #[test]
    fn test_builtin_dictionaries_are_consistent() {
        let dictionary = TranslationDictionary::builtin().unwrap();
        for language in Language::ALL {
            assert_eq!(
                dictionary.missing_keys(language),
                Vec::<String>::new(),
                "{language} is missing keys"
            );
            assert_eq!(
                dictionary.key_paths(language),
                dictionary.key_paths(Language::BASE),
                "{language} defines keys the base language does not"
            );
        }
        dictionary.validate().unwrap();
    }

    #[test]
    fn test_key_paths_only_lists_string_leaves() {
        let dictionary = TranslationDictionary::from_values([(
            Language::En,
            json!({"a": {"b": "x", "c": {"d": "y"}, "n": 1}, "top": "z"}),
        )]);

        assert_eq!(dictionary.key_paths(Language::En), vec!["a.b", "a.c.d", "top"]);
        assert!(dictionary.key_paths(Language::Vi).is_empty());
    }

    #[test]
    fn test_validate_reports_missing_keys() {
        let mut values: Vec<(Language, Value)> = Language::ALL
            .into_iter()
            .map(|language| (language, json!({"nav": {"clubs": "Clubs", "players": "Players"}})))
            .collect();
        values.push((Language::Ko, json!({"nav": {"clubs": "클럽"}})));
        let dictionary = TranslationDictionary::from_values(values);

        match dictionary.validate() {
            Err(I18nError::IncompleteLocale { language, missing }) => {
                assert_eq!(language, Language::Ko);
                assert_eq!(missing, vec!["nav.players".to_string()]);
            }
            other => panic!("expected incomplete locale, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_reports_unloaded_language() {
        let dictionary = TranslationDictionary::from_values([(Language::En, json!({}))]);
        assert!(matches!(
            dictionary.validate(),
            Err(I18nError::MissingLocale {
                language: Language::Zh,
                ..
            })
        ));
    }

    #[test]
    fn test_from_dir_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        for language in Language::ALL {
            let body = json!({"pages": {"dashboard": {"title": format!("Title {}", language.code())}}});
            std::fs::write(
                dir.path().join(format!("{}.json", language.code())),
                body.to_string(),
            )
            .unwrap();
        }

        let dictionary = TranslationDictionary::from_dir(dir.path()).unwrap();
        assert_eq!(dictionary.translate(Language::Th, "pages.dashboard.title"), "Title th");
        dictionary.validate().unwrap();
    }

    #[test]
    fn test_from_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), "{}").unwrap();

        let err = TranslationDictionary::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, I18nError::MissingLocale { language: Language::Zh, .. }));
    }

    #[test]
    fn test_from_dir_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        for language in Language::ALL {
            std::fs::write(dir.path().join(format!("{}.json", language.code())), "{}").unwrap();
        }
        std::fs::write(dir.path().join("ja.json"), "{ not json").unwrap();

        let err = TranslationDictionary::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, I18nError::Parse { language: Language::Ja, .. }));
    }
}
