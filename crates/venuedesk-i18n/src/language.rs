//! Supported display languages

use crate::error::I18nError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A display language the dashboard ships dictionaries for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Simplified Chinese
    Zh,
    /// Japanese
    Ja,
    /// Korean
    Ko,
    /// Thai
    Th,
    /// Vietnamese
    Vi,
}

impl Language {
    /// Every supported language, base language first
    pub const ALL: [Self; 6] = [Self::En, Self::Zh, Self::Ja, Self::Ko, Self::Th, Self::Vi];

    /// Language whose key set every other dictionary is checked against
    pub const BASE: Self = Self::En;

    /// Short code used in storage, URLs and file names
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Th => "th",
            Self::Vi => "vi",
        }
    }

    /// Name of the language in the language itself, for the picker
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "简体中文",
            Self::Ja => "日本語",
            Self::Ko => "한국어",
            Self::Th => "ไทย",
            Self::Vi => "Tiếng Việt",
        }
    }

    /// Parse a code, returning `None` for anything unsupported
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(code))
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::BASE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::UnsupportedLanguage {
            code: s.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("en", Language::En)]
    #[case("ZH", Language::Zh)]
    #[case(" ja ", Language::Ja)]
    #[case("vi", Language::Vi)]
    fn test_parse_supported_codes(#[case] code: &str, #[case] expected: Language) {
        assert_eq!(code.parse::<Language>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("fr")]
    #[case("en-US")]
    #[case("{\"lang\":\"en\"}")]
    fn test_reject_unsupported_codes(#[case] code: &str) {
        assert!(Language::from_code(code).is_none());
        assert!(matches!(
            code.parse::<Language>(),
            Err(I18nError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_codes_are_unique_and_roundtrip() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
            assert_eq!(language.to_string(), language.code());
        }
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Language::Th).unwrap(), "\"th\"");
        let parsed: Language = serde_json::from_str("\"ko\"").unwrap();
        assert_eq!(parsed, Language::Ko);
    }

    #[test]
    fn test_default_is_base() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Language::ALL.first(), Some(&Language::BASE));
    }
}
