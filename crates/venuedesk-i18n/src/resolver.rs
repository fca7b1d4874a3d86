//! Key path resolution against nested dictionaries
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | a path segment is absent | key returned, `debug` log |
//! | Wrong shape | path ends on an object, array or number | key returned, `warn` log |
//! | Missing language | dictionary has no entry for the language | key returned, `warn` log |
//! | Unknown placeholder | `{name}` without a matching argument | token left as-is |

use crate::dictionary::TranslationDictionary;
use crate::language::Language;
use serde_json::Value;
use tracing::{debug, warn};

/// Result of descending a dictionary along a key path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The path ends on a string
    Found(&'a str),
    /// Some segment along the path is undefined
    Missing,
    /// The path exists but does not end on a string
    NotAString,
}

/// Descend `root` one dot-separated segment at a time.
///
/// Empty segments (`"a..b"`, `".a"`) never match.
#[must_use]
pub fn lookup<'a>(root: &'a Value, key: &str) -> Lookup<'a> {
    let mut node = root;
    for segment in key.split('.') {
        match node {
            Value::Object(map) if !segment.is_empty() => match map.get(segment) {
                Some(child) => node = child,
                None => return Lookup::Missing,
            },
            _ => return Lookup::Missing,
        }
    }

    match node {
        Value::String(text) => Lookup::Found(text),
        _ => Lookup::NotAString,
    }
}

/// Resolve `key` for `language`, falling back to the key itself.
///
/// Never fails and never returns an empty string for a non-empty key unless
/// the dictionary itself maps the key to `""`.
#[must_use]
pub fn translate(dictionary: &TranslationDictionary, language: Language, key: &str) -> String {
    let Some(root) = dictionary.get(language) else {
        warn!(%language, key, "no dictionary loaded for language");
        return key.to_string();
    };

    match lookup(root, key) {
        Lookup::Found(text) => text.to_string(),
        Lookup::Missing => {
            debug!(%language, key, "missing translation key");
            key.to_string()
        }
        Lookup::NotAString => {
            warn!(%language, key, "translation key does not resolve to a string");
            key.to_string()
        }
    }
}

/// Replace `{name}` placeholders with matching `args` in a single pass.
///
/// Substituted values are not scanned again, and placeholders without a
/// matching argument are kept verbatim.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after_open)) = rest.split_once('{') {
        out.push_str(before);

        let Some((name, after_close)) = after_open.split_once('}') else {
            out.push('{');
            out.push_str(after_open);
            return out;
        };

        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = after_close;
    }

    out.push_str(rest);
    out
}
