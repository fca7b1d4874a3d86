//! Language selection and translation lookups

use super::ApiResult;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use venuedesk_core::Error;
use venuedesk_i18n::Language;

/// A selectable language
#[derive(Debug, Serialize)]
pub struct LanguageOption {
    /// Language code
    pub code: &'static str,
    /// Name in the language itself
    pub name: &'static str,
}

/// Active, default and selectable languages
#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    /// Active language
    pub language: Language,
    /// Language used when nothing is stored
    pub default_language: Language,
    /// Every supported language
    pub supported: Vec<LanguageOption>,
}

/// Body of a language switch
#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    /// Requested language code
    pub language: String,
}

/// Result of a language switch
#[derive(Debug, Serialize)]
pub struct SetLanguageResponse {
    /// Active language after the switch
    pub language: Language,
    /// Whether the choice was written to storage
    pub persisted: bool,
}

/// A resolved translation key
#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    /// Requested key
    pub key: String,
    /// Language the key was resolved in
    pub language: Language,
    /// Resolved text, or the key itself when undefined
    pub text: String,
}

/// Current language settings
#[allow(clippy::unused_async)]
pub async fn current_language(State(state): State<Arc<AppState>>) -> Json<LanguageResponse> {
    Json(LanguageResponse {
        language: state.language.language(),
        default_language: state.language.default_language(),
        supported: Language::ALL
            .into_iter()
            .map(|language| LanguageOption {
                code: language.code(),
                name: language.native_name(),
            })
            .collect(),
    })
}

/// Switch and persist the active language
///
/// A storage failure still switches the language for this process and is
/// reported as `persisted: false`.
#[allow(clippy::unused_async)]
pub async fn set_language(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetLanguageRequest>,
) -> ApiResult<Json<SetLanguageResponse>> {
    let language: Language = request.language.parse()?;
    let persisted = state.language.set_language(language).is_ok();
    info!(%language, persisted, "language selected");

    Ok(Json(SetLanguageResponse {
        language,
        persisted,
    }))
}

/// Whole dictionary of one language, for front ends that resolve locally
#[allow(clippy::unused_async)]
pub async fn bundle(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    let not_found = || Error::NotFound {
        resource: format!("language '{code}'"),
    };
    let language = Language::from_code(&code).ok_or_else(not_found)?;
    let tree = state
        .language
        .dictionary()
        .get(language)
        .cloned()
        .ok_or_else(not_found)?;
    Ok(Json(tree))
}

/// Resolve one key
///
/// `key` is required and `lang` defaults to the active language. Every
/// other query parameter fills the `{name}` placeholder of the same name.
#[allow(clippy::unused_async)]
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Query(mut params): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<TranslationResponse>> {
    let key = params
        .remove("key")
        .filter(|key| !key.is_empty())
        .ok_or_else(|| Error::Validation {
            field: "key".to_string(),
            message: "a translation key is required".to_string(),
        })?;

    let language = match params.remove("lang") {
        Some(code) => code.parse()?,
        None => state.language.language(),
    };

    let args: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    let text = venuedesk_i18n::interpolate(&state.language.t_in(language, &key), &args);

    Ok(Json(TranslationResponse {
        key,
        language,
        text,
    }))
}
