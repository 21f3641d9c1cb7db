//! Translation HTTP handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use estate_core::{defaults, Language, Translated};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    /// One of en, el, ru, sr, bg, de.
    #[serde(default)]
    pub target_language: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TranslateResponse {
    pub translation: String,
    /// Whether the server cache answered without calling the backend.
    pub cached: bool,
    pub language: String,
}

impl From<Translated> for TranslateResponse {
    fn from(t: Translated) -> Self {
        Self {
            translation: t.translation,
            cached: t.cached,
            language: t.language.code().to_string(),
        }
    }
}

/// Translate listing text into a supported display language.
///
/// Responses carry `Cache-Control: public, max-age=86400`.
///
/// # Returns
/// - 200 OK with the translation
/// - 400 Bad Request for empty text, an unsupported language or a malformed body
/// - 500 Internal Server Error if the translation backend fails
#[utoipa::path(post, path = "/api/translate", tag = "Translation",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated text", body = TranslateResponse),
        (status = 400, description = "Empty text, unsupported language or malformed body"),
        (status = 500, description = "Translation backend failure"),
    )
)]
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text is required".into()));
    }
    let target = Language::from_code(&req.target_language)?;

    let translated = state.translations.translate(&req.text, target).await?;

    let cache_control = format!("public, max-age={}", defaults::TRANSLATION_HTTP_MAX_AGE_SECS);
    Ok((
        [(header::CACHE_CONTROL, cache_control)],
        Json(TranslateResponse::from(translated)),
    ))
}
