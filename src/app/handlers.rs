// LogLens - app/handlers.rs
//
// HTTP route handlers. Thin glue: extract the request, hand bytes and the
// selection to core::analysis, serialise what comes back.

use crate::app::state::AppState;
use crate::core::categories::{self, VOCABULARY_VERSION};
use crate::core::filter::CategoryFilter;
use crate::core::level::LogLevel;
use crate::core::model::{CategorizerMode, FilterReport, UploadReport};
use crate::util::constants::{APP_VERSION, UPLOAD_FIELD_NAME};
use crate::util::error::RequestError;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

/// Single-page front-end served at `/`.
static INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Field names reported by `MissingInput`, one per distinct client mistake.
const MISSING_FILE_PART: &str = "file";
const MISSING_SELECTED_FILE: &str = "selected file";
const MISSING_FILENAME: &str = "filename";

// =============================================================================
// Errors
// =============================================================================

/// Everything a handler can fail with, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Request(RequestError),
    Multipart(MultipartError),
    Json(JsonRejection),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Request(RequestError::MissingInput { field }) => {
                let message = match field {
                    MISSING_FILE_PART => "No file part".to_string(),
                    MISSING_SELECTED_FILE => "No selected file".to_string(),
                    MISSING_FILENAME => "No filename provided".to_string(),
                    other => format!("Missing {other}"),
                };
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::Request(RequestError::NotFound { name }) => {
                tracing::debug!(name = %name, "Filter requested for unknown upload");
                (StatusCode::NOT_FOUND, "File not found".to_string())
            }
            ApiError::Request(e @ RequestError::InvalidFilename { .. }) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Request(RequestError::Storage(e)) => {
                tracing::error!(error = %e, "Upload storage failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage error".to_string(),
                )
            }
            ApiError::Multipart(e) => (e.status(), e.body_text()),
            ApiError::Json(e) => (e.status(), e.body_text()),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Multipart(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::Json(err)
    }
}

/// Run storage + parsing off the async runtime.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, RequestError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("worker task failed: {e}")))?
        .map_err(ApiError::from)
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": APP_VERSION,
        "mode": state.mode(),
        "vocabulary_version": VOCABULARY_VERSION,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /categories
///
/// The compiled-in vocabulary. In pattern-fallback mode it is informational
/// only, since any `Log<word>` token is accepted.
pub async fn handle_categories(State(state): State<AppState>) -> Json<serde_json::Value> {
    let enforced = state.mode() == CategorizerMode::ClosedVocabulary;
    Json(serde_json::json!({
        "mode": state.mode(),
        "enforced": enforced,
        "version": VOCABULARY_VERSION,
        "categories": categories::all(),
    }))
}

/// POST /upload
///
/// Multipart form with a `file` part. Stores the bytes for later filtering,
/// then returns every entry plus per-category counts.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReport>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.trim().is_empty() {
            return Err(RequestError::MissingInput {
                field: MISSING_SELECTED_FILE,
            }
            .into());
        }

        let bytes = field.bytes().await?;
        let report = run_blocking(move || {
            let stored = state.store.save(&filename, &bytes)?;
            Ok(state.analyzer.upload(&bytes, &stored))
        })
        .await?;

        return Ok(Json(report));
    }

    Err(RequestError::MissingInput {
        field: MISSING_FILE_PART,
    }
    .into())
}

/// Body of POST /filter.
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    /// Name returned by `/upload` (or the original client filename).
    #[serde(default)]
    pub filename: Option<String>,

    /// Categories to keep; absent or empty means all.
    #[serde(default)]
    pub types: Option<Vec<String>>,

    /// Levels to keep (`Display`, `Warning`, `Error`); absent or empty means
    /// no level restriction.
    #[serde(default)]
    pub levels: Option<Vec<LogLevel>>,

    /// Case-insensitive substring the content must contain.
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterRequest {
    fn to_filter(&self) -> CategoryFilter {
        CategoryFilter::new(self.types.iter().flatten().cloned())
            .with_levels(self.levels.iter().flatten().copied())
            .with_search(self.search.as_deref().unwrap_or_default())
    }
}

/// POST /filter
///
/// Re-reads the stored upload and returns only the entries matching the
/// selected categories, levels and search term.
pub async fn handle_filter(
    State(state): State<AppState>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<FilterReport>, ApiError> {
    let Json(request) = payload?;
    let filter = request.to_filter();

    let report = run_blocking(move || {
        state
            .analyzer
            .filter_stored(state.store.as_ref(), request.filename.as_deref(), &filter)
    })
    .await?;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::StorageError;

    fn status_and_error(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(axum::body::to_bytes(response.into_body(), usize::MAX))
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json["error"].as_str().unwrap().to_string())
    }

    #[test]
    fn test_missing_inputs_map_to_400_with_distinct_messages() {
        for (field, expected) in [
            (MISSING_FILE_PART, "No file part"),
            (MISSING_SELECTED_FILE, "No selected file"),
            (MISSING_FILENAME, "No filename provided"),
        ] {
            let (status, message) =
                status_and_error(RequestError::MissingInput { field }.into());
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, expected);
        }
    }

    #[test]
    fn test_filter_request_builds_full_filter() {
        let request: FilterRequest = serde_json::from_value(serde_json::json!({
            "filename": "game.log",
            "types": ["LogNet"],
            "levels": ["Warning", "Error"],
            "search": "  Packet ",
        }))
        .unwrap();
        let filter = request.to_filter();

        assert!(filter.selected.contains("LogNet"));
        assert_eq!(filter.levels.len(), 2);
        assert!(filter.levels.contains(&LogLevel::Warning));
        assert_eq!(filter.search.as_deref(), Some("packet"));
    }

    #[test]
    fn test_filter_request_defaults_to_unconstrained() {
        let request: FilterRequest =
            serde_json::from_value(serde_json::json!({"filename": "game.log"})).unwrap();
        assert!(request.to_filter().is_empty());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, message) = status_and_error(
            RequestError::NotFound {
                name: "x.log".to_string(),
            }
            .into(),
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "File not found");
    }

    #[test]
    fn test_storage_failure_hides_details() {
        let (status, message) = status_and_error(
            RequestError::Storage(StorageError::Io {
                path: "/srv/uploads/x.log".into(),
                operation: "read upload",
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
            })
            .into(),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("/srv/uploads"));
    }
}
