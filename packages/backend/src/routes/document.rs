//! Whole-document load / save / export under the `/api/*State` paths the web client calls.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use flashdeck_algo::{Action, Document};

use crate::response::{ok_persisted, AppError};
use crate::state::AppState;

pub const EXPORT_FILE_NAME: &str = "anki_app_data.json";

pub async fn load_state(State(state): State<AppState>) -> Response {
    axum::Json(state.session().current().await).into_response()
}

/// Bulk replace. The body must parse and validate as a document, otherwise
/// the live state is kept.
pub async fn save_state(State(state): State<AppState>, body: String) -> Result<Response, AppError> {
    let doc = Document::from_json(&body)?;
    let cards = doc.card_count();
    let out = state
        .session()
        .dispatch(Action::LoadState(Box::new(doc)))
        .await?;

    tracing::info!(cards, persisted = out.persisted, "document replaced");
    Ok(ok_persisted(
        serde_json::json!({ "message": "State saved successfully" }),
        out.persisted,
    ))
}

pub async fn export_data(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.session().snapshot().await.to_json_pretty()?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILE_NAME}"),
            ),
        ],
        body,
    )
        .into_response())
}

/// Drop the in-memory state in favour of what is on disk.
pub async fn reload_state(State(state): State<AppState>) -> Result<Response, AppError> {
    let doc = state.session().reload().await?;
    Ok(axum::Json(doc).into_response())
}
