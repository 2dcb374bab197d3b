mod document;
mod health;
mod study;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub use document::EXPORT_FILE_NAME;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .route("/api/loadState", get(document::load_state))
        .route("/api/saveState", post(document::save_state))
        .route("/api/importData", post(document::save_state))
        .route("/api/exportData", get(document::export_data))
        .route("/api/reloadState", post(document::reload_state))
        .route("/api/decks", post(study::add_deck))
        .route("/api/decks/:name/cards", post(study::add_card))
        .route("/api/decks/:name/due", get(study::due_cards))
        .route("/api/review", post(study::review))
        .route(
            "/api/settings",
            get(study::get_settings).put(study::update_settings),
        )
        .route("/api/progress", get(study::progress))
        .route("/api/progress/reset", post(study::reset_progress))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::not_found("route not found").into_response()
}
