pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;

use std::sync::Arc;

use flashdeck_algo::date::today_utc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::session::Session;
use crate::state::AppState;
use crate::store::JsonFileStore;

/// Open the document at `config.data_file` and build the state around it.
pub async fn create_state(config: &Config) -> AppState {
    let store = Arc::new(JsonFileStore::new(config.data_file.clone()));
    let session = Session::open(store, today_utc).await;
    AppState::new(session)
}

pub fn build_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn create_app(config: &Config) -> axum::Router {
    build_app(create_state(config).await)
}
