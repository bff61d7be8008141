use std::sync::Arc;

use axum::Router;

use bsl_track_data::repository::InMemoryRepository;

use crate::api::routes::create_app;
use crate::api::AppState;
use crate::config::Settings;

mod service_info_test;

/// Build an application router backed by the in-memory repository
fn test_app() -> Router {
    let state = AppState {
        settings: Arc::new(Settings::default()),
        measurements: Arc::new(InMemoryRepository::new()),
    };

    create_app(state)
}
