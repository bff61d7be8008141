use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{bsl, service_info};
use crate::api::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    // Duplicate trailing-slash routes prevent redirects; only the
    // canonical paths appear in the API docs.
    let bsl_routes = Router::new()
        .route(
            "/bsl",
            get(bsl::list_measurements)
                .post(bsl::create_measurement)
                .put(bsl::update_measurement),
        )
        .route(
            "/bsl/",
            get(bsl::list_measurements)
                .post(bsl::create_measurement)
                .put(bsl::update_measurement),
        )
        .route(
            "/bsl/:id",
            get(bsl::get_measurement).delete(bsl::delete_measurement),
        );

    let app = Router::new()
        .route("/", get(service_info::service_info))
        .merge(bsl_routes)
        .with_state(state);

    debug!("Routes configured");

    app.merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http())
}
