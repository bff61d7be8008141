use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;

/// Basic service identity returned by the root endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Service name
    pub service: String,

    /// Service version
    pub version: String,
}

/// Return basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name and version", body = ServiceInfo),
    ),
    tag = "service"
)]
#[instrument(skip(state))]
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: state.settings.service_name.clone(),
        version: state.settings.service_version.clone(),
    })
}
