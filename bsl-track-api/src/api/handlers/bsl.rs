use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use bsl_track_data::models::measurement::MeasurementRecord;
use bsl_track_data::repository::RepositoryError;

use crate::api::AppState;
use crate::entities::measurement::{BslMeasurement, SaveMeasurementRequest};

/// Error response format for the API
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Convert a stored record to its public representation
fn to_public(record: MeasurementRecord) -> Result<BslMeasurement, Response> {
    BslMeasurement::try_from(record).map_err(|e| {
        error!("Stored measurement is corrupt: {}", e);
        ErrorResponse::internal_error().into_response()
    })
}

/// Translate a repository error into an API response
fn repository_error_response(error: RepositoryError) -> Response {
    match error {
        RepositoryError::NotFound(id) => {
            info!("No measurement with that ID: {}", id);
            ErrorResponse::not_found("measurement").into_response()
        }
        RepositoryError::InvalidRequest(message) => {
            warn!("Invalid measurement request: {}", message);
            ErrorResponse::bad_request(&message).into_response()
        }
        other => {
            error!("Repository error: {}", other);
            ErrorResponse::internal_error().into_response()
        }
    }
}

/// Validate a candidate measurement before it reaches the store
fn validate_request(request: &SaveMeasurementRequest) -> Result<(), Response> {
    request.validate().map_err(|errors| {
        warn!("Measurement failed validation: {}", errors);
        ErrorResponse::validation_error(
            "Measurement failed validation",
            serde_json::to_value(&errors).ok(),
        )
        .into_response()
    })
}

/// Return a summary list of all BSL measurements
#[utoipa::path(
    get,
    path = "/bsl",
    responses(
        (status = 200, description = "List of all BSL measurements", body = Vec<BslMeasurement>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bsl"
)]
#[instrument(skip(state))]
pub async fn list_measurements(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Response> {
    debug!("list_measurements()");

    match state.measurements.list().await {
        Ok(records) => {
            let mut measurements = Vec::with_capacity(records.len());
            for record in records {
                measurements.push(to_public(record)?);
            }
            Ok((StatusCode::OK, Json(measurements)))
        }
        Err(e) => Err(repository_error_response(e)),
    }
}

/// Return details for a single BSL measurement
#[utoipa::path(
    get,
    path = "/bsl/{id}",
    params(
        ("id" = i64, Path, description = "Measurement ID")
    ),
    responses(
        (status = 200, description = "Measurement found", body = BslMeasurement),
        (status = 404, description = "Measurement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bsl"
)]
#[instrument(skip(state))]
pub async fn get_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Response> {
    debug!("get_measurement()");

    match state.measurements.read(id).await {
        Ok(record) => Ok((StatusCode::OK, Json(to_public(record)?))),
        Err(e) => Err(repository_error_response(e)),
    }
}

/// Create a new BSL measurement
#[utoipa::path(
    post,
    path = "/bsl",
    request_body = SaveMeasurementRequest,
    responses(
        (status = 201, description = "Measurement created", body = BslMeasurement),
        (status = 400, description = "Invalid measurement", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bsl"
)]
#[instrument(skip(state, request))]
pub async fn create_measurement(
    State(state): State<AppState>,
    Json(request): Json<SaveMeasurementRequest>,
) -> Result<impl IntoResponse, Response> {
    debug!("create_measurement()");

    validate_request(&request)?;

    match state.measurements.create(request.into_draft()).await {
        Ok(record) => {
            info!("BSL measurement created with ID: {}", record.id);
            Ok((StatusCode::CREATED, Json(to_public(record)?)))
        }
        Err(e) => Err(repository_error_response(e)),
    }
}

/// Modify an existing BSL measurement
///
/// The update is a full-record overwrite: every stored field takes the
/// incoming value, and an omitted date or time resets to "now" exactly as
/// it would on create.
#[utoipa::path(
    put,
    path = "/bsl",
    request_body = SaveMeasurementRequest,
    responses(
        (status = 201, description = "Measurement updated", body = BslMeasurement),
        (status = 400, description = "Invalid measurement", body = ErrorResponse),
        (status = 404, description = "Measurement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bsl"
)]
#[instrument(skip(state, request))]
pub async fn update_measurement(
    State(state): State<AppState>,
    Json(request): Json<SaveMeasurementRequest>,
) -> Result<impl IntoResponse, Response> {
    debug!("update_measurement()");

    validate_request(&request)?;

    match state.measurements.update(request.into_draft()).await {
        Ok(record) => {
            info!("BSL measurement updated: {}", record.id);
            Ok((StatusCode::CREATED, Json(to_public(record)?)))
        }
        Err(e) => Err(repository_error_response(e)),
    }
}

/// Delete an existing measurement (or do nothing if it doesn't exist)
#[utoipa::path(
    delete,
    path = "/bsl/{id}",
    params(
        ("id" = i64, Path, description = "Measurement ID")
    ),
    responses(
        (status = 204, description = "Measurement deleted (or was already absent)"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bsl"
)]
#[instrument(skip(state))]
pub async fn delete_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Response> {
    debug!("delete_measurement()");

    match state.measurements.delete(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(repository_error_response(e)),
    }
}
