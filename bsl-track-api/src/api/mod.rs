pub mod handlers;
pub mod routes;

use std::sync::Arc;

use bsl_track_data::repository::MeasurementRepositoryTrait;

use crate::config::Settings;

/// Shared measurement repository used by the handlers
pub type MeasurementService = Arc<dyn MeasurementRepositoryTrait + Send + Sync>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide settings, loaded once at startup
    pub settings: Arc<Settings>,

    /// Measurement repository
    pub measurements: MeasurementService,
}
