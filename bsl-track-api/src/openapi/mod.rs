use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Service information
        crate::api::handlers::service_info::service_info,

        // BSL measurement endpoints
        crate::api::handlers::bsl::list_measurements,
        crate::api::handlers::bsl::get_measurement,
        crate::api::handlers::bsl::create_measurement,
        crate::api::handlers::bsl::update_measurement,
        crate::api::handlers::bsl::delete_measurement,
    ),
    components(
        schemas(
            // Entities
            crate::entities::measurement::BslMeasurement,
            crate::entities::measurement::SaveMeasurementRequest,
            crate::entities::measurement::MeasurementType,

            // Handler responses
            crate::api::handlers::bsl::ErrorResponse,
            crate::api::handlers::service_info::ServiceInfo,
        )
    ),
    tags(
        (name = "bsl", description = "Blood sugar level measurement endpoints"),
        (name = "service", description = "Service information endpoint")
    ),
    info(
        title = "BSL Track API",
        version = "0.1.0",
        description = "API for tracking blood sugar level measurements",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "BSL Track API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "bsl"));
        assert!(tags.iter().any(|tag| tag.name == "service"));

        // Only the canonical paths are documented; the trailing-slash
        // aliases stay out of the schema
        assert!(openapi.paths.paths.contains_key("/"));
        assert!(openapi.paths.paths.contains_key("/bsl"));
        assert!(openapi.paths.paths.contains_key("/bsl/{id}"));
        assert!(!openapi.paths.paths.contains_key("/bsl/"));
    }
}
