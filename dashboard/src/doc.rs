//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the JSON surface of the gateway. It registers:
//!
//! - **Paths**: the dashboard stats endpoint and the health probes
//! - **Schemas**: the stats tree and the error envelope
//! - **Security**: the session cookie issued by the login form
//!
//! The generated specification is served by Swagger UI in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::{Error, ErrorCode};
use crate::domain::stats::{
    DashboardStats, RecentBooking, RevenuePoint, StatusCount, TopService, TopStylist,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the gateway's JSON endpoints.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Barbershop admin gateway API",
        description = "JSON surface of the server-rendered admin dashboard: \
                       aggregate statistics and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::dashboard::stats_json,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DashboardStats,
        RevenuePoint,
        StatusCount,
        TopService,
        TopStylist,
        RecentBooking,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "dashboard", description = "Aggregate statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_stats_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let stats_schema = schemas.get("DashboardStats").expect("DashboardStats schema");

        assert_object_schema_has_field(stats_schema, "totalRevenue");
        assert_object_schema_has_field(stats_schema, "totalBookings");
    }

    #[test]
    fn openapi_document_lists_stats_and_health_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/v1/dashboard/stats"));
        assert!(paths.contains_key("/health/ready"));
        assert!(paths.contains_key("/health/live"));
    }
}
