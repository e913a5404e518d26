//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shows API",
        version = "0.1.0",
        description = "REST API for live show records and their checklists",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(crate::api::root::hello),
    nest(
        (path = "/shows", api = domain_shows::ApiDoc)
    ),
    tags(
        (name = "Shows", description = "Show management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
