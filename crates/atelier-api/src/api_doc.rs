//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;

struct BasicAuthAddon;

impl Modify for BasicAuthAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atelier API",
        version = "0.1.0",
        description = "Portfolio works service: a public catalog feed plus Basic-Auth-protected admin CRUD with cover/gallery image uploads."
    ),
    paths(
        handlers::health::health,
        handlers::works_list::list_works,
        handlers::works_create::create_work,
        handlers::works_update::update_work,
        handlers::works_delete::delete_work,
    ),
    components(schemas(
        atelier_core::models::WorkResponse,
        handlers::WorksListResponse,
        handlers::WorkMutationResponse,
        handlers::DeleteWorkRequest,
        handlers::DeleteWorkResponse,
        crate::error::ErrorResponse,
    )),
    modifiers(&BasicAuthAddon),
    tags(
        (name = "works", description = "Portfolio works"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// The served OpenAPI document.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
