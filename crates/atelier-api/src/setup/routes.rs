//! Route configuration and setup

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use atelier_core::Config;

use crate::api_doc;
use crate::auth::admin_auth_middleware;
use crate::handlers;
use crate::state::SharedState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: SharedState) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Public routes (no authentication required)
    let public_routes: Router<SharedState> = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/works", get(handlers::works_list::list_works));

    // Admin routes: every mutating operation sits behind the access guard
    let protected_routes: Router<SharedState> = Router::new()
        .route(
            "/works",
            post(handlers::works_create::create_work)
                .put(handlers::works_update::update_work)
                .delete(handlers::works_delete::delete_work),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.authenticator.clone(),
            admin_auth_middleware,
        ));

    let app = public_routes
        .merge(protected_routes)
        .with_state(state.clone());

    let app = app
        .route("/api-docs/openapi.json", get(|| async { Json(api_doc::openapi()) }))
        .merge(utoipa_rapidoc::RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(state.config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    if config.cors_origins.iter().any(|o| o == "*") {
        Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any))
    }
}
