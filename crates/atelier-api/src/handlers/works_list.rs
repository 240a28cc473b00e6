use axum::{extract::State, response::IntoResponse, Json};

use atelier_core::models::WorkResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::WorksListResponse;
use crate::state::SharedState;

/// Public catalog feed: every work, newest first.
#[utoipa::path(
    get,
    path = "/works",
    tag = "works",
    responses(
        (status = 200, description = "All works, newest first", body = WorksListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_works(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let works = state.service.list().await?;
    Ok(Json(WorksListResponse {
        works: works.into_iter().map(WorkResponse::from).collect(),
    }))
}
