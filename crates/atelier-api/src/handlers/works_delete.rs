use axum::{extract::State, response::IntoResponse, Json};

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::{DeleteWorkRequest, DeleteWorkResponse};
use crate::state::SharedState;

/// Delete a work and best-effort delete its stored images (admin only).
#[utoipa::path(
    delete,
    path = "/works",
    tag = "works",
    request_body = DeleteWorkRequest,
    responses(
        (status = 200, description = "Work deleted", body = DeleteWorkResponse),
        (status = 400, description = "Missing id", body = ErrorResponse),
        (status = 401, description = "Missing credentials", body = ErrorResponse),
        (status = 403, description = "Invalid credentials", body = ErrorResponse),
        (status = 404, description = "Unknown work id", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    security(("basic_auth" = []))
)]
pub async fn delete_work(
    State(state): State<SharedState>,
    ValidatedJson(request): ValidatedJson<DeleteWorkRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.service.delete(request.id).await?;
    Ok(Json(DeleteWorkResponse { ok: true }))
}
