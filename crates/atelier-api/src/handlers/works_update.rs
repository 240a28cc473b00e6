use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::collect_work_form;
use crate::handlers::WorkMutationResponse;
use crate::state::SharedState;

/// Update a work (admin only).
///
/// Multipart form: `id` required; optional new `cover`, optional `images`
/// (full gallery replace), optional `removeImages` (comma-separated URL
/// list), plus the same text fields as create with partial-update and
/// explicit-clear semantics.
#[utoipa::path(
    put,
    path = "/works",
    tag = "works",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Work updated", body = WorkMutationResponse),
        (status = 400, description = "Missing id", body = ErrorResponse),
        (status = 401, description = "Missing credentials", body = ErrorResponse),
        (status = 403, description = "Invalid credentials", body = ErrorResponse),
        (status = 404, description = "Unknown work id", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    ),
    security(("basic_auth" = []))
)]
pub async fn update_work(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = collect_work_form(&mut multipart).await?;
    let work = state.service.update(form).await?;
    Ok(Json(WorkMutationResponse {
        ok: true,
        work: work.into(),
    }))
}
