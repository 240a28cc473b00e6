use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::collect_work_form;
use crate::handlers::WorkMutationResponse;
use crate::state::SharedState;

/// Create a work (admin only).
///
/// Multipart form: `cover` file required, `images` files optional-multiple,
/// `title` required, plus `subtitle`, `description`, `category`, `tags`
/// (comma-separated), `year`, `href`.
#[utoipa::path(
    post,
    path = "/works",
    tag = "works",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Work created", body = WorkMutationResponse),
        (status = 400, description = "Missing title or cover", body = ErrorResponse),
        (status = 401, description = "Missing credentials", body = ErrorResponse),
        (status = 403, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    ),
    security(("basic_auth" = []))
)]
pub async fn create_work(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = collect_work_form(&mut multipart).await?;
    let work = state.service.create(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(WorkMutationResponse {
            ok: true,
            work: work.into(),
        }),
    ))
}
