//! HTTP handlers, one file per endpoint.

pub mod health;
pub mod works_create;
pub mod works_delete;
pub mod works_list;
pub mod works_update;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use atelier_core::models::WorkResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct WorksListResponse {
    pub works: Vec<WorkResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkMutationResponse {
    pub ok: bool,
    pub work: WorkResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteWorkResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteWorkRequest {
    /// Missing ids are reported as a 400 by the service, not a
    /// deserialization rejection.
    pub id: Option<String>,
}
