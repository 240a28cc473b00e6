use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A portfolio work as persisted in the `works` table.
///
/// Invariants maintained by the work service and repository:
/// `images` is non-empty, `images[0] == cover_url`, and `images` contains
/// no duplicate URLs. `tags` entries are lowercase, trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Work {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub cover_url: String,
    pub images: Vec<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub year: Option<i32>,
    pub href: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public JSON shape of a work.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cover_url: String,
    pub images: Vec<String>,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Work> for WorkResponse {
    fn from(w: Work) -> Self {
        WorkResponse {
            id: w.id,
            title: w.title,
            subtitle: w.subtitle,
            description: w.description,
            cover_url: w.cover_url,
            images: w.images,
            category: w.category,
            tags: w.tags,
            year: w.year,
            href: w.href,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

/// Fields for inserting a new work. The repository assigns id and
/// timestamps.
#[derive(Debug, Clone)]
pub struct NewWork {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub cover_url: String,
    pub images: Vec<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub year: Option<i32>,
    pub href: Option<String>,
}

/// Patch intent for one nullable column.
///
/// `Keep` leaves the stored value untouched; `Set(None)` is an explicit
/// clear (stored NULL); `Set(Some(v))` overwrites. An empty form field for
/// an optional text field resolves to `Set(None)`, not `Keep`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Set(Option<T>),
}

impl<T> FieldPatch<T> {
    /// Resolve against the currently stored value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            FieldPatch::Keep => current,
            FieldPatch::Set(next) => next,
        }
    }
}

/// Partial update for a work. Only populated fields are written.
#[derive(Debug, Clone, Default)]
pub struct WorkPatch {
    /// Non-empty replacement title; `None` leaves the title unchanged.
    pub title: Option<String>,
    pub subtitle: FieldPatch<String>,
    pub description: FieldPatch<String>,
    /// Replacement cover URL, set by the service after a cover upload.
    pub cover_url: Option<String>,
    /// Full replacement image list, already reconciled by the service.
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub year: FieldPatch<i32>,
    pub href: FieldPatch<String>,
}

impl WorkPatch {
    /// True when the patch writes nothing beyond `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle == FieldPatch::Keep
            && self.description == FieldPatch::Keep
            && self.cover_url.is_none()
            && self.images.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.year == FieldPatch::Keep
            && self.href == FieldPatch::Keep
    }
}
