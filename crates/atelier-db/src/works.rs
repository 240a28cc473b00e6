use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use atelier_core::models::{NewWork, Work, WorkPatch};
use atelier_core::validation::normalize_tag_list;
use atelier_core::AppError;

/// Persistence contract for works.
///
/// `PgWorksRepository` is the production implementation; the trait is the
/// seam the work service is tested through.
#[async_trait]
pub trait WorksRepository: Send + Sync {
    /// All works, newest first.
    async fn list(&self) -> Result<Vec<Work>, AppError>;

    /// Fails with `AppError::NotFound` when the id is absent.
    async fn get(&self, id: Uuid) -> Result<Work, AppError>;

    /// Assigns id and timestamps.
    async fn insert(&self, new: NewWork) -> Result<Work, AppError>;

    /// Partial update; only populated patch fields are written. Fails with
    /// `NotFound` when the id is absent.
    async fn update(&self, id: Uuid, patch: WorkPatch) -> Result<Work, AppError>;

    /// Deletes the row and returns its snapshot so the caller can clean up
    /// storage. Fails with `NotFound` when the id is absent.
    async fn delete(&self, id: Uuid) -> Result<Work, AppError>;
}

/// Resolve a patch against the current row. Pure so the explicit-clear
/// semantics are testable without a database; `updated_at` is stamped by
/// the UPDATE itself.
fn apply_patch(current: Work, patch: WorkPatch) -> Work {
    Work {
        id: current.id,
        title: patch.title.unwrap_or(current.title),
        subtitle: patch.subtitle.apply(current.subtitle),
        description: patch.description.apply(current.description),
        cover_url: patch.cover_url.unwrap_or(current.cover_url),
        images: patch.images.unwrap_or(current.images),
        category: patch.category.unwrap_or(current.category),
        tags: normalize_tag_list(&patch.tags.unwrap_or(current.tags)),
        year: patch.year.apply(current.year),
        href: patch.href.apply(current.href),
        created_at: current.created_at,
        updated_at: current.updated_at,
    }
}

/// Works repository backed by Postgres.
#[derive(Clone)]
pub struct PgWorksRepository {
    pool: PgPool,
}

impl PgWorksRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorksRepository for PgWorksRepository {
    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Work>, AppError> {
        let works = sqlx::query_as::<Postgres, Work>(
            r#"SELECT * FROM works ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(works)
    }

    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "select"))]
    async fn get(&self, id: Uuid) -> Result<Work, AppError> {
        sqlx::query_as::<Postgres, Work>(r#"SELECT * FROM works WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "works", db.operation = "insert"))]
    async fn insert(&self, new: NewWork) -> Result<Work, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let tags = normalize_tag_list(&new.tags);

        let work = sqlx::query_as::<Postgres, Work>(
            r#"
            INSERT INTO works (
                id, title, subtitle, description, cover_url, images,
                category, tags, year, href, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&new.title)
        .bind(&new.subtitle)
        .bind(&new.description)
        .bind(&new.cover_url)
        .bind(&new.images)
        .bind(&new.category)
        .bind(&tags)
        .bind(new.year)
        .bind(&new.href)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(work)
    }

    #[tracing::instrument(skip(self, patch), fields(db.table = "works", db.operation = "update"))]
    async fn update(&self, id: Uuid, patch: WorkPatch) -> Result<Work, AppError> {
        let current = self.get(id).await?;
        let next = apply_patch(current, patch);

        sqlx::query_as::<Postgres, Work>(
            r#"
            UPDATE works SET
                title = $2, subtitle = $3, description = $4, cover_url = $5,
                images = $6, category = $7, tags = $8, year = $9, href = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&next.title)
        .bind(&next.subtitle)
        .bind(&next.description)
        .bind(&next.cover_url)
        .bind(&next.images)
        .bind(&next.category)
        .bind(&next.tags)
        .bind(next.year)
        .bind(&next.href)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "delete"))]
    async fn delete(&self, id: Uuid) -> Result<Work, AppError> {
        sqlx::query_as::<Postgres, Work>(r#"DELETE FROM works WHERE id = $1 RETURNING *"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::models::FieldPatch;

    fn current() -> Work {
        Work {
            id: Uuid::new_v4(),
            title: "Launch KV".to_string(),
            subtitle: Some("Fintech".to_string()),
            description: Some("desc".to_string()),
            cover_url: "urlA".to_string(),
            images: vec!["urlA".to_string(), "urlB".to_string()],
            category: "Key Visual".to_string(),
            tags: vec!["3d".to_string()],
            year: Some(2024),
            href: Some("https://example.com".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_patch_keeps_every_field() {
        let before = current();
        let after = apply_patch(before.clone(), WorkPatch::default());
        assert_eq!(after, before);
    }

    #[test]
    fn explicit_clear_stores_none() {
        let patch = WorkPatch {
            subtitle: FieldPatch::Set(None),
            href: FieldPatch::Set(None),
            ..Default::default()
        };
        let after = apply_patch(current(), patch);
        assert_eq!(after.subtitle, None);
        assert_eq!(after.href, None);
        // untouched fields survive
        assert_eq!(after.description.as_deref(), Some("desc"));
    }

    #[test]
    fn supplied_fields_overwrite() {
        let patch = WorkPatch {
            title: Some("Renamed".to_string()),
            year: FieldPatch::Set(Some(2026)),
            images: Some(vec!["urlC".to_string()]),
            cover_url: Some("urlC".to_string()),
            ..Default::default()
        };
        let after = apply_patch(current(), patch);
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.year, Some(2026));
        assert_eq!(after.images, vec!["urlC".to_string()]);
        assert_eq!(after.cover_url, "urlC");
    }

    #[test]
    fn patched_tags_are_renormalized() {
        let patch = WorkPatch {
            tags: Some(vec![" Mixed Case ".to_string(), String::new()]),
            ..Default::default()
        };
        let after = apply_patch(current(), patch);
        assert_eq!(after.tags, vec!["mixed case".to_string()]);
    }
}
