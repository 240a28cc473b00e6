//! Work service: orchestrates the storage gateway and the works repository.
//!
//! Each operation runs Validating -> Uploading -> Persisting. Validation
//! failures return before any upload; upload/persist failures return the
//! first error encountered with no rollback of steps already completed (a
//! freshly uploaded cover orphaned by a failed row write stays in storage;
//! there is no reconciliation pass). Object deletions are best-effort and
//! never fail a primary operation that already succeeded.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use atelier_core::models::{FieldPatch, NewWork, Work, WorkPatch};
use atelier_core::validation::{coerce_year, normalize_tags};
use atelier_core::{constants, gallery, AppError};
use atelier_db::WorksRepository;
use atelier_storage::{ObjectFolder, WorkStorage};

use crate::extract::WorkForm;

/// Outcome of a best-effort cleanup pass. Callers log it and move on; it
/// is never propagated to the client.
#[derive(Debug, Error)]
#[error("{failed} of {attempted} object deletions failed")]
pub struct CleanupError {
    pub attempted: usize,
    pub failed: usize,
}

fn non_empty(input: Option<String>) -> Option<String> {
    input
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Explicit-clear resolution for optional text fields: an empty (or
/// absent) form value stores NULL, a non-empty value overwrites.
fn clear_or_set(input: Option<String>) -> FieldPatch<String> {
    match non_empty(input) {
        Some(value) => FieldPatch::Set(Some(value)),
        None => FieldPatch::Set(None),
    }
}

fn validated_category(input: Option<String>) -> Result<Option<String>, AppError> {
    match non_empty(input) {
        Some(category) if !constants::is_known_category(&category) => Err(
            AppError::InvalidInput(format!("Unknown category: {}", category)),
        ),
        other => Ok(other),
    }
}

fn parse_work_id(raw: Option<String>) -> Result<Uuid, AppError> {
    let raw = non_empty(raw).ok_or_else(|| AppError::InvalidInput("id is required".to_string()))?;
    Ok(Uuid::parse_str(&raw)?)
}

/// Coordinates uploads and row writes for the admin CRUD operations.
#[derive(Clone)]
pub struct WorkService {
    works: Arc<dyn WorksRepository>,
    storage: Arc<dyn WorkStorage>,
}

impl WorkService {
    pub fn new(works: Arc<dyn WorksRepository>, storage: Arc<dyn WorkStorage>) -> Self {
        Self { works, storage }
    }

    pub async fn list(&self) -> Result<Vec<Work>, AppError> {
        self.works.list().await
    }

    /// Create a work from the admin form. Requires a non-empty title and a
    /// non-empty cover file.
    #[tracing::instrument(skip(self, form), fields(operation = "create_work"))]
    pub async fn create(&self, form: WorkForm) -> Result<Work, AppError> {
        let WorkForm {
            title,
            subtitle,
            description,
            category,
            tags,
            year,
            href,
            cover,
            images,
            ..
        } = form;

        // Validating
        let title = non_empty(title)
            .ok_or_else(|| AppError::InvalidInput("Title is required".to_string()))?;
        let cover = cover
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::InvalidInput("Cover is required".to_string()))?;
        let category = validated_category(category)?
            .unwrap_or_else(|| constants::DEFAULT_CATEGORY.to_string());
        let subtitle = non_empty(subtitle);
        let description = non_empty(description);
        let href = non_empty(href);
        let tags = normalize_tags(tags.as_deref().unwrap_or_default());
        let year = coerce_year(year.as_deref().unwrap_or_default());

        // Uploading: cover first, then gallery files in submission order
        let uploaded_cover = self
            .storage
            .upload(
                ObjectFolder::Covers,
                &cover.filename,
                &cover.content_type,
                cover.data,
            )
            .await?;

        let mut gallery_urls = Vec::new();
        for file in images.into_iter().filter(|f| !f.is_empty()) {
            let uploaded = self
                .storage
                .upload(
                    ObjectFolder::Gallery,
                    &file.filename,
                    &file.content_type,
                    file.data,
                )
                .await?;
            gallery_urls.push(uploaded.public_url);
        }

        // Persisting
        let work_images = gallery::build_images(&uploaded_cover.public_url, &gallery_urls);
        self.works
            .insert(NewWork {
                title,
                subtitle,
                description,
                cover_url: uploaded_cover.public_url,
                images: work_images,
                category,
                tags,
                year,
                href,
            })
            .await
    }

    /// Update a work: optional cover replacement, optional full gallery
    /// replace, caller-selected removals, and partial field updates.
    #[tracing::instrument(skip(self, form), fields(operation = "update_work"))]
    pub async fn update(&self, form: WorkForm) -> Result<Work, AppError> {
        let WorkForm {
            id,
            title,
            subtitle,
            description,
            category,
            tags,
            year,
            href,
            remove_images,
            cover,
            images,
        } = form;

        // Validating
        let id = parse_work_id(id)?;
        let title = non_empty(title);
        let category = validated_category(category)?;
        let tags = non_empty(tags).map(|raw| normalize_tags(&raw));
        let year = match non_empty(year) {
            Some(raw) => FieldPatch::Set(coerce_year(&raw)),
            None => FieldPatch::Keep,
        };
        let subtitle = clear_or_set(subtitle);
        let description = clear_or_set(description);
        let href = clear_or_set(href);
        let removals = gallery::split_url_list(remove_images.as_deref().unwrap_or_default());

        let current = self.works.get(id).await?;

        // Uploading
        let mut cover_url = current.cover_url.clone();
        let mut cover_changed = false;
        if let Some(file) = cover.filter(|f| !f.is_empty()) {
            let uploaded = self
                .storage
                .upload(
                    ObjectFolder::Covers,
                    &file.filename,
                    &file.content_type,
                    file.data,
                )
                .await?;
            // The new cover is live; the old object is superseded.
            if let Err(e) = self.cleanup_urls(&[current.cover_url.clone()]).await {
                tracing::warn!(error = %e, work_id = %id, "Old cover cleanup incomplete");
            }
            cover_url = uploaded.public_url;
            cover_changed = true;
        }

        let new_gallery: Vec<_> = images.into_iter().filter(|f| !f.is_empty()).collect();
        let mut next_images = if !new_gallery.is_empty() {
            // Full replace: the current gallery tail is superseded. The
            // cover object is only ever deleted by a cover replacement.
            let stale: Vec<String> = current
                .images
                .iter()
                .filter(|u| *u != &current.cover_url)
                .cloned()
                .collect();
            if let Err(e) = self.cleanup_urls(&stale).await {
                tracing::warn!(error = %e, work_id = %id, "Gallery cleanup incomplete");
            }

            let mut urls = Vec::with_capacity(new_gallery.len());
            for file in new_gallery {
                let uploaded = self
                    .storage
                    .upload(
                        ObjectFolder::Gallery,
                        &file.filename,
                        &file.content_type,
                        file.data,
                    )
                    .await?;
                urls.push(uploaded.public_url);
            }
            gallery::replace_gallery(&cover_url, &urls)
        } else if cover_changed {
            gallery::rebuild_for_cover_swap(&cover_url, &current.images, &current.cover_url)
        } else {
            current.images.clone()
        };

        if !removals.is_empty() {
            let (kept, dropped) = gallery::apply_removals(next_images, &removals);
            next_images = kept;
            if let Err(e) = self.cleanup_urls(&dropped).await {
                tracing::warn!(error = %e, work_id = %id, "Removed image cleanup incomplete");
            }
        }
        let next_images = gallery::dedup_preserving_order(next_images);

        // Persisting
        let patch = WorkPatch {
            title,
            subtitle,
            description,
            cover_url: Some(cover_url),
            images: Some(next_images),
            category,
            tags,
            year,
            href,
        };
        self.works.update(id, patch).await
    }

    /// Delete a work row, then best-effort delete every object its image
    /// list references. Row deletion is not reverted if cleanup fails.
    #[tracing::instrument(skip(self), fields(operation = "delete_work"))]
    pub async fn delete(&self, id: Option<String>) -> Result<(), AppError> {
        let id = parse_work_id(id)?;
        let deleted = self.works.delete(id).await?;
        if let Err(e) = self.cleanup_urls(&deleted.images).await {
            tracing::warn!(error = %e, work_id = %id, "Deleted work cleanup incomplete");
        }
        Ok(())
    }

    /// Best-effort batch delete. URLs that do not reverse to a key (foreign
    /// images) are skipped; per-key failures are logged and counted, never
    /// escalated.
    async fn cleanup_urls(&self, urls: &[String]) -> Result<(), CleanupError> {
        let mut attempted = 0;
        let mut failed = 0;
        for url in urls {
            let Some(key) = self.storage.public_url_to_key(url) else {
                tracing::debug!(url = %url, "Skipping cleanup for foreign URL");
                continue;
            };
            attempted += 1;
            if let Err(e) = self.storage.delete(&key).await {
                failed += 1;
                tracing::warn!(error = %e, key = %key, "Best-effort object cleanup failed");
            }
        }
        if failed == 0 {
            Ok(())
        } else {
            Err(CleanupError { attempted, failed })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::UploadedFile;
    use async_trait::async_trait;
    use atelier_core::validation::normalize_tag_list;
    use atelier_storage::{keys, StorageError, StorageResult, UploadedObject};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const TEST_BASE: &str = "https://cdn.test";
    const TEST_BUCKET: &str = "works-images";

    // ----- doubles -----

    #[derive(Default)]
    struct InMemoryWorks {
        rows: Mutex<Vec<Work>>,
    }

    #[async_trait]
    impl WorksRepository for InMemoryWorks {
        async fn list(&self) -> Result<Vec<Work>, AppError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn get(&self, id: Uuid) -> Result<Work, AppError> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))
        }

        async fn insert(&self, new: NewWork) -> Result<Work, AppError> {
            let now = Utc::now();
            let work = Work {
                id: Uuid::new_v4(),
                title: new.title,
                subtitle: new.subtitle,
                description: new.description,
                cover_url: new.cover_url,
                images: new.images,
                category: new.category,
                tags: normalize_tag_list(&new.tags),
                year: new.year,
                href: new.href,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(work.clone());
            Ok(work)
        }

        async fn update(&self, id: Uuid, patch: WorkPatch) -> Result<Work, AppError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|w| w.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))?;
            let current = row.clone();
            *row = Work {
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
                updated_at: Utc::now(),
            };
            Ok(row.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<Work, AppError> {
            let mut rows = self.rows.lock().unwrap();
            let idx = rows
                .iter()
                .position(|w| w.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))?;
            Ok(rows.remove(idx))
        }
    }

    #[derive(Default)]
    struct RecordingStorage {
        counter: AtomicUsize,
        uploads: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
        fail_deletes: bool,
    }

    impl RecordingStorage {
        fn failing_deletes() -> Self {
            RecordingStorage {
                fail_deletes: true,
                ..Default::default()
            }
        }

        fn deleted_keys(&self) -> Vec<String> {
            self.deletes.lock().unwrap().clone()
        }

        fn uploaded_keys(&self) -> Vec<String> {
            self.uploads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WorkStorage for RecordingStorage {
        async fn upload(
            &self,
            folder: ObjectFolder,
            original_filename: &str,
            _content_type: &str,
            _data: Vec<u8>,
        ) -> StorageResult<UploadedObject> {
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            let key = format!(
                "{}/{:04}-{}",
                folder.as_str(),
                n,
                original_filename.to_lowercase()
            );
            self.uploads.lock().unwrap().push(key.clone());
            let public_url = keys::public_url(TEST_BASE, TEST_BUCKET, &key);
            Ok(UploadedObject { key, public_url })
        }

        async fn delete(&self, key: &str) -> StorageResult<()> {
            if self.fail_deletes {
                return Err(StorageError::DeleteFailed("backend offline".to_string()));
            }
            self.deletes.lock().unwrap().push(key.to_string());
            Ok(())
        }

        fn public_url_to_key(&self, url: &str) -> Option<String> {
            keys::url_to_key(url, TEST_BUCKET)
        }

        fn backend_type(&self) -> atelier_core::StorageBackend {
            atelier_core::StorageBackend::Local
        }
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0xAB],
        }
    }

    fn service_with(
        storage: Arc<RecordingStorage>,
    ) -> (WorkService, Arc<InMemoryWorks>, Arc<RecordingStorage>) {
        let works = Arc::new(InMemoryWorks::default());
        let service = WorkService::new(works.clone(), storage.clone());
        (service, works, storage)
    }

    fn service() -> (WorkService, Arc<InMemoryWorks>, Arc<RecordingStorage>) {
        service_with(Arc::new(RecordingStorage::default()))
    }

    fn create_form(title: &str) -> WorkForm {
        WorkForm {
            title: Some(title.to_string()),
            cover: Some(file("fileA.jpg")),
            ..Default::default()
        }
    }

    fn key_of(storage: &RecordingStorage, url: &str) -> String {
        storage.public_url_to_key(url).expect("our URL")
    }

    // ----- create -----

    #[tokio::test]
    async fn create_without_gallery_yields_single_image_list() {
        let (service, _, _) = service();
        let work = service.create(create_form("Launch KV")).await.expect("create");
        assert_eq!(work.title, "Launch KV");
        assert_eq!(work.images, vec![work.cover_url.clone()]);
        assert!(work.cover_url.contains("/covers/"));
        assert_eq!(work.category, constants::DEFAULT_CATEGORY);
    }

    #[tokio::test]
    async fn create_uploads_cover_then_gallery_in_order() {
        let (service, _, storage) = service();
        let mut form = create_form("Launch KV");
        form.images = vec![file("b.png"), file("c.webp")];
        let work = service.create(form).await.expect("create");

        assert_eq!(work.images.len(), 3);
        assert_eq!(work.images[0], work.cover_url);
        assert!(work.images[1].contains("/gallery/"));
        assert!(work.images[2].contains("/gallery/"));

        let uploads = storage.uploaded_keys();
        assert!(uploads[0].starts_with("covers/"));
        assert!(uploads[1].contains("b.png"));
        assert!(uploads[2].contains("c.webp"));
    }

    #[tokio::test]
    async fn create_normalizes_tags_and_year() {
        let (service, _, _) = service();
        let mut form = create_form("Launch KV");
        form.tags = Some(" 3D , Fintech ".to_string());
        form.year = Some("2025".to_string());
        form.subtitle = Some("  ".to_string());
        let work = service.create(form).await.expect("create");
        assert_eq!(work.tags, vec!["3d".to_string(), "fintech".to_string()]);
        assert_eq!(work.year, Some(2025));
        assert_eq!(work.subtitle, None);
    }

    #[tokio::test]
    async fn create_requires_title_before_any_upload() {
        let (service, _, storage) = service();
        let mut form = create_form("  ");
        form.images = vec![file("b.png")];
        match service.create(form).await {
            Err(AppError::InvalidInput(msg)) => assert!(msg.contains("Title")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|w| w.id)),
        }
        assert!(storage.uploaded_keys().is_empty());
    }

    #[tokio::test]
    async fn create_requires_a_non_empty_cover() {
        let (service, _, storage) = service();
        let mut form = create_form("Launch KV");
        form.cover = Some(UploadedFile::default());
        match service.create(form).await {
            Err(AppError::InvalidInput(msg)) => assert!(msg.contains("Cover")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|w| w.id)),
        }
        assert!(storage.uploaded_keys().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_categories() {
        let (service, _, _) = service();
        let mut form = create_form("Launch KV");
        form.category = Some("Sculpture".to_string());
        match service.create(form).await {
            Err(AppError::InvalidInput(msg)) => assert!(msg.contains("Sculpture")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|w| w.id)),
        }
    }

    // ----- update -----

    #[tokio::test]
    async fn update_full_gallery_replace_keeps_the_cover() {
        let (service, _, storage) = service();
        let created = service.create(create_form("Launch KV")).await.expect("create");

        let form = WorkForm {
            id: Some(created.id.to_string()),
            images: vec![file("fileB.jpg"), file("fileC.jpg")],
            ..Default::default()
        };
        let updated = service.update(form).await.expect("update");

        assert_eq!(updated.cover_url, created.cover_url);
        assert_eq!(updated.images.len(), 3);
        assert_eq!(updated.images[0], created.cover_url);
        // no old gallery objects existed, so nothing was deleted
        assert!(storage.deleted_keys().is_empty());
    }

    #[tokio::test]
    async fn update_gallery_replace_deletes_the_superseded_tail() {
        let (service, _, storage) = service();
        let mut form = create_form("Launch KV");
        form.images = vec![file("old1.jpg"), file("old2.jpg")];
        let created = service.create(form).await.expect("create");
        let old_tail: Vec<String> = created.images[1..].to_vec();

        let update = WorkForm {
            id: Some(created.id.to_string()),
            images: vec![file("new.jpg")],
            ..Default::default()
        };
        let updated = service.update(update).await.expect("update");

        assert_eq!(updated.images.len(), 2);
        assert_eq!(updated.images[0], created.cover_url);
        let deleted = storage.deleted_keys();
        for url in old_tail {
            assert!(deleted.contains(&key_of(&storage, &url)));
        }
        // the still-referenced cover object was not deleted
        assert!(!deleted.contains(&key_of(&storage, &created.cover_url)));
    }

    #[tokio::test]
    async fn update_with_remove_images_drops_urls_and_objects() {
        let (service, _, storage) = service();
        let mut form = create_form("Launch KV");
        form.images = vec![file("fileB.jpg"), file("fileC.jpg")];
        let created = service.create(form).await.expect("create");
        let url_b = created.images[1].clone();
        let url_c = created.images[2].clone();

        let update = WorkForm {
            id: Some(created.id.to_string()),
            remove_images: Some(url_b.clone()),
            ..Default::default()
        };
        let updated = service.update(update).await.expect("update");

        assert_eq!(updated.images, vec![created.cover_url.clone(), url_c]);
        assert_eq!(storage.deleted_keys(), vec![key_of(&storage, &url_b)]);

        // no duplicates after the removal round-trip
        let mut sorted = updated.images.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), updated.images.len());
    }

    #[tokio::test]
    async fn remove_images_never_drops_the_cover() {
        let (service, _, _) = service();
        let created = service.create(create_form("Launch KV")).await.expect("create");

        let update = WorkForm {
            id: Some(created.id.to_string()),
            remove_images: Some(created.cover_url.clone()),
            ..Default::default()
        };
        let updated = service.update(update).await.expect("update");
        assert_eq!(updated.images, vec![created.cover_url]);
    }

    #[tokio::test]
    async fn update_cover_swap_replaces_index_zero_and_deletes_the_old_object() {
        let (service, _, storage) = service();
        let mut form = create_form("Launch KV");
        form.images = vec![file("g1.jpg")];
        let created = service.create(form).await.expect("create");
        let old_gallery = created.images[1].clone();

        let update = WorkForm {
            id: Some(created.id.to_string()),
            cover: Some(file("newcover.jpg")),
            ..Default::default()
        };
        let updated = service.update(update).await.expect("update");

        assert_ne!(updated.cover_url, created.cover_url);
        assert_eq!(updated.images[0], updated.cover_url);
        assert_eq!(updated.images[1], old_gallery);
        assert_eq!(
            storage.deleted_keys(),
            vec![key_of(&storage, &created.cover_url)]
        );
    }

    #[tokio::test]
    async fn cover_swap_drops_duplicate_old_cover_occurrences() {
        let (service, works, storage) = service();
        let created = service.create(create_form("Launch KV")).await.expect("create");
        // Seed a duplicate of the cover into the gallery tail directly.
        {
            let mut rows = works.rows.lock().unwrap();
            let row = rows.iter_mut().find(|w| w.id == created.id).unwrap();
            row.images.push(row.cover_url.clone());
        }

        let update = WorkForm {
            id: Some(created.id.to_string()),
            cover: Some(file("newcover.jpg")),
            ..Default::default()
        };
        let updated = service.update(update).await.expect("update");

        assert_eq!(updated.images, vec![updated.cover_url.clone()]);
        assert_eq!(
            storage.deleted_keys(),
            vec![key_of(&storage, &created.cover_url)]
        );
    }

    #[tokio::test]
    async fn update_applies_explicit_clear_semantics() {
        let (service, _, _) = service();
        let mut form = create_form("Launch KV");
        form.subtitle = Some("Fintech".to_string());
        form.year = Some("2024".to_string());
        let created = service.create(form).await.expect("create");
        assert_eq!(created.subtitle.as_deref(), Some("Fintech"));

        let update = WorkForm {
            id: Some(created.id.to_string()),
            title: Some(String::new()),
            subtitle: Some(String::new()),
            ..Default::default()
        };
        let updated = service.update(update).await.expect("update");

        // empty subtitle clears; empty title leaves the stored one alone
        assert_eq!(updated.subtitle, None);
        assert_eq!(updated.title, "Launch KV");
        // empty year field leaves the year unchanged
        assert_eq!(updated.year, Some(2024));
    }

    #[tokio::test]
    async fn update_unparsable_year_clears_it() {
        let (service, _, _) = service();
        let mut form = create_form("Launch KV");
        form.year = Some("2024".to_string());
        let created = service.create(form).await.expect("create");

        let update = WorkForm {
            id: Some(created.id.to_string()),
            year: Some("soon".to_string()),
            ..Default::default()
        };
        let updated = service.update(update).await.expect("update");
        assert_eq!(updated.year, None);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (service, _, _) = service();
        let form = WorkForm {
            id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        };
        match service.update(form).await {
            Err(AppError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|w| w.id)),
        }
    }

    #[tokio::test]
    async fn update_without_id_is_invalid() {
        let (service, _, _) = service();
        match service.update(WorkForm::default()).await {
            Err(AppError::InvalidInput(msg)) => assert!(msg.contains("id")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|w| w.id)),
        }
    }

    // ----- delete -----

    #[tokio::test]
    async fn delete_removes_the_row_then_the_objects() {
        let (service, works, storage) = service();
        let mut form = create_form("Launch KV");
        form.images = vec![file("fileC.jpg")];
        let created = service.create(form).await.expect("create");

        service
            .delete(Some(created.id.to_string()))
            .await
            .expect("delete");

        match works.get(created.id).await {
            Err(AppError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|w| w.id)),
        }
        let deleted = storage.deleted_keys();
        for url in &created.images {
            assert!(deleted.contains(&key_of(&storage, url)));
        }
    }

    #[tokio::test]
    async fn delete_succeeds_even_when_cleanup_fails() {
        let (service, works, _) = service_with(Arc::new(RecordingStorage::failing_deletes()));
        let created = service.create(create_form("Launch KV")).await.expect("create");

        service
            .delete(Some(created.id.to_string()))
            .await
            .expect("delete must not surface cleanup failures");
        assert!(works.get(created.id).await.is_err());
    }

    #[tokio::test]
    async fn foreign_image_urls_are_skipped_during_cleanup() {
        let (service, works, storage) = service();
        let created = service.create(create_form("Launch KV")).await.expect("create");
        {
            let mut rows = works.rows.lock().unwrap();
            let row = rows.iter_mut().find(|w| w.id == created.id).unwrap();
            row.images.push("https://elsewhere.example.com/x.jpg".to_string());
        }

        service
            .delete(Some(created.id.to_string()))
            .await
            .expect("delete");
        // only the cover reversed to a key; the foreign URL was skipped
        assert_eq!(
            storage.deleted_keys(),
            vec![key_of(&storage, &created.cover_url)]
        );
    }
}
