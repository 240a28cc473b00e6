//! Multipart form collection for the admin create/update operations.

use axum::extract::Multipart;

use crate::error::HttpAppError;

/// One uploaded file part.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// A zero-byte part (an empty file input submitted with the form) is
    /// treated as "no file supplied".
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Everything the create/update forms can carry. Text fields are trimmed;
/// absent and empty fields are handled identically downstream, matching
/// the form semantics of the admin UI.
#[derive(Debug, Clone, Default)]
pub struct WorkForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub year: Option<String>,
    pub href: Option<String>,
    pub remove_images: Option<String>,
    pub cover: Option<UploadedFile>,
    pub images: Vec<UploadedFile>,
}

/// Drain a multipart stream into a [`WorkForm`]. Unknown field names are
/// skipped so stray form inputs never fail a request.
pub async fn collect_work_form(multipart: &mut Multipart) -> Result<WorkForm, HttpAppError> {
    let mut form = WorkForm::default();

    while let Some(field) = multipart.next_field().await.map_err(HttpAppError::from)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "cover" => {
                let filename = field.file_name().unwrap_or("cover").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let data = field.bytes().await.map_err(HttpAppError::from)?.to_vec();
                form.cover = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            "images" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let data = field.bytes().await.map_err(HttpAppError::from)?.to_vec();
                form.images.push(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {
                let value = field.text().await.map_err(HttpAppError::from)?;
                let value = value.trim().to_string();
                match name.as_str() {
                    "id" => form.id = Some(value),
                    "title" => form.title = Some(value),
                    "subtitle" => form.subtitle = Some(value),
                    "description" => form.description = Some(value),
                    "category" => form.category = Some(value),
                    "tags" => form.tags = Some(value),
                    "year" => form.year = Some(value),
                    "href" => form.href = Some(value),
                    "removeImages" => form.remove_images = Some(value),
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}
