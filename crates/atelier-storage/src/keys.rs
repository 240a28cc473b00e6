//! Shared key and public URL construction for storage backends.
//!
//! Key format: `{folder}/{unix_millis}-{uuid}.{ext}`. Public URL format:
//! `{base}/storage/v1/object/public/{bucket}/{key}`. The marker segment in
//! the URL is what [`url_to_key`] uses to recover a key for deletion.

use chrono::Utc;
use uuid::Uuid;

/// Folders uploads are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFolder {
    Covers,
    Gallery,
}

impl ObjectFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectFolder::Covers => "covers",
            ObjectFolder::Gallery => "gallery",
        }
    }
}

/// Extensions stored as-is; anything else falls back to [`FALLBACK_EXTENSION`].
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];
pub const FALLBACK_EXTENSION: &str = "jpg";

/// Normalize the extension of an uploaded filename against the whitelist.
pub fn normalize_extension(filename: &str) -> &'static str {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match ext.as_str() {
        "png" => "png",
        "jpg" => "jpg",
        "jpeg" => "jpeg",
        "webp" => "webp",
        _ => FALLBACK_EXTENSION,
    }
}

/// Generate a fresh object key: creation timestamp plus a random unique
/// suffix, so concurrent uploads never collide and nothing is overwritten.
pub fn generate_object_key(folder: ObjectFolder, original_filename: &str) -> String {
    format!(
        "{}/{}-{}.{}",
        folder.as_str(),
        Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        normalize_extension(original_filename)
    )
}

fn marker(bucket: &str) -> String {
    format!("/storage/v1/object/public/{}/", bucket)
}

/// Public URL for an object key.
pub fn public_url(base: &str, bucket: &str, key: &str) -> String {
    format!("{}{}{}", base.trim_end_matches('/'), marker(bucket), key)
}

/// Reverse a public URL back to its key, or `None` when the URL does not
/// carry this bucket's marker segment.
pub fn url_to_key(url: &str, bucket: &str) -> Option<String> {
    let marker = marker(bucket);
    let idx = url.find(&marker)?;
    let key = &url[idx + marker.len()..];
    if key.is_empty() {
        return None;
    }
    Some(key.to_string())
}
