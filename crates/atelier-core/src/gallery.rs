//! Pure image-list reconciliation.
//!
//! The work service composes these functions to keep the image-list
//! invariant: the list is non-empty, index 0 is always the current cover,
//! and no URL appears twice. Everything here is synchronous and free of
//! I/O so the invariants are testable in isolation.

/// Order-preserving dedup.
pub fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    urls.into_iter().filter(|u| seen.insert(u.clone())).collect()
}

/// Image list for a freshly created work: `[cover, gallery...]`.
pub fn build_images(cover_url: &str, gallery_urls: &[String]) -> Vec<String> {
    let mut images = Vec::with_capacity(1 + gallery_urls.len());
    images.push(cover_url.to_string());
    images.extend(gallery_urls.iter().cloned());
    dedup_preserving_order(images)
}

/// Full gallery replace: the new uploads entirely supersede the old tail.
pub fn replace_gallery(cover_url: &str, new_gallery: &[String]) -> Vec<String> {
    build_images(cover_url, new_gallery)
}

/// Rebuild after a cover swap with no new gallery uploads: the new cover is
/// prepended and every occurrence of the old cover URL is dropped from the
/// remainder.
pub fn rebuild_for_cover_swap(
    new_cover_url: &str,
    old_images: &[String],
    old_cover_url: &str,
) -> Vec<String> {
    let mut images = vec![new_cover_url.to_string()];
    images.extend(
        old_images
            .iter()
            .filter(|u| u.as_str() != old_cover_url)
            .cloned(),
    );
    dedup_preserving_order(images)
}

/// Drop caller-selected URLs from the gallery tail. The element at index 0
/// (the current cover) is never removed. Returns the kept list and the
/// URLs that were actually dropped, for storage cleanup.
pub fn apply_removals(images: Vec<String>, remove: &[String]) -> (Vec<String>, Vec<String>) {
    if remove.is_empty() || images.is_empty() {
        return (images, Vec::new());
    }
    let mut kept = Vec::with_capacity(images.len());
    let mut dropped = Vec::new();
    for (i, url) in images.into_iter().enumerate() {
        if i > 0 && remove.contains(&url) {
            dropped.push(url);
        } else {
            kept.push(url);
        }
    }
    (kept, dropped)
}

/// Split a comma-separated URL list from a form field. Unlike tags, URLs
/// keep their case.
pub fn split_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(|u| u.to_string())
        .collect()
}
