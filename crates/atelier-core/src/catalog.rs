//! Public catalog view logic.
//!
//! The browser-side gallery is modelled here as explicit immutable view
//! state plus pure functions: filtering, pagination, modal image browsing,
//! and the featured picks are all recomputed from the primary work list and
//! the current [`CatalogState`] on every change. Nothing in this module
//! mutates in place or performs I/O.

use rand::Rng;

use crate::models::Work;

/// Works shown per catalog page.
pub const PAGE_SIZE: usize = 6;

/// Number of works featured on the landing view.
pub const FEATURED_COUNT: usize = 4;

/// Category filter: everything, or one exact category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

/// Active filters. All three compose with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive free-text query.
    pub query: String,
    pub category: CategoryFilter,
    /// At most one active tag.
    pub tag: Option<String>,
}

/// Immutable view state: filters plus the 1-based current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    pub filter: CatalogFilter,
    pub page: usize,
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState {
            filter: CatalogFilter::default(),
            page: 1,
        }
    }
}

impl CatalogState {
    /// Changing any filter resets to page 1.
    pub fn with_query(self, query: impl Into<String>) -> Self {
        CatalogState {
            filter: CatalogFilter {
                query: query.into(),
                ..self.filter
            },
            page: 1,
        }
    }

    pub fn with_category(self, category: CategoryFilter) -> Self {
        CatalogState {
            filter: CatalogFilter {
                category,
                ..self.filter
            },
            page: 1,
        }
    }

    pub fn with_tag(self, tag: Option<String>) -> Self {
        CatalogState {
            filter: CatalogFilter { tag, ..self.filter },
            page: 1,
        }
    }

    /// Requested page; [`render`] clamps it into range against the current
    /// filtered count.
    pub fn with_page(self, page: usize) -> Self {
        CatalogState { page, ..self }
    }
}

/// One rendered page of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Work>,
    /// Clamped 1-based page actually shown.
    pub page: usize,
    pub total_pages: usize,
    /// Filtered count across all pages.
    pub total: usize,
}

/// True when `work` passes every active filter.
pub fn matches(work: &Work, filter: &CatalogFilter) -> bool {
    let in_category = match &filter.category {
        CategoryFilter::All => true,
        CategoryFilter::Named(c) => &work.category == c,
    };
    if !in_category {
        return false;
    }

    if let Some(tag) = &filter.tag {
        if !work.tags.iter().any(|t| t == tag) {
            return false;
        }
    }

    let query = filter.query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let mut haystack = vec![work.title.clone()];
    haystack.extend(work.subtitle.clone());
    haystack.extend(work.description.clone());
    haystack.push(work.category.clone());
    haystack.extend(work.tags.iter().cloned());
    if let Some(year) = work.year {
        haystack.push(year.to_string());
    }
    haystack.join(" ").to_lowercase().contains(&query)
}

pub fn filter_works<'a>(works: &'a [Work], filter: &CatalogFilter) -> Vec<&'a Work> {
    works.iter().filter(|w| matches(w, filter)).collect()
}

/// Total pages for a filtered count; never below 1.
pub fn page_count(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Clamp a 1-based page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages)
}

/// Recompute the visible page from the primary list and the view state.
pub fn render<'a>(works: &'a [Work], state: &CatalogState) -> CatalogPage<'a> {
    let filtered = filter_works(works, &state.filter);
    let total = filtered.len();
    let total_pages = page_count(total);
    let page = clamp_page(state.page, total_pages);
    let start = (page - 1) * PAGE_SIZE;
    let items = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();
    CatalogPage {
        items,
        page,
        total_pages,
        total,
    }
}

/// Every distinct tag across the list, sorted for display.
pub fn all_tags(works: &[Work]) -> Vec<String> {
    let mut tags: Vec<String> = works
        .iter()
        .flat_map(|w| w.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Image URLs shown by the modal browser: the work's images deduplicated,
/// falling back to the cover when the list is empty.
pub fn modal_images(work: &Work) -> Vec<String> {
    if work.images.is_empty() {
        return vec![work.cover_url.clone()];
    }
    crate::gallery::dedup_preserving_order(work.images.clone())
}

/// Keyboard input understood by the modal browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Left,
    Right,
    Escape,
}

/// Open modal positioned on one image of the active work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalState {
    /// 0-based index into [`modal_images`].
    pub index: usize,
}

/// Advance the modal by one keypress. `None` means closed; left/right wrap
/// around the image list.
pub fn modal_step(state: Option<ModalState>, key: ModalKey, image_count: usize) -> Option<ModalState> {
    let state = state?;
    if image_count == 0 {
        return None;
    }
    match key {
        ModalKey::Escape => None,
        ModalKey::Left => Some(ModalState {
            index: (state.index + image_count - 1) % image_count,
        }),
        ModalKey::Right => Some(ModalState {
            index: (state.index + 1) % image_count,
        }),
    }
}

/// Draw `n` random works with an unbiased Fisher–Yates shuffle. Re-drawn
/// per call; never persisted.
pub fn pick_featured<'a, R: Rng>(works: &'a [Work], n: usize, rng: &mut R) -> Vec<&'a Work> {
    let mut picked: Vec<&Work> = works.iter().collect();
    for i in (1..picked.len()).rev() {
        let j = rng.random_range(0..=i);
        picked.swap(i, j);
    }
    picked.truncate(n.min(works.len()));
    picked
}
