//! Shared constants.

/// The fixed category set works are filed under. The admin form offers
/// exactly these; the service rejects anything else.
pub const CATEGORIES: [&str; 7] = [
    "Key Visual",
    "Performance",
    "Branding & Logo",
    "Editorial / Media",
    "Motion / Video",
    "Product Visual",
    "UI Integration",
];

/// Category assigned when a create request leaves the field empty.
pub const DEFAULT_CATEGORY: &str = "Key Visual";

/// Returns true when `category` is one of [`CATEGORIES`].
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_category_is_in_the_set() {
        assert!(is_known_category(DEFAULT_CATEGORY));
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(!is_known_category("Sculpture"));
        assert!(!is_known_category(""));
        // matching is exact, not case-insensitive
        assert!(!is_known_category("key visual"));
    }
}
