//! Field normalization applied to incoming form values.

/// Normalize a comma-separated tag string: split on commas, trim, drop
/// empties, lowercase. Order is preserved for display; duplicates are kept
/// as submitted.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Re-normalize an already-split tag list. Idempotent over the output of
/// [`normalize_tags`]; used by the repository so the invariant holds for
/// any caller.
pub fn normalize_tag_list(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Coerce a year form value to an integer. Empty or unparsable input yields
/// `None` (stored as NULL).
pub fn coerce_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_split_trimmed_and_lowercased() {
        assert_eq!(
            normalize_tags(" 3D ,Branding,, key VISUAL "),
            vec!["3d", "branding", "key visual"]
        );
    }

    #[test]
    fn empty_input_yields_no_tags() {
        assert!(normalize_tags("").is_empty());
        assert!(normalize_tags(" , ,, ").is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_tags("Foo, BAR ,baz qux");
        let twice = normalize_tag_list(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn year_coercion() {
        assert_eq!(coerce_year("2024"), Some(2024));
        assert_eq!(coerce_year(" 1999 "), Some(1999));
        assert_eq!(coerce_year(""), None);
        assert_eq!(coerce_year("next year"), None);
    }
}
