//! Slug generation.
//!
//! Derives the stable public URL identifier from a free-text restaurant
//! name. Deterministic, total, and idempotent; uniqueness is the store's
//! concern, not this function's.

/// Transliterate the diacritics that commonly appear in restaurant names.
///
/// Handled before lowercasing because `'İ'.to_lowercase()` produces a
/// combining mark that would otherwise corrupt the slug.
fn transliterate(c: char) -> Option<char> {
    match c {
        'ğ' | 'Ğ' => Some('g'),
        'ü' | 'Ü' => Some('u'),
        'ş' | 'Ş' => Some('s'),
        'ı' | 'İ' => Some('i'),
        'ö' | 'Ö' => Some('o'),
        'ç' | 'Ç' => Some('c'),
        _ => None,
    }
}

/// Convert a restaurant name into a URL-safe slug.
///
/// Transliterates known diacritics, lowercases, replaces every remaining
/// character outside `[a-z0-9]` with a hyphen, collapses consecutive
/// hyphens, and trims leading/trailing hyphens. Empty and whitespace-only
/// input yields an empty string; callers must reject that before writing.
pub fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_hyphen = true; // Start true to skip leading hyphens

    for c in name.chars() {
        let mapped = transliterate(c).unwrap_or_else(|| c.to_ascii_lowercase());
        if mapped.is_ascii_alphanumeric() {
            result.push(mapped);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }

    // Trim trailing hyphen
    while result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Lezzet"), "lezzet");
        assert_eq!(slugify("Mama's Kitchen"), "mama-s-kitchen");
    }

    #[test]
    fn slugify_transliterates_diacritics() {
        assert_eq!(slugify("Ocakbaşı"), "ocakbasi");
        assert_eq!(slugify("Çorba Dünyası"), "corba-dunyasi");
        assert_eq!(slugify("ĞÜŞİÖÇ ğüşıöç"), "gusioc-gusioc");
    }

    #[test]
    fn slugify_replaces_unknown_characters() {
        assert_eq!(slugify("Café #1 & Co."), "caf-1-co");
        assert_eq!(slugify("北京烤鸭"), "");
    }

    #[test]
    fn slugify_collapses_consecutive_hyphens() {
        assert_eq!(slugify("hello   world"), "hello-world");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn slugify_trims_leading_trailing() {
        assert_eq!(slugify("  hello  "), "hello");
        assert_eq!(slugify("---hello---"), "hello");
    }

    #[test]
    fn slugify_empty_and_whitespace() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        for name in ["Ocakbaşı", "Mama's Kitchen", "  Çorba  Dünyası  ", "a---b"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn slugify_output_shape() {
        // Non-empty outputs match ^[a-z0-9]+(-[a-z0-9]+)*$
        for name in ["Lezzet", "Ocakbaşı", "Café #1 & Co.", "a  b  c"] {
            let slug = slugify(name);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "slug: {slug}");
            assert!(!slug.contains("--"), "slug: {slug}");
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "slug: {slug}"
            );
        }
    }
}
