//! URL slug helpers.

/// Slugs taken by fixed routes that sit beside `{slug}` routes.
pub const RESERVED_SLUGS: &[&str] = &["tree", "featured"];

/// Derive a URL-safe slug from a display name.
///
/// Lowercases ASCII alphanumerics, collapses every other run of characters
/// into a single `-`, and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Whether `slug` is non-empty lowercase ASCII alphanumerics separated by single dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 200
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

/// Whether `slug` collides with a fixed route segment.
pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Men's Shirts"), "men-s-shirts");
        assert_eq!(slugify("  Shoes & Boots!! "), "shoes-boots");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("men-shirts"));
        assert!(is_valid_slug("sale2024"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Men"));
        assert!(!is_valid_slug("men--shirts"));
        assert!(!is_valid_slug("-men"));
    }

    #[test]
    fn test_reserved_slugs() {
        assert!(is_reserved_slug("tree"));
        assert!(is_reserved_slug("featured"));
        assert!(!is_reserved_slug("tree-house"));
    }
}
