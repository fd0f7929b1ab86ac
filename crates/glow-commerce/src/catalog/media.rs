//! Image selection for display.

use crate::catalog::ProductRecord;

/// Shown when a record has no usable image at all or every image failed to load.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// Image to show when nothing else could be loaded.
pub fn placeholder_image() -> &'static str {
    PLACEHOLDER_IMAGE
}

/// Maximum number of images rotated on a product card.
pub const MAX_CARD_IMAGES: usize = 4;

/// Images to show for a record: the stored list, else the primary image,
/// else the category fallback. At most [`MAX_CARD_IMAGES`].
pub fn display_images(record: &ProductRecord) -> Vec<String> {
    let mut images: Vec<String> = record
        .images
        .iter()
        .filter(|url| !url.trim().is_empty())
        .cloned()
        .collect();

    if images.is_empty() && !record.image.trim().is_empty() {
        images.push(record.image.clone());
    }
    if images.is_empty() {
        images.push(record.category_or_default().fallback_image().to_string());
    }

    images.truncate(MAX_CARD_IMAGES);
    images
}

/// Rewrite an image URL into one that loads reliably cross-origin.
///
/// Unsplash page links are moved to the image CDN with sizing parameters.
/// Data URLs and relative paths pass through untouched.
pub fn cors_friendly_url(url: &str) -> String {
    if url.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }
    if url.starts_with("data:") || url.starts_with('/') {
        return url.to_string();
    }
    if url.contains("unsplash.com") {
        let unsplash = url.replace("https://unsplash.com", "https://images.unsplash.com");
        if !unsplash.contains("auto=format") {
            let sep = if unsplash.contains('?') { '&' } else { '?' };
            return format!("{unsplash}{sep}auto=format&fit=crop&w=500&q=60");
        }
        return unsplash;
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::ids::ProductId;

    fn record(image: &str, images: &[&str]) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(1),
            title: "Tote".to_string(),
            image: image.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
            price: 10.0,
            rating: 4.0,
            reviews: 1,
            review_snippet: String::new(),
            affiliate_link: String::new(),
            category: Some(Category::Accessories),
        }
    }

    #[test]
    fn test_caps_at_four() {
        let r = record("a", &["a", "b", "c", "d", "e"]);
        assert_eq!(display_images(&r), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_falls_back_to_primary_then_category() {
        assert_eq!(display_images(&record("p", &[""])), vec!["p"]);
        assert_eq!(
            display_images(&record("", &[])),
            vec![Category::Accessories.fallback_image()]
        );
    }

    #[test]
    fn test_cors_friendly_unsplash() {
        assert_eq!(
            cors_friendly_url("https://unsplash.com/photos/abc"),
            "https://images.unsplash.com/photos/abc?auto=format&fit=crop&w=500&q=60"
        );
        assert_eq!(cors_friendly_url("/local.png"), "/local.png");
        assert_eq!(cors_friendly_url(""), PLACEHOLDER_IMAGE);
    }
}
