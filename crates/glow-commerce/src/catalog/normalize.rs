//! Image normalization for product records.
//!
//! Every record that reaches the store or a view has a non-empty `images`
//! list and a non-empty primary `image`.

use crate::catalog::{Category, ProductDraft, ProductRecord};
use crate::ids::ProductId;

/// Split a newline separated block of URLs, dropping blank lines.
pub fn parse_additional_images(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Turn a draft into a record with id `id`.
///
/// Does not validate; see [`ProductDraft::validate`].
pub fn normalize(draft: &ProductDraft, id: ProductId) -> ProductRecord {
    let primary = draft.image.trim();

    let mut images: Vec<String> = Vec::new();
    if !primary.is_empty() {
        images.push(primary.to_string());
    }
    images.extend(parse_additional_images(&draft.additional_images));

    let (image, images) = settle_images(primary, images, draft.category);

    ProductRecord {
        id,
        title: draft.title.trim().to_string(),
        image,
        images,
        price: draft.price.unwrap_or_default(),
        rating: draft.rating.unwrap_or_default(),
        reviews: draft.reviews.unwrap_or_default(),
        review_snippet: draft.review_snippet.trim().to_string(),
        affiliate_link: draft.affiliate_link.trim().to_string(),
        category: Some(draft.category),
    }
}

/// Bring an existing record in line with the image invariant.
///
/// `category` is used when the record carries none.
pub fn normalize_record(mut record: ProductRecord, category: Category) -> ProductRecord {
    let category = *record.category.get_or_insert(category);

    let images: Vec<String> = record
        .images
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(String::from)
        .collect();
    let primary = record.image.trim().to_string();

    let images = if images.is_empty() && !primary.is_empty() {
        vec![primary.clone()]
    } else {
        images
    };

    let (image, images) = settle_images(&primary, images, category);
    record.image = image;
    record.images = images;
    record
}

fn settle_images(primary: &str, images: Vec<String>, category: Category) -> (String, Vec<String>) {
    let image = match images.first() {
        None => {
            let fallback = category.fallback_image().to_string();
            return (fallback.clone(), vec![fallback]);
        }
        Some(first) if primary.is_empty() => first.clone(),
        Some(_) => primary.to_string(),
    };
    (image, images)
}
