//! Product catalog module.
//!
//! Contains product records, categories, image normalization, bundled
//! fixtures and the persisted catalog store.

mod category;
mod export;
mod fixtures;
mod media;
mod normalize;
mod product;
mod store;

pub use category::{Category, CategorySelector};
pub use export::{ALL_EXPORT_FILE_NAME, export_file_name};
pub use fixtures::{BundledFixtures, FixtureSource, NoFixtures};
pub use media::{
    cors_friendly_url, display_images, placeholder_image, MAX_CARD_IMAGES, PLACEHOLDER_IMAGE,
};
pub use normalize::{normalize, normalize_record, parse_additional_images};
pub use product::{ProductDraft, ProductRecord};
pub use store::CatalogStore;
