//! Catalog domain types and logic for the GlowBeauty storefront.
//!
//! This crate provides the pieces behind the storefront and its admin panel:
//!
//! - **Catalog**: Product records, categories, image normalization, the persisted store
//! - **Search**: Text search, price buckets and sorting over a listing
//! - **Resolver**: Keyword-based category detection from a URL and title
//! - **Notify**: Change broadcasts and self-refreshing catalog views
//! - **Admin**: Shared-secret gate and product detail extraction
//!
//! # Example
//!
//! ```rust,ignore
//! use glow_commerce::prelude::*;
//! use glow_store::MemoryStore;
//!
//! let catalog = CatalogStore::new(MemoryStore::new());
//!
//! let draft = ProductDraft {
//!     title: "Rose Face Serum".to_string(),
//!     image: "https://img.example/serum.jpg".to_string(),
//!     price: Some(24.99),
//!     rating: Some(4.5),
//!     reviews: Some(120),
//!     review_snippet: "Glowing skin in a week".to_string(),
//!     affiliate_link: "https://shop.example/serum".to_string(),
//!     category: Category::Skincare,
//!     ..Default::default()
//! };
//! let record = catalog.create(&draft)?;
//!
//! let listing = catalog.list_by_category(Category::Skincare.into())?;
//! let cheapest_first = FilterState::new()
//!     .with_sort(SortOption::PriceAsc)
//!     .apply(&listing);
//! ```

pub mod error;
pub mod ids;
pub mod config;

pub mod admin;
pub mod catalog;
pub mod notify;
pub mod resolver;
pub mod search;
pub mod storefront;

pub use config::CatalogConfig;
pub use error::CommerceError;
pub use ids::{IdGenerator, ProductId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CatalogConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::{IdGenerator, ProductId};

    // Catalog
    pub use crate::catalog::{
        display_images, normalize, normalize_record, CatalogStore, Category, CategorySelector,
        FixtureSource, ProductDraft, ProductRecord,
    };

    // Search
    pub use crate::search::{filter_products, FilterState, PriceFilter, SortOption};

    // Notify
    pub use crate::notify::{CatalogView, ChangeEvent, ChangeNotifier, Subscription};

    // Admin
    pub use crate::admin::{
        AdminGate, AuthError, ExtractError, ExtractedProduct, ExtractionTask, ProductExtractor,
    };

    pub use crate::resolver::resolve;
    pub use crate::storefront::StorefrontQuery;
}
