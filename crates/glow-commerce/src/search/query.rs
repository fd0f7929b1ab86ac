//! Sort options and the filter/sort pipeline.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ProductRecord;
use crate::error::CommerceError;
use crate::search::PriceFilter;

/// Sort options for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Store order (featured).
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    Rating,
    /// Sort by most reviewed.
    Reviews,
    /// Sort by newest first (highest id).
    Newest,
}

impl SortOption {
    /// Selector key, as used in the storefront query string.
    pub fn key(&self) -> &'static str {
        match self {
            SortOption::Featured => "default",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Rating => "rating",
            SortOption::Reviews => "reviews",
            SortOption::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Reviews => "Most Reviews",
            SortOption::Newest => "Newest",
        }
    }

    fn compare(&self, a: &ProductRecord, b: &ProductRecord) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceAsc => a.price.total_cmp(&b.price),
            SortOption::PriceDesc => b.price.total_cmp(&a.price),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
            SortOption::Reviews => b.reviews.cmp(&a.reviews),
            SortOption::Newest => b.id.cmp(&a.id),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" | "featured" => Ok(SortOption::Featured),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "rating" => Ok(SortOption::Rating),
            "reviews" => Ok(SortOption::Reviews),
            "newest" => Ok(SortOption::Newest),
            other => Err(CommerceError::UnknownSort(other.to_string())),
        }
    }
}

/// View-local filter settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive title substring. Empty matches everything.
    pub search: String,
    /// Price range selector.
    pub price: PriceFilter,
    /// Sort option.
    pub sort: SortOption,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the price filter.
    pub fn with_price(mut self, price: PriceFilter) -> Self {
        self.price = price;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Run `records` through the pipeline.
    pub fn apply(&self, records: &[ProductRecord]) -> Vec<ProductRecord> {
        filter_products(records, &self.search, self.price, self.sort)
    }
}

/// Filter by search term, then by price, then sort.
///
/// The sort is stable, so records comparing equal keep their store order.
pub fn filter_products(
    records: &[ProductRecord],
    search: &str,
    price: PriceFilter,
    sort: SortOption,
) -> Vec<ProductRecord> {
    let needle = search.to_lowercase();

    let mut result: Vec<ProductRecord> = records
        .iter()
        .filter(|r| needle.is_empty() || r.title.to_lowercase().contains(&needle))
        .filter(|r| price.matches(r.price))
        .cloned()
        .collect();

    if sort != SortOption::Featured {
        result.sort_by(|a, b| sort.compare(a, b));
    }
    result
}
