//! Search module.
//!
//! Contains the price filters, sort options and the filter/sort pipeline
//! applied to a category listing.

mod filter;
mod query;

pub use filter::PriceFilter;
pub use query::{filter_products, FilterState, SortOption};
