//! Seed data used before anything has been persisted for a category.

use crate::catalog::{Category, ProductRecord};
use crate::error::CommerceError;

/// Read-only source of seed records.
pub trait FixtureSource: Send + Sync {
    /// Records bundled for `category`, or `None` if there is no fixture.
    fn load(&self, category: Category) -> Result<Option<Vec<ProductRecord>>, CommerceError>;
}

/// Fixtures compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledFixtures;

impl BundledFixtures {
    fn raw(category: Category) -> Option<&'static str> {
        match category {
            Category::Fashion => Some(include_str!("../../fixtures/fashion.json")),
            Category::Women => Some(include_str!("../../fixtures/women.json")),
            Category::Men => Some(include_str!("../../fixtures/men.json")),
            Category::Makeup => Some(include_str!("../../fixtures/makeup.json")),
            _ => None,
        }
    }
}

impl FixtureSource for BundledFixtures {
    fn load(&self, category: Category) -> Result<Option<Vec<ProductRecord>>, CommerceError> {
        let Some(raw) = Self::raw(category) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| CommerceError::InvalidFixture {
                name: format!("{category}.json"),
                reason: e.to_string(),
            })
    }
}

/// A source with no fixtures at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFixtures;

impl FixtureSource for NoFixtures {
    fn load(&self, _category: Category) -> Result<Option<Vec<ProductRecord>>, CommerceError> {
        Ok(None)
    }
}
