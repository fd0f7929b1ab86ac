//! Price range filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// A price range selector.
///
/// Bucket edges are kept exactly as the storefront has always applied them:
/// `25to50` is closed on both ends while its neighbours are open at the
/// shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceFilter {
    /// No filtering.
    #[default]
    All,
    /// price < 25
    Under25,
    /// 25 <= price <= 50
    From25To50,
    /// 50 < price <= 100
    From50To100,
    /// 100 < price <= 200
    From100To200,
    /// 200 < price <= 500
    From200To500,
    /// price > 500
    Over500,
    /// price >= min (if set) and price <= max (if set)
    Custom { min: Option<f64>, max: Option<f64> },
}

impl PriceFilter {
    /// Create a custom range filter.
    pub fn custom(min: Option<f64>, max: Option<f64>) -> Self {
        PriceFilter::Custom { min, max }
    }

    /// Whether `price` passes the filter.
    pub fn matches(&self, price: f64) -> bool {
        match *self {
            PriceFilter::All => true,
            PriceFilter::Under25 => price < 25.0,
            PriceFilter::From25To50 => (25.0..=50.0).contains(&price),
            PriceFilter::From50To100 => price > 50.0 && price <= 100.0,
            PriceFilter::From100To200 => price > 100.0 && price <= 200.0,
            PriceFilter::From200To500 => price > 200.0 && price <= 500.0,
            PriceFilter::Over500 => price > 500.0,
            PriceFilter::Custom { min, max } => {
                min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
            }
        }
    }

    /// Selector key, as used in the storefront query string.
    pub fn key(&self) -> &'static str {
        match self {
            PriceFilter::All => "all",
            PriceFilter::Under25 => "under25",
            PriceFilter::From25To50 => "25to50",
            PriceFilter::From50To100 => "50to100",
            PriceFilter::From100To200 => "100to200",
            PriceFilter::From200To500 => "200to500",
            PriceFilter::Over500 => "over500",
            PriceFilter::Custom { .. } => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PriceFilter::All => "All Prices",
            PriceFilter::Under25 => "Under $25",
            PriceFilter::From25To50 => "$25 - $50",
            PriceFilter::From50To100 => "$50 - $100",
            PriceFilter::From100To200 => "$100 - $200",
            PriceFilter::From200To500 => "$200 - $500",
            PriceFilter::Over500 => "Over $500",
            PriceFilter::Custom { .. } => "Custom Range",
        }
    }
}

impl fmt::Display for PriceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PriceFilter {
    type Err = CommerceError;

    /// Parses a bucket key. `custom` parses to an unbounded custom range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(PriceFilter::All),
            "under25" => Ok(PriceFilter::Under25),
            "25to50" => Ok(PriceFilter::From25To50),
            "50to100" => Ok(PriceFilter::From50To100),
            "100to200" => Ok(PriceFilter::From100To200),
            "200to500" => Ok(PriceFilter::From200To500),
            "over500" => Ok(PriceFilter::Over500),
            "custom" => Ok(PriceFilter::custom(None, None)),
            other => Err(CommerceError::UnknownPriceFilter(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert!(PriceFilter::Under25.matches(24.99));
        assert!(!PriceFilter::Under25.matches(25.0));

        assert!(PriceFilter::From25To50.matches(25.0));
        assert!(PriceFilter::From25To50.matches(50.0));

        assert!(!PriceFilter::From50To100.matches(50.0));
        assert!(PriceFilter::From50To100.matches(100.0));

        assert!(!PriceFilter::From100To200.matches(100.0));
        assert!(PriceFilter::From200To500.matches(500.0));
        assert!(!PriceFilter::Over500.matches(500.0));
        assert!(PriceFilter::Over500.matches(500.01));
    }

    #[test]
    fn test_custom_range_bounds_are_optional() {
        let min_only = PriceFilter::custom(Some(10.0), None);
        assert!(min_only.matches(10.0));
        assert!(min_only.matches(10_000.0));
        assert!(!min_only.matches(9.99));

        let max_only = PriceFilter::custom(None, Some(30.0));
        assert!(max_only.matches(0.0));
        assert!(!max_only.matches(30.01));

        assert!(PriceFilter::custom(None, None).matches(1.0));
    }

    #[test]
    fn test_parse_keys() {
        for key in ["all", "under25", "25to50", "50to100", "100to200", "200to500", "over500"] {
            let filter: PriceFilter = key.parse().unwrap();
            assert_eq!(filter.key(), key);
        }
        assert!("cheap".parse::<PriceFilter>().is_err());
    }
}
