//! Category tags and their presentation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

const FASHION_IMAGE: &str = "https://images.unsplash.com/photo-1515372039744-b8f02a3ae446?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60";

/// A product category tag.
///
/// The first eight variants are the storefront categories that have their
/// own persisted product list. The rest can only be produced by the
/// category resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Women,
    Men,
    Girls,
    Baby,
    Skincare,
    Makeup,
    Haircare,
    Fragrance,
    Wellness,
    Home,
    Electronics,
    Jewelry,
    Accessories,
    Fashion,
}

impl Category {
    /// Categories with a persisted product list, in navigation order.
    pub const STOREFRONT: [Category; 8] = [
        Category::Women,
        Category::Men,
        Category::Girls,
        Category::Baby,
        Category::Skincare,
        Category::Makeup,
        Category::Haircare,
        Category::Fragrance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Women => "women",
            Category::Men => "men",
            Category::Girls => "girls",
            Category::Baby => "baby",
            Category::Skincare => "skincare",
            Category::Makeup => "makeup",
            Category::Haircare => "haircare",
            Category::Fragrance => "fragrance",
            Category::Wellness => "wellness",
            Category::Home => "home",
            Category::Electronics => "electronics",
            Category::Jewelry => "jewelry",
            Category::Accessories => "accessories",
            Category::Fashion => "fashion",
        }
    }

    /// Persistence key holding this category's records, e.g. `womenProducts`.
    pub fn storage_key(&self) -> String {
        format!("{}Products", self.as_str())
    }

    /// Heading shown above the category listing.
    pub fn title(&self) -> String {
        match self {
            Category::Women => "Women's Collection".to_string(),
            Category::Men => "Men's Collection".to_string(),
            Category::Girls => "Girls Collection".to_string(),
            Category::Baby => "Baby Collection".to_string(),
            Category::Makeup => "Makeup Collection".to_string(),
            Category::Skincare => "Skincare Essentials".to_string(),
            Category::Haircare => "Hair Care Products".to_string(),
            Category::Fragrance => "Fragrances & Perfumes".to_string(),
            other => {
                let name = other.as_str();
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => format!("{}{} Collection", first.to_uppercase(), chars.as_str()),
                    None => "Collection".to_string(),
                }
            }
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Women => "Discover the latest trends in women's beauty. From elegant makeup to skincare essentials.",
            Category::Men => "Explore our collection of men's fashion. Quality clothing and accessories for every occasion.",
            Category::Girls => "Beautiful cosmetics and beauty products specially curated for young girls and teens.",
            Category::Baby => "Gentle and safe beauty products for babies and toddlers. Hypoallergenic and dermatologist-tested.",
            Category::Makeup => "Discover premium makeup products to enhance your natural beauty. From foundations to lipsticks.",
            Category::Skincare => "Nourish and protect your skin with our curated collection of skincare essentials.",
            Category::Haircare => "Transform your hair with professional-grade hair care products for every hair type.",
            Category::Fragrance => "Find your signature scent with our collection of premium fragrances and perfumes.",
            _ => "Browse our collection of high-quality products.",
        }
    }

    /// Image used when a record of this category has none.
    pub fn fallback_image(&self) -> &'static str {
        match self {
            Category::Women => "https://images.unsplash.com/photo-1572804013309-59a88b7e92f1?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            Category::Men => "https://images.unsplash.com/photo-1617137968427-85924c800a22?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            Category::Baby => "https://images.unsplash.com/photo-1522771930-78848d9293e8?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            Category::Wellness => "https://images.unsplash.com/photo-1592432678016-e910b452f9a2?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            Category::Home => "https://images.unsplash.com/photo-1583847268964-b28dc8f51f92?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            Category::Electronics => "https://images.unsplash.com/photo-1550009158-9ebf69173e03?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            Category::Jewelry => "https://images.unsplash.com/photo-1599643478518-a784e5dc4c8f?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            Category::Accessories => "https://images.unsplash.com/photo-1584917865442-de89df76afd3?ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=60",
            _ => FASHION_IMAGE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "women" => Ok(Category::Women),
            "men" => Ok(Category::Men),
            "girls" => Ok(Category::Girls),
            "baby" => Ok(Category::Baby),
            "skincare" => Ok(Category::Skincare),
            "makeup" => Ok(Category::Makeup),
            "haircare" => Ok(Category::Haircare),
            "fragrance" => Ok(Category::Fragrance),
            "wellness" => Ok(Category::Wellness),
            "home" => Ok(Category::Home),
            "electronics" => Ok(Category::Electronics),
            "jewelry" => Ok(Category::Jewelry),
            "accessories" => Ok(Category::Accessories),
            "fashion" => Ok(Category::Fashion),
            _ => Err(CommerceError::UnknownCategory(s.to_string())),
        }
    }
}

/// What a catalog view lists: every storefront category or a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategorySelector {
    /// A shuffled sample across all storefront categories.
    #[default]
    All,
    /// One category.
    One(Category),
}

impl CategorySelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySelector::All => "all",
            CategorySelector::One(category) => category.as_str(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            CategorySelector::All => "All Beauty Products".to_string(),
            CategorySelector::One(category) => category.title(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CategorySelector::All => "Discover our complete collection of premium beauty and cosmetic products for everyone.",
            CategorySelector::One(category) => category.description(),
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategorySelector {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategorySelector::All);
        }
        s.parse().map(CategorySelector::One)
    }
}

impl From<Category> for CategorySelector {
    fn from(category: Category) -> Self {
        CategorySelector::One(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key() {
        assert_eq!(Category::Women.storage_key(), "womenProducts");
        assert_eq!(Category::Fragrance.storage_key(), "fragranceProducts");
    }

    #[test]
    fn test_parse_roundtrip_all_variants() {
        for name in [
            "women", "men", "girls", "baby", "skincare", "makeup", "haircare", "fragrance",
            "wellness", "home", "electronics", "jewelry", "accessories", "fashion",
        ] {
            let category: Category = name.parse().unwrap();
            assert_eq!(category.as_str(), name);
        }
        assert!("kids".parse::<Category>().is_err());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!("ALL".parse::<CategorySelector>().unwrap(), CategorySelector::All);
        assert_eq!(
            "makeup".parse::<CategorySelector>().unwrap(),
            CategorySelector::One(Category::Makeup)
        );
    }

    #[test]
    fn test_titles() {
        assert_eq!(Category::Women.title(), "Women's Collection");
        assert_eq!(Category::Jewelry.title(), "Jewelry Collection");
        assert_eq!(CategorySelector::All.title(), "All Beauty Products");
    }

    #[test]
    fn test_fallback_image_defaults_to_fashion() {
        assert_eq!(Category::Makeup.fallback_image(), Category::Fashion.fallback_image());
        assert_ne!(Category::Women.fallback_image(), Category::Fashion.fallback_image());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Haircare).unwrap(), "\"haircare\"");
        let parsed: Category = serde_json::from_str("\"baby\"").unwrap();
        assert_eq!(parsed, Category::Baby);
    }
}
