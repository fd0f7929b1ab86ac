//! Category detection from a product URL and title.
//!
//! Rules are evaluated top to bottom and the first match wins. The order is
//! part of the contract: stored records were categorised with it, so a rule
//! must never be moved ahead of another.

use crate::catalog::Category;

/// One keyword group.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    /// Tag produced when the rule matches.
    pub category: Category,
    /// Keywords searched for in the lowercased URL.
    pub url_keywords: &'static [&'static str],
    /// Keywords searched for in the lowercased title.
    pub title_keywords: &'static [&'static str],
}

impl CategoryRule {
    fn matches(&self, url: &str, title: &str) -> bool {
        self.url_keywords.iter().any(|k| url.contains(k))
            || self.title_keywords.iter().any(|k| title.contains(k))
    }
}

/// Tag returned when no rule matches.
pub const DEFAULT_CATEGORY: Category = Category::Women;

/// The ordered rule table.
pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Baby,
        url_keywords: &["baby"],
        title_keywords: &["baby", "infant"],
    },
    CategoryRule {
        category: Category::Girls,
        url_keywords: &["girl"],
        title_keywords: &["girl", "teen"],
    },
    CategoryRule {
        category: Category::Men,
        url_keywords: &["men"],
        title_keywords: &["men", "male"],
    },
    CategoryRule {
        category: Category::Makeup,
        url_keywords: &["makeup"],
        title_keywords: &["lipstick", "foundation", "mascara", "eyeshadow", "blush"],
    },
    CategoryRule {
        category: Category::Skincare,
        url_keywords: &["skincare", "skin"],
        title_keywords: &["moisturizer", "serum", "cleanser", "cream"],
    },
    CategoryRule {
        category: Category::Haircare,
        url_keywords: &["hair"],
        title_keywords: &["shampoo", "conditioner", "hair oil", "hair mask"],
    },
    CategoryRule {
        category: Category::Fragrance,
        url_keywords: &["fragrance", "perfume"],
        title_keywords: &["cologne", "eau de", "scent"],
    },
    CategoryRule {
        category: Category::Wellness,
        url_keywords: &["wellness", "health"],
        title_keywords: &["yoga", "fitness", "supplement"],
    },
    CategoryRule {
        category: Category::Home,
        url_keywords: &["home", "furniture"],
        title_keywords: &["decor", "kitchen", "bedding"],
    },
    CategoryRule {
        category: Category::Electronics,
        url_keywords: &["electronic", "gadget"],
        title_keywords: &["phone", "laptop", "headphone"],
    },
    CategoryRule {
        category: Category::Jewelry,
        url_keywords: &["jewelry", "jewellery"],
        title_keywords: &["ring", "necklace", "earring"],
    },
    CategoryRule {
        category: Category::Accessories,
        url_keywords: &[],
        title_keywords: &["bag", "wallet", "belt", "watch", "sunglasses"],
    },
    CategoryRule {
        category: Category::Fashion,
        url_keywords: &[],
        title_keywords: &["dress", "shirt", "pant", "shoe", "jacket"],
    },
];

/// Pick a category for a product from its URL and title.
pub fn resolve(url: &str, title: &str) -> Category {
    let url = url.to_lowercase();
    let title = title.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.matches(&url, &title))
        .map_or(DEFAULT_CATEGORY, |rule| rule.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baby_short_circuits() {
        assert_eq!(resolve("https://x.com/baby-lotion", "Baby Lotion"), Category::Baby);
    }

    #[test]
    fn test_apparel_fallthrough() {
        assert_eq!(resolve("https://x.com/item123", "Red Dress"), Category::Fashion);
    }

    #[test]
    fn test_default_is_women() {
        assert_eq!(resolve("https://x.com/item123", "Mystery Box"), Category::Women);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("https://X.COM/MAKEUP/item", "Palette"), Category::Makeup);
        assert_eq!(resolve("https://x.com/p", "EAU DE Parfum"), Category::Fragrance);
    }

    #[test]
    fn test_precedence_over_later_groups() {
        // "women" contains "men", so the men rule wins before anything later
        assert_eq!(resolve("https://x.com/women/dress", "Summer Dress"), Category::Men);
        // serum is skincare even when the url says hair
        assert_eq!(resolve("https://x.com/hair/serum", "Hair Serum"), Category::Skincare);
        // "earring" also contains "ring", both map to jewelry
        assert_eq!(resolve("https://x.com/p/1", "Pearl Earrings"), Category::Jewelry);
    }

    #[test]
    fn test_url_only_keywords() {
        assert_eq!(resolve("https://shop.com/health/vitamins", "Daily Pack"), Category::Wellness);
        assert_eq!(resolve("https://shop.com/gadget/123", "Thing"), Category::Electronics);
    }

    #[test]
    fn test_accessory_title_keywords_not_matched_in_url() {
        assert_eq!(resolve("https://shop.com/bag/1", "Mystery"), Category::Women);
        assert_eq!(resolve("https://shop.com/p/1", "Canvas Tote Bag"), Category::Accessories);
    }

    #[test]
    fn test_table_order() {
        let order: Vec<Category> = RULES.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Baby,
                Category::Girls,
                Category::Men,
                Category::Makeup,
                Category::Skincare,
                Category::Haircare,
                Category::Fragrance,
                Category::Wellness,
                Category::Home,
                Category::Electronics,
                Category::Jewelry,
                Category::Accessories,
                Category::Fashion,
            ]
        );
    }
}
