//! Product records and admin drafts.

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// A product as stored and displayed.
///
/// Field names follow the persisted JSON layout (`reviewSnippet`,
/// `affiliateLink`, ...). Numeric fields also accept numeric strings since
/// older admin sessions saved extractor output verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Creation-time derived identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Primary image URL.
    #[serde(default)]
    pub image: String,
    /// All image URLs, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Price in dollars.
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    /// Average rating in [0, 5].
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    /// Number of reviews.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub reviews: u64,
    /// Short customer quote.
    #[serde(default)]
    pub review_snippet: String,
    /// Outbound purchase link.
    #[serde(default)]
    pub affiliate_link: String,
    /// Category tag. Bundled fixtures may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ProductRecord {
    /// Price formatted for display, e.g. `$24.99`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Category of the record, `fashion` when unknown.
    pub fn category_or_default(&self) -> Category {
        self.category.unwrap_or(Category::Fashion)
    }
}

/// Admin form input for a new product.
///
/// Numeric fields are `None` until the admin enters a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub image: String,
    /// Extra image URLs, one per line.
    #[serde(default)]
    pub additional_images: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub review_snippet: String,
    pub affiliate_link: String,
    pub category: Category,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            image: String::new(),
            additional_images: String::new(),
            price: None,
            rating: None,
            reviews: None,
            review_snippet: String::new(),
            affiliate_link: String::new(),
            category: Category::Fashion,
        }
    }
}

impl ProductDraft {
    /// Check that every required field is filled in and in range.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.image.trim().is_empty() {
            missing.push("image");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.rating.is_none() {
            missing.push("rating");
        }
        if self.reviews.is_none() {
            missing.push("reviews");
        }
        if self.review_snippet.trim().is_empty() {
            missing.push("reviewSnippet");
        }
        if self.affiliate_link.trim().is_empty() {
            missing.push("affiliateLink");
        }
        if !missing.is_empty() {
            return Err(CommerceError::Validation(format!(
                "Please fill in all fields (missing: {})",
                missing.join(", ")
            )));
        }

        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(CommerceError::Validation(format!(
                    "Price must be a non-negative number, got {price}"
                )));
            }
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(CommerceError::Validation(format!(
                    "Rating must be between 0 and 5, got {rating}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(u64),
    Float(f64),
    Text(String),
}

fn parse_text_number(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| format!("expected a number, got {text:?}"))
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Int(n) => Ok(n as f64),
        NumberOrText::Float(n) => Ok(n),
        NumberOrText::Text(s) => parse_text_number(&s).map_err(serde::de::Error::custom),
    }
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Int(n) => return Ok(n),
        NumberOrText::Float(n) => n,
        NumberOrText::Text(s) => parse_text_number(&s).map_err(serde::de::Error::custom)?,
    };
    if value.is_finite() && value >= 0.0 {
        Ok(value.trunc() as u64)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected a non-negative count, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ProductDraft {
        ProductDraft {
            title: "Velvet Matte Lipstick".to_string(),
            image: "https://img.example/lipstick.jpg".to_string(),
            additional_images: String::new(),
            price: Some(18.5),
            rating: Some(4.4),
            reviews: Some(120),
            review_snippet: "Lasts all day".to_string(),
            affiliate_link: "https://shop.example/lipstick".to_string(),
            category: Category::Makeup,
        }
    }

    #[test]
    fn test_complete_draft_validates() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let draft = ProductDraft {
            title: "  ".to_string(),
            price: None,
            ..complete_draft()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.is_validation());
        let message = err.to_string();
        assert!(message.contains("title"));
        assert!(message.contains("price"));
        assert!(!message.contains("rating"));
    }

    #[test]
    fn test_rating_out_of_range() {
        let draft = ProductDraft {
            rating: Some(5.5),
            ..complete_draft()
        };
        assert!(draft.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_negative_price() {
        let draft = ProductDraft {
            price: Some(-1.0),
            ..complete_draft()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_record_accepts_string_numbers() {
        let json = r#"{
            "id": 1718000000000,
            "title": "Argan Hair Oil",
            "image": "https://img.example/oil.jpg",
            "images": ["https://img.example/oil.jpg"],
            "price": "45.23",
            "rating": "4.2",
            "reviews": 310,
            "reviewSnippet": "Silky",
            "affiliateLink": "https://shop.example/oil",
            "category": "haircare",
            "additionalImages": ""
        }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.price, 45.23);
        assert_eq!(record.rating, 4.2);
        assert_eq!(record.reviews, 310);
        assert_eq!(record.category, Some(Category::Haircare));
    }

    #[test]
    fn test_record_uses_camel_case_on_the_wire() {
        let record = ProductRecord {
            id: ProductId::new(7),
            title: "Mist".to_string(),
            image: "a".to_string(),
            images: vec!["a".to_string()],
            price: 9.0,
            rating: 4.0,
            reviews: 2,
            review_snippet: "Fresh".to_string(),
            affiliate_link: "https://shop.example/mist".to_string(),
            category: Some(Category::Fragrance),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["reviewSnippet"], "Fresh");
        assert_eq!(value["affiliateLink"], "https://shop.example/mist");
        assert_eq!(record.display_price(), "$9.00");
    }

    #[test]
    fn test_fixture_shape_defaults() {
        let json = r#"{"id": 3, "title": "Linen Shirt", "price": 39.99}"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert!(record.images.is_empty());
        assert_eq!(record.reviews, 0);
        assert_eq!(record.category_or_default(), Category::Fashion);
    }
}
