//! Storefront query string handling.
//!
//! The storefront keeps the selected category in `?category=` and accepts a
//! one-shot `?refresh=` signal that asks the open view to refetch.

use url::form_urlencoded;

use crate::catalog::CategorySelector;
use crate::error::CommerceError;

const CATEGORY_PARAM: &str = "category";
const REFRESH_PARAM: &str = "refresh";

/// A parsed storefront query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorefrontQuery {
    pairs: Vec<(String, String)>,
    category: CategorySelector,
    refresh: bool,
}

impl StorefrontQuery {
    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Result<Self, CommerceError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        let category = match lookup(&pairs, CATEGORY_PARAM) {
            Some(value) if !value.is_empty() => value.parse()?,
            _ => CategorySelector::All,
        };
        let refresh = lookup(&pairs, REFRESH_PARAM).is_some_and(|value| !value.is_empty());

        Ok(Self {
            pairs,
            category,
            refresh,
        })
    }

    pub fn category(&self) -> CategorySelector {
        self.category
    }

    /// Whether a refresh was requested.
    pub fn refresh_requested(&self) -> bool {
        self.refresh
    }

    /// Select `category`, keeping every other parameter.
    pub fn with_category(mut self, category: CategorySelector) -> Self {
        let value = category.as_str().to_string();
        match self.pairs.iter_mut().find(|(key, _)| key == CATEGORY_PARAM) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((CATEGORY_PARAM.to_string(), value)),
        }
        self.category = category;
        self
    }

    /// The same query with the refresh signal consumed.
    pub fn without_refresh(&self) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .filter(|(key, _)| key != REFRESH_PARAM)
                .cloned()
                .collect(),
            category: self.category,
            refresh: false,
        }
    }

    /// Encode back into a query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl std::fmt::Display for StorefrontQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
