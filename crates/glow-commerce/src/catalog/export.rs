//! JSON exports of persisted records.

use serde::ser::{Serialize, Serializer};

use crate::catalog::{Category, ProductRecord};

/// Download name of the combined export.
pub const ALL_EXPORT_FILE_NAME: &str = "glowbeauty-products.json";

/// Download name of a single category export, e.g. `women.json`.
pub fn export_file_name(category: Category) -> String {
    format!("{category}.json")
}

/// Category lists serialized as one object, keys in navigation order.
pub(crate) struct CombinedExport<'a>(pub &'a [(Category, Vec<ProductRecord>)]);

impl Serialize for CombinedExport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(category, records)| (category.as_str(), records)))
    }
}
