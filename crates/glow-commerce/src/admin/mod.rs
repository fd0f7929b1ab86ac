//! Admin-side helpers: the shared-secret gate and the product detail
//! extractor that prefills the add-product form.

mod error;
mod extract;
mod gate;

pub use error::{AuthError, ExtractError};
pub use extract::{ExtractedProduct, ExtractionTask, ProductExtractor};
pub use gate::{AdminGate, ADMIN_KEY};
