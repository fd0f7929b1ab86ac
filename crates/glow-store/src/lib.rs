//! Injectable key-value persistence for the GlowBeauty catalog.
//!
//! The catalog never talks to a concrete storage backend. It is handed
//! something implementing [`KvStore`], which keeps tests on the in-memory
//! adapter and production on the file-backed one.
//!
//! # Example
//!
//! ```rust,ignore
//! use glow_store::{JsonStore, MemoryStore};
//!
//! let store = JsonStore::new(MemoryStore::new());
//!
//! // Store a value
//! store.set("womenProducts", &records)?;
//!
//! // Retrieve a value
//! let records: Option<Vec<ProductRecord>> = store.get("womenProducts")?;
//!
//! // Delete a value
//! store.delete("womenProducts")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::{JsonStore, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, JsonStore, KvStore, MemoryStore, StoreError};
}
