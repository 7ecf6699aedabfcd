//! `stockroom-catalog` — the product directory.
//!
//! Products are read-side records supplied by an external store; the only
//! mutation surface is the [`ProductStore`] port used by bulk import.

pub mod product;
pub mod store;

pub use product::{Product, ProductId, ProductStatus};
pub use store::{InMemoryProductStore, ProductStore};
