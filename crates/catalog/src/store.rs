//! Catalog store port + in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use stockroom_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};

/// Repository port for the product directory.
///
/// The core never touches ambient global state; callers inject an
/// implementation of this port.
pub trait ProductStore: Send + Sync {
    fn get(&self, id: ProductId) -> Option<Product>;

    /// Insert or replace a product record. The record is validated first;
    /// nothing is written on a validation failure.
    fn upsert(&self, product: Product) -> DomainResult<()>;

    /// Read-only snapshot of the whole directory.
    fn snapshot(&self) -> Vec<Product>;
}

/// In-memory product store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn get(&self, id: ProductId) -> Option<Product> {
        self.products.read().ok()?.get(&id).cloned()
    }

    fn upsert(&self, product: Product) -> DomainResult<()> {
        product.validate()?;
        let mut products = self
            .products
            .write()
            .map_err(|_| DomainError::conflict("product store lock poisoned"))?;
        products.insert(product.id, product);
        Ok(())
    }

    fn snapshot(&self) -> Vec<Product> {
        self.products
            .read()
            .map(|p| p.values().cloned().collect())
            .unwrap_or_default()
    }
}
