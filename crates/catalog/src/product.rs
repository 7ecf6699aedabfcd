use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{AggregateId, DomainError, DomainResult, Entity, WarehouseId};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock status as shown on the catalog.
///
/// Authoritative and manually set: it is NOT derived from quantity vs reorder
/// level, so a product can read "available" while sitting below its threshold.
/// Callers that want the computed signal use [`ProductStatus::derived`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Available,
    LowStock,
    OutOfStock,
    Damaged,
}

impl ProductStatus {
    /// Compute the status a quantity/reorder-level pair implies.
    ///
    /// Never applied automatically; the stored status stays manual.
    pub fn derived(quantity: i64, reorder_level: i64) -> Self {
        if quantity <= 0 {
            ProductStatus::OutOfStock
        } else if quantity <= reorder_level {
            ProductStatus::LowStock
        } else {
            ProductStatus::Available
        }
    }
}

/// A catalog product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub reorder_level: i64,
    pub status: ProductStatus,
    pub last_updated: DateTime<Utc>,
    pub description: Option<String>,
}

impl Product {
    /// Validate the record. Shared by every write path into the catalog.
    pub fn validate(&self) -> DomainResult<()> {
        if self.sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.reorder_level < 0 {
            return Err(DomainError::validation("reorder level cannot be negative"));
        }
        Ok(())
    }

    /// Quantity signal for restocking, independent of the manual status.
    pub fn at_or_below_reorder_level(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product() -> Product {
        Product {
            id: ProductId::new(AggregateId::new()),
            sku: "SKU-100".to_string(),
            name: "M6 hex bolt".to_string(),
            category: "Fasteners".to_string(),
            warehouse_id: WarehouseId::new(),
            quantity: 40,
            reorder_level: 10,
            status: ProductStatus::Available,
            last_updated: Utc::now(),
            description: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_record() {
        assert!(test_product().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_sku() {
        let mut product = test_product();
        product.sku = "  ".to_string();
        match product.validate().unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("SKU")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let mut product = test_product();
        product.quantity = -1;
        match product.validate().unwrap_err() {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn derived_status_follows_thresholds() {
        assert_eq!(ProductStatus::derived(0, 10), ProductStatus::OutOfStock);
        assert_eq!(ProductStatus::derived(5, 10), ProductStatus::LowStock);
        assert_eq!(ProductStatus::derived(10, 10), ProductStatus::LowStock);
        assert_eq!(ProductStatus::derived(11, 10), ProductStatus::Available);
    }

    #[test]
    fn manual_status_is_not_overwritten_by_thresholds() {
        let mut product = test_product();
        product.quantity = 5;
        // Below the reorder level yet still manually "available".
        assert!(product.at_or_below_reorder_level());
        assert_eq!(product.status, ProductStatus::Available);
    }
}
