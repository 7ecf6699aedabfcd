//! Low-stock selection over the product directory.

use stockroom_catalog::{Product, ProductStatus};
use stockroom_core::WarehouseId;

/// Optional narrowing for [`low_stock`].
#[derive(Debug, Clone, Default)]
pub struct StockFilter {
    pub warehouse_id: Option<WarehouseId>,
    pub category: Option<String>,
}

impl StockFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(warehouse_id) = self.warehouse_id {
            if product.warehouse_id != warehouse_id {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        true
    }
}

/// Select products that need restocking attention.
///
/// A union of two independent signals: the quantity sitting at or below the
/// reorder level, OR a manually set LowStock/OutOfStock status. Either alone
/// is enough; the manual status is not cross-checked against the quantity.
pub fn low_stock(products: &[Product], filter: &StockFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| {
            (p.at_or_below_reorder_level()
                || matches!(p.status, ProductStatus::LowStock | ProductStatus::OutOfStock))
                && filter.matches(p)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_catalog::ProductId;
    use stockroom_core::AggregateId;

    fn product(
        name: &str,
        quantity: i64,
        reorder_level: i64,
        status: ProductStatus,
    ) -> Product {
        Product {
            id: ProductId::new(AggregateId::new()),
            sku: format!("SKU-{name}"),
            name: name.to_string(),
            category: "General".to_string(),
            warehouse_id: WarehouseId::new(),
            quantity,
            reorder_level,
            status,
            last_updated: Utc::now(),
            description: None,
        }
    }

    #[test]
    fn threshold_alone_triggers_inclusion() {
        let products = vec![product("Bolts", 5, 10, ProductStatus::Available)];
        let hits = low_stock(&products, &StockFilter::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bolts");
    }

    #[test]
    fn manual_status_alone_triggers_inclusion() {
        let products = vec![product("Nuts", 999, 10, ProductStatus::OutOfStock)];
        let hits = low_stock(&products, &StockFilter::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Nuts");
    }

    #[test]
    fn healthy_products_are_excluded() {
        let products = vec![
            product("Full shelf", 100, 10, ProductStatus::Available),
            product("Damaged lot", 100, 10, ProductStatus::Damaged),
        ];
        assert!(low_stock(&products, &StockFilter::default()).is_empty());
    }

    #[test]
    fn boundary_quantity_counts_as_low() {
        let products = vec![product("Edge", 10, 10, ProductStatus::Available)];
        assert_eq!(low_stock(&products, &StockFilter::default()).len(), 1);
    }

    #[test]
    fn filters_apply_after_the_union() {
        let main = WarehouseId::new();
        let mut in_main = product("Local", 2, 10, ProductStatus::Available);
        in_main.warehouse_id = main;
        let mut tools = product("Wrench", 1, 10, ProductStatus::Available);
        tools.category = "Tools".to_string();
        let products = vec![in_main, tools];

        let by_warehouse = low_stock(
            &products,
            &StockFilter {
                warehouse_id: Some(main),
                ..StockFilter::default()
            },
        );
        assert_eq!(by_warehouse.len(), 1);
        assert_eq!(by_warehouse[0].name, "Local");

        let by_category = low_stock(
            &products,
            &StockFilter {
                category: Some("Tools".to_string()),
                ..StockFilter::default()
            },
        );
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Wrench");
    }
}
