//! Batch application of parsed rows through the store ports.

use serde::Serialize;
use tracing::info;

use stockroom_auth::permissions::{IMPORT_CATALOG, IMPORT_LEDGER};
use stockroom_auth::{User, authorize};
use stockroom_catalog::{Product, ProductStore};
use stockroom_core::{DomainError, DomainResult};
use stockroom_ledger::{InventoryTransaction, LedgerStore};

/// One rejected row: its position in the batch and why it was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    pub index: usize,
    pub error: DomainError,
}

/// Outcome of one batch application.
///
/// Row failures never abort the batch: every valid row is applied, every
/// invalid row is reported with its index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: Vec<RowRejection>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Upsert a batch of product rows into the catalog.
///
/// Validation lives in `ProductStore::upsert` itself; the importer adds no
/// rules of its own.
pub fn import_products(
    actor: &User,
    rows: Vec<Product>,
    store: &dyn ProductStore,
) -> DomainResult<ImportReport> {
    authorize(actor, &IMPORT_CATALOG)?;

    let mut report = ImportReport::default();
    for (index, row) in rows.into_iter().enumerate() {
        match store.upsert(row) {
            Ok(()) => report.accepted += 1,
            Err(error) => report.rejected.push(RowRejection { index, error }),
        }
    }
    info!(
        accepted = report.accepted,
        rejected = report.rejected.len(),
        "product batch imported"
    );
    Ok(report)
}

/// Append a batch of transaction rows to the ledger.
pub fn import_transactions(
    actor: &User,
    rows: Vec<InventoryTransaction>,
    store: &dyn LedgerStore,
) -> DomainResult<ImportReport> {
    authorize(actor, &IMPORT_LEDGER)?;

    let mut report = ImportReport::default();
    for (index, row) in rows.into_iter().enumerate() {
        match store.append(row) {
            Ok(()) => report.accepted += 1,
            Err(error) => report.rejected.push(RowRejection { index, error }),
        }
    }
    info!(
        accepted = report.accepted,
        rejected = report.rejected.len(),
        "transaction batch imported"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_auth::Role;
    use stockroom_catalog::{InMemoryProductStore, ProductId, ProductStatus};
    use stockroom_core::{AggregateId, UserId, WarehouseId};
    use stockroom_ledger::{InMemoryLedger, TransactionId, TransactionType};

    fn importer(role: Role) -> User {
        User {
            id: UserId::new(),
            name: "Io".to_string(),
            email: "io@example.com".to_string(),
            role,
            category_access: None,
        }
    }

    fn product_row(sku: &str, quantity: i64) -> Product {
        Product {
            id: ProductId::new(AggregateId::new()),
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            category: "General".to_string(),
            warehouse_id: WarehouseId::new(),
            quantity,
            reorder_level: 5,
            status: ProductStatus::Available,
            last_updated: Utc::now(),
            description: None,
        }
    }

    fn transaction_row(kind: TransactionType, quantity_change: i64) -> InventoryTransaction {
        InventoryTransaction {
            id: TransactionId::new(AggregateId::new()),
            product_id: ProductId::new(AggregateId::new()),
            kind,
            quantity_change,
            occurred_at: Utc::now(),
            actor: "import".to_string(),
            reason: None,
            warehouse_id: None,
        }
    }

    #[test]
    fn mixed_product_batch_applies_only_valid_rows() {
        let store = InMemoryProductStore::new();
        let rows = vec![
            product_row("SKU-1", 10),
            product_row("", 10),
            product_row("SKU-2", -4),
            product_row("SKU-3", 0),
        ];

        let report =
            import_products(&importer(Role::WarehouseManager), rows, &store).unwrap();
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 2);
        assert!(!report.is_clean());
        let rejected_indexes: Vec<_> = report.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected_indexes, vec![1, 2]);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn transaction_batch_reports_sign_convention_violations() {
        let ledger = InMemoryLedger::new();
        let rows = vec![
            transaction_row(TransactionType::Inflow, 40),
            transaction_row(TransactionType::Outflow, 15),
            transaction_row(TransactionType::Damage, -1),
        ];

        let report =
            import_transactions(&importer(Role::Admin), rows, &ledger).unwrap();
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 1);
        match &report.rejected[0].error {
            DomainError::Validation(msg) => assert!(msg.contains("negative")),
            _ => panic!("Expected Validation error"),
        }
        assert_eq!(ledger.snapshot().len(), 2);
    }

    #[test]
    fn unauthorized_importer_writes_nothing() {
        let store = InMemoryProductStore::new();
        let err = import_products(
            &importer(Role::DepartmentEmployee),
            vec![product_row("SKU-9", 1)],
            &store,
        )
        .unwrap_err();
        match err {
            DomainError::PermissionDenied(_) => {}
            _ => panic!("Expected PermissionDenied error"),
        }
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn empty_batch_is_a_clean_no_op() {
        let ledger = InMemoryLedger::new();
        let report =
            import_transactions(&importer(Role::Admin), vec![], &ledger).unwrap();
        assert_eq!(report.accepted, 0);
        assert!(report.is_clean());
    }
}
