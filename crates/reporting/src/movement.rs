//! Movement summaries and per-product breakdowns over the ledger.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_catalog::{Product, ProductId};
use stockroom_core::WarehouseId;
use stockroom_ledger::{InventoryTransaction, TransactionType};

/// Filter for [`summarize`]: a closed time window plus optional narrowing.
#[derive(Debug, Clone)]
pub struct MovementFilter {
    /// Inclusive lower bound on transaction time.
    pub from: DateTime<Utc>,
    /// Inclusive upper bound on transaction time.
    pub to: DateTime<Utc>,
    pub product_id: Option<ProductId>,
    pub warehouse_id: Option<WarehouseId>,
    /// When set, only these transaction kinds are counted.
    pub kinds: Option<HashSet<TransactionType>>,
}

impl MovementFilter {
    /// Filter on the time window alone.
    pub fn window(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            product_id: None,
            warehouse_id: None,
            kinds: None,
        }
    }

    fn matches(&self, tx: &InventoryTransaction) -> bool {
        if tx.occurred_at < self.from || tx.occurred_at > self.to {
            return false;
        }
        if let Some(product_id) = self.product_id {
            if tx.product_id != product_id {
                return false;
            }
        }
        if let Some(warehouse_id) = self.warehouse_id {
            if tx.warehouse_id != Some(warehouse_id) {
                return false;
            }
        }
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&tx.kind) {
                return false;
            }
        }
        true
    }
}

/// Headline numbers for a movement dashboard tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MovementSummary {
    /// Sum of absolute quantity changes over the filtered set.
    pub total_quantity: i64,
    pub transaction_count: usize,
    pub distinct_products: usize,
}

/// Summarize the ledger slice matching `filter`. Empty matches yield zeroes.
pub fn summarize(
    transactions: &[InventoryTransaction],
    filter: &MovementFilter,
) -> MovementSummary {
    let mut summary = MovementSummary::default();
    let mut products = HashSet::new();
    for tx in transactions.iter().filter(|tx| filter.matches(tx)) {
        summary.total_quantity += tx.quantity_change.abs();
        summary.transaction_count += 1;
        products.insert(tx.product_id);
    }
    summary.distinct_products = products.len();
    summary
}

/// One row of the per-product movement breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductBreakdown {
    pub product_id: ProductId,
    pub product_name: String,
    /// Signed accumulation over inflow and initial-stock entries.
    pub total_inflow: i64,
    /// Absolute accumulation over outflow entries.
    pub total_outflow: i64,
    /// Absolute accumulation over damage entries.
    pub total_damaged: i64,
    /// Signed accumulation over return entries.
    pub total_returned: i64,
    /// Raw sum of every quantity change for the product, all kinds included.
    /// Reconciliation identity: always equals the ledger's own raw sum.
    pub net_change: i64,
}

/// Group the ledger by product. Names are resolved from the supplied product
/// directory snapshot; an unresolved id falls back to the id itself so no row
/// is dropped. Rows are sorted by product name for deterministic output.
pub fn breakdown_by_product(
    transactions: &[InventoryTransaction],
    products: &[Product],
) -> Vec<ProductBreakdown> {
    let names: HashMap<ProductId, &str> = products
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let mut rows: HashMap<ProductId, ProductBreakdown> = HashMap::new();
    for tx in transactions {
        let row = rows.entry(tx.product_id).or_insert_with(|| ProductBreakdown {
            product_id: tx.product_id,
            product_name: names
                .get(&tx.product_id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| tx.product_id.to_string()),
            total_inflow: 0,
            total_outflow: 0,
            total_damaged: 0,
            total_returned: 0,
            net_change: 0,
        });
        match tx.kind {
            TransactionType::Inflow | TransactionType::Initial => {
                row.total_inflow += tx.quantity_change;
            }
            TransactionType::Outflow => row.total_outflow += tx.quantity_change.abs(),
            TransactionType::Damage => row.total_damaged += tx.quantity_change.abs(),
            TransactionType::Return => row.total_returned += tx.quantity_change,
            TransactionType::Adjustment => {}
        }
        row.net_change += tx.quantity_change;
    }

    let mut rows: Vec<_> = rows.into_values().collect();
    rows.sort_by(|a, b| {
        a.product_name
            .cmp(&b.product_name)
            .then_with(|| a.product_id.0.as_uuid().cmp(b.product_id.0.as_uuid()))
    });
    rows
}

/// Sum absolute quantity change per transaction kind. Kinds that never
/// occurred (or only net to zero) are absent from the result.
pub fn type_distribution(
    transactions: &[InventoryTransaction],
) -> BTreeMap<TransactionType, i64> {
    let mut distribution = BTreeMap::new();
    for tx in transactions {
        *distribution.entry(tx.kind).or_insert(0) += tx.quantity_change.abs();
    }
    distribution.retain(|_, total| *total != 0);
    distribution
}
