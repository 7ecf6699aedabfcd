use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::ProductId;
use stockroom_core::{AggregateId, DomainError, DomainResult, Entity, WarehouseId};

/// Inventory transaction identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub AggregateId);

impl TransactionId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Kind of inventory movement.
///
/// `Ord` is derived so distributions can be keyed deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Inflow,
    Outflow,
    Return,
    Damage,
    Adjustment,
    Initial,
}

/// Which sign `quantity_change` must carry for a transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    Positive,
    Negative,
    Either,
}

impl TransactionType {
    /// Sign convention: stock entering the warehouse is positive, stock
    /// leaving is negative, adjustments go either way.
    pub fn sign_convention(&self) -> SignConvention {
        match self {
            TransactionType::Inflow | TransactionType::Return | TransactionType::Initial => {
                SignConvention::Positive
            }
            TransactionType::Outflow | TransactionType::Damage => SignConvention::Negative,
            TransactionType::Adjustment => SignConvention::Either,
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            TransactionType::Inflow => "inflow",
            TransactionType::Outflow => "outflow",
            TransactionType::Return => "return",
            TransactionType::Damage => "damage",
            TransactionType::Adjustment => "adjustment",
            TransactionType::Initial => "initial",
        };
        f.write_str(name)
    }
}

/// One immutable entry in the inventory ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: TransactionId,
    pub product_id: ProductId,
    pub kind: TransactionType,
    pub quantity_change: i64,
    pub occurred_at: DateTime<Utc>,
    pub actor: String,
    pub reason: Option<String>,
    pub warehouse_id: Option<WarehouseId>,
}

impl InventoryTransaction {
    /// Validate the entry. Shared by every write path into the ledger.
    pub fn validate(&self) -> DomainResult<()> {
        if self.actor.trim().is_empty() {
            return Err(DomainError::validation("actor cannot be empty"));
        }
        if self.quantity_change == 0 {
            return Err(DomainError::validation("quantity change cannot be zero"));
        }
        match self.kind.sign_convention() {
            SignConvention::Positive if self.quantity_change < 0 => {
                Err(DomainError::validation(format!(
                    "{} transactions must carry a positive quantity change",
                    self.kind
                )))
            }
            SignConvention::Negative if self.quantity_change > 0 => {
                Err(DomainError::validation(format!(
                    "{} transactions must carry a negative quantity change",
                    self.kind
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Entity for InventoryTransaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
