//! Ledger store port + in-memory implementation.

use std::collections::HashSet;
use std::sync::RwLock;

use stockroom_core::{DomainError, DomainResult};

use crate::transaction::{InventoryTransaction, TransactionId};

/// Repository port for the transaction ledger.
///
/// Append-only by construction: there is no update or delete surface.
pub trait LedgerStore: Send + Sync {
    /// Append one validated transaction. A duplicate id is a conflict; the
    /// original entry is left untouched.
    fn append(&self, transaction: InventoryTransaction) -> DomainResult<()>;

    /// Read-only snapshot of the ledger in append order.
    fn snapshot(&self) -> Vec<InventoryTransaction>;
}

/// In-memory ledger.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerInner>,
}

#[derive(Debug, Default)]
struct LedgerInner {
    entries: Vec<InventoryTransaction>,
    ids: HashSet<TransactionId>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedger {
    fn append(&self, transaction: InventoryTransaction) -> DomainResult<()> {
        transaction.validate()?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("ledger lock poisoned"))?;
        if !inner.ids.insert(transaction.id) {
            return Err(DomainError::conflict(format!(
                "transaction {} already recorded",
                transaction.id
            )));
        }
        inner.entries.push(transaction);
        Ok(())
    }

    fn snapshot(&self) -> Vec<InventoryTransaction> {
        self.inner
            .read()
            .map(|inner| inner.entries.clone())
            .unwrap_or_default()
    }
}
