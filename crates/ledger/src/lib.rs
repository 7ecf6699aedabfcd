//! `stockroom-ledger` — the append-only inventory transaction ledger.
//!
//! Transactions are immutable facts: once recorded they are never mutated or
//! deleted. Balances and movement statistics are derived downstream, never
//! stored here.

pub mod store;
pub mod transaction;

pub use store::{InMemoryLedger, LedgerStore};
pub use transaction::{InventoryTransaction, SignConvention, TransactionId, TransactionType};
