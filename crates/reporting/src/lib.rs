//! `stockroom-reporting` — derived statistics over the inventory ledger.
//!
//! Everything here is a pure function of its inputs: no store, no hidden
//! state, no failure modes. Empty input yields zeroed or empty output.

pub mod movement;
pub mod stock;

pub use movement::{
    MovementFilter, MovementSummary, ProductBreakdown, breakdown_by_product, summarize,
    type_distribution,
};
pub use stock::{StockFilter, low_stock};
