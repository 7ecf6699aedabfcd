//! `stockroom-import` — the bulk-import collaborator.
//!
//! Takes already-parsed product and transaction rows (CSV parsing happens
//! outside the core) and applies them through the same store ports every
//! other caller uses, so there is exactly one validation path.

pub mod batch;

pub use batch::{ImportReport, RowRejection, import_products, import_transactions};
