//! Tracing/logging setup shared by binaries embedding the stockroom crates.
//!
//! Library consumers can skip this entirely and install their own subscriber.

pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
