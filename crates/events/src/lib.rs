//! Domain event contract.
//!
//! Events are immutable facts with a stable kind string and a schema version
//! for evolution. This core returns events to the caller synchronously; there
//! is no bus or broker here.

use chrono::{DateTime, Utc};

/// A domain-agnostic event.
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event kind identifier (e.g. "requests.request.submitted").
    fn kind(&self) -> &'static str;

    /// Schema version for this event kind.
    fn schema_version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
