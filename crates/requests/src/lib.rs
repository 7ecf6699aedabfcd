//! `stockroom-requests` — the material-request approval workflow.
//!
//! The [`MaterialRequest`] aggregate owns the status state machine
//! (`Pending → Approved | Rejected | Cancelled`, `Approved → Completed`);
//! the [`RequestService`] wraps it with authorization and a store port so
//! every transition runs in one read-validate-write scope.

pub mod capabilities;
pub mod request;
pub mod service;
pub mod store;

pub use capabilities::{can_cancel, can_complete, can_decide, can_edit, can_submit};
pub use request::{
    CancelRequest, CompleteRequest, DecideRequest, Decision, EditRequest, MaterialRequest,
    RequestCommand, RequestEvent, RequestId, RequestStatus, RequestedItem, SubmitRequest,
};
pub use service::{RequestDraft, RequestFilter, RequestService};
pub use store::{InMemoryRequestStore, RequestStore};
