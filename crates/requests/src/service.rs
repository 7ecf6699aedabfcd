//! Application service for the approval workflow.
//!
//! The service is the only mutation path for material requests: it authorizes
//! the actor, builds the command, and runs it through the store's transition
//! scope so validation always sees the latest state.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use stockroom_auth::permissions::{COMPLETE_REQUESTS, DECIDE_REQUESTS, SUBMIT_REQUESTS};
use stockroom_auth::{User, authorize};
use stockroom_core::{Aggregate, AggregateId, DomainError, DomainResult, UserId};
use stockroom_events::DomainEvent;

use crate::request::{
    CancelRequest, CompleteRequest, DecideRequest, Decision, EditRequest, MaterialRequest,
    RequestCommand, RequestId, RequestStatus, RequestedItem, SubmitRequest,
};
use crate::store::RequestStore;

/// What a requester fills in; identity and category come from the actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    pub items: Vec<RequestedItem>,
    pub reason: String,
    pub needed_by: NaiveDate,
}

/// Query filter for [`RequestService::list`]. All fields optional; empty
/// filter matches everything.
///
/// Role-based visibility is the caller's duty: a department employee's view
/// must be narrowed by passing `requester = Some(self.id)`.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub requester: Option<UserId>,
    pub department: Option<String>,
    /// Inclusive submission-time window.
    pub submitted_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl RequestFilter {
    pub fn matches(&self, request: &MaterialRequest) -> bool {
        if let Some(status) = self.status {
            if request.status() != status {
                return false;
            }
        }
        if let Some(requester) = self.requester {
            if request.requester_id() != requester {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if request.department_category() != department {
                return false;
            }
        }
        if let Some((from, to)) = self.submitted_between {
            if request.submitted_at() < from || request.submitted_at() > to {
                return false;
            }
        }
        true
    }
}

/// The request lifecycle manager.
pub struct RequestService<S> {
    store: S,
}

impl<S: RequestStore> RequestService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Submit a new request on behalf of `actor`.
    ///
    /// The department category is derived from the actor's category access;
    /// an actor without one cannot produce a well-formed request.
    pub fn submit(
        &self,
        actor: &User,
        draft: RequestDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<MaterialRequest> {
        authorize(actor, &SUBMIT_REQUESTS)?;
        let department_category = actor
            .category_access
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| DomainError::validation("requester has no category access"))?;

        let request_id = RequestId::new(AggregateId::new());
        let mut request = MaterialRequest::empty(request_id);
        let events = request.handle(&RequestCommand::SubmitRequest(SubmitRequest {
            request_id,
            requester_id: actor.id,
            requester_name: actor.name.clone(),
            department_category,
            items: draft.items,
            reason: draft.reason,
            needed_by: draft.needed_by,
            occurred_at: now,
        }))?;
        for event in &events {
            request.apply(event);
        }
        self.store.insert(request.clone())?;
        for event in &events {
            info!(request_id = %request_id, kind = event.kind(), "material request submitted");
        }
        Ok(request)
    }

    /// Approve or reject a pending request (manager/admin only).
    pub fn decide(
        &self,
        request_id: RequestId,
        actor: &User,
        decision: Decision,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<MaterialRequest> {
        authorize(actor, &DECIDE_REQUESTS)?;
        let updated = self.store.transition(request_id, &mut |req| {
            req.handle(&RequestCommand::DecideRequest(DecideRequest {
                request_id,
                approver_id: actor.id,
                approver_name: actor.name.clone(),
                decision,
                notes: notes.clone(),
                occurred_at: now,
            }))
        })?;
        info!(request_id = %request_id, status = %updated.status(), "material request decided");
        Ok(updated)
    }

    /// Cancel a pending request (requester only; no role gate).
    pub fn cancel(
        &self,
        request_id: RequestId,
        actor: &User,
        now: DateTime<Utc>,
    ) -> DomainResult<MaterialRequest> {
        let updated = self.store.transition(request_id, &mut |req| {
            req.handle(&RequestCommand::CancelRequest(CancelRequest {
                request_id,
                requester_id: actor.id,
                occurred_at: now,
            }))
        })?;
        info!(request_id = %request_id, "material request cancelled");
        Ok(updated)
    }

    /// Replace the draft of a pending request (requester only).
    pub fn edit(
        &self,
        request_id: RequestId,
        actor: &User,
        items: Vec<RequestedItem>,
        reason: String,
        needed_by: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<MaterialRequest> {
        self.store.transition(request_id, &mut |req| {
            req.handle(&RequestCommand::EditRequest(EditRequest {
                request_id,
                requester_id: actor.id,
                items: items.clone(),
                reason: reason.clone(),
                needed_by,
                occurred_at: now,
            }))
        })
    }

    /// Mark an approved request as fulfilled (fulfillment collaborator).
    pub fn complete(
        &self,
        request_id: RequestId,
        actor: &User,
        now: DateTime<Utc>,
    ) -> DomainResult<MaterialRequest> {
        authorize(actor, &COMPLETE_REQUESTS)?;
        let updated = self.store.transition(request_id, &mut |req| {
            req.handle(&RequestCommand::CompleteRequest(CompleteRequest {
                request_id,
                occurred_at: now,
            }))
        })?;
        info!(request_id = %request_id, "material request completed");
        Ok(updated)
    }

    /// List requests matching `filter`, newest submission first.
    pub fn list(&self, filter: &RequestFilter) -> Vec<MaterialRequest> {
        let mut requests: Vec<_> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        requests.sort_by(|a, b| {
            b.submitted_at()
                .cmp(&a.submitted_at())
                .then_with(|| a.id_typed().0.as_uuid().cmp(b.id_typed().0.as_uuid()))
        });
        requests
    }
}
