//! Capability checks for the approval workflow.
//!
//! These predicates answer "may this actor do that" without touching a store,
//! so a presentation layer can gate actions with the exact rules the mutating
//! operations enforce. The service and aggregate produce the corresponding
//! `PermissionDenied` / `InvalidTransition` errors when a check fails.

use stockroom_auth::permissions::{COMPLETE_REQUESTS, DECIDE_REQUESTS, SUBMIT_REQUESTS};
use stockroom_auth::{User, authorize};

use crate::request::{MaterialRequest, RequestStatus};

/// May this actor submit new material requests?
pub fn can_submit(actor: &User) -> bool {
    authorize(actor, &SUBMIT_REQUESTS).is_ok()
}

/// May this actor approve or reject pending requests?
pub fn can_decide(actor: &User) -> bool {
    authorize(actor, &DECIDE_REQUESTS).is_ok()
}

/// May this actor mark approved requests as fulfilled?
pub fn can_complete(actor: &User) -> bool {
    authorize(actor, &COMPLETE_REQUESTS).is_ok()
}

/// May this actor cancel this request right now?
///
/// Requester identity AND a pending status; cancellation is never role-based.
pub fn can_cancel(actor: &User, request: &MaterialRequest) -> bool {
    actor.id == request.requester_id() && request.status() == RequestStatus::Pending
}

/// May this actor edit this request right now? Same rule as cancelling.
pub fn can_edit(actor: &User, request: &MaterialRequest) -> bool {
    can_cancel(actor, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{MaterialRequest, RequestCommand, RequestId, RequestedItem, SubmitRequest};
    use chrono::{NaiveDate, Utc};
    use stockroom_auth::Role;
    use stockroom_catalog::ProductId;
    use stockroom_core::{Aggregate, AggregateId, UserId};

    fn actor(role: Role) -> User {
        User {
            id: UserId::new(),
            name: "Lee".to_string(),
            email: "lee@example.com".to_string(),
            role,
            category_access: Some("Plumbing".to_string()),
        }
    }

    fn pending_request(requester_id: UserId) -> MaterialRequest {
        let request_id = RequestId::new(AggregateId::new());
        let mut request = MaterialRequest::empty(request_id);
        let events = request
            .handle(&RequestCommand::SubmitRequest(SubmitRequest {
                request_id,
                requester_id,
                requester_name: "Lee".to_string(),
                department_category: "Plumbing".to_string(),
                items: vec![RequestedItem {
                    product_id: ProductId::new(AggregateId::new()),
                    product_name: "PTFE tape".to_string(),
                    quantity: 2,
                }],
                reason: "stock out".to_string(),
                needed_by: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        request.apply(&events[0]);
        request
    }

    #[test]
    fn role_capabilities_follow_the_policy() {
        assert!(can_submit(&actor(Role::DepartmentEmployee)));
        assert!(!can_decide(&actor(Role::DepartmentEmployee)));

        assert!(!can_submit(&actor(Role::WarehouseManager)));
        assert!(can_decide(&actor(Role::WarehouseManager)));
        assert!(can_complete(&actor(Role::WarehouseManager)));

        // Wildcard.
        assert!(can_submit(&actor(Role::Admin)));
        assert!(can_decide(&actor(Role::Admin)));
        assert!(can_complete(&actor(Role::Admin)));
    }

    #[test]
    fn only_the_requester_can_cancel_and_only_while_pending() {
        let requester = actor(Role::DepartmentEmployee);
        let stranger = actor(Role::DepartmentEmployee);
        let request = pending_request(requester.id);

        assert!(can_cancel(&requester, &request));
        assert!(can_edit(&requester, &request));
        assert!(!can_cancel(&stranger, &request));
        assert!(!can_edit(&stranger, &request));
    }
}
