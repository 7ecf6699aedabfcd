use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::ProductId;
use stockroom_core::{Aggregate, AggregateId, AggregateRoot, DomainError, UserId};
use stockroom_events::DomainEvent;

/// Material request identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub AggregateId);

impl RequestId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Material request status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl RequestStatus {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Rejected | RequestStatus::Cancelled | RequestStatus::Completed
        )
    }
}

impl core::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Outcome of a manager decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn status(&self) -> RequestStatus {
        match self {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// One requested line: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
}

/// Aggregate root: MaterialRequest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRequest {
    id: RequestId,
    requester_id: UserId,
    requester_name: String,
    department_category: String,
    items: Vec<RequestedItem>,
    reason: String,
    needed_by: NaiveDate,
    submitted_at: DateTime<Utc>,
    status: RequestStatus,
    approver_id: Option<UserId>,
    approver_name: Option<String>,
    action_at: Option<DateTime<Utc>>,
    approver_notes: Option<String>,
    version: u64,
    created: bool,
}

impl MaterialRequest {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: RequestId) -> Self {
        Self {
            id,
            requester_id: UserId::from_uuid(uuid::Uuid::nil()),
            requester_name: String::new(),
            department_category: String::new(),
            items: Vec::new(),
            reason: String::new(),
            needed_by: NaiveDate::MIN,
            submitted_at: DateTime::<Utc>::MIN_UTC,
            status: RequestStatus::Pending,
            approver_id: None,
            approver_name: None,
            action_at: None,
            approver_notes: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> RequestId {
        self.id
    }

    pub fn requester_id(&self) -> UserId {
        self.requester_id
    }

    pub fn requester_name(&self) -> &str {
        &self.requester_name
    }

    pub fn department_category(&self) -> &str {
        &self.department_category
    }

    pub fn items(&self) -> &[RequestedItem] {
        &self.items
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn needed_by(&self) -> NaiveDate {
        self.needed_by
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn approver_id(&self) -> Option<UserId> {
        self.approver_id
    }

    pub fn approver_name(&self) -> Option<&str> {
        self.approver_name.as_deref()
    }

    pub fn action_at(&self) -> Option<DateTime<Utc>> {
        self.action_at
    }

    pub fn approver_notes(&self) -> Option<&str> {
        self.approver_notes.as_deref()
    }
}

/// Command: SubmitRequest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub request_id: RequestId,
    pub requester_id: UserId,
    pub requester_name: String,
    pub department_category: String,
    pub items: Vec<RequestedItem>,
    pub reason: String,
    pub needed_by: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DecideRequest (approve or reject, manager side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideRequest {
    pub request_id: RequestId,
    pub approver_id: UserId,
    pub approver_name: String,
    pub decision: Decision,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CancelRequest (requester side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub request_id: RequestId,
    pub requester_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: EditRequest (requester side, only while pending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub request_id: RequestId,
    pub requester_id: UserId,
    pub items: Vec<RequestedItem>,
    pub reason: String,
    pub needed_by: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CompleteRequest (fulfillment side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteRequest {
    pub request_id: RequestId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestCommand {
    SubmitRequest(SubmitRequest),
    DecideRequest(DecideRequest),
    CancelRequest(CancelRequest),
    EditRequest(EditRequest),
    CompleteRequest(CompleteRequest),
}

/// Event: RequestSubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSubmitted {
    pub request_id: RequestId,
    pub requester_id: UserId,
    pub requester_name: String,
    pub department_category: String,
    pub items: Vec<RequestedItem>,
    pub reason: String,
    pub needed_by: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RequestDecided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDecided {
    pub request_id: RequestId,
    pub approver_id: UserId,
    pub approver_name: String,
    pub decision: Decision,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RequestCancelled.
///
/// Carries no approver attribution: a cancellation is requester-initiated and
/// must stay distinguishable from a manager rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCancelled {
    pub request_id: RequestId,
    pub requester_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RequestEdited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEdited {
    pub request_id: RequestId,
    pub items: Vec<RequestedItem>,
    pub reason: String,
    pub needed_by: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RequestCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCompleted {
    pub request_id: RequestId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestEvent {
    RequestSubmitted(RequestSubmitted),
    RequestDecided(RequestDecided),
    RequestCancelled(RequestCancelled),
    RequestEdited(RequestEdited),
    RequestCompleted(RequestCompleted),
}

impl DomainEvent for RequestEvent {
    fn kind(&self) -> &'static str {
        match self {
            RequestEvent::RequestSubmitted(_) => "requests.request.submitted",
            RequestEvent::RequestDecided(_) => "requests.request.decided",
            RequestEvent::RequestCancelled(_) => "requests.request.cancelled",
            RequestEvent::RequestEdited(_) => "requests.request.edited",
            RequestEvent::RequestCompleted(_) => "requests.request.completed",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            RequestEvent::RequestSubmitted(e) => e.occurred_at,
            RequestEvent::RequestDecided(e) => e.occurred_at,
            RequestEvent::RequestCancelled(e) => e.occurred_at,
            RequestEvent::RequestEdited(e) => e.occurred_at,
            RequestEvent::RequestCompleted(e) => e.occurred_at,
        }
    }
}

impl AggregateRoot for MaterialRequest {
    type Id = RequestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for MaterialRequest {
    type Command = RequestCommand;
    type Event = RequestEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            RequestEvent::RequestSubmitted(e) => {
                self.id = e.request_id;
                self.requester_id = e.requester_id;
                self.requester_name = e.requester_name.clone();
                self.department_category = e.department_category.clone();
                self.items = e.items.clone();
                self.reason = e.reason.clone();
                self.needed_by = e.needed_by;
                self.submitted_at = e.occurred_at;
                self.status = RequestStatus::Pending;
                self.approver_id = None;
                self.approver_name = None;
                self.action_at = None;
                self.approver_notes = None;
                self.created = true;
            }
            RequestEvent::RequestDecided(e) => {
                self.status = e.decision.status();
                self.approver_id = Some(e.approver_id);
                self.approver_name = Some(e.approver_name.clone());
                self.action_at = Some(e.occurred_at);
                self.approver_notes = e.notes.clone();
            }
            RequestEvent::RequestCancelled(e) => {
                self.status = RequestStatus::Cancelled;
                self.action_at = Some(e.occurred_at);
            }
            RequestEvent::RequestEdited(e) => {
                self.items = e.items.clone();
                self.reason = e.reason.clone();
                self.needed_by = e.needed_by;
            }
            RequestEvent::RequestCompleted(e) => {
                self.status = RequestStatus::Completed;
                self.action_at = Some(e.occurred_at);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            RequestCommand::SubmitRequest(cmd) => self.handle_submit(cmd),
            RequestCommand::DecideRequest(cmd) => self.handle_decide(cmd),
            RequestCommand::CancelRequest(cmd) => self.handle_cancel(cmd),
            RequestCommand::EditRequest(cmd) => self.handle_edit(cmd),
            RequestCommand::CompleteRequest(cmd) => self.handle_complete(cmd),
        }
    }
}

/// Submit/edit share these rules: at least one item, every quantity >= 1,
/// a non-empty reason.
pub(crate) fn validate_draft(items: &[RequestedItem], reason: &str) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::validation(
            "request must contain at least one item",
        ));
    }
    for (idx, item) in items.iter().enumerate() {
        if item.quantity < 1 {
            return Err(DomainError::validation(format!(
                "item {idx} quantity must be at least 1"
            )));
        }
    }
    if reason.trim().is_empty() {
        return Err(DomainError::validation("reason cannot be empty"));
    }
    Ok(())
}

impl MaterialRequest {
    fn ensure_request_id(&self, request_id: RequestId) -> Result<(), DomainError> {
        if self.id != request_id {
            return Err(DomainError::invalid_transition("request_id mismatch"));
        }
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), DomainError> {
        if self.status != RequestStatus::Pending {
            return Err(DomainError::invalid_transition(format!(
                "request is {}, not pending",
                self.status
            )));
        }
        Ok(())
    }

    fn handle_submit(&self, cmd: &SubmitRequest) -> Result<Vec<RequestEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("request already exists"));
        }
        validate_draft(&cmd.items, &cmd.reason)?;
        if cmd.department_category.trim().is_empty() {
            return Err(DomainError::validation(
                "department category cannot be empty",
            ));
        }

        Ok(vec![RequestEvent::RequestSubmitted(RequestSubmitted {
            request_id: cmd.request_id,
            requester_id: cmd.requester_id,
            requester_name: cmd.requester_name.clone(),
            department_category: cmd.department_category.clone(),
            items: cmd.items.clone(),
            reason: cmd.reason.clone(),
            needed_by: cmd.needed_by,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_decide(&self, cmd: &DecideRequest) -> Result<Vec<RequestEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_request_id(cmd.request_id)?;
        self.ensure_pending()?;

        Ok(vec![RequestEvent::RequestDecided(RequestDecided {
            request_id: cmd.request_id,
            approver_id: cmd.approver_id,
            approver_name: cmd.approver_name.clone(),
            decision: cmd.decision,
            notes: cmd.notes.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_cancel(&self, cmd: &CancelRequest) -> Result<Vec<RequestEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_request_id(cmd.request_id)?;

        // Identity before state: a stranger gets permission denied even on a
        // request that is no longer pending.
        if cmd.requester_id != self.requester_id {
            return Err(DomainError::permission_denied(
                "only the requester may cancel a request",
            ));
        }
        self.ensure_pending()?;

        Ok(vec![RequestEvent::RequestCancelled(RequestCancelled {
            request_id: cmd.request_id,
            requester_id: cmd.requester_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_edit(&self, cmd: &EditRequest) -> Result<Vec<RequestEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_request_id(cmd.request_id)?;

        if cmd.requester_id != self.requester_id {
            return Err(DomainError::permission_denied(
                "only the requester may edit a request",
            ));
        }
        self.ensure_pending()?;
        validate_draft(&cmd.items, &cmd.reason)?;

        Ok(vec![RequestEvent::RequestEdited(RequestEdited {
            request_id: cmd.request_id,
            items: cmd.items.clone(),
            reason: cmd.reason.clone(),
            needed_by: cmd.needed_by,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_complete(&self, cmd: &CompleteRequest) -> Result<Vec<RequestEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_request_id(cmd.request_id)?;

        if self.status != RequestStatus::Approved {
            return Err(DomainError::invalid_transition(format!(
                "only approved requests can be completed, request is {}",
                self.status
            )));
        }

        Ok(vec![RequestEvent::RequestCompleted(RequestCompleted {
            request_id: cmd.request_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
