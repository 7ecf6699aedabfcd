//! Request store port + in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use stockroom_core::{Aggregate, DomainError, DomainResult};

use crate::request::{MaterialRequest, RequestEvent, RequestId};

/// Repository port for material requests.
///
/// `transition` is the heart of the contract: the decision closure runs inside
/// one exclusive scope over the latest stored state, so at most one transition
/// per request can succeed at each decision point. A concurrent loser re-reads
/// the already-moved status and fails its own validation.
pub trait RequestStore: Send + Sync {
    fn get(&self, id: RequestId) -> Option<MaterialRequest>;

    /// Store a newly submitted request. A duplicate id is a conflict.
    fn insert(&self, request: MaterialRequest) -> DomainResult<()>;

    /// Read latest state, let `decide` validate and emit events, apply them,
    /// and write the result back, all in one exclusive scope. Nothing is
    /// written when `decide` fails.
    fn transition(
        &self,
        id: RequestId,
        decide: &mut dyn FnMut(&MaterialRequest) -> DomainResult<Vec<RequestEvent>>,
    ) -> DomainResult<MaterialRequest>;

    /// Read-only snapshot of all requests.
    fn snapshot(&self) -> Vec<MaterialRequest>;
}

/// In-memory request store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: RwLock<HashMap<RequestId, MaterialRequest>>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestStore for InMemoryRequestStore {
    fn get(&self, id: RequestId) -> Option<MaterialRequest> {
        self.requests.read().ok()?.get(&id).cloned()
    }

    fn insert(&self, request: MaterialRequest) -> DomainResult<()> {
        let mut requests = self
            .requests
            .write()
            .map_err(|_| DomainError::conflict("request store lock poisoned"))?;
        let id = request.id_typed();
        if requests.contains_key(&id) {
            return Err(DomainError::conflict(format!("request {id} already exists")));
        }
        requests.insert(id, request);
        Ok(())
    }

    fn transition(
        &self,
        id: RequestId,
        decide: &mut dyn FnMut(&MaterialRequest) -> DomainResult<Vec<RequestEvent>>,
    ) -> DomainResult<MaterialRequest> {
        let mut requests = self
            .requests
            .write()
            .map_err(|_| DomainError::conflict("request store lock poisoned"))?;
        let current = requests.get(&id).ok_or(DomainError::NotFound)?;

        let events = decide(current)?;
        let mut updated = current.clone();
        for event in &events {
            updated.apply(event);
        }
        requests.insert(id, updated.clone());
        Ok(updated)
    }

    fn snapshot(&self) -> Vec<MaterialRequest> {
        self.requests
            .read()
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default()
    }
}
