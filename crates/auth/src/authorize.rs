use stockroom_core::{DomainError, DomainResult};

use crate::permissions::{
    self, COMPLETE_REQUESTS, DECIDE_REQUESTS, IMPORT_CATALOG, IMPORT_LEDGER, Permission,
    SUBMIT_REQUESTS,
};
use crate::roles::Role;
use crate::user::User;

/// Static role → permission policy.
///
/// Admin holds the wildcard; managers run the approval and import side;
/// department employees may only submit.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &[permissions::WILDCARD],
        Role::WarehouseManager => &[
            DECIDE_REQUESTS,
            COMPLETE_REQUESTS,
            IMPORT_CATALOG,
            IMPORT_LEDGER,
        ],
        Role::DepartmentEmployee => &[SUBMIT_REQUESTS],
    }
}

/// Authorize an actor for one permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(actor: &User, required: &Permission) -> DomainResult<()> {
    let granted = permissions_for(actor.role);
    if granted.iter().any(|p| p.is_wildcard() || p == required) {
        Ok(())
    } else {
        Err(DomainError::permission_denied(format!(
            "role '{}' lacks permission '{}'",
            actor.role, required
        )))
    }
}
