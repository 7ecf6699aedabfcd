use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, UserId};

use crate::roles::Role;

/// A resolved actor identity.
///
/// `category_access` restricts a department employee's visibility and
/// requesting to a single product category; it is required for that role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub category_access: Option<String>,
}

impl User {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("user name cannot be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::validation("user email cannot be empty"));
        }
        if self.role == Role::DepartmentEmployee
            && self.category_access.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            return Err(DomainError::validation(
                "department employees must have a category access",
            ));
        }
        Ok(())
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
