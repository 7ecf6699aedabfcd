use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "requests.decide").
/// The wildcard permission `"*"` means "allow all" so the admin role does not
/// have to enumerate every domain permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

/// Submit a material request.
pub const SUBMIT_REQUESTS: Permission = Permission::from_static("requests.submit");
/// Approve or reject a pending material request.
pub const DECIDE_REQUESTS: Permission = Permission::from_static("requests.decide");
/// Mark an approved material request as fulfilled.
pub const COMPLETE_REQUESTS: Permission = Permission::from_static("requests.complete");
/// Apply bulk product upserts to the catalog.
pub const IMPORT_CATALOG: Permission = Permission::from_static("catalog.import");
/// Append bulk transactions to the ledger.
pub const IMPORT_LEDGER: Permission = Permission::from_static("ledger.import");

pub(crate) const WILDCARD: Permission = Permission::from_static("*");

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
