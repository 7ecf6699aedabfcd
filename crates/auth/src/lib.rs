//! `stockroom-auth` — actors, roles, and the pure authorization boundary.
//!
//! Authentication is out of scope: callers hand in an already-resolved
//! [`User`]. This crate only answers "may this actor do that".

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod user;

pub use authorize::{authorize, permissions_for};
pub use permissions::Permission;
pub use roles::Role;
pub use user::User;
