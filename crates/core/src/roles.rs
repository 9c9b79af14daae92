//! Well-known account role names.
//!
//! These must match the CHECK constraint on `users.role` in the initial
//! migration. Per-post collaboration roles are a separate concept, see
//! [`crate::collaboration`].

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_READER: &str = "reader";

/// The set of all valid account roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_AUTHOR, ROLE_READER];

/// Returns `true` if the given account role is known.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
