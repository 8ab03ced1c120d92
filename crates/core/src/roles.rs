//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PROCESS_MANAGER: &str = "process_manager";
pub const ROLE_USER: &str = "user";

/// Every role a principal can hold.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_PROCESS_MANAGER, ROLE_USER];

/// Roles allowed to curate shared data (categories, states, councils) and
/// to moderate project content.
pub const MANAGER_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_PROCESS_MANAGER];
