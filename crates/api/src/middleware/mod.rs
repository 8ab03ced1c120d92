//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::Authorized`] -- Requires the user's role to pass the access gate
//!   for one `(resource, operation)` pair.

pub mod auth;
pub mod rbac;
