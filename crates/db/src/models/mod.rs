//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts (references already resolved to ids)
//! - An update DTO (all `Option` fields) for partial updates, where the
//!   entity supports updates

pub mod category;
pub mod council;
pub mod federal_state;
pub mod problem;
pub mod project;
pub mod proposal;
pub mod used_problem;
pub mod user;
