//! Domain building blocks shared by the repository and HTTP layers.
//!
//! Nothing in this crate touches the database or the network.

pub mod error;
pub mod iri;
pub mod pagination;
pub mod policy;
pub mod roles;
pub mod slug;
pub mod types;
pub mod validation;
