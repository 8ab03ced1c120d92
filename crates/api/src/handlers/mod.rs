//! HTTP handlers, one module per resource.
//!
//! Mutating handlers share one flow: field-level validation, IRI
//! resolution, then database checks inside the request transaction, with
//! all violations reported together before anything is written.

pub mod categories;
pub mod councils;
pub mod federal_states;
pub mod problems;
pub mod projects;
pub mod proposals;
pub mod used_problems;
pub mod users;

use agora_core::error::CoreError;
use agora_core::iri::{item_iri, parse_iri};
use agora_core::policy::ResourceKind;
use agora_core::types::DbId;
use agora_core::validation::{ViolationList, NOT_BLANK};

use crate::error::AppResult;

/// Unwrap a required field after validation has run.
///
/// Validation already rejects missing values; this reports the same
/// violation instead of panicking should a caller skip it.
pub(crate) fn required<T>(value: Option<T>, property_path: &str) -> AppResult<T> {
    value.ok_or_else(|| CoreError::Validation(ViolationList::single(property_path, NOT_BLANK)).into())
}

/// Parse an optional IRI field unless it already carries a violation.
///
/// Malformed IRIs are a 400, not a violation.
pub(crate) fn resolve_iri(
    violations: &ViolationList,
    kind: ResourceKind,
    property_path: &str,
    iri: Option<&str>,
) -> AppResult<Option<DbId>> {
    if violations.has(property_path) {
        return Ok(None);
    }
    match iri {
        Some(iri) => Ok(Some(parse_iri(kind, iri)?)),
        None => Ok(None),
    }
}

/// IRI of the acting user recorded on a row, if still present.
pub(crate) fn user_iri(user_id: Option<DbId>) -> Option<String> {
    user_id.map(|id| item_iri(ResourceKind::User, id))
}

/// Build the 404 error for a missing entity.
pub(crate) fn not_found(kind: ResourceKind, id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: kind.short_name(),
        id,
    }
}
