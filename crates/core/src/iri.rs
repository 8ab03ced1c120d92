//! IRI construction and parsing for resource references.
//!
//! Clients reference related entities by IRI (`"project": "/projects/3"`).

use crate::error::CoreError;
use crate::policy::ResourceKind;
use crate::types::DbId;

/// Build the item IRI of `kind` with the given id.
pub fn item_iri(kind: ResourceKind, id: DbId) -> String {
    format!("{}/{id}", kind.collection_path())
}

/// Parse an item IRI of `kind` back into its id.
///
/// A bare numeric id is accepted as well. Anything else, including IRIs of
/// another resource type, is [`CoreError::InvalidIri`].
pub fn parse_iri(kind: ResourceKind, iri: &str) -> Result<DbId, CoreError> {
    let trimmed = iri.trim();
    let raw_id = match trimmed.strip_prefix(kind.collection_path()) {
        Some(rest) => rest
            .strip_prefix('/')
            .ok_or_else(|| CoreError::InvalidIri(iri.to_string()))?,
        None => trimmed,
    };

    raw_id
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::InvalidIri(iri.to_string()))
}
