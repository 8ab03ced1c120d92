//! Constraint violations and the symbolic rule ids reported to clients.
//!
//! Field-level checks run through `validator` derives on request bodies;
//! checks that need the database (duplicates, dangling references) push
//! onto the same [`ViolationList`] so a client sees every problem at once.

use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

pub const NOT_BLANK: &str = "validate.general.notBlank";
pub const NOT_FOUND: &str = "validate.general.notFound";
pub const CATEGORY_DUPLICATE_NAME: &str = "validate.category.duplicateName";
pub const FEDERAL_STATE_DUPLICATE_NAME: &str = "validate.federalState.duplicateName";
pub const PROPOSAL_DUPLICATE_PROBLEM: &str = "validate.proposal.duplicateProblem";

/// A single property-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Client-facing (camelCase) property name.
    pub property_path: String,
    /// Symbolic rule id, e.g. [`NOT_BLANK`].
    pub message: String,
}

/// Ordered list of violations for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(property_path: &str, rule: &str) -> Self {
        let mut list = Self::new();
        list.push(property_path, rule);
        list
    }

    pub fn push(&mut self, property_path: &str, rule: &str) {
        let violation = Violation {
            property_path: property_path.to_string(),
            message: rule.to_string(),
        };
        if !self.0.contains(&violation) {
            self.0.push(violation);
        }
    }

    /// Whether `property_path` already carries a violation.
    ///
    /// Database-backed checks skip fields that failed field-level checks.
    pub fn has(&self, property_path: &str) -> bool {
        self.0.iter().any(|v| v.property_path == property_path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// `path: rule` lines joined by newlines.
    pub fn description(&self) -> String {
        self.0
            .iter()
            .map(|v| format!("{}: {}", v.property_path, v.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `Ok(())` when empty, otherwise [`CoreError::Validation`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl From<ValidationErrors> for ViolationList {
    /// Flatten `validator` errors, sorted by property so output is stable.
    fn from(errors: ValidationErrors) -> Self {
        let mut pairs: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let path = to_camel_case(&field.to_string());
                errs.iter()
                    .map(move |e| (path.clone(), e.code.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();
        pairs.sort();

        let mut list = Self::new();
        for (path, rule) in pairs {
            list.push(&path, &rule);
        }
        list
    }
}

/// Start a violation list from a `validator` result.
pub fn collect(result: Result<(), ValidationErrors>) -> ViolationList {
    match result {
        Ok(()) => ViolationList::new(),
        Err(errors) => errors.into(),
    }
}

/// Custom `validator` check: the string must contain a non-whitespace char.
///
/// Pair with `required(code = "validate.general.notBlank")` on `Option`
/// fields so that missing, `null`, and blank values all report [`NOT_BLANK`].
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(NOT_BLANK));
    }
    Ok(())
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn description_joins_all_violations() {
        let mut list = ViolationList::new();
        list.push("name", NOT_BLANK);
        list.push("project", NOT_FOUND);
        assert_eq!(
            list.description(),
            "name: validate.general.notBlank\nproject: validate.general.notFound"
        );
    }

    #[test]
    fn duplicates_are_collapsed() {
        let mut list = ViolationList::new();
        list.push("name", NOT_BLANK);
        list.push("name", NOT_BLANK);
        assert_eq!(list.len(), 1);
        assert!(list.has("name"));
        assert!(!list.has("slug"));
    }

    #[test]
    fn empty_list_is_ok() {
        assert!(ViolationList::new().into_result().is_ok());
        assert_matches!(
            ViolationList::single("name", CATEGORY_DUPLICATE_NAME).into_result(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("Musterland").is_ok());
        let err = not_blank("  \t").unwrap_err();
        assert_eq!(err.code, NOT_BLANK);
    }

    #[test]
    fn validator_errors_are_sorted_and_camel_cased() {
        let mut errors = ValidationErrors::new();
        errors.add("title", ValidationError::new(NOT_BLANK));
        errors.add("federal_state", ValidationError::new(NOT_FOUND));

        let list = ViolationList::from(errors);
        let paths: Vec<_> = list.iter().map(|v| v.property_path.as_str()).collect();
        assert_eq!(paths, vec!["federalState", "title"]);
    }
}
