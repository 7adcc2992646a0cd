use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),
    #[error("duplicate key: a company with isin {0} already exists")]
    DuplicateKey(String),
    #[error("identity mismatch: path id {path_id} does not match body id {body_id}")]
    IdentityMismatch { path_id: i32, body_id: i32 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, key: impl fmt::Display) -> Self {
        Self::NotFound(format!("{} {} not found", entity, key))
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::DuplicateKey(_) => "duplicate_key",
            ServiceError::IdentityMismatch { .. } => "identity_mismatch",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Db(_) => "db",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = ServiceError::Validation(vec![
            FieldViolation::new("name", "must not be empty"),
            FieldViolation::new("isin", "must be exactly 12 characters"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation error: name: must not be empty; isin: must be exactly 12 characters"
        );
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn not_found_names_entity_and_key() {
        let err = ServiceError::not_found("company", 999);
        assert_eq!(err.to_string(), "not found: company 999 not found");
    }
}
