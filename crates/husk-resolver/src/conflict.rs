//! Conflicts between constraints on the same import path.

use husk_util::errors::HuskError;
use miette::Diagnostic;
use thiserror::Error;

use crate::dependency::Constraint;

/// Raised when a constraint cannot be merged into a store because it has
/// no version in common with the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("Can't add {import_path} ({incoming}) to existing dependency {import_path} ({existing})")]
#[diagnostic(
    code(husk::conflict),
    help("Relax one of the requirements or pin both to the same revision")
)]
pub struct ConflictError {
    pub import_path: String,
    /// What the store held before, and still holds.
    pub existing: Constraint,
    pub incoming: Constraint,
}

impl From<ConflictError> for HuskError {
    fn from(err: ConflictError) -> Self {
        HuskError::Conflict {
            message: err.to_string(),
        }
    }
}
