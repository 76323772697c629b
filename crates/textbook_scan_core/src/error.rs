//! crates/textbook_scan_core/src/error.rs
//!
//! The classified failures an action can end in.

use crate::ports::PortError;
use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Malformed or missing required input.
    #[error("{0}")]
    Validation(String),

    /// No acting user could be resolved from the session.
    #[error("{0}")]
    Unauthorized(String),

    /// The referenced row is absent, not owned by the caller, or linked to a
    /// different document. These cases are deliberately indistinguishable.
    #[error("{0}")]
    NotFound(String),

    /// The persistence gateway itself failed.
    #[error("Persistence failure: {0}")]
    Port(#[from] PortError),
}

impl ActionError {
    /// The stable error code reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Port(_) => "INTERNAL",
        }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }
}

impl From<ValidationErrors> for ActionError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {reason}")
            })
            .collect();
        fields.sort();
        Self::Validation(fields.join("; "))
    }
}

/// A convenience type alias for `Result<T, ActionError>`.
pub type ActionResult<T> = Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_are_internal() {
        let err: ActionError = PortError::Unexpected("connection reset".to_string()).into();
        assert_eq!(err.code(), "INTERNAL");
        assert_eq!(err.to_string(), "Persistence failure: An unexpected error occurred: connection reset");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = ActionError::not_found("Highlight");
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Highlight not found");
    }
}
