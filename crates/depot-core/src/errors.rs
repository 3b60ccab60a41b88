//! Error hierarchy for the Depot catalog.
//!
//! All domain failures are local and non-fatal: not-found and validation
//! errors surface to the caller, transport failures are isolated per
//! connection by the server crate.

use thiserror::Error;

/// Top-level error type for catalog operations.
#[derive(Debug, Error)]
pub enum DepotError {
    /// Referenced an unknown asset id.
    #[error("asset '{id}' not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// Attempted to create an asset with an id that already exists.
    #[error("asset '{id}' already exists")]
    Duplicate {
        /// The conflicting id.
        id: String,
    },

    /// A field was rejected before mutation.
    #[error("validation failed: {message}")]
    Validation {
        /// What was wrong.
        message: String,
    },
}

impl DepotError {
    /// Not-found error for the given id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Duplicate-id error for the given id.
    #[must_use]
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::Duplicate { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_id() {
        let err = DepotError::not_found("a1");
        assert_eq!(err.to_string(), "asset 'a1' not found");
    }

    #[test]
    fn duplicate_message_names_id() {
        let err = DepotError::duplicate("a1");
        assert_eq!(err.to_string(), "asset 'a1' already exists");
    }

    #[test]
    fn validation_message_included() {
        let err = DepotError::Validation {
            message: "name too short".into(),
        };
        assert!(err.to_string().contains("name too short"));
    }
}
