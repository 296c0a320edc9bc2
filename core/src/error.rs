//! Error types for catalog operations.
//!
//! Read paths never fail with "not found"; they return `None` or an empty
//! list. [`CatalogError::NotFound`] only comes out of writes that need their
//! target to exist (register, cancel, update, delete).

use std::fmt;
use thiserror::Error;

/// Kind of entity an operation failed to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A user account
    User,
    /// A catalog event
    Event,
    /// A `(user, event)` registration
    Registration,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("User"),
            Self::Event => f.write_str("Event"),
            Self::Registration => f.write_str("Registration"),
        }
    }
}

/// Errors reported by a [`Storage`](crate::storage::Storage) backend.
///
/// The in-memory store never produces these; they exist so a persistent
/// backend can satisfy the same contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The backend returned data that could not be decoded.
    #[error("Corrupted record: {0}")]
    Corrupted(String),
}

/// Errors returned by catalog, registration and account operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The target of a write does not exist.
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// The user already holds a registration for the event.
    #[error("User already registered for this event")]
    DuplicateRegistration,

    /// The event has no seats left.
    #[error("Event is at full capacity")]
    CapacityExceeded,

    /// Another account already uses the username.
    #[error("Username already taken")]
    DuplicateUsername,

    /// A field failed validation.
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Wire name of the offending field
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// Login with an unknown username or wrong password.
    #[error("Invalid username or password")]
    Unauthorized,

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CatalogError {
    /// Build a validation error.
    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(
            CatalogError::NotFound(EntityKind::Event).to_string(),
            "Event not found"
        );
    }

    #[test]
    fn validation_error_display() {
        let error = CatalogError::validation("capacity", "Capacity must be a positive number");
        assert_eq!(
            error.to_string(),
            "Invalid capacity: Capacity must be a positive number"
        );
    }

    #[test]
    fn storage_error_is_transparent() {
        let error = CatalogError::from(StorageError::Unavailable("disk gone".to_string()));
        assert_eq!(error.to_string(), "Storage unavailable: disk gone");
    }
}
