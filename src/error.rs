//! Error type shared by the content factory, catalog and chat modules
//!
//! Most variants come from user input and can be fixed by retrying with
//! different input. `Database` and `Serialization` are storage failures; see
//! [`Error::is_user_error`]. The TUI shows either kind in the status bar and
//! logs storage failures. The CLI prints the message and exits non-zero.

use thiserror::Error;

use crate::pipeline::Action;

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by Astra operations
#[derive(Debug, Error)]
pub enum Error {
    /// The requested action is not listed for the record's current status
    #[error("cannot {action} a {entity} that is {from}")]
    InvalidTransition {
        /// Entity name (e.g. "publication")
        entity: &'static str,
        /// Current status
        from: &'static str,
        /// Rejected action
        action: Action,
    },

    /// Input failed validation (empty name, missing ticket fields, ...)
    #[error("{0}")]
    Validation(String),

    /// No record with the given id
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Requested id
        id: String,
    },

    /// The readiness checklist still has unchecked items
    #[error("not ready to publish: {}", blocking.join(", "))]
    NotReady {
        /// Unticked "network flag" items and over-limit "network length" texts
        blocking: Vec<String>,
    },

    /// A chat reply is still outstanding and the session rejects overlaps
    #[error("wait for the current reply before sending another message")]
    ReplyPending,

    /// Unknown status, network, model or stage name
    #[error("{0}")]
    Parse(String),

    /// `SQLite` failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON (de)serialization failure for stored list columns
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a missing record
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Whether the user can fix this by changing their input
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Serialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = Error::InvalidTransition {
            entity: "publication",
            from: "published",
            action: Action::Cancel,
        };
        assert_eq!(err.to_string(), "cannot cancel a publication that is published");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_not_ready_lists_blockers() {
        let err = Error::NotReady {
            blocking: vec!["Telegram: image".to_string(), "VK: verified".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "not ready to publish: Telegram: image, VK: verified"
        );
    }

    #[test]
    fn test_storage_failures_are_not_user_errors() {
        assert!(!Error::Database(rusqlite::Error::QueryReturnedNoRows).is_user_error());
        let json = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        assert!(!Error::Serialization(json).is_user_error());
        assert!(Error::validation("empty name").is_user_error());
        assert!(Error::ReplyPending.is_user_error());
    }
}
