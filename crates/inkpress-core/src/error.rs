//! Unified application error types for Inkpress.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The addressing engine's own taxonomy
//! (invalid names, unresolvable paths, name conflicts, cycles, dangling
//! references) sits next to the plumbing kinds so that the HTTP layer can
//! map every failure with a single `match`.

use std::fmt;
use thiserror::Error;

use crate::types::EntityKind;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A directory name or filename token is malformed.
    InvalidName,
    /// A path string is malformed, or its category prefix does not resolve.
    InvalidPath,
    /// The terminal category or article of a path does not exist.
    PathNotFound,
    /// The namespace slot is already occupied by another entity.
    NameConflict {
        /// The kind of entity occupying the slot.
        occupant: EntityKind,
    },
    /// A reparent would make a category its own ancestor.
    Cycle,
    /// A reference to an external collaborator (e.g. a featured image) does not resolve.
    InvalidReference,
    /// Input validation failed.
    Validation,
    /// A resource looked up by identity was not found.
    NotFound,
    /// The caller could not be authenticated.
    Authentication,
    /// The caller's role does not allow the action.
    Authorization,
    /// The store aborted the transaction because of a concurrent write.
    WriteConflict,
    /// A conflict that is not a namespace collision (e.g. deleting a non-empty category).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An external service error occurred.
    ExternalService,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "INVALID_NAME"),
            Self::InvalidPath => write!(f, "INVALID_PATH"),
            Self::PathNotFound => write!(f, "PATH_NOT_FOUND"),
            Self::NameConflict { .. } => write!(f, "NAME_CONFLICT"),
            Self::Cycle => write!(f, "CYCLE"),
            Self::InvalidReference => write!(f, "INVALID_REFERENCE"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::WriteConflict => write!(f, "WRITE_CONFLICT"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Inkpress.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-name error.
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidName, message)
    }

    /// Create an invalid-path error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, message)
    }

    /// Create a path-not-found error.
    pub fn path_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PathNotFound, message)
    }

    /// Create a name-conflict error naming the entity that occupies the slot.
    ///
    /// The message says which kind of entity is in the way so that clients
    /// can tell "category already exists" from "article already exists".
    pub fn name_conflict(occupant: EntityKind, path: &str) -> Self {
        let article = match occupant {
            EntityKind::Category => "A",
            EntityKind::Article => "An",
        };
        Self::new(
            ErrorKind::NameConflict { occupant },
            format!("{article} {occupant} already exists at '{path}'"),
        )
    }

    /// Create a cycle error.
    pub fn cycle(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cycle, message)
    }

    /// Create an invalid-reference error.
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidReference, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a write-conflict error.
    pub fn write_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WriteConflict, message)
    }

    /// Create a generic conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether retrying the whole unit of work may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ErrorKind::WriteConflict)
    }

    /// Returns the occupying entity kind for name conflicts.
    pub fn conflict_occupant(&self) -> Option<EntityKind> {
        match self.kind {
            ErrorKind::NameConflict { occupant } => Some(occupant),
            _ => None,
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
