//! Error types for the AnDson store.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::entity::{EntityLevel, NameScope};

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for AnDson operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an error for a value of the wrong type.
    #[must_use]
    pub fn invalid_argument_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidArgumentType {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a malformed month/date string error.
    #[must_use]
    pub fn invalid_format(field: &'static str, value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat {
            field,
            value: value.into(),
        })
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(field: &'static str, value: i64) -> Self {
        Self::new(ErrorKind::OutOfRange { field, value })
    }

    /// Creates a name collision error.
    #[must_use]
    pub fn duplicate_name(scope: NameScope, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName {
            scope,
            name: name.into(),
        })
    }

    /// Creates a missing catalog entry error.
    #[must_use]
    pub fn name_not_found(scope: NameScope, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameNotFound {
            scope,
            name: name.into(),
        })
    }

    /// Creates a removed entity error for the first unreachable level.
    #[must_use]
    pub fn entity_removed(level: EntityLevel, id: u64) -> Self {
        Self::new(ErrorKind::EntityRemoved { level, id })
    }

    /// Creates an unsupported document edition/version error.
    #[must_use]
    pub fn incompatible_version(edition: impl Into<String>, version: [u32; 3]) -> Self {
        Self::new(ErrorKind::IncompatibleVersion {
            edition: edition.into(),
            version,
        })
    }

    /// Creates a malformed document error.
    #[must_use]
    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDocument(message.into()))
    }

    /// Creates an error for a scope whose id counter cannot advance.
    #[must_use]
    pub fn ids_exhausted(level: EntityLevel) -> Self {
        Self::new(ErrorKind::IdsExhausted { level })
    }

    /// Returns true if this error reports a stale handle.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self.kind, ErrorKind::EntityRemoved { .. })
    }

    /// Returns the level reported by a stale handle error.
    #[must_use]
    pub fn removed_level(&self) -> Option<EntityLevel> {
        match self.kind {
            ErrorKind::EntityRemoved { level, .. } => Some(level),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value had the wrong type, e.g. a `_class` tag naming another entity.
    #[error("invalid type for {field}: expected {expected}, got {actual}")]
    InvalidArgumentType {
        /// Where the value was found.
        field: String,
        /// The expected type.
        expected: String,
        /// The actual type encountered.
        actual: String,
    },

    /// Month or date string does not have the required shape.
    #[error("invalid format for {field}: {value:?}")]
    InvalidFormat {
        /// The field being set.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Numeric value outside its allowed range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// The field being set.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// Title or alias already taken in its scope.
    #[error("duplicate name {name:?} in {scope}")]
    DuplicateName {
        /// The catalog scope where the collision happened.
        scope: NameScope,
        /// The colliding name.
        name: String,
    },

    /// Catalog entry expected but absent.
    #[error("name {name:?} not found in {scope}")]
    NameNotFound {
        /// The catalog scope that was searched.
        scope: NameScope,
        /// The missing name.
        name: String,
    },

    /// The entity, or one of its ancestors, has been removed.
    #[error("{level} {id} has been removed")]
    EntityRemoved {
        /// The first level of the id chain that failed to resolve.
        level: EntityLevel,
        /// The id at that level.
        id: u64,
    },

    /// The id counter of a scope is at its maximum.
    #[error("no {level} ids left to assign")]
    IdsExhausted {
        /// The level whose counter is exhausted.
        level: EntityLevel,
    },

    /// Document edition or version is not supported.
    #[error("incompatible document: edition {edition:?}, version {}", dotted(.version))]
    IncompatibleVersion {
        /// Edition tag found in the document.
        edition: String,
        /// Version found in the document.
        version: [u32; 3],
    },

    /// Document contents are structurally inconsistent.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    IoError(String),

    /// Logger setup failed or conflicts with the active configuration.
    #[error("logging error: {0}")]
    LoggingError(String),
}

fn dotted(version: &[u32; 3]) -> String {
    format!("{}.{}.{}", version[0], version[1], version[2])
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File or document the error relates to.
    pub source: Option<String>,
    /// Operations that were in progress, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
