//! Error types for gitcfg
//!
//! Provides a unified error type for all operations.
//!
//! Not-found is deliberately absent: lookups of missing sections or keys
//! yield an empty string, and removals/renames of missing sections no-op.

use thiserror::Error;

/// Result type alias using ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Unified error type for gitcfg operations
#[derive(Debug, Error)]
pub enum ConfigError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Addressing Errors
    // -------------------------------------------------------------------------
    #[error("Invalid variable key: {0:?}")]
    InvalidKey(String),

    #[error("Null values are not allowed (key {0:?})")]
    NullValue(String),

    #[error("Value for {0:?} has a line break or surrounding whitespace")]
    InvalidValue(String),

    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    #[error("Unreadable section declaration at line {line}: {content:?}")]
    UnreadableSection { line: usize, content: String },

    #[error("Unreadable variable at line {line}: {content:?}")]
    UnreadableVariable { line: usize, content: String },

    // -------------------------------------------------------------------------
    // Structural Errors
    // -------------------------------------------------------------------------
    #[error("Section {section:?} has sub-sections and cannot be moved under {target:?}")]
    NestedSubsection { section: String, target: String },

    #[error("Cursor has no current entry")]
    NoCurrentEntry,
}

impl ConfigError {
    /// True when this is an I/O error caused by a missing file.
    ///
    /// Callers loading a config on first run usually ignore this case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
