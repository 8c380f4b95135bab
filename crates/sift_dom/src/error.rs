//! Element tree error types

use thiserror::Error;

/// Errors raised by document lookups and mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// No element carries the requested id
    #[error("No element with id '{0}'")]
    UnknownElement(String),

    /// A node handle that does not belong to this document
    #[error("Node handle does not refer to a live element")]
    StaleNode,
}

/// Result type for element tree operations
pub type Result<T> = std::result::Result<T, DomError>;
