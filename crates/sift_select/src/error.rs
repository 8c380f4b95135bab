//! Error types for sift_select

use std::fmt;

use sift_dom::DomError;
use thiserror::Error;

/// Which of the three bound elements an error refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// The visible text input
    Input,
    /// The option list container
    Options,
    /// The hidden form field receiving the committed value
    Hidden,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementRole::Input => "text input",
            ElementRole::Options => "options container",
            ElementRole::Hidden => "hidden field",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while binding or driving searchable selects
#[derive(Error, Debug)]
pub enum SelectError {
    /// A required element id did not resolve during manual construction
    #[error("Missing {role}: no element with id '{id}'")]
    MissingElement { role: ElementRole, id: String },

    /// Element tree lookup failed
    #[error("Document error: {0}")]
    Dom(#[from] DomError),

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sift_select operations
pub type Result<T> = std::result::Result<T, SelectError>;
