//! Errors the interactive loop recovers from.
//!
//! Every variant is reported as a one-line message, after which control
//! returns to the menu. None of them ends the session.

use csm_portfolio::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleError {
    /// Lookup by id failed.
    NotFound { id: u32 },
    /// Operator typed something that does not parse (id, menu choice, value).
    InvalidInput(String),
    /// Export or report file could not be written.
    Io(String),
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "client {id} not found"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Io(msg) => write!(f, "file error: {msg}"),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<StoreError> for ConsoleError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => Self::NotFound { id },
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl ConsoleError {
    /// Wrap an IO-layer failure, keeping the full context chain.
    pub fn io(e: anyhow::Error) -> Self {
        Self::Io(format!("{e:#}"))
    }
}
