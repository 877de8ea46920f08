//! Error types for reconciliation.
//!
//! Errors are grouped into kinds so callers can decide whether a failure is
//! their own input (Config), a failed read of device state (Query), or the
//! process boundary itself (Transport). A failed mutating command is not an
//! error at this level; it classifies into a failed [`crate::Outcome`].

use thiserror::Error;

/// Broad category of a reconciliation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or contradictory caller input; detected before device I/O
    Config,
    /// The read-only existence query failed
    Query,
    /// The process boundary to the device failed
    Transport,
}

impl ErrorKind {
    /// User-facing description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Config => "invalid desired-state input",
            Self::Query => "existence query failed",
            Self::Transport => "device transport failed",
        }
    }
}

/// Errors surfaced by the reconciliation engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Input referenced an attribute the schema does not declare
    #[error("unknown attribute `{attr}` for {kind}")]
    UnknownAttribute {
        /// Resource type the input was resolved against
        kind: &'static str,
        /// Offending attribute name from the caller
        attr: String,
    },

    /// Input supplied the wrong value shape for an attribute
    #[error("attribute `{attr}` for {kind} expects {expected}")]
    TypeMismatch {
        kind: &'static str,
        attr: &'static str,
        /// "a boolean" or "a string"
        expected: &'static str,
    },

    /// Value outside an enumerated choice set
    #[error("invalid value `{value}` for `{attr}`: expected one of [{allowed}]")]
    InvalidChoice {
        attr: &'static str,
        value: String,
        /// Comma-separated allowed tokens, for the message
        allowed: String,
    },

    /// A required identity attribute was not supplied
    #[error("missing identity attribute `{attr}` for {kind}")]
    MissingIdentity {
        kind: &'static str,
        attr: &'static str,
    },

    /// The schema declares no verb for the requested operation
    #[error("{kind} does not support {op}")]
    UnsupportedOperation {
        kind: &'static str,
        op: &'static str,
    },

    /// The existence query returned a failure or could not be run
    #[error("existence query `{command}` failed: {detail}")]
    QueryFailed { command: String, detail: String },

    /// The transport could not execute a command at all
    #[error("transport error running `{command}`: {detail}")]
    Transport { command: String, detail: String },
}

impl Error {
    /// Get the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownAttribute { .. }
            | Error::TypeMismatch { .. }
            | Error::InvalidChoice { .. }
            | Error::MissingIdentity { .. }
            | Error::UnsupportedOperation { .. } => ErrorKind::Config,
            Error::QueryFailed { .. } => ErrorKind::Query,
            Error::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// Whether this error was detected before any device interaction.
    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Config
    }
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, Error>;
