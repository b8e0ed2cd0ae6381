//! Error types for the reading engine.

use std::time::Duration;

use thiserror::Error;

use crate::session::Phase;

/// Result type for reading operations.
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Errors surfaced to the presentation layer.
///
/// All of these are user-correctable; none abort the session.
#[derive(Debug, Error)]
pub enum ReadingError {
    /// The question was empty or whitespace only.
    #[error("please enter the question you want the cards to answer")]
    EmptyQuestion,

    /// The operation is not valid in the current phase.
    #[error("cannot {action} while {phase}")]
    WrongPhase {
        /// What was attempted.
        action: &'static str,
        /// The phase the session was in.
        phase: Phase,
    },

    /// The interpretation provider could not be built.
    #[error("provider setup failed: {0}")]
    Provider(#[from] InterpretError),

    /// A reading could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for interpretation providers.
pub type InterpretResult<T> = Result<T, InterpretError>;

/// Failures of an interpretation provider.
///
/// The session treats every variant the same way: the reading completes
/// without an interpretation.
#[derive(Debug, Error)]
pub enum InterpretError {
    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The service answered with no text.
    #[error("the service returned an empty response")]
    EmptyResponse,

    /// The response could not be parsed.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response parsed but is missing required content.
    #[error("incomplete interpretation: {0}")]
    Incomplete(String),

    /// No answer arrived within the configured timeout.
    #[error("no answer within {0:?}")]
    Timeout(Duration),

    /// The provider is missing required configuration.
    #[error("not configured: {0}")]
    NotConfigured(String),
}
