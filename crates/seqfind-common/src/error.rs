//! Error types for the seqfind pipeline
//!
//! Every stage raises a specific, named error kind instead of wrapping an
//! arbitrary message in a generic error. Validation errors are raised before
//! any network call is made.

use thiserror::Error;

/// Result type alias for seqfind operations
pub type Result<T> = std::result::Result<T, SeqfindError>;

/// Main error type for the seqfind pipeline
#[derive(Error, Debug)]
pub enum SeqfindError {
    /// Bad input: empty/malformed contact address, mismatched alphabet,
    /// empty disease list, unequal-length variant comparison.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success HTTP status or transport failure from an external call
    #[error("{service} request failed: {message}. Check your internet connection and the service URL.")]
    RemoteService { service: String, message: String },

    /// The similarity-search job reached a terminal failure status
    #[error("Similarity-search job ended with status '{0}'. Resubmit the job or check the sequence.")]
    JobFailed(String),

    /// The similarity-search poll loop exhausted its attempt budget
    #[error("Similarity-search job did not finish within {attempts} poll attempts")]
    Timeout { attempts: u32 },

    /// A structured response could not be decoded
    #[error("Malformed response from {service}: {message}")]
    Decode { service: String, message: String },

    /// Local drug store operation failed
    #[error("Drug store error: {0}. Check the DrugBank database path.")]
    Database(#[from] rusqlite::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions.")]
    Io(#[from] std::io::Error),
}

impl SeqfindError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a remote-service error for the named service
    pub fn remote(service: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::RemoteService {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Create a decode error for the named service
    pub fn decode(service: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            service: service.into(),
            message: message.to_string(),
        }
    }
}
