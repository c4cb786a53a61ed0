//! Error types and handling
//!
//! One public taxonomy for the whole crate. Enrichment problems (missing
//! READMEs, exhausted summary models) are never errors; they fold into
//! absent summaries at the data-model level. Errors here are the ones that
//! make producing any response impossible.
//!
//! Internal failures are reported with a redacted public message so the
//! transport collaborator never leaks implementation details to end users.

use thiserror::Error;

/// Result type for gitfolio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the transport collaborator
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid inbound request (empty username after trimming)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The GitHub account does not exist
    #[error("GitHub user '{username}' not found")]
    NotFound {
        /// The username that was looked up
        username: String,
    },

    /// Non-success or network-level failure from the GitHub API
    #[error("GitHub API error ({status}): {body}")]
    Upstream {
        /// Upstream HTTP status (502 for network-level failures)
        status: u16,
        /// Upstream response body or transport error text
        body: String,
    },

    /// Configuration load or validation failure
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unclassified internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP-equivalent status code for this error.
    ///
    /// `Upstream` propagates the upstream status so the collaborator can
    /// relay it unchanged.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::BadRequest(_) => 400,
            Error::NotFound { .. } => 404,
            Error::Upstream { status, .. } => *status,
            Error::Config(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Message safe to show to end users.
    ///
    /// Internal and configuration details are redacted; everything else is
    /// the display form.
    pub fn public_message(&self) -> String {
        match self {
            Error::Internal(_) => "Internal server error".to_string(),
            Error::Config(_) => "Service is misconfigured".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::BadRequest("x".into()).status_code(), 400);
        assert_eq!(
            Error::NotFound {
                username: "alice".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            Error::Upstream {
                status: 503,
                body: "down".into()
            }
            .status_code(),
            503
        );
        assert_eq!(Error::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_not_found_names_the_account() {
        let err = Error::NotFound {
            username: "alice".into(),
        };
        assert_eq!(err.public_message(), "GitHub user 'alice' not found");
    }

    #[test]
    fn test_internal_message_is_redacted() {
        let err = Error::Internal("connection pool state: 0x7f".into());
        assert_eq!(err.public_message(), "Internal server error");
        assert!(!err.public_message().contains("0x7f"));
    }

    #[test]
    fn test_upstream_message_carries_status_and_body() {
        let err = Error::Upstream {
            status: 403,
            body: "rate limit exceeded".into(),
        };
        assert!(err.public_message().contains("403"));
        assert!(err.public_message().contains("rate limit exceeded"));
    }
}
