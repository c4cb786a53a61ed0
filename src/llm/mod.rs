//! Summarization backend abstraction
//!
//! The [`TextGenerator`] trait is the seam between the summarizer and the
//! hosted model API, so tests can swap in fakes without a network. The only
//! production implementation is the Gemini backend; the summarizer walks an
//! ordered chain of model identifiers against it until one succeeds.

use async_trait::async_trait;

pub mod gemini;
pub mod summarizer;

pub use gemini::GeminiGenerator;
pub use summarizer::Summarizer;

/// Result type for generation calls
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors from a single model generation attempt.
///
/// These never reach the transport collaborator; the summarizer folds them
/// into an absent summary after the fallback chain is exhausted.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// A text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logging (e.g. "gemini")
    fn name(&self) -> &str;

    /// Generate text for `prompt` with the given model identifier.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}
