//! Gitfolio Library
//!
//! Aggregates a GitHub account's public profile and repository list, then
//! enriches a budgeted subset of those repositories with AI-generated
//! summaries derived from each repository's README. The transport layer
//! (HTTP server, CLI, whatever calls this crate) is an external collaborator:
//! it hands [`service::ProfileService`] a username and gets back a structured
//! response or a typed error.
//!
//! # Examples
//!
//! ```no_run
//! use gitfolio::{config::Config, service::ProfileService};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ProfileService::new(Config::from_env())?;
//! let response = service.generate("octocat").await?;
//! println!("{} repositories", response.repositories.len());
//! # Ok(())
//! # }
//! ```

/// Configuration management module
pub mod config;

/// Concurrent enrichment orchestrator
pub mod enrich;

/// Error types and handling
pub mod error;

/// GitHub API client (profile, repositories, READMEs)
pub mod github;

/// Summarization backend abstraction and model fallback chain
pub mod llm;

/// Request-scoped service facade
pub mod service;

/// Telemetry and observability
pub mod telemetry;

/// Domain models
pub mod types;
