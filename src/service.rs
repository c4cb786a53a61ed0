//! Request-scoped service facade
//!
//! The single operation an external collaborator calls: validate the
//! username, fetch the profile and repository list sequentially, run the
//! concurrent enrichment pass, and assemble the response. All wiring happens
//! at construction from an explicit [`Config`]; nothing is read from global
//! state and nothing is cached across requests.

use crate::config::Config;
use crate::enrich::Enricher;
use crate::error::{Error, Result};
use crate::github::GithubClient;
use crate::llm::{Summarizer, TextGenerator};
use crate::types::ProfileResponse;
use std::sync::Arc;

/// Generates enriched profile responses for GitHub accounts.
pub struct ProfileService {
    github: GithubClient,
    enricher: Enricher,
}

impl ProfileService {
    /// Wire up the service from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` on invalid configuration and
    /// `Error::Internal` if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let summarizer = Summarizer::new(&config.summary);
        Self::assemble(config, summarizer)
    }

    /// Wire up the service with an arbitrary summary backend. Seam for
    /// tests that script generation outcomes without a network.
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        let summarizer = Summarizer::with_generator(
            generator,
            config.summary.models.clone(),
            config.summary.max_words,
        );
        Self::assemble(config, summarizer)
    }

    fn assemble(config: Config, summarizer: Summarizer) -> Result<Self> {
        config.validate()?;

        let github = GithubClient::new(config.github.clone())?;
        let enricher = Enricher::new(github.clone(), summarizer, &config.summary);

        Ok(Self { github, enricher })
    }

    /// Generate the enriched profile response for `username`.
    ///
    /// Profile and repository fetches are sequential and fatal on failure;
    /// enrichment is concurrent and infallible; per-repository problems
    /// surface only as absent summaries.
    ///
    /// # Errors
    ///
    /// * `Error::BadRequest` for an empty username (no network calls made)
    /// * `Error::NotFound` when the account does not exist
    /// * `Error::Upstream` for other GitHub failures
    pub async fn generate(&self, username: &str) -> Result<ProfileResponse> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::BadRequest("Username cannot be empty".to_string()));
        }

        tracing::info!(username, "processing profile request");

        let user = self.github.fetch_user(username).await?;
        let repos = self.github.fetch_repos(username).await?;
        let repositories = self.enricher.enrich(username, repos).await;

        let summaries = repositories
            .iter()
            .filter(|r| r.ai_summary.is_some())
            .count();
        tracing::info!(
            username,
            repositories = repositories.len(),
            summaries,
            "profile request complete"
        );

        Ok(ProfileResponse {
            success: true,
            user,
            repositories,
            message: format!("Successfully generated profile for {}", username),
        })
    }
}
