//! Repository summarizer with a model fallback chain
//!
//! Hosted model availability varies by deployment tier, so a fixed model
//! choice fails outright on some tiers. The summarizer instead walks an
//! ordered chain of model identifiers, logging each failure and moving on;
//! only when every candidate fails does it give up, and even then the
//! outcome is an absent summary, never an error.

use super::{GeminiGenerator, SummaryError, TextGenerator};
use crate::config::SummaryConfig;
use std::sync::Arc;
use std::time::Duration;

/// Produces bounded-length natural-language summaries of repositories.
#[derive(Clone)]
pub struct Summarizer {
    generator: Option<Arc<dyn TextGenerator>>,
    models: Vec<String>,
    max_words: usize,
}

impl Summarizer {
    /// Build a summarizer from configuration.
    ///
    /// With no API key configured there is no generator at all and
    /// [`Summarizer::summarize`] short-circuits to `None` without any
    /// network call.
    pub fn new(config: &SummaryConfig) -> Self {
        let generator = config.api_key.as_ref().map(|key| {
            Arc::new(GeminiGenerator::new(
                config.base_url.clone(),
                key.clone(),
                Duration::from_secs(config.timeout_secs),
            )) as Arc<dyn TextGenerator>
        });

        Self {
            generator,
            models: config.models.clone(),
            max_words: config.max_words,
        }
    }

    /// Build a summarizer around an arbitrary backend. Seam for tests.
    pub fn with_generator(
        generator: Arc<dyn TextGenerator>,
        models: Vec<String>,
        max_words: usize,
    ) -> Self {
        Self {
            generator: Some(generator),
            models,
            max_words,
        }
    }

    /// Whether a backend is configured at all.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Summarize one repository from its metadata and optional README text.
    ///
    /// Tries each model in the chain in order until one succeeds. Generated
    /// text longer than the word cap is truncated with an ellipsis marker.
    /// Returns `None` when unconfigured or when every model fails; the last
    /// error is logged, never raised.
    pub async fn summarize(
        &self,
        repo_name: &str,
        description: Option<&str>,
        readme: Option<&str>,
    ) -> Option<String> {
        let generator = self.generator.as_ref()?;

        let prompt = build_prompt(repo_name, description, readme);
        let mut last_error: Option<SummaryError> = None;

        for model in &self.models {
            match generator.generate(model, &prompt).await {
                Ok(text) => {
                    tracing::info!(
                        backend = generator.name(),
                        model = %model,
                        repo = repo_name,
                        "summary generated"
                    );
                    return Some(word_truncate(text.trim(), self.max_words));
                }
                Err(e) => {
                    tracing::warn!(
                        backend = generator.name(),
                        model = %model,
                        repo = repo_name,
                        error = %e,
                        "model failed, trying next candidate"
                    );
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            tracing::warn!(repo = repo_name, error = %e, "all summary models failed");
        }

        None
    }
}

/// Build the generation prompt from a textual context block.
fn build_prompt(repo_name: &str, description: Option<&str>, readme: Option<&str>) -> String {
    let mut context = format!("Repository: {}\n", repo_name);
    if let Some(description) = description {
        context.push_str(&format!("Description: {}\n", description));
    }
    if let Some(readme) = readme {
        context.push_str(&format!("README excerpt:\n{}\n", readme));
    }

    format!(
        "Based on the following GitHub repository information, write a concise \
         50-word summary that highlights the key features and purpose of this \
         project. Be clear, technical, and engaging.\n\n{}\nSummary (max 50 words):",
        context
    )
}

/// Truncate `text` to its first `max_words` whitespace-separated words,
/// appending an ellipsis marker when anything was cut.
pub fn word_truncate(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > max_words {
        format!("{}...", words[..max_words].join(" "))
    } else {
        text.to_string()
    }
}
