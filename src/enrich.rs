//! Concurrent enrichment orchestrator
//!
//! Fans out one unit of work per budget-eligible repository (README fetch,
//! then summarization), runs the units with bounded parallelism, and merges
//! the outcomes back into the caller's original repository order. Units are
//! independent: one unit's failure, panic, or slowness never cancels or
//! corrupts a sibling. The join waits for every unit to settle rather than
//! failing fast, under an overall deadline so a single stalled backend call
//! cannot pin the request forever.

use crate::config::SummaryConfig;
use crate::github::{GithubClient, ReadmeText};
use crate::llm::Summarizer;
use crate::types::{EnrichedRepository, RepositoryDescriptor};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Routes one concurrent unit's result back to its slot.
struct EnrichmentOutcome {
    index: usize,
    summary: Option<String>,
}

/// Orchestrates budgeted, concurrent repository enrichment.
pub struct Enricher {
    github: GithubClient,
    summarizer: Summarizer,
    budget: usize,
    concurrency: usize,
    readme_limit: usize,
    deadline: Duration,
}

impl Enricher {
    pub fn new(github: GithubClient, summarizer: Summarizer, config: &SummaryConfig) -> Self {
        Self {
            github,
            summarizer,
            budget: config.budget,
            concurrency: config.concurrency,
            readme_limit: config.readme_limit,
            deadline: Duration::from_secs(config.deadline_secs),
        }
    }

    /// Enrich `repos`, returning one record per input repository in the
    /// input order.
    ///
    /// Only the first `min(budget, len)` repositories are eligible; the rest
    /// never incur a network call. With no summary backend configured, or an
    /// empty eligible set, all records come back absent without touching any
    /// concurrency machinery. This method never fails: every per-item
    /// problem folds into an absent summary.
    pub async fn enrich(
        &self,
        username: &str,
        repos: Vec<RepositoryDescriptor>,
    ) -> Vec<EnrichedRepository> {
        let eligible = self.budget.min(repos.len());

        if eligible == 0 || !self.summarizer.is_configured() {
            return repos.into_iter().map(EnrichedRepository::absent).collect();
        }

        tracing::info!(
            username,
            eligible,
            total = repos.len(),
            concurrency = self.concurrency,
            "starting enrichment fan-out"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut units = tokio::task::JoinSet::new();

        for (index, repo) in repos.iter().take(eligible).enumerate() {
            let github = self.github.clone();
            let summarizer = self.summarizer.clone();
            let semaphore = Arc::clone(&semaphore);
            let username = username.to_string();
            let name = repo.name.clone();
            let description = repo.description.clone();
            let readme_limit = self.readme_limit;

            units.spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return EnrichmentOutcome {
                            index,
                            summary: None,
                        }
                    }
                };

                let summary = match github.fetch_readme(&username, &name, readme_limit).await {
                    ReadmeText::Found(text) => {
                        summarizer
                            .summarize(&name, description.as_deref(), Some(&text))
                            .await
                    }
                    // No documentation text: skip the summarizer entirely.
                    ReadmeText::Absent => None,
                };

                EnrichmentOutcome { index, summary }
            });
        }

        // One private slot per input index; units never share mutable state.
        // Results are collected in completion order so outcomes that settled
        // before a deadline expiry are kept.
        let mut slots: Vec<Option<String>> = vec![None; repos.len()];

        let collect = async {
            while let Some(result) = units.join_next().await {
                match result {
                    Ok(outcome) => slots[outcome.index] = outcome.summary,
                    // A panicked unit forfeits only its own slot.
                    Err(e) => tracing::warn!(error = %e, "enrichment unit panicked"),
                }
            }
        };
        let timed_out = tokio::time::timeout(self.deadline, collect).await.is_err();
        if timed_out {
            units.abort_all();
            tracing::warn!(
                username,
                deadline_secs = self.deadline.as_secs(),
                "enrichment deadline expired, returning partial results"
            );
        }

        let produced = slots.iter().filter(|s| s.is_some()).count();
        tracing::info!(username, produced, eligible, "enrichment complete");

        merge(repos, slots)
    }
}

/// Attach each outcome slot to its repository, preserving input order.
fn merge(repos: Vec<RepositoryDescriptor>, slots: Vec<Option<String>>) -> Vec<EnrichedRepository> {
    repos
        .into_iter()
        .zip(slots)
        .map(|(repo, summary)| match summary {
            Some(summary) => EnrichedRepository::with_summary(repo, summary),
            None => EnrichedRepository::absent(repo),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn repo(id: u64, name: &str) -> RepositoryDescriptor {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        RepositoryDescriptor {
            id,
            name: name.to_string(),
            full_name: format!("alice/{}", name),
            description: None,
            html_url: format!("https://github.com/alice/{}", name),
            stargazers_count: 0,
            forks_count: 0,
            language: None,
            topics: Vec::new(),
            created_at: ts,
            updated_at: ts,
            homepage: None,
        }
    }

    #[test]
    fn test_merge_preserves_order_and_length() {
        let repos = vec![repo(1, "a"), repo(2, "b"), repo(3, "c")];
        let slots = vec![None, Some("summary b".to_string()), None];

        let merged = merge(repos, slots);

        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.iter().map(|r| r.repo.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(merged[0].ai_summary.is_none());
        assert_eq!(merged[1].ai_summary.as_deref(), Some("summary b"));
        assert!(merged[2].ai_summary.is_none());
    }

    proptest! {
        #[test]
        fn prop_merge_keeps_length_order_and_ids(
            ids in proptest::collection::vec(0u64..10_000, 0..30),
            seed in any::<u64>(),
        ) {
            let repos: Vec<_> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| repo(*id, &format!("r{}", i)))
                .collect();
            let slots: Vec<Option<String>> = ids
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    // Arbitrary completion pattern; the merge must not care.
                    if (seed >> (i % 64)) & 1 == 1 {
                        Some(format!("s{}", i))
                    } else {
                        None
                    }
                })
                .collect();

            let merged = merge(repos, slots);

            prop_assert_eq!(merged.len(), ids.len());
            let merged_ids: Vec<u64> = merged.iter().map(|r| r.repo.id).collect();
            prop_assert_eq!(merged_ids, ids);
        }
    }
}
