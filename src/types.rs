//! Domain models
//!
//! Request-scoped, immutable snapshots of GitHub data plus the enriched
//! records handed back to the transport collaborator. Everything here is
//! created fresh per request and discarded once the response is produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one GitHub account, from `GET /users/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountProfile {
    /// Identity handle
    pub login: String,

    /// Display name
    pub name: Option<String>,

    /// Avatar image URL
    pub avatar_url: String,

    pub bio: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,

    /// Public repository count
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One repository's metadata, in the upstream list order.
///
/// The list order from `GET /users/{username}/repos?sort=updated` is trusted
/// as-is and preserved end-to-end; it is never recomputed locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryDescriptor {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,

    /// Topic labels; GitHub omits the field entirely for some responses
    #[serde(default)]
    pub topics: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub homepage: Option<String>,
}

/// A [`RepositoryDescriptor`] plus an optional AI summary.
///
/// `ai_summary` is `None` when enrichment was not attempted (budget
/// exhausted, backend unconfigured), no README existed, or every summary
/// model failed. Absence is a normal outcome, not an error, and the
/// collaborator cannot distinguish the causes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedRepository {
    /// The original descriptor, serialized inline
    #[serde(flatten)]
    pub repo: RepositoryDescriptor,

    /// Generated summary, at most the configured word cap
    #[serde(default)]
    pub ai_summary: Option<String>,
}

impl EnrichedRepository {
    /// Wrap a descriptor with no summary.
    pub fn absent(repo: RepositoryDescriptor) -> Self {
        Self {
            repo,
            ai_summary: None,
        }
    }

    /// Wrap a descriptor with a generated summary.
    pub fn with_summary(repo: RepositoryDescriptor, summary: String) -> Self {
        Self {
            repo,
            ai_summary: Some(summary),
        }
    }
}

/// Outbound response for one profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: AccountProfile,

    /// Same length and order as the upstream repository list, always
    pub repositories: Vec<EnrichedRepository>,

    /// Human-readable status message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_repo_json() -> serde_json::Value {
        json!({
            "id": 42,
            "name": "widget",
            "full_name": "alice/widget",
            "description": "A widget",
            "html_url": "https://github.com/alice/widget",
            "stargazers_count": 7,
            "forks_count": 2,
            "language": "Rust",
            "topics": ["cli", "tools"],
            "created_at": "2020-01-15T10:00:00Z",
            "updated_at": "2024-06-01T12:30:00Z",
            "homepage": null
        })
    }

    #[test]
    fn test_repository_deserialization() {
        let repo: RepositoryDescriptor = serde_json::from_value(sample_repo_json()).unwrap();

        assert_eq!(repo.id, 42);
        assert_eq!(repo.full_name, "alice/widget");
        assert_eq!(repo.topics, vec!["cli", "tools"]);
        assert!(repo.homepage.is_none());
    }

    #[test]
    fn test_missing_topics_defaults_to_empty() {
        let mut value = sample_repo_json();
        value.as_object_mut().unwrap().remove("topics");

        let repo: RepositoryDescriptor = serde_json::from_value(value).unwrap();
        assert!(repo.topics.is_empty());
    }

    #[test]
    fn test_enriched_repository_flattens_descriptor() {
        let repo: RepositoryDescriptor = serde_json::from_value(sample_repo_json()).unwrap();
        let enriched = EnrichedRepository::with_summary(repo, "Does widget things.".into());

        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["name"], "widget");
        assert_eq!(value["ai_summary"], "Does widget things.");
    }

    #[test]
    fn test_absent_summary_serializes_as_null() {
        let repo: RepositoryDescriptor = serde_json::from_value(sample_repo_json()).unwrap();
        let enriched = EnrichedRepository::absent(repo);

        let value = serde_json::to_value(&enriched).unwrap();
        assert!(value["ai_summary"].is_null());
    }

    #[test]
    fn test_profile_optional_fields() {
        let profile: AccountProfile = serde_json::from_value(json!({
            "login": "alice",
            "name": null,
            "avatar_url": "https://avatars.example/alice",
            "bio": null,
            "location": null,
            "email": null,
            "blog": null,
            "twitter_username": null,
            "public_repos": 12,
            "followers": 3,
            "following": 4,
            "created_at": "2015-03-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(profile.login, "alice");
        assert!(profile.name.is_none());
        assert_eq!(profile.public_repos, 12);
    }
}
