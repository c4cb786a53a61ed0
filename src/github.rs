//! GitHub API client
//!
//! Covers the three upstream calls: account profile, repository list, and
//! README text. Profile and repository failures are fatal to the request and
//! propagate as typed errors; README absence is a normal outcome carried by
//! [`ReadmeText`] and never propagates.

use crate::config::GithubConfig;
use crate::error::{Error, Result};
use crate::types::{AccountProfile, RepositoryDescriptor};
use reqwest::StatusCode;

/// User-Agent string for GitHub requests.
const USER_AGENT: &str = concat!("gitfolio/", env!("CARGO_PKG_VERSION"));

/// Raw-content accept header for the README endpoint.
const RAW_ACCEPT: &str = "application/vnd.github.v3.raw";

/// Outcome of a README fetch.
///
/// Fetching a README is best-effort: a missing file, a non-success status,
/// and a network failure all collapse into `Absent`. Keeping this as a
/// tagged value (rather than a swallowed error) keeps "tried and got
/// nothing" visible to tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeText {
    /// README text, truncated to the configured character limit
    Found(String),

    /// No README, or the call failed
    Absent,
}

impl ReadmeText {
    /// Borrow the text if present.
    pub fn text(&self) -> Option<&str> {
        match self {
            ReadmeText::Found(text) => Some(text),
            ReadmeText::Absent => None,
        }
    }

    /// Consume into the text if present.
    pub fn into_text(self) -> Option<String> {
        match self {
            ReadmeText::Found(text) => Some(text),
            ReadmeText::Absent => None,
        }
    }
}

/// Client for the GitHub REST API.
///
/// Holds one `reqwest::Client` with the configured per-request timeout.
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct GithubClient {
    config: GithubConfig,
    client: reqwest::Client,
}

impl GithubClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the HTTP client cannot be constructed.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn get(&self, url: String) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Fetch one account profile. Exactly one outbound call.
    ///
    /// # Errors
    ///
    /// * `Error::NotFound` when GitHub reports the account does not exist
    /// * `Error::Upstream` for any other non-success response or network
    ///   failure
    pub async fn fetch_user(&self, username: &str) -> Result<AccountProfile> {
        let url = format!("{}/users/{}", self.config.base_url, username);

        let response = self.get(url).send().await.map_err(network_error)?;

        match response.status() {
            status if status.is_success() => response
                .json::<AccountProfile>()
                .await
                .map_err(|e| Error::Internal(format!("failed to decode user profile: {}", e))),
            StatusCode::NOT_FOUND => Err(Error::NotFound {
                username: username.to_string(),
            }),
            status => Err(Error::Upstream {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Fetch the account's repositories, most-recently-updated first.
    ///
    /// The ordering is delegated to GitHub's own sort and trusted as-is.
    ///
    /// # Errors
    ///
    /// Returns `Error::Upstream` on any non-success response or network
    /// failure.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<RepositoryDescriptor>> {
        let url = format!("{}/users/{}/repos", self.config.base_url, username);

        let per_page = self.config.max_repos.to_string();
        let response = self
            .get(url)
            .query(&[
                ("sort", "updated"),
                ("direction", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json::<Vec<RepositoryDescriptor>>()
            .await
            .map_err(|e| Error::Internal(format!("failed to decode repository list: {}", e)))
    }

    /// Fetch one repository's README as raw text, truncated to `limit`
    /// characters.
    ///
    /// Never fails: any non-success status or network error is `Absent`.
    pub async fn fetch_readme(&self, username: &str, repo: &str, limit: usize) -> ReadmeText {
        let url = format!("{}/repos/{}/{}/readme", self.config.base_url, username, repo);

        let response = match self
            .get(url)
            .header(reqwest::header::ACCEPT, RAW_ACCEPT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(repo, error = %e, "readme fetch failed");
                return ReadmeText::Absent;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::debug!(repo, status = %response.status(), "no readme");
            return ReadmeText::Absent;
        }

        match response.text().await {
            Ok(text) => ReadmeText::Found(truncate_chars(text, limit)),
            Err(e) => {
                tracing::warn!(repo, error = %e, "readme body read failed");
                ReadmeText::Absent
            }
        }
    }
}

/// Map a transport-level failure into the upstream error category.
fn network_error(e: reqwest::Error) -> Error {
    Error::Upstream {
        status: 502,
        body: format!("network error: {}", e),
    }
}

/// Truncate to the first `limit` characters, respecting UTF-8 boundaries.
fn truncate_chars(mut text: String, limit: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(limit) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_input_unchanged() {
        assert_eq!(truncate_chars("hello".into(), 2000), "hello");
    }

    #[test]
    fn test_truncate_chars_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        let truncated = truncate_chars(text, 4);
        assert_eq!(truncated.chars().count(), 4);
        assert_eq!(truncated, "éééé");
    }

    #[test]
    fn test_truncate_chars_exact_limit() {
        assert_eq!(truncate_chars("abcd".into(), 4), "abcd");
        assert_eq!(truncate_chars("abcde".into(), 4), "abcd");
    }

    #[test]
    fn test_readme_text_accessors() {
        assert_eq!(ReadmeText::Found("docs".into()).text(), Some("docs"));
        assert_eq!(ReadmeText::Absent.text(), None);
        assert_eq!(ReadmeText::Found("docs".into()).into_text(), Some("docs".into()));
        assert_eq!(ReadmeText::Absent.into_text(), None);
    }
}
