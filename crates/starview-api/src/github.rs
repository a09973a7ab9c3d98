use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_BASE.to_string())
    }

    /// For GitHub Enterprise instances (and tests)
    pub fn with_base_url(base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("starview/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base_url }
    }

    /// Most-starred repositories, optionally restricted to one language.
    ///
    /// Issues `q=stars:>1 language:<term>` against the search endpoint,
    /// sorted by stars descending, and returns the result page in rank
    /// order. Unauthenticated; search rate limits surface as
    /// [`GitHubError::RateLimitExceeded`].
    pub async fn search_most_starred(
        &self,
        language: Option<&str>,
        per_page: u32,
    ) -> Result<Vec<GitHubRepo>> {
        let url = format!("{}/search/repositories", self.base_url);

        let mut q = String::from("stars:>1");
        if let Some(term) = language {
            q.push_str(" language:");
            q.push_str(term);
        }

        debug!("searching most-starred repositories: {}", q);

        let per_page = per_page.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", q.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        // Search quota exhaustion comes back as 403 (or 429 on newer
        // deployments), not as a dedicated status.
        if response.status() == 403 || response.status() == 429 {
            return Err(GitHubError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let page: SearchPage = response.json().await?;
        Ok(page.items)
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One page of `/search/repositories` results; only `items` matters here.
#[derive(Debug, Deserialize)]
struct SearchPage {
    items: Vec<GitHubRepo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub owner: GitHubOwner,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub open_issues_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn search_body() -> serde_json::Value {
        serde_json::json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "name": "freeCodeCamp",
                    "owner": {
                        "login": "freeCodeCamp",
                        "avatar_url": "https://avatars.githubusercontent.com/u/9892522"
                    },
                    "html_url": "https://github.com/freeCodeCamp/freeCodeCamp",
                    "stargazers_count": 405_000,
                    "forks_count": 38_000,
                    "open_issues_count": 200
                },
                {
                    "name": "react",
                    "owner": {
                        "login": "facebook",
                        "avatar_url": "https://avatars.githubusercontent.com/u/69631"
                    },
                    "html_url": "https://github.com/facebook/react",
                    "stargazers_count": 230_000,
                    "forks_count": 47_000,
                    "open_issues_count": 900
                }
            ]
        })
    }

    #[tokio::test]
    async fn search_most_starred_parses_items_in_rank_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "stars:>1 language:javascript"))
            .and(query_param("sort", "stars"))
            .and(query_param("order", "desc"))
            .and(query_param("per_page", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_url(server.uri());
        let repos = client
            .search_most_starred(Some("javascript"), 30)
            .await
            .unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "freeCodeCamp");
        assert_eq!(repos[0].owner.login, "freeCodeCamp");
        assert_eq!(repos[0].stargazers_count, 405_000);
        assert_eq!(repos[1].name, "react");
        assert_eq!(repos[1].forks_count, 47_000);
    }

    #[tokio::test]
    async fn search_without_language_omits_the_qualifier() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "stars:>1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_url(server.uri());
        let repos = client.search_most_starred(None, 30).await.unwrap();
        assert_eq!(repos.len(), 2);
    }

    #[tokio::test]
    async fn quota_exhaustion_maps_to_rate_limit_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_url(server.uri());
        let err = client.search_most_starred(None, 30).await.unwrap_err();
        assert!(matches!(err, GitHubError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn server_error_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_url(server.uri());
        let err = client
            .search_most_starred(Some("ruby"), 30)
            .await
            .unwrap_err();

        match err {
            GitHubError::RequestFailed(message) => {
                assert!(message.contains("502"));
                assert!(message.contains("bad gateway"));
            }
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }
}
