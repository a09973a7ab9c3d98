// GitHub-backed fetcher - bridges the API client with the RepoFetcher seam
use async_trait::async_trait;
use starview_api::{GitHubClient, GitHubRepo};

use crate::{
    fetch::RepoFetcher,
    models::{Owner, Repository},
    Error, Language, Result,
};

/// Wrapper around `GitHubClient` that implements `RepoFetcher`.
pub struct GitHubFetcher {
    client: GitHubClient,
    per_page: u32,
}

impl GitHubFetcher {
    pub fn new(client: GitHubClient, per_page: u32) -> Self {
        Self { client, per_page }
    }
}

#[async_trait]
impl RepoFetcher for GitHubFetcher {
    async fn fetch_popular(&self, language: Language) -> Result<Vec<Repository>> {
        let repos = self
            .client
            .search_most_starred(language.query_term(), self.per_page)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(repos.into_iter().map(github_to_repo).collect())
    }
}

/// Convert a GitHub API record to the card model, field for field.
fn github_to_repo(gh: GitHubRepo) -> Repository {
    Repository {
        name: gh.name,
        owner: Owner {
            login: gh.owner.login,
            avatar_url: gh.owner.avatar_url,
        },
        url: gh.html_url,
        stars: gh.stargazers_count,
        forks: gh.forks_count,
        open_issues: gh.open_issues_count,
    }
}
