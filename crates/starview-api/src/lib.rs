// GitHub REST client for the popular-repositories view
pub mod github;

// Re-export common types
pub use github::{GitHubClient, GitHubError, GitHubOwner, GitHubRepo};
