// Domain model and view state for the popular-repositories browser
pub mod config;
pub mod error;
pub mod fetch;
pub mod language;
pub mod models;
pub mod popular;
pub mod providers;

pub use config::Config;
pub use error::Error;
pub use fetch::{FetchOutcome, FetchPool, RepoFetcher};
pub use language::Language;
pub use models::{Owner, Repository};
pub use popular::{Command, PopularState, RepoCache, FETCH_ERROR_MESSAGE};

/// Shorthand for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
