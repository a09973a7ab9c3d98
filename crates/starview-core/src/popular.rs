// Selection state, per-language result cache, and the fetch-on-select rules
use crate::{fetch::FetchOutcome, models::Repository, Language};
use tracing::error;

/// User-facing message stored when a fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "There was an error fetching the repositories";

/// Per-language cache of fetched results.
///
/// One slot per `Language` variant, so lookups are exhaustive by
/// construction rather than keyed by strings. Entries are never evicted
/// within a session; updates build a new value with the prior slots
/// preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoCache {
    slots: [Option<Vec<Repository>>; Language::ALL.len()],
}

impl RepoCache {
    pub fn get(&self, language: Language) -> Option<&[Repository]> {
        self.slots[language.index()].as_deref()
    }

    pub fn contains(&self, language: Language) -> bool {
        self.slots[language.index()].is_some()
    }

    /// New cache with `language`'s slot filled and every other slot intact.
    pub fn with_entry(&self, language: Language, repos: Vec<Repository>) -> Self {
        let mut next = self.clone();
        next.slots[language.index()] = Some(repos);
        next
    }
}

/// Side effect requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Issue a fetch for this language.
    Fetch(Language),
    /// Nothing to do; render straight from cache.
    None,
}

/// The view's whole state: selected filter, cache, error.
///
/// Immutable; every transition returns the next value wholesale. What
/// the screen shows is derived from these three fields alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopularState {
    selected: Language,
    cache: RepoCache,
    error: Option<String>,
}

impl PopularState {
    /// Initial state: selects the default filter, which always fetches
    /// since the cache starts empty.
    pub fn mount(default: Language) -> (Self, Command) {
        Self::default().select(default)
    }

    /// Select a filter: clears any error and requests a fetch unless the
    /// cache already holds results for it.
    pub fn select(&self, language: Language) -> (Self, Command) {
        let next = Self {
            selected: language,
            cache: self.cache.clone(),
            error: None,
        };

        let command = if next.cache.contains(language) {
            Command::None
        } else {
            Command::Fetch(language)
        };

        (next, command)
    }

    /// Fold one fetch resolution into the state.
    ///
    /// A success only writes its own language's slot, so a late arrival
    /// for a filter the user has moved away from is harmless. A failure
    /// leaves the slot absent; re-selecting that filter re-fetches.
    pub fn apply(&self, outcome: FetchOutcome) -> Self {
        match outcome.result {
            Ok(repos) => Self {
                selected: self.selected,
                cache: self.cache.with_entry(outcome.language, repos),
                error: self.error.clone(),
            },
            Err(err) => {
                error!(
                    "fetching repositories for {} failed: {}",
                    outcome.language, err
                );
                Self {
                    selected: self.selected,
                    cache: self.cache.clone(),
                    error: Some(FETCH_ERROR_MESSAGE.to_string()),
                }
            }
        }
    }

    pub fn selected(&self) -> Language {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Cached results for the selected filter, if any.
    pub fn repos(&self) -> Option<&[Repository]> {
        self.cache.get(self.selected)
    }

    /// Cached results for an arbitrary filter.
    pub fn cached(&self, language: Language) -> Option<&[Repository]> {
        self.cache.get(language)
    }

    /// Derived, never stored: loading iff the selected filter has no
    /// cached entry and no error is set.
    pub fn is_loading(&self) -> bool {
        self.repos().is_none() && self.error.is_none()
    }
}
