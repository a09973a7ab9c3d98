// Fetch orchestration: the provider seam, task spawning, in-flight tracking
use crate::{models::Repository, popular::Command, Language, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Where ranked repositories come from.
///
/// One implementation per backend; the seam keeps the state machine
/// testable without a network.
#[async_trait::async_trait]
pub trait RepoFetcher: Send + Sync {
    /// Most-starred repositories for one filter, rank order preserved.
    async fn fetch_popular(&self, language: Language) -> Result<Vec<Repository>>;
}

/// Resolution of one fetch, successful or not.
#[derive(Debug)]
pub struct FetchOutcome {
    pub language: Language,
    pub result: Result<Vec<Repository>>,
}

/// Spawns one task per requested fetch and funnels resolutions back
/// through a channel.
///
/// Keeps an in-flight set so rapid re-selection of a filter whose fetch
/// has not resolved yet does not issue a duplicate request. There is no
/// cancellation: a fetch for a filter the user has left still resolves
/// and fills that filter's cache slot.
pub struct FetchPool {
    fetcher: Arc<dyn RepoFetcher>,
    tx: UnboundedSender<FetchOutcome>,
    in_flight: HashSet<Language>,
}

impl FetchPool {
    pub fn new(fetcher: Arc<dyn RepoFetcher>) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                fetcher,
                tx,
                in_flight: HashSet::new(),
            },
            rx,
        )
    }

    /// Execute a state transition's side effect.
    pub fn run(&mut self, command: Command) {
        if let Command::Fetch(language) = command {
            self.dispatch(language);
        }
    }

    /// Start a fetch unless one for this language is already outstanding.
    pub fn dispatch(&mut self, language: Language) {
        if !self.in_flight.insert(language) {
            debug!("fetch for {} already in flight, skipping", language);
            return;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_popular(language).await;
            // The receiver dropping just means the UI is gone.
            let _ = tx.send(FetchOutcome { language, result });
        });
    }

    /// Mark a fetch as resolved once its outcome has been consumed.
    pub fn settle(&mut self, language: Language) {
        self.in_flight.remove(&language);
    }

    pub fn is_in_flight(&self, language: Language) -> bool {
        self.in_flight.contains(&language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Counts calls and holds each fetch until the test releases it.
    #[derive(Default)]
    struct GatedFetcher {
        calls: AtomicUsize,
        gate: Notify,
    }

    #[async_trait::async_trait]
    impl RepoFetcher for GatedFetcher {
        async fn fetch_popular(&self, _language: Language) -> Result<Vec<Repository>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn duplicate_dispatch_is_collapsed_while_in_flight() {
        let fetcher = Arc::new(GatedFetcher::default());
        let (mut pool, mut rx) = FetchPool::new(fetcher.clone());

        pool.dispatch(Language::Ruby);
        pool.dispatch(Language::Ruby);
        assert!(pool.is_in_flight(Language::Ruby));

        fetcher.gate.notify_one();
        let outcome = rx.recv().await.expect("fetch outcome");
        assert_eq!(outcome.language, Language::Ruby);
        pool.settle(outcome.language);

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(!pool.is_in_flight(Language::Ruby));
    }

    #[tokio::test]
    async fn settled_language_can_be_fetched_again() {
        let fetcher = Arc::new(GatedFetcher::default());
        let (mut pool, mut rx) = FetchPool::new(fetcher.clone());

        pool.dispatch(Language::Python);
        fetcher.gate.notify_one();
        let outcome = rx.recv().await.expect("first outcome");
        pool.settle(outcome.language);

        pool.dispatch(Language::Python);
        fetcher.gate.notify_one();
        let _ = rx.recv().await.expect("second outcome");

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn distinct_languages_fetch_independently() {
        let fetcher = Arc::new(GatedFetcher::default());
        let (mut pool, _rx) = FetchPool::new(fetcher.clone());

        pool.run(Command::Fetch(Language::Java));
        pool.run(Command::Fetch(Language::Css));
        pool.run(Command::None);

        assert!(pool.is_in_flight(Language::Java));
        assert!(pool.is_in_flight(Language::Css));
        assert!(!pool.is_in_flight(Language::Ruby));
    }
}
