//! Fetch trigger for the story list.
//!
//! The reducer only records outcomes; the loader is the collaborator that
//! produces them. One call to [`StoriesLoader::load`] dispatches exactly one
//! [`StoriesAction::FetchInit`] per attempt and exactly one terminal action
//! ([`StoriesAction::FetchSuccess`] or [`StoriesAction::FetchFailure`]) per
//! load, never both. A load superseded by a newer one goes silent entirely:
//! no further `FetchInit`, no terminal action, so the newer load's outcome
//! is the last word on the flags.

use crate::gateway::StoryGateway;
use crate::reducer::{StoriesEnvironment, StoriesReducer};
use crate::types::{StoriesAction, StoriesState, Story};
use listflow_runtime::{RetryPolicy, Store, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The store type the loader drives
pub type StoriesStore = Store<StoriesState, StoriesAction, StoriesEnvironment, StoriesReducer>;

/// Errors dispatching load outcomes to the store
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The store refused the action, typically during shutdown
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives fetches against a [`StoryGateway`] and dispatches the outcome
///
/// Concurrent loads race: each load takes a fresh token from a monotonic
/// counter, and a load whose token is no longer the latest drops its
/// terminal action instead of dispatching it. The state therefore always
/// reflects the most recently issued load, regardless of response order.
pub struct StoriesLoader<G> {
    store: Arc<StoriesStore>,
    gateway: G,
    retry_policy: RetryPolicy,
    latest_request: AtomicU64,
}

impl<G: StoryGateway> StoriesLoader<G> {
    /// Creates a loader with the default retry policy
    #[must_use]
    pub fn new(store: Arc<StoriesStore>, gateway: G) -> Self {
        Self::with_retry_policy(store, gateway, RetryPolicy::default())
    }

    /// Creates a loader with a custom retry policy
    #[must_use]
    pub fn with_retry_policy(store: Arc<StoriesStore>, gateway: G, retry_policy: RetryPolicy) -> Self {
        Self {
            store,
            gateway,
            retry_policy,
            latest_request: AtomicU64::new(0),
        }
    }

    /// Loads stories for `query` and dispatches the outcome to the store
    ///
    /// An empty or whitespace query is a no-op: no actions are dispatched
    /// and the state is left untouched. Otherwise the load dispatches
    /// `FetchInit`, asks the gateway (retrying per the policy, with a fresh
    /// `FetchInit` at the start of each attempt), and dispatches exactly one
    /// terminal action unless a newer load has started in the meantime.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Store`] when the store rejects a dispatch. A
    /// gateway failure is not an error here; it becomes `FetchFailure`.
    #[tracing::instrument(skip(self), fields(query = %query))]
    pub async fn load(&self, query: &str) -> Result<(), LoadError> {
        if query.trim().is_empty() {
            tracing::debug!("Skipping fetch for empty query");
            return Ok(());
        }

        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::counter!("stories.fetch.started").increment(1);

        let Some(outcome) = self.search_with_retry(query, token).await? else {
            // Superseded mid-flight; the newer load owns the state
            tracing::debug!(token, "Dropping superseded fetch");
            metrics::counter!("stories.fetch.stale_dropped").increment(1);
            return Ok(());
        };

        // A newer load may also have started while the last attempt ran
        if self.latest_request.load(Ordering::SeqCst) != token {
            tracing::debug!(token, "Dropping stale fetch outcome");
            metrics::counter!("stories.fetch.stale_dropped").increment(1);
            return Ok(());
        }

        match outcome {
            Ok(stories) => {
                tracing::info!(count = stories.len(), "Fetch succeeded");
                metrics::counter!("stories.fetch.succeeded").increment(1);
                self.store
                    .send(StoriesAction::FetchSuccess { stories })
                    .await?;
            },
            Err(error) => {
                tracing::warn!(%error, "Fetch failed, giving up");
                metrics::counter!("stories.fetch.failed").increment(1);
                self.store.send(StoriesAction::FetchFailure).await?;
            },
        }

        Ok(())
    }

    /// Run the gateway search under the retry policy
    ///
    /// Dispatches `FetchInit` at the start of every attempt; re-initializing
    /// is idempotent on the state, so observers simply see loading stay on.
    /// Returns `None` when a newer load supersedes this one mid-flight: no
    /// further `FetchInit` may be dispatched then, since the superseding
    /// load's terminal action has already settled (or will settle) the flags
    /// and this load's own terminal action will be dropped.
    async fn search_with_retry(
        &self,
        query: &str,
        token: u64,
    ) -> Result<Option<Result<Vec<Story>, crate::gateway::GatewayError>>, LoadError> {
        let mut attempt: u32 = 0;

        loop {
            // Checked before every FetchInit, not just before the terminal
            // action: a retry waking from backoff after the newer load
            // finished would otherwise strand is_loading
            if self.latest_request.load(Ordering::SeqCst) != token {
                return Ok(None);
            }

            self.store.send(StoriesAction::FetchInit).await?;

            match self.gateway.search(query).await {
                Ok(stories) => return Ok(Some(Ok(stories))),
                Err(error) => {
                    if !self.retry_policy.should_retry(attempt + 1) {
                        return Ok(Some(Err(error)));
                    }

                    let delay = self.retry_policy.delay_for_attempt(attempt);
                    tracing::debug!(attempt, ?delay, %error, "Fetch attempt failed, retrying");
                    metrics::counter!("stories.fetch.retries").increment(1);

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                },
            }
        }
    }
}
