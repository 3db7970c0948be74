//! Single-attempt query cells.
//!
//! Every upstream read in the storefront goes through a [`Query`]: one fetch
//! attempt per call, no cache, no retry. The cell keeps a UI-visible
//! snapshot of the most recent outcome, and commits a response to that
//! snapshot only if no newer call has superseded it - a slow response for
//! stale parameters can never overwrite fresher state. Each failed fetch
//! pushes exactly one notification, regardless of how often the snapshot is
//! observed afterwards.
//!
//! Callers gate their own inputs: an invalid id must be rejected before
//! `run` is ever invoked (the API client double-checks and refuses to issue
//! a request either way).

use std::sync::{Arc, Mutex};

use crate::api::ApiError;
use crate::notify::{Notification, Notifier};

/// UI-visible state of a query cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryState<T> {
    /// Never run.
    #[default]
    Idle,
    /// A fetch is in flight and nothing has ever completed.
    Loading,
    /// Most recent committed success.
    Ready(T),
    /// Most recent committed failure, as a user-facing message.
    Failed(String),
}

impl<T> QueryState<T> {
    /// The committed value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// A query cell keyed by request-parameter identity.
///
/// Cheap to clone; all clones share the same snapshot.
pub struct Query<P, T> {
    inner: Arc<Mutex<QueryInner<P, T>>>,
    notifier: Notifier,
}

// Derived Clone would require P: Clone and T: Clone; the Arc makes both
// unnecessary.
impl<P, T> Clone for Query<P, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            notifier: self.notifier.clone(),
        }
    }
}

struct QueryInner<P, T> {
    /// Bumped on every `run`; a completion only commits if it still matches.
    generation: u64,
    /// Parameters of the most recent `run`.
    params: Option<P>,
    state: QueryState<T>,
}

impl<P, T> Query<P, T>
where
    P: PartialEq,
    T: Clone,
{
    /// Create an idle query cell that reports failures to `notifier`.
    #[must_use]
    pub fn new(notifier: Notifier) -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueryInner {
                generation: 0,
                params: None,
                state: QueryState::Idle,
            })),
            notifier,
        }
    }

    /// Perform one fetch attempt for `params`.
    ///
    /// The fetched value (or error) is always returned to the caller - it
    /// answers THIS call's parameters. The shared snapshot is only updated
    /// when no newer `run` started in the meantime.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error after pushing a single notification.
    pub async fn run<F, Fut>(&self, params: P, fetch: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.params = Some(params);
            if matches!(inner.state, QueryState::Idle) {
                inner.state = QueryState::Loading;
            }
            inner.generation
        };

        // Exactly one attempt; no retry on any failure.
        let result = fetch().await;

        match &result {
            Ok(value) => {
                let mut inner = self.lock();
                if inner.generation == generation {
                    inner.state = QueryState::Ready(value.clone());
                }
            }
            Err(error) => {
                // One notification per failed fetch, superseded or not.
                self.notifier.push(Notification::error(error.user_message()));
                let mut inner = self.lock();
                if inner.generation == generation {
                    inner.state = QueryState::Failed(error.user_message());
                }
            }
        }

        result
    }

    /// The current UI-visible snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QueryState<T> {
        self.lock().state.clone()
    }

    /// Whether `params` matches the most recent `run`.
    #[must_use]
    pub fn is_current(&self, params: &P) -> bool {
        self.lock().params.as_ref() == Some(params)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueryInner<P, T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
