use super::{RetryableStatuses, StatusRetry};
use courier_layer::Executor;

/// Retry exchanges that complete with a retryable status.
///
/// `make_backoff` is cloned into every [`StatusRetry`] this layer wraps, and
/// asked for a fresh [`Backoff`](super::backoff::Backoff) on every call.
#[derive(Debug, Clone)]
pub struct StatusRetryLayer<M> {
    make_backoff: M,
    statuses: RetryableStatuses,
}

impl<M> StatusRetryLayer<M> {
    /// Retry the default [`RetryableStatuses`], pacing retries with backoffs
    /// made by `make_backoff`.
    pub fn new(make_backoff: M) -> Self {
        StatusRetryLayer {
            make_backoff,
            statuses: RetryableStatuses::default(),
        }
    }

    /// Replace the set of statuses that are retried.
    pub fn retryable_statuses(mut self, statuses: RetryableStatuses) -> Self {
        self.statuses = statuses;
        self
    }
}

impl<F, M> Executor<F> for StatusRetryLayer<M>
where
    M: Clone,
{
    type Fetch = StatusRetry<F, M>;

    fn wrap(&self, inner: F) -> Self::Fetch {
        StatusRetry::new(inner, self.make_backoff.clone()).with_statuses(self.statuses.clone())
    }
}
