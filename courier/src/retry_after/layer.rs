use super::RetryAfter;
use courier_layer::Executor;
use std::time::Duration;

/// Retry `429` and `503` responses as directed by their `Retry-After` header.
///
/// By default nothing is retried: set [`max_retries`](Self::max_retries) to
/// enable retrying.
///
/// Without a [`max_delay`](Self::max_delay) every directed delay is honored up
/// to [`MAX_DELAY`](crate::wait::MAX_DELAY). A server asking for longer fails
/// the call with [`DelayOverflow`](crate::error::DelayOverflow) after the
/// response body has been released, so set `max_delay` when talking to
/// servers you do not trust.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryAfterLayer {
    max_retries: u32,
    max_delay: Option<Duration>,
}

impl RetryAfterLayer {
    /// A layer that never retries until configured.
    pub fn new() -> Self {
        RetryAfterLayer::default()
    }

    /// Retry at most `max_retries` times per call. Zero disables retrying.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Refuse server-directed delays longer than `max_delay`.
    ///
    /// A longer delay fails the call with a
    /// [`Canceled`](crate::error::Canceled) error before any waiting.
    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }
}

impl<F> Executor<F> for RetryAfterLayer {
    type Fetch = RetryAfter<F>;

    fn wrap(&self, inner: F) -> Self::Fetch {
        let fetch = RetryAfter::new(inner, self.max_retries);
        match self.max_delay {
            Some(max_delay) => fetch.with_max_delay(max_delay),
            None => fetch,
        }
    }
}
