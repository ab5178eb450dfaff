//! Retry exchanges the server asked to retry later.
//!
//! [`RetryAfter`] evaluates `429 Too Many Requests` and
//! `503 Service Unavailable` responses that carry a `Retry-After` header. The
//! header is either a number of seconds or an HTTP date; see
//! [`parse_retry_after`]. When retries remain, the failed response's body is
//! released, the coordinator waits for the requested delay and the request is
//! issued again. Any other response, including one with a missing or
//! unreadable directive, is returned as it is.
//!
//! A directive longer than the configured maximum delay fails the call with
//! a [`Canceled`](crate::error::Canceled) error whose
//! [`is_delay_exceeded`](crate::error::Canceled::is_delay_exceeded) is `true`.

mod directive;
pub mod future;
mod layer;

pub use self::directive::{parse_retry_after, retry_after};
pub use self::layer::RetryAfterLayer;

use self::future::ResponseFuture;
use courier_service::{cancel_token, BoxError, Fetch, RequestInit, Resource};
use std::time::Duration;

/// Retry `429` and `503` responses as directed by their `Retry-After` header.
///
/// The inner fetch is cloned into every [`ResponseFuture`] so that the
/// request can be issued again.
#[derive(Clone, Debug)]
pub struct RetryAfter<F> {
    inner: F,
    max_retries: u32,
    max_delay: Option<Duration>,
}

impl<F> RetryAfter<F> {
    /// Retry at most `max_retries` times per call, with no cap on the delay.
    pub fn new(inner: F, max_retries: u32) -> Self {
        RetryAfter {
            inner,
            max_retries,
            max_delay: None,
        }
    }

    /// Refuse server-directed delays longer than `max_delay`.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Get a reference to the inner fetch
    pub fn get_ref(&self) -> &F {
        &self.inner
    }

    /// Get a mutable reference to the inner fetch
    pub fn get_mut(&mut self) -> &mut F {
        &mut self.inner
    }

    /// Consume `self`, returning the inner fetch
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F> Fetch for RetryAfter<F>
where
    F: Fetch + Clone,
    F::Error: Into<BoxError>,
{
    type Error = BoxError;
    type Future = ResponseFuture<F>;

    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        let cancel = cancel_token(&input, &init);
        let future = self.inner.fetch(input.clone(), init.clone());

        ResponseFuture::new(
            self.inner.clone(),
            input,
            init,
            cancel,
            self.max_retries,
            self.max_delay,
            future,
        )
    }
}
