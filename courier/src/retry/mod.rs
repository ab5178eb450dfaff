//! Retry exchanges that complete with a failing status.
//!
//! [`StatusRetry`] looks at the status of every response its inner fetch
//! produces. Successful responses, and failures outside its
//! [`RetryableStatuses`], are returned as they are. For a retryable failure it
//! asks the call's [`Backoff`] for a delay, releases the failed response's
//! body, waits, and issues the same request again. When the backoff gives up
//! the last failing response is returned: exhausting retries is not an error.
//!
//! A cancellation token attached to the request cuts the wait short with a
//! [`Canceled`](crate::error::Canceled) error.
//!
//! [`Backoff`]: backoff::Backoff

pub mod backoff;
pub mod future;
mod layer;
mod statuses;

pub use self::layer::StatusRetryLayer;
pub use self::statuses::RetryableStatuses;

use self::backoff::MakeBackoff;
use self::future::ResponseFuture;
use courier_service::{cancel_token, BoxError, Fetch, RequestInit, Resource};

/// Retry exchanges that complete with a retryable status.
///
/// # Clone
///
/// The inner fetch is cloned into every [`ResponseFuture`] so that the
/// request can be issued again. Fetches that are not `Clone` can be wrapped
/// in an [`Arc`](std::sync::Arc) or boxed with
/// [`BoxFetch`](crate::util::BoxFetch).
///
/// # Concurrency
///
/// `make_backoff` is invoked once per call to [`Fetch::fetch`], so concurrent
/// calls through the same `StatusRetry` keep independent retry state.
#[derive(Clone, Debug)]
pub struct StatusRetry<F, M> {
    inner: F,
    make_backoff: M,
    statuses: RetryableStatuses,
}

impl<F, M> StatusRetry<F, M> {
    /// Retry the default [`RetryableStatuses`] of `inner`.
    pub fn new(inner: F, make_backoff: M) -> Self {
        StatusRetry {
            inner,
            make_backoff,
            statuses: RetryableStatuses::default(),
        }
    }

    /// Replace the set of statuses that are retried.
    pub fn with_statuses(mut self, statuses: RetryableStatuses) -> Self {
        self.statuses = statuses;
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

impl<F, M> Fetch for StatusRetry<F, M>
where
    F: Fetch + Clone,
    F::Error: Into<BoxError>,
    M: MakeBackoff,
{
    type Error = BoxError;
    type Future = ResponseFuture<F, M::Backoff>;

    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        let backoff = self.make_backoff.make_backoff();
        let cancel = cancel_token(&input, &init);
        let future = self.inner.fetch(input.clone(), init.clone());

        ResponseFuture::new(
            self.inner.clone(),
            input,
            init,
            cancel,
            backoff,
            self.statuses.clone(),
            future,
        )
    }
}
