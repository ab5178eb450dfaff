//! Builder types to compose executors and fetches

use courier_layer::{Executor, Identity, Stack};
use std::fmt;

/// Declaratively construct [`Fetch`](crate::Fetch) values.
///
/// `ChainBuilder` provides a [builder-like interface][builder] for composing
/// executors around a base fetch, usually the transport that actually talks to
/// the network.
///
/// [builder]: https://doc.rust-lang.org/1.0.0/style/ownership/builders.html
///
/// # Order
///
/// The order in which executors are added impacts how requests are handled.
/// Executors that are added first will be called with the request first, in
/// the same order as [`pipeline`](crate::pipeline). The argument to
/// [`fetch`](Self::fetch) will be last to see the request.
///
/// ```
/// # #[cfg(all(feature = "retry", feature = "retry-after"))]
/// # fn wrap<F>(transport: F) where F: courier::Fetch + Clone, F::Error: Into<courier::BoxError> {
/// use courier::retry::backoff::ExponentialBackoffMaker;
/// use courier::ChainBuilder;
///
/// ChainBuilder::new()
///     .retry_after(3)
///     .retry_status(ExponentialBackoffMaker::default())
///     .fetch(transport)
/// # ;
/// # }
/// ```
///
/// In the above example, the `Retry-After` coordinator sees the outcome of
/// the status coordinator: it only acts on a `429` or `503` once the status
/// coordinator has given up on it.
#[derive(Clone)]
pub struct ChainBuilder<L> {
    executor: L,
}

impl Default for ChainBuilder<Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainBuilder<Identity> {
    /// Create a new `ChainBuilder`.
    pub fn new() -> Self {
        ChainBuilder {
            executor: Identity::new(),
        }
    }
}

impl<L> ChainBuilder<L> {
    /// Add a new executor `T` into the `ChainBuilder`.
    pub fn executor<T>(self, executor: T) -> ChainBuilder<Stack<T, L>> {
        ChainBuilder {
            executor: Stack::new(executor, self.executor),
        }
    }

    /// Retry exchanges completing with one of the default
    /// [`RetryableStatuses`](crate::retry::RetryableStatuses).
    ///
    /// `make_backoff` must implement
    /// [`MakeBackoff`](crate::retry::backoff::MakeBackoff); a closure
    /// returning a fresh [`Backoff`](crate::retry::backoff::Backoff) does.
    #[cfg(feature = "retry")]
    #[cfg_attr(docsrs, doc(cfg(feature = "retry")))]
    pub fn retry_status<M>(
        self,
        make_backoff: M,
    ) -> ChainBuilder<Stack<crate::retry::StatusRetryLayer<M>, L>> {
        self.executor(crate::retry::StatusRetryLayer::new(make_backoff))
    }

    /// Retry `429` and `503` responses at most `max_retries` times, waiting as
    /// long as their `Retry-After` header says.
    #[cfg(feature = "retry-after")]
    #[cfg_attr(docsrs, doc(cfg(feature = "retry-after")))]
    pub fn retry_after(
        self,
        max_retries: u32,
    ) -> ChainBuilder<Stack<crate::retry_after::RetryAfterLayer, L>> {
        self.executor(crate::retry_after::RetryAfterLayer::new().max_retries(max_retries))
    }

    /// Rewrite the input and overrides of each call before passing them on.
    #[cfg(feature = "util")]
    #[cfg_attr(docsrs, doc(cfg(feature = "util")))]
    pub fn map_request<T>(
        self,
        f: T,
    ) -> ChainBuilder<Stack<crate::util::MapRequestLayer<T>, L>> {
        self.executor(crate::util::MapRequestLayer::new(f))
    }

    /// Rewrite each successfully received response.
    #[cfg(feature = "util")]
    #[cfg_attr(docsrs, doc(cfg(feature = "util")))]
    pub fn map_response<T>(
        self,
        f: T,
    ) -> ChainBuilder<Stack<crate::util::MapResponseLayer<T>, L>> {
        self.executor(crate::util::MapResponseLayer::new(f))
    }

    /// Obtains the underlying `Executor` implementation.
    pub fn into_inner(self) -> L {
        self.executor
    }

    /// Wrap the fetch `F` with the executors.
    pub fn fetch<F>(self, fetch: F) -> L::Fetch
    where
        L: Executor<F>,
    {
        self.executor.wrap(fetch)
    }

    /// Wrap the closure `f` with the executors.
    ///
    /// This is a convenience for `builder.fetch(fetch_fn(f))`.
    #[cfg(feature = "util")]
    #[cfg_attr(docsrs, doc(cfg(feature = "util")))]
    pub fn fetch_fn<T>(self, f: T) -> L::Fetch
    where
        L: Executor<crate::util::FetchFn<T>>,
    {
        self.fetch(crate::util::fetch_fn(f))
    }
}

impl<L: fmt::Debug> fmt::Debug for ChainBuilder<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChainBuilder").field(&self.executor).finish()
    }
}
