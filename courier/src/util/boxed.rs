use courier_layer::{executor_fn, DynExecutor, Executor};
use courier_service::{BoxError, Fetch, RequestInit, Resource, Response};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed `Future + Send` trait object resolving to a [`Response`].
pub type BoxFuture = Pin<Box<dyn Future<Output = Result<Response, BoxError>> + Send + 'static>>;

/// A cloneable, type-erased [`Fetch`].
///
/// Chains assembled at runtime with [`compose`](crate::compose) and
/// [`pipeline`](crate::pipeline) work over a single fetch type; `BoxFetch` is
/// that type. Every executor in such a chain is turned into a
/// [`DynExecutor<BoxFetch>`] with [`boxed_executor`].
///
/// Clones share the underlying fetch.
#[derive(Clone)]
pub struct BoxFetch {
    inner: Arc<dyn Fetch<Error = BoxError, Future = BoxFuture> + Send + Sync>,
}

impl BoxFetch {
    /// Erase the type of `inner`.
    pub fn new<F>(inner: F) -> Self
    where
        F: Fetch + Send + Sync + 'static,
        F::Error: Into<BoxError> + 'static,
        F::Future: Send + 'static,
    {
        BoxFetch {
            inner: Arc::new(Boxed { inner }),
        }
    }

    /// Returns `true` if both handles share the same fetch.
    pub fn ptr_eq(a: &BoxFetch, b: &BoxFetch) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Fetch for BoxFetch {
    type Error = BoxError;
    type Future = BoxFuture;

    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        self.inner.fetch(input, init)
    }
}

impl fmt::Debug for BoxFetch {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("BoxFetch").finish()
    }
}

struct Boxed<F> {
    inner: F,
}

impl<F> Fetch for Boxed<F>
where
    F: Fetch,
    F::Error: Into<BoxError> + 'static,
    F::Future: Send + 'static,
{
    type Error = BoxError;
    type Future = BoxFuture;

    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        let future = self.inner.fetch(input, init);
        Box::pin(async move { future.await.map_err(Into::into) })
    }
}

/// Turn a statically typed executor into a [`DynExecutor<BoxFetch>`] for use
/// with [`compose`](crate::compose) and [`pipeline`](crate::pipeline).
///
/// # Example
///
/// ```
/// use courier::retry_after::RetryAfterLayer;
/// use courier::util::boxed_executor;
/// use courier::pipeline;
///
/// let chain = pipeline(vec![
///     boxed_executor(RetryAfterLayer::new().max_retries(2)),
/// ]);
/// assert_eq!(chain.len(), 1);
/// ```
pub fn boxed_executor<E>(executor: E) -> DynExecutor<BoxFetch>
where
    E: Executor<BoxFetch> + Send + Sync + 'static,
    E::Fetch: Fetch + Send + Sync + 'static,
    <E::Fetch as Fetch>::Error: Into<BoxError> + 'static,
    <E::Fetch as Fetch>::Future: Send + 'static,
{
    Arc::new(executor_fn(move |inner: BoxFetch| {
        BoxFetch::new(executor.wrap(inner))
    }))
}
