use courier_layer::Executor;
use courier_service::{Fetch, RequestInit, Resource, Response};
use futures_util::TryFutureExt;

pub use futures_util::future::MapOk as MapResponseFuture;

/// Fetch returned by the [`map_response`] combinator.
///
/// [`map_response`]: crate::util::FetchExt::map_response
#[derive(Clone, Debug)]
pub struct MapResponse<F, T> {
    inner: F,
    f: T,
}

impl<F, T> MapResponse<F, T> {
    /// Creates a new [`MapResponse`] fetch.
    pub fn new(inner: F, f: T) -> Self {
        MapResponse { inner, f }
    }
}

impl<F, T> Fetch for MapResponse<F, T>
where
    F: Fetch,
    T: FnOnce(Response) -> Response + Clone,
{
    type Error = F::Error;
    type Future = MapResponseFuture<F::Future, T>;

    #[inline]
    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        self.inner.fetch(input, init).map_ok(self.f.clone())
    }
}

/// An [`Executor`] that produces [`MapResponse`] fetches.
#[derive(Clone, Debug)]
pub struct MapResponseLayer<T> {
    f: T,
}

impl<T> MapResponseLayer<T> {
    /// Creates a new [`MapResponseLayer`].
    pub fn new(f: T) -> Self {
        MapResponseLayer { f }
    }
}

impl<F, T> Executor<F> for MapResponseLayer<T>
where
    T: Clone,
{
    type Fetch = MapResponse<F, T>;

    fn wrap(&self, inner: F) -> Self::Fetch {
        MapResponse {
            f: self.f.clone(),
            inner,
        }
    }
}
