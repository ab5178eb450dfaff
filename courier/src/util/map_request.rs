use courier_layer::Executor;
use courier_service::{Fetch, RequestInit, Resource};

/// Fetch returned by the [`map_request`] combinator.
///
/// [`map_request`]: crate::util::FetchExt::map_request
#[derive(Clone, Debug)]
pub struct MapRequest<F, T> {
    inner: F,
    f: T,
}

impl<F, T> MapRequest<F, T> {
    /// Creates a new [`MapRequest`] fetch.
    pub fn new(inner: F, f: T) -> Self {
        MapRequest { inner, f }
    }
}

impl<F, T> Fetch for MapRequest<F, T>
where
    F: Fetch,
    T: Fn(Resource, RequestInit) -> (Resource, RequestInit),
{
    type Error = F::Error;
    type Future = F::Future;

    #[inline]
    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        let (input, init) = (self.f)(input, init);
        self.inner.fetch(input, init)
    }
}

/// An [`Executor`] that produces [`MapRequest`] fetches.
#[derive(Clone, Debug)]
pub struct MapRequestLayer<T> {
    f: T,
}

impl<T> MapRequestLayer<T> {
    /// Creates a new [`MapRequestLayer`].
    pub fn new(f: T) -> Self {
        MapRequestLayer { f }
    }
}

impl<F, T> Executor<F> for MapRequestLayer<T>
where
    T: Clone,
{
    type Fetch = MapRequest<F, T>;

    fn wrap(&self, inner: F) -> Self::Fetch {
        MapRequest {
            f: self.f.clone(),
            inner,
        }
    }
}
