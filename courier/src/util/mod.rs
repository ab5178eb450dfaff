//! Various utility types and functions that are generally used with courier.

mod boxed;
mod fetch_fn;
mod map_request;
mod map_response;
pub mod rng;

pub use self::{
    boxed::{boxed_executor, BoxFetch, BoxFuture},
    fetch_fn::{fetch_fn, FetchFn},
    map_request::{MapRequest, MapRequestLayer},
    map_response::{MapResponse, MapResponseFuture, MapResponseLayer},
};

use courier_layer::Executor;
use courier_service::{BoxError, Fetch, RequestInit, Resource, Response};

/// An extension trait for [`Fetch`]es that provides a variety of convenient
/// adapters.
pub trait FetchExt: Fetch {
    /// Rewrite the input and overrides of every call before passing them on.
    ///
    /// # Example
    ///
    /// ```
    /// use courier::{fetch_fn, Fetch, FetchExt, RequestInit, Resource, Response};
    /// use http::StatusCode;
    ///
    /// # async fn doc() {
    /// let transport = fetch_fn(|input: Resource, _init: RequestInit| async move {
    ///     Ok::<_, courier::BoxError>(Response::new(StatusCode::OK).with_url(input.url()))
    /// });
    ///
    /// let versioned = transport.map_request(|input: Resource, init| {
    ///     (format!("{}?v=2", input.url()).into(), init)
    /// });
    ///
    /// let res = versioned.fetch("https://example.com/".into(), RequestInit::default()).await.unwrap();
    /// assert_eq!(res.url(), "https://example.com/?v=2");
    /// # }
    /// ```
    fn map_request<T>(self, f: T) -> MapRequest<Self, T>
    where
        Self: Sized,
        T: Fn(Resource, RequestInit) -> (Resource, RequestInit),
    {
        MapRequest::new(self, f)
    }

    /// Rewrite every successfully received [`Response`].
    fn map_response<T>(self, f: T) -> MapResponse<Self, T>
    where
        Self: Sized,
        T: FnOnce(Response) -> Response + Clone,
    {
        MapResponse::new(self, f)
    }

    /// Wrap this fetch with `executor`.
    fn with<E>(self, executor: E) -> E::Fetch
    where
        Self: Sized,
        E: Executor<Self>,
    {
        executor.wrap(self)
    }

    /// Erase the type of this fetch.
    fn boxed(self) -> BoxFetch
    where
        Self: Sized + Send + Sync + 'static,
        Self::Error: Into<BoxError> + 'static,
        Self::Future: Send + 'static,
    {
        BoxFetch::new(self)
    }
}

impl<F: Fetch + ?Sized> FetchExt for F {}
