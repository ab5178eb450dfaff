use courier_service::{Fetch, RequestInit, Resource, Response};
use std::fmt;
use std::future::Future;

/// Returns a new [`FetchFn`] with the given closure.
///
/// This is the usual way to provide the base fetch of a chain: the transport
/// that actually performs the exchange, or a stand-in for one in tests.
///
/// # Example
///
/// ```
/// use courier::{fetch_fn, Fetch, RequestInit, Resource, Response};
/// use http::StatusCode;
///
/// # async fn doc() {
/// let transport = fetch_fn(|input: Resource, _init: RequestInit| async move {
///     Ok::<_, std::convert::Infallible>(Response::new(StatusCode::OK).with_url(input.url()))
/// });
///
/// let res = transport.fetch("https://example.com/".into(), RequestInit::default()).await.unwrap();
/// assert_eq!(res.url(), "https://example.com/");
/// # }
/// ```
pub fn fetch_fn<T>(f: T) -> FetchFn<T> {
    FetchFn { f }
}

/// A [`Fetch`] implemented by a closure.
#[derive(Copy, Clone)]
pub struct FetchFn<T> {
    f: T,
}

impl<T> fmt::Debug for FetchFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchFn")
            .field("f", &format_args!("{}", std::any::type_name::<T>()))
            .finish()
    }
}

impl<T, Fut, E> Fetch for FetchFn<T>
where
    T: Fn(Resource, RequestInit) -> Fut,
    Fut: Future<Output = Result<Response, E>>,
{
    type Error = E;
    type Future = Fut;

    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        (self.f)(input, init)
    }
}
