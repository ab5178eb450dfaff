/// Asserts that the mock handle receives a new request for the given URL.
///
/// On success, the [`SendResponse`](crate::mock::SendResponse) handle for the
/// matched request is returned, allowing the caller to respond to the
/// request. On failure, the macro panics.
///
/// # Examples
///
/// ```rust
/// use courier_service::{Fetch, RequestInit, Response};
/// use courier_test::{assert_request_eq, mock};
/// use http::StatusCode;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (fetch, mut handle) = mock::pair();
///
/// let response = tokio::spawn(fetch.fetch("https://example.com/".into(), RequestInit::default()));
///
/// assert_request_eq!(handle, "https://example.com/")
///     .send_response(Response::new(StatusCode::OK));
///
/// assert!(response.await.unwrap().unwrap().ok());
/// # }
/// ```
#[macro_export]
macro_rules! assert_request_eq {
    ($mock_handle:expr, $expect:expr) => {
        $crate::assert_request_eq!($mock_handle, $expect,)
    };
    ($mock_handle:expr, $expect:expr, $($arg:tt)*) => {{
        let (actual, _init, send_response) = match $mock_handle.next_request().await {
            Some(r) => r,
            None => panic!("expected a request but none was received."),
        };

        assert_eq!(actual.url(), $expect, $($arg)*);
        send_response
    }};
}
