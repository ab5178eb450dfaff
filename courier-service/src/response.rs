use crate::{Body, BoxError};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};

/// The result of a completed exchange.
///
/// A `Response` is produced for every status, successful or not; use
/// [`Response::ok`] to check for a `2xx` status.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    status_text: String,
    url: String,
    headers: HeaderMap,
    body: Body,
}

impl Response {
    /// Create a response with the given status, the canonical status text,
    /// no headers and an empty body.
    pub fn new(status: StatusCode) -> Self {
        Response {
            status,
            status_text: status.canonical_reason().unwrap_or("").to_owned(),
            url: String::new(),
            headers: HeaderMap::new(),
            body: Body::empty(),
        }
    }

    /// Set the status text.
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Set the url the response was fetched from.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// The status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The status text sent by the server.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Returns `true` if the status is in the range `200..=299`.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// The url the response was fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A mutable reference to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The response body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// A mutable reference to the response body.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Consume the response, returning its body.
    pub fn into_body(self) -> Body {
        self.body
    }

    /// Read the whole body.
    pub async fn bytes(self) -> Result<Bytes, BoxError> {
        self.body.bytes().await
    }

    /// Read the whole body as UTF-8 text.
    pub async fn text(self) -> Result<String, BoxError> {
        let bytes = self.body.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
