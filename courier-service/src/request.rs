use crate::RequestBody;
use http::{HeaderMap, Method};
use tokio_util::sync::CancellationToken;

/// A structured request: method, url, headers, body and an optional
/// cancellation token.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: RequestBody,
    cancel: Option<CancellationToken>,
}

impl Request {
    /// Create a `GET` request for `url` with no headers and an empty body.
    pub fn new(url: impl Into<String>) -> Self {
        Request {
            method: Method::GET,
            url: url.into(),
            headers: HeaderMap::new(),
            body: RequestBody::empty(),
            cancel: None,
        }
    }

    /// Set the method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Replace the headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request url.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A mutable reference to the request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The request body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// The cancellation token embedded in this request, if any.
    pub fn cancel(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Consume the request, returning its body.
    pub fn into_body(self) -> RequestBody {
        self.body
    }
}

/// The target of a [`Fetch`](crate::Fetch) call.
#[derive(Debug, Clone)]
pub enum Resource {
    /// A plain URL, fetched with the defaults and any [`RequestInit`] overrides.
    Url(String),
    /// A structured request.
    Request(Request),
}

impl Resource {
    /// The URL this resource points to.
    pub fn url(&self) -> &str {
        match self {
            Resource::Url(url) => url,
            Resource::Request(req) => req.url(),
        }
    }

    /// The structured request, if this resource carries one.
    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Resource::Url(_) => None,
            Resource::Request(req) => Some(req),
        }
    }

    /// Returns `true` if this resource can be sent more than once.
    pub fn is_replayable(&self) -> bool {
        self.as_request()
            .map_or(true, |req| req.body().is_replayable())
    }

    /// Merge `init` into a single structured [`Request`].
    ///
    /// Each field present in `init` replaces the corresponding field of the
    /// resource. Headers are replaced as a whole, not merged.
    pub fn into_request(self, init: RequestInit) -> Request {
        let req = match self {
            Resource::Url(url) => Request::new(url),
            Resource::Request(req) => req,
        };

        Request {
            method: init.method.unwrap_or(req.method),
            url: req.url,
            headers: init.headers.unwrap_or(req.headers),
            body: init.body.unwrap_or(req.body),
            cancel: init.cancel.or(req.cancel),
        }
    }
}

impl From<&str> for Resource {
    fn from(url: &str) -> Self {
        Resource::Url(url.to_owned())
    }
}

impl From<String> for Resource {
    fn from(url: String) -> Self {
        Resource::Url(url)
    }
}

impl From<Request> for Resource {
    fn from(req: Request) -> Self {
        Resource::Request(req)
    }
}

/// Per-call overrides passed alongside a [`Resource`].
///
/// `RequestInit::default()` overrides nothing.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// Override the request method.
    pub method: Option<Method>,
    /// Replace the request headers.
    pub headers: Option<HeaderMap>,
    /// Replace the request body.
    pub body: Option<RequestBody>,
    /// Cancellation token for this call. Takes precedence over a token
    /// embedded in the [`Request`].
    pub cancel: Option<CancellationToken>,
}

impl RequestInit {
    /// No overrides.
    pub fn new() -> Self {
        RequestInit::default()
    }

    /// Override the method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Replace the headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Cancel the call when `token` fires.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns `true` if the overridden body, if any, can be sent more than
    /// once.
    pub fn is_replayable(&self) -> bool {
        self.body.as_ref().map_or(true, RequestBody::is_replayable)
    }
}

/// Resolve the cancellation token governing a call.
///
/// The token in `init` wins; otherwise the token embedded in a structured
/// request is used.
pub fn cancel_token(input: &Resource, init: &RequestInit) -> Option<CancellationToken> {
    init.cancel
        .clone()
        .or_else(|| input.as_request().and_then(|req| req.cancel().cloned()))
}

/// Returns `true` if the body a call actually sends can be sent again.
///
/// A body in `init` replaces the request's own body, so only the override is
/// checked when one is present.
pub fn is_replayable(input: &Resource, init: &RequestInit) -> bool {
    init.body
        .as_ref()
        .map_or_else(|| input.is_replayable(), RequestBody::is_replayable)
}
