use crate::BoxError;
use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use futures_util::{StreamExt, TryStreamExt};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::{error, fmt, mem};

type BoxStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;
type OnCancel = Box<dyn FnOnce(&str) -> Result<(), BoxError> + Send>;

/// The single-read body of a [`Response`](crate::Response).
///
/// A `Body` is a [`Stream`] of byte chunks. Once it has been read or
/// [canceled](Body::cancel) it yields nothing more.
///
/// Transports that hold resources for an unread body (a pooled connection, a
/// file handle) attach a release hook with [`Body::on_cancel`]. The hook runs
/// at most once, the first time the body is canceled.
pub struct Body {
    kind: Kind,
    on_cancel: Option<OnCancel>,
}

enum Kind {
    Empty,
    Full(Bytes),
    Streaming(BoxStream),
    Canceled,
}

impl Body {
    /// An empty body.
    pub fn empty() -> Self {
        Body {
            kind: Kind::Empty,
            on_cancel: None,
        }
    }

    /// Create a body backed by a stream of chunks.
    pub fn from_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Body {
            kind: Kind::Streaming(Box::pin(stream.map_err(Into::<BoxError>::into))),
            on_cancel: None,
        }
    }

    /// Attach a hook invoked with the reason when this body is canceled.
    ///
    /// An error returned by the hook is reported from [`Body::cancel`].
    pub fn on_cancel<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&str) -> Result<(), BoxError> + Send + 'static,
    {
        self.on_cancel = Some(Box::new(f));
        self
    }

    /// Returns `true` once [`Body::cancel`] has been called.
    pub fn is_canceled(&self) -> bool {
        matches!(self.kind, Kind::Canceled)
    }

    /// Release the body without reading it.
    ///
    /// Any buffered or streamed content is dropped and the release hook, if
    /// one is attached, is run with `reason`.
    ///
    /// # Errors
    ///
    /// Fails if the body was already canceled or if the release hook fails.
    /// In both cases the body is left canceled.
    pub fn cancel(&mut self, reason: &str) -> Result<(), BodyError> {
        if self.is_canceled() {
            return Err(BodyError::already_canceled());
        }

        self.kind = Kind::Canceled;

        match self.on_cancel.take() {
            Some(on_cancel) => on_cancel(reason).map_err(BodyError::release),
            None => Ok(()),
        }
    }

    /// Read the whole body into memory.
    pub async fn bytes(mut self) -> Result<Bytes, BoxError> {
        if self.is_canceled() {
            return Err(BodyError::already_canceled().into());
        }

        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buf.extend_from_slice(&chunk?);
        }

        Ok(buf.freeze())
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl Stream for Body {
    type Item = Result<Bytes, BoxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match mem::replace(&mut self.kind, Kind::Empty) {
            Kind::Full(bytes) if !bytes.is_empty() => Poll::Ready(Some(Ok(bytes))),
            Kind::Streaming(mut stream) => {
                let poll = stream.as_mut().poll_next(cx);
                if !matches!(poll, Poll::Ready(None)) {
                    self.kind = Kind::Streaming(stream);
                }
                poll
            }
            Kind::Canceled => {
                self.kind = Kind::Canceled;
                Poll::Ready(None)
            }
            Kind::Full(_) | Kind::Empty => Poll::Ready(None),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body {
            kind: Kind::Full(bytes),
            on_cancel: None,
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(vec: Vec<u8>) -> Self {
        Body::from(Bytes::from(vec))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::from(Bytes::from(s))
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Body::from(Bytes::from_static(s.as_bytes()))
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Empty => "Empty",
            Kind::Full(_) => "Full",
            Kind::Streaming(_) => "Streaming",
            Kind::Canceled => "Canceled",
        };
        f.debug_struct("Body")
            .field("kind", &kind)
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// The body of an outgoing request.
///
/// Cloning a `RequestBody` never copies its content: buffered bodies share
/// the same [`Bytes`], streaming bodies share the same underlying stream.
/// That makes buffered bodies safe to replay, while a streaming body can only
/// be sent once; see [`RequestBody::is_replayable`].
#[derive(Clone, Default)]
pub struct RequestBody {
    kind: RequestKind,
}

#[derive(Clone, Default)]
enum RequestKind {
    #[default]
    Empty,
    Full(Bytes),
    Streaming(Arc<Mutex<Option<BoxStream>>>),
}

impl RequestBody {
    /// An empty request body.
    pub fn empty() -> Self {
        RequestBody::default()
    }

    /// A single-use request body backed by a stream.
    pub fn from_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        let stream: BoxStream = Box::pin(stream.map_err(Into::<BoxError>::into));
        RequestBody {
            kind: RequestKind::Streaming(Arc::new(Mutex::new(Some(stream)))),
        }
    }

    /// Returns `true` if sending this body again yields the same content.
    pub fn is_replayable(&self) -> bool {
        !matches!(self.kind, RequestKind::Streaming(_))
    }

    /// Returns the buffered content, if this body is buffered.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match &self.kind {
            RequestKind::Full(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Turn this request body into a readable [`Body`].
    ///
    /// A streaming body that was already taken by another clone reads as
    /// empty.
    pub fn into_body(self) -> Body {
        match self.kind {
            RequestKind::Empty => Body::empty(),
            RequestKind::Full(bytes) => Body::from(bytes),
            RequestKind::Streaming(shared) => {
                let stream = match shared.lock() {
                    Ok(mut slot) => slot.take(),
                    Err(poisoned) => poisoned.into_inner().take(),
                };
                match stream {
                    Some(stream) => Body {
                        kind: Kind::Streaming(stream),
                        on_cancel: None,
                    },
                    None => Body::empty(),
                }
            }
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody {
            kind: RequestKind::Full(bytes),
        }
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(vec: Vec<u8>) -> Self {
        RequestBody::from(Bytes::from(vec))
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::from(Bytes::from(s))
    }
}

impl From<&'static str> for RequestBody {
    fn from(s: &'static str) -> Self {
        RequestBody::from(Bytes::from_static(s.as_bytes()))
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RequestKind::Empty => f.write_str("RequestBody::Empty"),
            RequestKind::Full(bytes) => f.debug_tuple("RequestBody::Full").field(bytes).finish(),
            RequestKind::Streaming(_) => f.write_str("RequestBody::Streaming"),
        }
    }
}

/// Error returned by [`Body::cancel`].
#[derive(Debug)]
pub struct BodyError {
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    AlreadyCanceled,
    Release(BoxError),
}

impl BodyError {
    fn already_canceled() -> Self {
        BodyError {
            kind: ErrorKind::AlreadyCanceled,
        }
    }

    fn release(source: BoxError) -> Self {
        BodyError {
            kind: ErrorKind::Release(source),
        }
    }

    /// Returns `true` if the body had already been canceled.
    pub fn is_already_canceled(&self) -> bool {
        matches!(self.kind, ErrorKind::AlreadyCanceled)
    }
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::AlreadyCanceled => f.write_str("body was already canceled"),
            ErrorKind::Release(e) => write!(f, "failed to release body: {}", e),
        }
    }
}

impl error::Error for BodyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::AlreadyCanceled => None,
            ErrorKind::Release(e) => Some(&**e),
        }
    }
}
