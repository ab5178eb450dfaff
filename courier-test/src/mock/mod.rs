//! Mock `Fetch` that can be used in tests.

pub mod error;
pub mod future;

use crate::mock::{error::Error, future::ResponseFuture};
use courier_service::{Fetch, RequestInit, Resource, Response};
use tokio::sync::{mpsc, oneshot};

use std::sync::{Arc, Mutex};

/// A mock fetch.
///
/// Every call is forwarded to the linked [`Handle`], which decides how it
/// completes. Clones share the same handle.
#[derive(Debug, Clone)]
pub struct Mock {
    tx: Tx,
    state: Arc<Mutex<State>>,
}

/// Handle to the `Mock`.
#[derive(Debug)]
pub struct Handle {
    rx: Rx,
    state: Arc<Mutex<State>>,
}

type Request = (Resource, RequestInit, SendResponse);

/// Send a response in reply to a received request.
#[derive(Debug)]
pub struct SendResponse {
    tx: oneshot::Sender<Result<Response, Error>>,
}

#[derive(Debug)]
struct State {
    /// Tracks the number of calls made through any clone
    calls: usize,

    /// Tracks if the `Handle` dropped
    is_closed: bool,
}

type Tx = mpsc::UnboundedSender<Request>;
type Rx = mpsc::UnboundedReceiver<Request>;

/// Create a new `Mock` and `Handle` pair.
pub fn pair() -> (Mock, Handle) {
    let (tx, rx) = mpsc::unbounded_channel();

    let state = Arc::new(Mutex::new(State::new()));

    let mock = Mock {
        tx,
        state: state.clone(),
    };

    let handle = Handle { rx, state };

    (mock, handle)
}

impl Fetch for Mock {
    type Error = Error;
    type Future = ResponseFuture;

    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future {
        let mut state = self.state.lock().unwrap();

        state.calls += 1;

        if state.is_closed {
            return ResponseFuture::closed();
        }

        let (tx, rx) = oneshot::channel();
        let send_response = SendResponse { tx };

        match self.tx.send((input, init, send_response)) {
            Ok(_) => {}
            Err(_) => return ResponseFuture::closed(),
        }

        ResponseFuture::new(rx)
    }
}

// ===== impl Handle =====

impl Handle {
    /// Gets the next request.
    pub async fn next_request(&mut self) -> Option<Request> {
        self.rx.recv().await
    }

    /// Gets the next request if one was already made.
    pub fn try_next_request(&mut self) -> Option<Request> {
        self.rx.try_recv().ok()
    }

    /// The number of calls made through the mock so far.
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().calls
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        let mut state = match self.state.lock() {
            Ok(v) => v,
            Err(e) => {
                if ::std::thread::panicking() {
                    return;
                }

                panic!("{:?}", e);
            }
        };

        state.is_closed = true;
    }
}

// ===== impl SendResponse =====

impl SendResponse {
    /// Resolve the pending request future for the linked request with the given response.
    pub fn send_response(self, response: Response) {
        // The caller may have given up on the call already.
        let _ = self.tx.send(Ok(response));
    }

    /// Resolve the pending request future for the linked request with the given error.
    pub fn send_error<E: Into<Error>>(self, err: E) {
        let _ = self.tx.send(Err(err.into()));
    }
}

// ===== impl State =====

impl State {
    fn new() -> State {
        State {
            calls: 0,
            is_closed: false,
        }
    }
}
