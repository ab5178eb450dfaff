//! Future types

use crate::mock::error::{self, Error};
use courier_service::Response;
use futures_util::ready;
use pin_project_lite::pin_project;
use tokio::sync::oneshot;

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

pin_project! {
    /// Future of the `Mock` response.
    #[derive(Debug)]
    pub struct ResponseFuture {
        #[pin]
        rx: Option<Rx>,
    }
}

type Rx = oneshot::Receiver<Result<Response, Error>>;

impl ResponseFuture {
    pub(crate) fn new(rx: Rx) -> ResponseFuture {
        ResponseFuture { rx: Some(rx) }
    }

    pub(crate) fn closed() -> ResponseFuture {
        ResponseFuture { rx: None }
    }
}

impl Future for ResponseFuture {
    type Output = Result<Response, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().rx.as_pin_mut() {
            Some(rx) => match ready!(rx.poll(cx)) {
                Ok(r) => Poll::Ready(r),
                Err(_) => Poll::Ready(Err(error::Closed::new().into())),
            },
            None => Poll::Ready(Err(error::Closed::new().into())),
        }
    }
}
