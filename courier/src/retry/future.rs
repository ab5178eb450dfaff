//! Future types

use super::backoff::Backoff;
use super::RetryableStatuses;
use crate::release::release_body;
use crate::wait::{wait, Wait};
use courier_service::{is_replayable, BoxError, Fetch, RequestInit, Resource, Response};
use futures_core::ready;
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::sync::CancellationToken;

pin_project! {
    /// The [`Future`] returned by a [`StatusRetry`](super::StatusRetry) fetch.
    #[derive(Debug)]
    pub struct ResponseFuture<F, B>
    where
        F: Fetch,
    {
        inner: F,
        input: Resource,
        init: RequestInit,
        cancel: Option<CancellationToken>,
        backoff: B,
        statuses: RetryableStatuses,
        retries: u32,
        #[pin]
        state: State<F::Future>,
    }
}

pin_project! {
    #[project = StateProj]
    #[derive(Debug)]
    enum State<Fut> {
        // Polling the future from [`Fetch::fetch`]
        Called {
            #[pin]
            future: Fut
        },
        // Sleeping before the next attempt.
        Waiting {
            #[pin]
            wait: Wait
        },
    }
}

impl<F, B> ResponseFuture<F, B>
where
    F: Fetch,
{
    pub(crate) fn new(
        inner: F,
        input: Resource,
        init: RequestInit,
        cancel: Option<CancellationToken>,
        backoff: B,
        statuses: RetryableStatuses,
        future: F::Future,
    ) -> Self {
        ResponseFuture {
            inner,
            input,
            init,
            cancel,
            backoff,
            statuses,
            retries: 0,
            state: State::Called { future },
        }
    }
}

impl<F, B> Future for ResponseFuture<F, B>
where
    F: Fetch,
    F::Error: Into<BoxError>,
    B: Backoff,
{
    type Output = Result<Response, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.state.as_mut().project() {
                StateProj::Called { future } => {
                    let response = match ready!(future.poll(cx)) {
                        Ok(response) => response,
                        Err(error) => return Poll::Ready(Err(error.into())),
                    };

                    if response.ok() || !this.statuses.contains(response.status()) {
                        return Poll::Ready(Ok(response));
                    }

                    if !is_replayable(this.input, this.init) {
                        tracing::debug!(
                            status = %response.status(),
                            "request body cannot be replayed; not retrying"
                        );
                        return Poll::Ready(Ok(response));
                    }

                    let delay = match this.backoff.next_backoff() {
                        Some(delay) => delay,
                        None => {
                            tracing::debug!(
                                status = %response.status(),
                                retries = *this.retries,
                                "backoff exhausted; returning last response"
                            );
                            return Poll::Ready(Ok(response));
                        }
                    };

                    *this.retries += 1;
                    tracing::debug!(
                        status = %response.status(),
                        url = %this.input.url(),
                        retry = *this.retries,
                        ?delay,
                        "retrying request"
                    );

                    release_body(response);

                    let wait = wait(delay, this.cancel.clone())?;
                    this.state.set(State::Waiting { wait });
                }
                StateProj::Waiting { wait } => {
                    ready!(wait.poll(cx))?;

                    let future = this.inner.fetch(this.input.clone(), this.init.clone());
                    this.state.set(State::Called { future });
                }
            }
        }
    }
}
