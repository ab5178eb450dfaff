//! Future types

use super::directive::retry_after;
use crate::error::Canceled;
use crate::release::release_body;
use crate::wait::{wait, Wait};
use courier_service::{is_replayable, BoxError, Fetch, RequestInit, Resource, Response};
use futures_core::ready;
use http::StatusCode;
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;

pin_project! {
    /// The [`Future`] returned by a [`RetryAfter`](super::RetryAfter) fetch.
    #[derive(Debug)]
    pub struct ResponseFuture<F>
    where
        F: Fetch,
    {
        inner: F,
        input: Resource,
        init: RequestInit,
        cancel: Option<CancellationToken>,
        max_retries: u32,
        max_delay: Option<Duration>,
        retries: u32,
        #[pin]
        state: State<F::Future>,
    }
}

pin_project! {
    #[project = StateProj]
    #[derive(Debug)]
    enum State<Fut> {
        Called {
            #[pin]
            future: Fut
        },
        Waiting {
            #[pin]
            wait: Wait
        },
    }
}

impl<F> ResponseFuture<F>
where
    F: Fetch,
{
    pub(crate) fn new(
        inner: F,
        input: Resource,
        init: RequestInit,
        cancel: Option<CancellationToken>,
        max_retries: u32,
        max_delay: Option<Duration>,
        future: F::Future,
    ) -> Self {
        ResponseFuture {
            inner,
            input,
            init,
            cancel,
            max_retries,
            max_delay,
            retries: 0,
            state: State::Called { future },
        }
    }
}

fn is_directed(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE
}

impl<F> Future for ResponseFuture<F>
where
    F: Fetch,
    F::Error: Into<BoxError>,
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

                    if response.ok() || !is_directed(response.status()) {
                        return Poll::Ready(Ok(response));
                    }

                    if *this.retries >= *this.max_retries {
                        if *this.max_retries > 0 {
                            tracing::debug!(
                                status = %response.status(),
                                retries = *this.retries,
                                "retries exhausted; returning last response"
                            );
                        }
                        return Poll::Ready(Ok(response));
                    }

                    let delay = match retry_after(response.headers(), SystemTime::now()) {
                        Some(delay) => delay,
                        None => {
                            tracing::trace!(
                                status = %response.status(),
                                "no usable Retry-After directive"
                            );
                            return Poll::Ready(Ok(response));
                        }
                    };

                    if let Some(max_delay) = *this.max_delay {
                        if delay > max_delay {
                            tracing::debug!(?delay, ?max_delay, "Retry-After delay refused");
                            return Poll::Ready(Err(
                                Canceled::delay_exceeded(delay, max_delay).into()
                            ));
                        }
                    }

                    if !is_replayable(this.input, this.init) {
                        tracing::debug!(
                            status = %response.status(),
                            "request body cannot be replayed; not retrying"
                        );
                        return Poll::Ready(Ok(response));
                    }

                    *this.retries += 1;
                    tracing::debug!(
                        status = %response.status(),
                        url = %this.input.url(),
                        retry = *this.retries,
                        ?delay,
                        "retrying request as directed by Retry-After"
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
