#![cfg(feature = "retry")]
#[path = "../support.rs"]
mod support;

use courier::error::Canceled;
use courier::retry::backoff::ConstantBackoff;
use courier::retry::{RetryableStatuses, StatusRetry, StatusRetryLayer};
use courier::{Executor, Fetch, Request, RequestBody, RequestInit, RETRY_SCHEDULED};
use courier_test::body::{failing_probe, probe, probe_into, ReleaseLog};
use courier_test::{assert_request_eq, mock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_test::{assert_pending, assert_ready_err, task};
use tokio_util::sync::CancellationToken;

const URL: &str = "https://example.com/resource";

fn one_second(max_retries: u32) -> impl Fn() -> ConstantBackoff + Clone {
    move || ConstantBackoff::new(Duration::from_secs(1), max_retries)
}

#[tokio::test(start_paused = true)]
async fn ok_response_is_not_retried() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = probe("fine");
    assert_request_eq!(handle, URL).send_response(support::respond(200, body));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "fine");
    assert_eq!(handle.request_count(), 1);
    assert_eq!(released.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn ok_response_is_not_retried_even_when_listed() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetryLayer::new(one_second(3))
        .retryable_statuses(RetryableStatuses::new(vec![support::status(200)]))
        .wrap(fetch);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = probe("fine");
    assert_request_eq!(handle, URL).send_response(support::respond(200, body));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(handle.request_count(), 1);
    assert_eq!(released.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn single_retry_after_one_second() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, || {
        ConstantBackoff::new(Duration::from_millis(1000), 1)
    });

    let start = Instant::now();
    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::respond(500, "boom".into()));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "ok".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(handle.request_count(), 2);
    assert!(start.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn retries_failing_status_until_success() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));

    let start = Instant::now();
    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = probe("try again");
    assert_request_eq!(handle, URL).send_response(support::respond(500, body));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "done".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(handle.request_count(), 2);
    assert_eq!(released.reasons(), vec![RETRY_SCHEDULED.to_string()]);
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn status_outside_set_is_returned() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::respond(404, "missing".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_status_set_never_retries() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetryLayer::new(one_second(3))
        .retryable_statuses(RetryableStatuses::none())
        .wrap(fetch);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::respond(503, "busy".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 503);
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_status_set() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetryLayer::new(one_second(3))
        .retryable_statuses(RetryableStatuses::new(vec![support::status(404)]))
        .wrap(fetch);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::respond(404, "not yet".into()));
    assert_request_eq!(handle, URL).send_response(support::respond(500, "broken".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(handle.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn backoff_stop_returns_original_response() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(0));

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = probe("original failure");
    assert_request_eq!(handle, URL).send_response(support::respond(500, body));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), "original failure");
    assert_eq!(handle.request_count(), 1);
    assert_eq!(released.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn exhausted_backoff_returns_last_response() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(2));

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let released = ReleaseLog::default();
    for attempt in &["first", "second", "third"] {
        let body = probe_into(*attempt, &released, false);
        assert_request_eq!(handle, URL).send_response(support::respond(502, body));
    }

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 502);
    assert_eq!(res.text().await.unwrap(), "third");
    assert_eq!(handle.request_count(), 3);
    assert_eq!(
        released.reasons(),
        vec![RETRY_SCHEDULED.to_string(), RETRY_SCHEDULED.to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn release_failure_does_not_prevent_retry() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(1));

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = failing_probe("stuck");
    assert_request_eq!(handle, URL).send_response(support::respond(500, body));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "done".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(released.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn inner_error_is_not_retried() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_error("connection refused");

    let err = call.await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_wait() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));
    let token = CancellationToken::new();

    let mut fut = task::spawn(fetch.fetch(
        URL.into(),
        RequestInit::default().cancel_on(token.clone()),
    ));

    assert_request_eq!(handle, URL).send_response(support::respond(503, "busy".into()));
    assert_pending!(fut.poll());

    token.cancel();
    assert!(fut.is_woken());

    let err = assert_ready_err!(fut.poll());
    let canceled = err.downcast_ref::<Canceled>().expect("canceled error");
    assert!(!canceled.is_delay_exceeded());
    assert!(handle.try_next_request().is_none());
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn embedded_token_cancels_wait() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));
    let token = CancellationToken::new();

    let input = Request::new(URL).with_cancel(token.clone());
    let mut fut = task::spawn(fetch.fetch(input.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::respond(500, "boom".into()));
    assert_pending!(fut.poll());

    token.cancel();

    let err = assert_ready_err!(fut.poll());
    assert!(err.is::<Canceled>());
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn streaming_body_is_not_replayed() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));

    let body = RequestBody::from_stream(futures::stream::iter(vec![Ok::<_, std::io::Error>(
        bytes::Bytes::from_static(b"chunk"),
    )]));
    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default().body(body)));

    assert_request_eq!(handle, URL).send_response(support::respond(500, "boom".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn buffered_override_replaces_streaming_body() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(3));

    let body = RequestBody::from_stream(futures::stream::iter(vec![Ok::<_, std::io::Error>(
        bytes::Bytes::from_static(b"chunk"),
    )]));
    let input = Request::new(URL).with_body(body);
    let call = tokio::spawn(fetch.fetch(input.into(), RequestInit::default().body("buffered")));

    assert_request_eq!(handle, URL).send_response(support::respond(503, "busy".into()));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "ok".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(handle.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn backoff_is_made_once_per_call() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let made = Arc::new(AtomicUsize::new(0));
    let counter = made.clone();
    let fetch = StatusRetry::new(fetch, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        ConstantBackoff::new(Duration::from_secs(1), 1)
    });
    assert_eq!(made.load(Ordering::SeqCst), 0);

    for _ in 0..2 {
        let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));
        assert_request_eq!(handle, URL).send_response(support::respond(500, "boom".into()));
        assert_request_eq!(handle, URL).send_response(support::respond(200, "ok".into()));
        assert_eq!(call.await.unwrap().unwrap().status(), 200);
    }

    assert_eq!(made.load(Ordering::SeqCst), 2);
    assert_eq!(handle.request_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn concurrent_calls_keep_independent_backoffs() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = StatusRetry::new(fetch, one_second(1));

    let a = tokio::spawn(fetch.fetch("https://example.com/a".into(), RequestInit::default()));
    let b = tokio::spawn(fetch.fetch("https://example.com/b".into(), RequestInit::default()));

    // Each call gets exactly one retry of its own.
    for _ in 0..4 {
        let (_input, _init, send) = handle.next_request().await.expect("request");
        send.send_response(support::respond(500, "boom".into()));
    }

    assert_eq!(a.await.unwrap().unwrap().status(), 500);
    assert_eq!(b.await.unwrap().unwrap().status(), 500);
    assert_eq!(handle.request_count(), 4);
}
