#![cfg(feature = "retry-after")]
#[path = "../support.rs"]
mod support;

use courier::error::{Canceled, DelayOverflow};
use courier::retry_after::{RetryAfter, RetryAfterLayer};
use courier::{Executor, Fetch, Request, RequestBody, RequestInit, RETRY_SCHEDULED};
use courier_test::body::probe;
use courier_test::{assert_request_eq, mock};
use std::time::{Duration, SystemTime};
use tokio::time::Instant;
use tokio_test::{assert_pending, assert_ready_err, task};
use tokio_util::sync::CancellationToken;

const URL: &str = "https://example.com/limited";

#[tokio::test(start_paused = true)]
async fn zero_max_retries_never_retries() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfterLayer::new().wrap(fetch);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::retry_after(429, "1", "slow down".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 429);
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn waits_the_directed_seconds() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 2);

    let start = Instant::now();
    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = probe("maintenance");
    assert_request_eq!(handle, URL).send_response(support::retry_after(503, "2", body));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "back".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(handle.request_count(), 2);
    assert_eq!(released.reasons(), vec![RETRY_SCHEDULED.to_string()]);
    assert!(start.elapsed() >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn waits_until_directed_date() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 1);

    let start = Instant::now();
    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let date = httpdate::fmt_http_date(SystemTime::now() + Duration::from_secs(30));
    assert_request_eq!(handle, URL).send_response(support::retry_after(429, &date, "later".into()));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "now".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    // The date has whole-second precision.
    assert!(start.elapsed() >= Duration::from_secs(28));
}

#[tokio::test(start_paused = true)]
async fn past_date_retries_immediately() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 1);

    let start = Instant::now();
    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::retry_after(
        503,
        "Sun, 06 Nov 1994 08:49:37 GMT",
        "stale".into(),
    ));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "fresh".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn delay_over_maximum_is_refused() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfterLayer::new()
        .max_retries(3)
        .max_delay(Duration::from_secs(5))
        .wrap(fetch);

    let start = Instant::now();
    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::retry_after(429, "60", "wait".into()));

    let err = call.await.unwrap().unwrap_err();
    let canceled = err.downcast_ref::<Canceled>().expect("canceled error");
    assert!(canceled.is_delay_exceeded());
    assert_eq!(canceled.delay(), Some(Duration::from_secs(60)));
    assert_eq!(handle.request_count(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn other_statuses_are_not_evaluated() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 3);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::retry_after(500, "1", "boom".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn successful_response_with_directive_is_returned() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 3);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = probe("here you go");
    assert_request_eq!(handle, URL).send_response(support::retry_after(200, "5", body));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()[http::header::RETRY_AFTER], "5");
    assert_eq!(res.text().await.unwrap(), "here you go");
    assert_eq!(handle.request_count(), 1);
    assert_eq!(released.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn buffered_override_replaces_streaming_body() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 3);

    let body = RequestBody::from_stream(futures::stream::iter(vec![Ok::<_, std::io::Error>(
        bytes::Bytes::from_static(b"chunk"),
    )]));
    let input = Request::new(URL).with_body(body);
    let call = tokio::spawn(fetch.fetch(input.into(), RequestInit::default().body("buffered")));

    assert_request_eq!(handle, URL).send_response(support::retry_after(503, "0", "busy".into()));
    assert_request_eq!(handle, URL).send_response(support::respond(200, "ok".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(handle.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn unbounded_directive_overflows_timer() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 3);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    let (body, released) = probe("forever");
    assert_request_eq!(handle, URL).send_response(support::retry_after(503, "99999999999", body));

    let err = call.await.unwrap().unwrap_err();
    let overflow = err.downcast_ref::<DelayOverflow>().expect("overflow error");
    assert_eq!(overflow.delay(), Duration::from_secs(99_999_999_999));
    assert_eq!(released.reasons(), vec![RETRY_SCHEDULED.to_string()]);
    assert_eq!(handle.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn missing_or_malformed_directive_is_returned() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 3);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));
    assert_request_eq!(handle, URL).send_response(support::respond(429, "no header".into()));
    assert_eq!(call.await.unwrap().unwrap().status(), 429);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));
    assert_request_eq!(handle, URL).send_response(support::retry_after(503, "soon", "bad".into()));
    assert_eq!(call.await.unwrap().unwrap().status(), 503);

    assert_eq!(handle.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_return_last_response() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 1);

    let call = tokio::spawn(fetch.fetch(URL.into(), RequestInit::default()));

    assert_request_eq!(handle, URL).send_response(support::retry_after(429, "1", "first".into()));
    assert_request_eq!(handle, URL).send_response(support::retry_after(429, "1", "second".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 429);
    assert_eq!(res.text().await.unwrap(), "second");
    assert_eq!(handle.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_wait() {
    let _t = support::trace_init();
    let (fetch, mut handle) = mock::pair();
    let fetch = RetryAfter::new(fetch, 3);
    let token = CancellationToken::new();

    let mut fut = task::spawn(fetch.fetch(
        URL.into(),
        RequestInit::default().cancel_on(token.clone()),
    ));

    assert_request_eq!(handle, URL).send_response(support::retry_after(503, "120", "busy".into()));
    assert_pending!(fut.poll());

    token.cancel();

    let err = assert_ready_err!(fut.poll());
    let canceled = err.downcast_ref::<Canceled>().expect("canceled error");
    assert!(!canceled.is_delay_exceeded());
    assert!(handle.try_next_request().is_none());
}
