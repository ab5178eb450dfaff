#![cfg(all(feature = "util", feature = "retry", feature = "retry-after"))]
#[path = "../support.rs"]
mod support;

use courier::retry::backoff::ConstantBackoff;
use courier::util::{boxed_executor, MapRequestLayer};
use courier::{
    compose, fetch_fn, pipeline, BoxError, BoxFetch, ChainBuilder, DynExecutor, Executor, Fetch,
    FetchExt, RequestInit, Resource, Response,
};
use courier_test::{assert_request_eq, mock};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Trace = Arc<Mutex<Vec<&'static str>>>;

fn tracer(name: &'static str, trace: &Trace) -> DynExecutor<BoxFetch> {
    let trace = trace.clone();
    boxed_executor(MapRequestLayer::new(move |input: Resource, init: RequestInit| {
        trace.lock().unwrap().push(name);
        (input, init)
    }))
}

fn ok_transport() -> BoxFetch {
    fetch_fn(|input: Resource, _init: RequestInit| async move {
        Ok::<_, BoxError>(Response::new(http::StatusCode::OK).with_url(input.url()))
    })
    .boxed()
}

#[tokio::test]
async fn compose_runs_last_executor_first() {
    let _t = support::trace_init();
    let trace = Trace::default();

    let chain = compose(vec![tracer("e1", &trace), tracer("e2", &trace)]);
    let fetch = chain.wrap(ok_transport());

    fetch
        .fetch("https://example.com/".into(), RequestInit::default())
        .await
        .unwrap();

    assert_eq!(*trace.lock().unwrap(), vec!["e2", "e1"]);
}

#[tokio::test]
async fn pipeline_runs_first_executor_first() {
    let _t = support::trace_init();
    let trace = Trace::default();

    let chain = pipeline(vec![tracer("e1", &trace), tracer("e2", &trace)]);
    let fetch = chain.wrap(ok_transport());

    fetch
        .fetch("https://example.com/".into(), RequestInit::default())
        .await
        .unwrap();

    assert_eq!(*trace.lock().unwrap(), vec!["e1", "e2"]);
}

#[tokio::test]
async fn nested_chains_flatten() {
    let _t = support::trace_init();
    let trace = Trace::default();

    let inner = pipeline(vec![tracer("b", &trace), tracer("c", &trace)]).into_dyn();
    let chain = pipeline(vec![tracer("a", &trace), inner, tracer("d", &trace)]);
    let fetch = chain.wrap(ok_transport());

    fetch
        .fetch("https://example.com/".into(), RequestInit::default())
        .await
        .unwrap();

    assert_eq!(*trace.lock().unwrap(), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn empty_chain_returns_base_fetch() {
    let base = ok_transport();

    let fetch = compose(Vec::<DynExecutor<BoxFetch>>::new()).wrap(base.clone());

    assert!(BoxFetch::ptr_eq(&fetch, &base));
}

#[tokio::test]
async fn builder_adds_in_pipeline_order() {
    let _t = support::trace_init();
    let trace = Trace::default();
    let (first, second) = (trace.clone(), trace.clone());

    let fetch = ChainBuilder::new()
        .map_request(move |input: Resource, init: RequestInit| {
            first.lock().unwrap().push("first");
            (input, init)
        })
        .map_request(move |input: Resource, init: RequestInit| {
            second.lock().unwrap().push("second");
            (input, init)
        })
        .fetch(ok_transport());

    fetch
        .fetch("https://example.com/".into(), RequestInit::default())
        .await
        .unwrap();

    assert_eq!(*trace.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test(start_paused = true)]
async fn dynamic_retry_chain() {
    let _t = support::trace_init();
    let (transport, mut handle) = mock::pair();

    let chain = pipeline(vec![
        boxed_executor(courier::retry_after::RetryAfterLayer::new().max_retries(1)),
        boxed_executor(courier::retry::StatusRetryLayer::new(|| {
            ConstantBackoff::new(Duration::from_millis(10), 1)
        })),
    ]);
    let fetch = chain.wrap(transport.boxed());

    let url = "https://example.com/chain";
    let call = tokio::spawn(fetch.fetch(url.into(), RequestInit::default()));

    // The status coordinator retries the 503 once, then hands it to the
    // Retry-After coordinator, which starts a fresh round.
    assert_request_eq!(handle, url).send_response(support::retry_after(503, "1", "a".into()));
    assert_request_eq!(handle, url).send_response(support::retry_after(503, "1", "b".into()));
    assert_request_eq!(handle, url).send_response(support::respond(200, "c".into()));

    let res = call.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(handle.request_count(), 3);
}
