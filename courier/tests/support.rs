#![allow(dead_code)]

use courier::{Body, Response};
use http::header::{HeaderValue, RETRY_AFTER};
use http::StatusCode;

pub(crate) fn trace_init() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .with_thread_names(true)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

pub(crate) fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

pub(crate) fn respond(code: u16, body: Body) -> Response {
    Response::new(status(code)).with_body(body)
}

pub(crate) fn retry_after(code: u16, value: &str, body: Body) -> Response {
    respond(code, body).with_header(RETRY_AFTER, HeaderValue::from_str(value).unwrap())
}
