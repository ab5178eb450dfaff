#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![forbid(unsafe_code)]
#![allow(elided_lifetimes_in_paths, clippy::type_complexity)]
#![cfg_attr(test, allow(clippy::float_cmp))]
#![cfg_attr(docsrs, feature(doc_cfg))]
// `rustdoc::broken_intra_doc_links` is checked on CI

//! `courier` builds HTTP request pipelines out of small, composable request
//! executors.
//!
//! # Overview
//!
//! A request-issuing function is anything implementing [`Fetch`]: it takes a
//! [`Resource`] and per-call [`RequestInit`] overrides and returns a future
//! [`Response`]. An [`Executor`] wraps one fetch and returns another, adding
//! behavior along the way. Chains of executors are assembled either
//! statically with [`ChainBuilder`], or at runtime with [`compose`] and
//! [`pipeline`].
//!
//! The two orders differ in who sees the request first:
//!
//! * [`compose`]`([e1, e2])` wraps the base fetch as `e2(e1(base))`, so `e2`
//!   runs first;
//! * [`pipeline`]`([e1, e2])` and [`ChainBuilder`] wrap it as `e1(e2(base))`,
//!   so `e1` runs first.
//!
//! # Retries
//!
//! Two executors coordinate retries of exchanges that completed with a
//! failing status:
//!
//! * [`retry::StatusRetryLayer`] retries a configurable set of statuses using
//!   a [`Backoff`](retry::backoff::Backoff) strategy created fresh for every
//!   call;
//! * [`retry_after::RetryAfterLayer`] retries `429` and `503` responses when
//!   the server says how long to wait with a `Retry-After` header.
//!
//! Both release the body of a response before discarding it, wait with
//! [`wait::wait`] so that a caller's cancellation token can abort the wait,
//! and give up by returning the last response rather than an error.
//!
//! # Feature flags
//!
//! Each module is gated behind a feature flag of the same name; the `full`
//! flag (enabled by default) turns all of them on.
//!
//! ```rust
//! # #[cfg(all(feature = "retry", feature = "util"))]
//! # async fn doc() -> Result<(), courier::BoxError> {
//! use courier::retry::backoff::ConstantBackoff;
//! use courier::{ChainBuilder, Fetch, RequestInit, Response};
//! use http::StatusCode;
//! use std::time::Duration;
//!
//! let client = ChainBuilder::new()
//!     .retry_status(|| ConstantBackoff::new(Duration::from_millis(100), 3))
//!     .fetch_fn(|input: courier::Resource, _init| async move {
//!         Ok::<_, courier::BoxError>(Response::new(StatusCode::OK).with_url(input.url()))
//!     });
//!
//! let res = client.fetch("https://example.com/".into(), RequestInit::default()).await?;
//! assert!(res.ok());
//! # Ok(())
//! # }
//! ```

pub mod builder;
#[cfg(feature = "wait")]
#[cfg_attr(docsrs, doc(cfg(feature = "wait")))]
pub mod error;
#[cfg(any(feature = "retry", feature = "retry-after"))]
mod release;
#[cfg(feature = "retry")]
#[cfg_attr(docsrs, doc(cfg(feature = "retry")))]
pub mod retry;
#[cfg(feature = "retry-after")]
#[cfg_attr(docsrs, doc(cfg(feature = "retry-after")))]
pub mod retry_after;
#[cfg(feature = "util")]
#[cfg_attr(docsrs, doc(cfg(feature = "util")))]
pub mod util;
#[cfg(feature = "wait")]
#[cfg_attr(docsrs, doc(cfg(feature = "wait")))]
pub mod wait;

pub use crate::builder::ChainBuilder;
#[cfg(any(feature = "retry", feature = "retry-after"))]
pub use crate::release::RETRY_SCHEDULED;
#[cfg(feature = "util")]
#[doc(inline)]
pub use crate::util::{fetch_fn, BoxFetch, FetchExt};

#[doc(inline)]
pub use courier_layer::{
    compose, executor_fn, pipeline, Chain, DynExecutor, Executor, Identity, Order, Stack,
};
#[doc(inline)]
pub use courier_service::{
    cancel_token, is_replayable, Body, BodyError, BoxError, Fetch, Request, RequestBody,
    RequestInit, Resource, Response,
};
