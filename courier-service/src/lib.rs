#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![forbid(unsafe_code)]
// `rustdoc::broken_intra_doc_links` is checked on CI

//! Definition of the core `Fetch` trait to courier.
//!
//! The [`Fetch`] trait describes a request-issuing function: something that
//! takes a request descriptor plus per-call overrides and eventually yields a
//! [`Response`]. Every courier executor both consumes a `Fetch` (the "next"
//! function it wraps) and produces one.
//!
//! This crate also defines the message types flowing through a chain:
//!
//! * [`Resource`]: a URL or a structured [`Request`].
//! * [`RequestInit`]: optional per-call overrides.
//! * [`Response`] and its single-read [`Body`].

mod body;
mod request;
mod response;

pub use crate::body::{Body, BodyError, RequestBody};
pub use crate::request::{cancel_token, is_replayable, Request, RequestInit, Resource};
pub use crate::response::Response;

use std::future::Future;
use std::sync::Arc;

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An asynchronous function from a request descriptor to a [`Response`].
///
/// # Functional
///
/// A `Fetch` is a function of a [`Resource`] and its [`RequestInit`]
/// overrides. It immediately returns a [`Future`] representing the eventual
/// completion of the exchange. Calling it twice with the same descriptor
/// performs two independent exchanges.
///
/// Unlike a connection-bound service, `fetch` takes `&self`: a fetch value is
/// meant to be built once and then invoked any number of times, possibly
/// concurrently. Implementations that need per-call state must create it
/// inside `fetch`, never when they are constructed.
///
/// # Errors
///
/// A `Fetch` only resolves to `Err` when no exchange took place (transport
/// failure, cancellation, ...). A response with a failing status is still an
/// `Ok(Response)`; inspect [`Response::ok`] to tell them apart.
///
/// ```rust
/// use courier_service::{BoxError, Fetch, RequestInit, Resource, Response};
/// use http::StatusCode;
/// use std::future::{ready, Ready};
///
/// struct NotFound;
///
/// impl Fetch for NotFound {
///     type Error = BoxError;
///     type Future = Ready<Result<Response, BoxError>>;
///
///     fn fetch(&self, input: Resource, _init: RequestInit) -> Self::Future {
///         ready(Ok(Response::new(StatusCode::NOT_FOUND).with_url(input.url())))
///     }
/// }
/// ```
pub trait Fetch {
    /// Errors produced when no exchange could be completed.
    type Error;

    /// The future response value.
    type Future: Future<Output = Result<Response, Self::Error>>;

    /// Issue a request and return the future response.
    fn fetch(&self, input: Resource, init: RequestInit) -> Self::Future;
}

impl<'a, F> Fetch for &'a F
where
    F: Fetch + ?Sized + 'a,
{
    type Error = F::Error;
    type Future = F::Future;

    fn fetch(&self, input: Resource, init: RequestInit) -> F::Future {
        (**self).fetch(input, init)
    }
}

impl<F> Fetch for Box<F>
where
    F: Fetch + ?Sized,
{
    type Error = F::Error;
    type Future = F::Future;

    fn fetch(&self, input: Resource, init: RequestInit) -> F::Future {
        (**self).fetch(input, init)
    }
}

impl<F> Fetch for Arc<F>
where
    F: Fetch + ?Sized,
{
    type Error = F::Error;
    type Future = F::Future;

    fn fetch(&self, input: Resource, init: RequestInit) -> F::Future {
        (**self).fetch(input, init)
    }
}
