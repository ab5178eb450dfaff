#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![forbid(unsafe_code)]
// `rustdoc::broken_intra_doc_links` is checked on CI

//! Executor traits and extensions.
//!
//! An [`Executor`] decorates a request-issuing function (a `Fetch`) and
//! returns a new one. Executors are the unit of composition in courier: a
//! retry policy, a header rewrite or a logger are all executors wrapping the
//! "next" fetch in the chain.
//!
//! Executors can be nested statically with [`Stack`] or tuples, or combined
//! at runtime with [`compose`] and [`pipeline`].

mod chain;
mod executor_fn;
mod identity;
mod stack;
mod tuple;

pub use self::{
    chain::{compose, pipeline, Chain, DynExecutor, Order},
    executor_fn::{executor_fn, ExecutorFn},
    identity::Identity,
    stack::Stack,
};

use std::sync::Arc;

/// Decorates a fetch, transforming either the request or the response.
///
/// Often, many of the pieces needed for issuing HTTP requests can be
/// implemented as a wrapper around the fetch that does the actual exchange:
/// retrying, logging, adding headers. An `Executor` is that wrapper, and
/// nothing more. It is called once, when the chain is built, and must not
/// keep state across the requests issued through the fetch it returns. State
/// that belongs to a single request (a backoff counter, for example) is
/// created by the returned fetch each time it is invoked.
///
/// # Example
///
/// ```rust
/// use courier_layer::Executor;
///
/// /// Remembers which executor wrapped the inner fetch.
/// struct Tagged<F> {
///     tag: &'static str,
///     inner: F,
/// }
///
/// struct TagExecutor(&'static str);
///
/// impl<F> Executor<F> for TagExecutor {
///     type Fetch = Tagged<F>;
///
///     fn wrap(&self, inner: F) -> Self::Fetch {
///         Tagged { tag: self.0, inner }
///     }
/// }
///
/// let wrapped = TagExecutor("outer").wrap(());
/// assert_eq!(wrapped.tag, "outer");
/// ```
pub trait Executor<F> {
    /// The wrapped fetch.
    type Fetch;

    /// Wrap the given fetch with the executor's behavior.
    fn wrap(&self, inner: F) -> Self::Fetch;
}

impl<'a, T, F> Executor<F> for &'a T
where
    T: ?Sized + Executor<F>,
{
    type Fetch = T::Fetch;

    fn wrap(&self, inner: F) -> Self::Fetch {
        (**self).wrap(inner)
    }
}

impl<T, F> Executor<F> for Box<T>
where
    T: ?Sized + Executor<F>,
{
    type Fetch = T::Fetch;

    fn wrap(&self, inner: F) -> Self::Fetch {
        (**self).wrap(inner)
    }
}

impl<T, F> Executor<F> for Arc<T>
where
    T: ?Sized + Executor<F>,
{
    type Fetch = T::Fetch;

    fn wrap(&self, inner: F) -> Self::Fetch {
        (**self).wrap(inner)
    }
}
