use super::Executor;
use std::fmt;

/// Returns a new [`ExecutorFn`] with the given closure.
///
/// ```rust
/// use courier_layer::{executor_fn, Executor};
///
/// let double = executor_fn(|next: u32| next * 2);
///
/// assert_eq!(double.wrap(21), 42);
/// ```
pub fn executor_fn<T>(f: T) -> ExecutorFn<T> {
    ExecutorFn { f }
}

/// An [`Executor`] implemented by a closure.
#[derive(Clone, Copy)]
pub struct ExecutorFn<T> {
    f: T,
}

impl<T, F, Out> Executor<F> for ExecutorFn<T>
where
    T: Fn(F) -> Out,
{
    type Fetch = Out;

    fn wrap(&self, inner: F) -> Self::Fetch {
        (self.f)(inner)
    }
}

impl<T> fmt::Debug for ExecutorFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorFn")
            .field("f", &format_args!("<{}>", std::any::type_name::<T>()))
            .finish()
    }
}
