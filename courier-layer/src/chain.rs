use super::Executor;
use std::fmt;
use std::sync::Arc;

/// A type-erased executor that maps a fetch of type `F` to another `F`.
///
/// Executors that produce a different type can be erased by first boxing the
/// fetch they produce; `courier::util::boxed_executor` does exactly that for
/// `BoxFetch`.
pub type DynExecutor<F> = Arc<dyn Executor<F, Fetch = F> + Send + Sync>;

/// The nesting order of a [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// The last executor is outermost: it sees the request first.
    Compose,
    /// The first executor is outermost: it sees the request first.
    Pipeline,
}

/// An ordered list of executors, applied as one.
///
/// Built by [`compose`] or [`pipeline`]. A `Chain` is itself an executor, so
/// chains nest inside other chains, and nesting is associative: composing
/// composed sub-lists gives the same structure as composing the flattened
/// list.
pub struct Chain<F> {
    executors: Arc<[DynExecutor<F>]>,
    order: Order,
}

/// Combine `executors` so that the **last** one is outermost.
///
/// `compose([e1, e2, e3])` wraps a fetch as `e3(e2(e1(fetch)))`: `e3` sees the
/// request first and the response last. With no executors the fetch is
/// returned unchanged.
///
/// ```rust
/// use courier_layer::{compose, executor_fn, DynExecutor, Executor};
/// use std::sync::Arc;
///
/// let add: DynExecutor<i32> = Arc::new(executor_fn(|next: i32| next + 1));
/// let double: DynExecutor<i32> = Arc::new(executor_fn(|next: i32| next * 2));
///
/// // double(add(5))
/// assert_eq!(compose(vec![add, double]).wrap(5), 12);
/// ```
pub fn compose<F, I>(executors: I) -> Chain<F>
where
    I: IntoIterator<Item = DynExecutor<F>>,
{
    Chain::new(Order::Compose, executors)
}

/// Combine `executors` so that the **first** one is outermost.
///
/// `pipeline([e1, e2, e3])` wraps a fetch as `e1(e2(e3(fetch)))`: `e1` sees the
/// request first and the response last. With no executors the fetch is
/// returned unchanged.
///
/// ```rust
/// use courier_layer::{executor_fn, pipeline, DynExecutor, Executor};
/// use std::sync::Arc;
///
/// let add: DynExecutor<i32> = Arc::new(executor_fn(|next: i32| next + 1));
/// let double: DynExecutor<i32> = Arc::new(executor_fn(|next: i32| next * 2));
///
/// // add(double(5))
/// assert_eq!(pipeline(vec![add, double]).wrap(5), 11);
/// ```
pub fn pipeline<F, I>(executors: I) -> Chain<F>
where
    I: IntoIterator<Item = DynExecutor<F>>,
{
    Chain::new(Order::Pipeline, executors)
}

impl<F> Chain<F> {
    /// Create a chain applying `executors` in the given order.
    pub fn new<I>(order: Order, executors: I) -> Self
    where
        I: IntoIterator<Item = DynExecutor<F>>,
    {
        Chain {
            executors: executors.into_iter().collect(),
            order,
        }
    }

    /// The nesting order of this chain.
    pub fn order(&self) -> Order {
        self.order
    }

    /// The number of executors in this chain.
    pub fn len(&self) -> usize {
        self.executors.len()
    }

    /// Returns `true` if this chain wraps nothing.
    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }

    /// Erase this chain so it can be nested in another chain.
    pub fn into_dyn(self) -> DynExecutor<F>
    where
        F: 'static,
    {
        Arc::new(self)
    }
}

impl<F> Executor<F> for Chain<F> {
    type Fetch = F;

    fn wrap(&self, fetch: F) -> F {
        match self.order {
            Order::Compose => self
                .executors
                .iter()
                .fold(fetch, |next, executor| executor.wrap(next)),
            Order::Pipeline => self
                .executors
                .iter()
                .rev()
                .fold(fetch, |next, executor| executor.wrap(next)),
        }
    }
}

impl<F> Clone for Chain<F> {
    fn clone(&self) -> Self {
        Chain {
            executors: self.executors.clone(),
            order: self.order,
        }
    }
}

impl<F> fmt::Debug for Chain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("order", &self.order)
            .field("len", &self.executors.len())
            .finish()
    }
}
