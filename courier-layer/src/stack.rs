use super::Executor;
use std::fmt;

/// Two [`Executor`]s nested together.
///
/// `inner` wraps the fetch first and `outer` wraps the result, so `outer`
/// sees each request first and each response last.
///
/// # Examples
///
/// ```rust
/// use courier_layer::{executor_fn, Executor, Stack};
///
/// let inner = executor_fn(|next: i32| next + 2);
/// let outer = executor_fn(|next: i32| next * 2);
///
/// let stack = Stack::new(inner, outer);
///
/// // (4 + 2) * 2 = 12
/// assert_eq!(stack.wrap(4), 12);
/// ```
#[derive(Clone)]
pub struct Stack<Inner, Outer> {
    inner: Inner,
    outer: Outer,
}

impl<Inner, Outer> Stack<Inner, Outer> {
    /// Creates a new [`Stack`].
    pub const fn new(inner: Inner, outer: Outer) -> Self {
        Stack { inner, outer }
    }
}

impl<F, Inner, Outer> Executor<F> for Stack<Inner, Outer>
where
    Inner: Executor<F>,
    Outer: Executor<Inner::Fetch>,
{
    type Fetch = Outer::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let inner = self.inner.wrap(fetch);

        self.outer.wrap(inner)
    }
}

impl<Inner, Outer> fmt::Debug for Stack<Inner, Outer>
where
    Inner: fmt::Debug,
    Outer: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Nested stacks print as a flat list, outermost first, so that a
        // `ChainBuilder` reads in the order executors were added.
        if f.alternate() {
            write!(f, "{:#?},\n{:#?}", self.outer, self.inner)
        } else {
            write!(f, "{:?}, {:?}", self.outer, self.inner)
        }
    }
}
