use super::Executor;
use std::fmt;

/// A no-op executor.
///
/// When wrapping a fetch, the [`Identity`] executor returns the provided
/// fetch without modifying it.
///
/// # Examples
///
/// ```rust
/// use courier_layer::{Executor, Identity};
///
/// let identity = Identity::new();
///
/// assert_eq!(identity.wrap(42), 42);
/// ```
#[derive(Default, Clone)]
pub struct Identity {
    _p: (),
}

impl Identity {
    /// Creates a new [`Identity`].
    pub const fn new() -> Identity {
        Identity { _p: () }
    }
}

impl<F> Executor<F> for Identity {
    type Fetch = F;

    fn wrap(&self, inner: F) -> Self::Fetch {
        inner
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity").finish()
    }
}
