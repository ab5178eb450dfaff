//! A sleep that a [`CancellationToken`] can cut short.
//!
//! Retry coordinators wait between attempts with [`wait`]. The wait is the
//! only point where a retrying call is idle, so it is also where a caller's
//! cancellation token is observed.

use crate::error::{Canceled, DelayOverflow};
use pin_project_lite::pin_project;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::Sleep;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// The longest delay the tokio timer accepts (about 2.2 years).
pub const MAX_DELAY: Duration = Duration::from_millis(68_719_476_734);

/// Wait for `delay`, or until `cancel` fires.
///
/// The returned [`Wait`] resolves to `Ok(())` once `delay` has elapsed, or to
/// a [`Canceled`] error as soon as the token fires, whichever comes first. A
/// token that has already fired cancels the wait on its first poll. Dropping
/// the future releases the timer.
///
/// # Errors
///
/// Returns [`DelayOverflow`] right away if `delay` is longer than
/// [`MAX_DELAY`].
///
/// # Panics
///
/// Polling the returned future outside a tokio runtime with the time driver
/// enabled panics.
pub fn wait(delay: Duration, cancel: Option<CancellationToken>) -> Result<Wait, DelayOverflow> {
    if delay > MAX_DELAY {
        return Err(DelayOverflow::new(delay));
    }

    Ok(Wait {
        sleep: tokio::time::sleep(delay),
        cancelled: cancel.map(CancellationToken::cancelled_owned),
    })
}

pin_project! {
    /// Future returned by [`wait`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Wait {
        #[pin]
        sleep: Sleep,
        #[pin]
        cancelled: Option<WaitForCancellationFutureOwned>,
    }
}

impl fmt::Debug for Wait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wait")
            .field("deadline", &self.sleep.deadline())
            .field("cancellable", &self.cancelled.is_some())
            .finish()
    }
}

impl Future for Wait {
    type Output = Result<(), Canceled>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        if let Some(cancelled) = this.cancelled.as_pin_mut() {
            if cancelled.poll(cx).is_ready() {
                tracing::trace!("wait canceled");
                return Poll::Ready(Err(Canceled::new()));
            }
        }

        match this.sleep.poll(cx) {
            Poll::Ready(()) => Poll::Ready(Ok(())),
            Poll::Pending => Poll::Pending,
        }
    }
}
