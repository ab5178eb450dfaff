//! Error types

use std::{error, fmt, time::Duration};

/// A retry wait was abandoned.
///
/// Returned when the caller's cancellation token fires while a coordinator
/// waits before retrying, or when a server-directed delay is longer than the
/// configured maximum. Never retried.
#[derive(Debug)]
pub struct Canceled {
    delay_exceeded: Option<(Duration, Duration)>,
}

impl Canceled {
    pub(crate) fn new() -> Self {
        Canceled {
            delay_exceeded: None,
        }
    }

    #[cfg_attr(not(feature = "retry-after"), allow(dead_code))]
    pub(crate) fn delay_exceeded(delay: Duration, max: Duration) -> Self {
        Canceled {
            delay_exceeded: Some((delay, max)),
        }
    }

    /// Returns `true` if the wait was refused because the requested delay
    /// exceeded the configured maximum, rather than canceled by a token.
    pub fn is_delay_exceeded(&self) -> bool {
        self.delay_exceeded.is_some()
    }

    /// The refused delay, if the wait was refused for being too long.
    pub fn delay(&self) -> Option<Duration> {
        self.delay_exceeded.map(|(delay, _)| delay)
    }
}

impl fmt::Display for Canceled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.delay_exceeded {
            Some((delay, max)) => write!(
                f,
                "retry delay of {:?} exceeds the maximum of {:?}",
                delay, max
            ),
            None => f.pad("request canceled while waiting to retry"),
        }
    }
}

impl error::Error for Canceled {}

/// A wait was requested for longer than the timer can represent.
///
/// This is a configuration error and is reported immediately.
#[derive(Debug)]
pub struct DelayOverflow {
    delay: Duration,
}

impl DelayOverflow {
    pub(crate) fn new(delay: Duration) -> Self {
        DelayOverflow { delay }
    }

    /// The rejected delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl fmt::Display for DelayOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delay of {:?} exceeds the timer's maximum of {:?}",
            self.delay,
            crate::wait::MAX_DELAY
        )
    }
}

impl error::Error for DelayOverflow {}
