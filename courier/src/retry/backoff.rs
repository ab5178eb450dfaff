//! This module contains the [backoff] strategies consumed by the status retry
//! coordinator.
//!
//! The [`Backoff`] trait represents a single backoff session: the sequence of
//! delays for one top-level call and its retries. [`MakeBackoff`] builds a
//! fresh session for each call. Any `Fn() -> B` closure where `B: Backoff` is
//! a [`MakeBackoff`].
//!
//! [`ExponentialBackoffMaker`] implements the maker type for
//! [`ExponentialBackoff`], a batteries included exponential backoff and jitter
//! strategy. [`ConstantBackoff`] waits the same delay between a fixed number of
//! retries.
//!
//! [backoff]: https://en.wikipedia.org/wiki/Exponential_backoff

use crate::util::rng::{HasherRng, Rng};
use std::fmt::Display;
use std::time::Duration;

/// Trait used to construct [`Backoff`] trait implementors.
///
/// `make_backoff` is called once per top-level call, never when the retry
/// executor is built, so concurrent calls never share a session.
pub trait MakeBackoff {
    /// The backoff type produced by this maker.
    type Backoff: Backoff;

    /// Constructs a new backoff session.
    fn make_backoff(&self) -> Self::Backoff;
}

impl<F, B> MakeBackoff for F
where
    F: Fn() -> B,
    B: Backoff,
{
    type Backoff = B;

    fn make_backoff(&self) -> Self::Backoff {
        self()
    }
}

/// A backoff session.
pub trait Backoff {
    /// The delay to wait before the next retry, or `None` to stop retrying.
    fn next_backoff(&mut self) -> Option<Duration>;

    /// Start the sequence of delays over.
    fn reset_backoff(&mut self);
}

impl<B> Backoff for Box<B>
where
    B: Backoff + ?Sized,
{
    fn next_backoff(&mut self) -> Option<Duration> {
        (**self).next_backoff()
    }

    fn reset_backoff(&mut self) {
        (**self).reset_backoff()
    }
}

/// Wait the same delay between at most `max_retries` retries.
#[derive(Debug, Clone)]
pub struct ConstantBackoff {
    delay: Duration,
    max_retries: u32,
    retries: u32,
}

impl ConstantBackoff {
    /// Wait `delay` before each of at most `max_retries` retries.
    pub fn new(delay: Duration, max_retries: u32) -> Self {
        ConstantBackoff {
            delay,
            max_retries,
            retries: 0,
        }
    }
}

impl Backoff for ConstantBackoff {
    fn next_backoff(&mut self) -> Option<Duration> {
        if self.retries >= self.max_retries {
            return None;
        }
        self.retries += 1;
        Some(self.delay)
    }

    fn reset_backoff(&mut self) {
        self.retries = 0;
    }
}

/// A maker type for [`ExponentialBackoff`].
#[derive(Debug, Clone)]
pub struct ExponentialBackoffMaker<R = HasherRng> {
    /// The minimum amount of time to wait before resuming an operation.
    min: Duration,
    /// The maximum amount of time to wait before resuming an operation.
    max: Duration,
    /// The ratio of the base timeout that may be randomly added to a backoff.
    ///
    /// Must be greater than or equal to 0.0.
    jitter: f64,
    /// Stop after this many retries. `None` never stops.
    max_retries: Option<u32>,
    rng: R,
}

/// A jittered [exponential backoff] strategy.
///
/// The backoff duration will increase exponentially for every subsequent
/// backoff, up to a maximum duration. A small amount of [random jitter] is
/// added to each backoff duration, in order to avoid retry spikes.
///
/// [exponential backoff]: https://en.wikipedia.org/wiki/Exponential_backoff
/// [random jitter]: https://aws.amazon.com/blogs/architecture/exponential-backoff-and-jitter/
#[derive(Debug, Clone)]
pub struct ExponentialBackoff<R = HasherRng> {
    min: Duration,
    max: Duration,
    jitter: f64,
    max_retries: Option<u32>,
    rng: R,
    iterations: u32,
}

impl<R> ExponentialBackoffMaker<R>
where
    R: Rng,
{
    /// Create a new `ExponentialBackoffMaker`.
    ///
    /// # Error
    ///
    /// Returns a config validation error if:
    /// - `min` > `max`
    /// - `max` == 0
    /// - `max` is longer than the timer can wait
    /// - `jitter` < `0.0`
    /// - `jitter` > `100.0`
    /// - `jitter` is not finite
    pub fn new(min: Duration, max: Duration, jitter: f64, rng: R) -> Result<Self, InvalidBackoff> {
        if min > max {
            return Err(InvalidBackoff("maximum must not be less than minimum"));
        }
        if max == Duration::from_millis(0) {
            return Err(InvalidBackoff("maximum must be non-zero"));
        }
        if max > crate::wait::MAX_DELAY {
            return Err(InvalidBackoff("maximum must fit in the timer's range"));
        }
        if jitter < 0.0 {
            return Err(InvalidBackoff("jitter must not be negative"));
        }
        if jitter > 100.0 {
            return Err(InvalidBackoff("jitter must not be greater than 100"));
        }
        if !jitter.is_finite() {
            return Err(InvalidBackoff("jitter must be finite"));
        }

        Ok(ExponentialBackoffMaker {
            min,
            max,
            jitter,
            max_retries: None,
            rng,
        })
    }

    /// Stop retrying after `max_retries` retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

impl<R> MakeBackoff for ExponentialBackoffMaker<R>
where
    R: Rng + Clone,
{
    type Backoff = ExponentialBackoff<R>;

    fn make_backoff(&self) -> Self::Backoff {
        ExponentialBackoff {
            max: self.max,
            min: self.min,
            jitter: self.jitter,
            max_retries: self.max_retries,
            rng: self.rng.clone(),
            iterations: 0,
        }
    }
}

impl<R: Rng> ExponentialBackoff<R> {
    fn base(&self) -> Duration {
        debug_assert!(
            self.min <= self.max,
            "maximum backoff must not be less than minimum backoff"
        );
        debug_assert!(
            self.max > Duration::from_millis(0),
            "Maximum backoff must be non-zero"
        );
        self.min
            .checked_mul(2_u32.saturating_pow(self.iterations))
            .unwrap_or(self.max)
            .min(self.max)
    }

    /// Returns a random, uniform duration on `[0, base*self.jitter]` no greater
    /// than `self.max`.
    fn jitter(&mut self, base: Duration) -> Duration {
        if self.jitter == 0.0 {
            Duration::default()
        } else {
            let jitter_factor = self.rng.next_f64();
            debug_assert!(
                jitter_factor >= 0.0,
                "rng returns values between 0.0 and 1.0"
            );
            let rand_jitter = jitter_factor * self.jitter;
            let secs = (base.as_secs() as f64) * rand_jitter;
            let nanos = (base.subsec_nanos() as f64) * rand_jitter;
            let remaining = self.max - base;
            Duration::new(secs as u64, nanos as u32).min(remaining)
        }
    }
}

impl<R> Backoff for ExponentialBackoff<R>
where
    R: Rng,
{
    fn next_backoff(&mut self) -> Option<Duration> {
        if let Some(max_retries) = self.max_retries {
            if self.iterations >= max_retries {
                return None;
            }
        }

        let base = self.base();
        let next = base + self.jitter(base);

        self.iterations += 1;

        Some(next)
    }

    fn reset_backoff(&mut self) {
        self.iterations = 0;
    }
}

impl Default for ExponentialBackoffMaker {
    /// 50ms doubling up to 30s, with up to 99% jitter, for at most 3 retries.
    fn default() -> Self {
        ExponentialBackoffMaker {
            min: Duration::from_millis(50),
            max: Duration::from_secs(30),
            jitter: 0.99,
            max_retries: Some(3),
            rng: HasherRng::default(),
        }
    }
}

/// Backoff validation error.
#[derive(Debug)]
pub struct InvalidBackoff(&'static str);

impl Display for InvalidBackoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid backoff: {}", self.0)
    }
}

impl std::error::Error for InvalidBackoff {}
