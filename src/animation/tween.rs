//! Explicit eased interpolation between two values over a fixed duration.
//!
//! A [`Tween`] owns its start and end values and an elapsed clock. Callers
//! advance it with the measured frame delta; there is no global tween group
//! and nothing runs on its own.

use std::time::Duration;

use glam::Vec3;

use crate::util::easing::EasingFunction;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Interpolate from `self` toward `other` by factor `t` (0 = self,
    /// 1 = other).
    #[must_use]
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// Linear progress of `elapsed` through `duration`, clamped to [0, 1].
///
/// A zero duration is treated as already complete.
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Sample an eased interpolation between `start` and `end`.
#[must_use]
pub fn interpolate<T: Lerp>(
    start: T,
    end: T,
    easing: EasingFunction,
    elapsed: Duration,
    duration: Duration,
) -> T {
    start.lerp_to(end, easing.evaluate(progress(elapsed, duration)))
}

/// A single eased animation from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Lerp> {
    start: T,
    end: T,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFunction,
}

impl<T: Lerp> Tween<T> {
    /// Create a tween at elapsed = 0.
    #[must_use]
    pub fn new(
        start: T,
        end: T,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance the clock by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> T {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.value()
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> T {
        interpolate(
            self.start,
            self.end,
            self.easing,
            self.elapsed,
            self.duration,
        )
    }

    /// Linear (un-eased) progress in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    /// Whether the tween has reached its end value.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Start value.
    #[must_use]
    pub fn start(&self) -> T {
        self.start
    }

    /// End value.
    #[must_use]
    pub fn end(&self) -> T {
        self.end
    }

    /// Time elapsed so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
