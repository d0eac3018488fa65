//! The animation driver for chart enter/update transitions.
//!
//! The driver is pure with respect to time: the host passes timestamps
//! into `start` and `tick`, so tests can step a transition without timers.
//! Progress within one cycle is monotonically non-decreasing and reaches
//! exactly 1.0 at the duration.

use serde::{Deserialize, Serialize};

/// Easing function applied on top of linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    #[default]
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    t.mul_add(-2.0 * t, 4.0 * t) - 1.0
                }
            }
        }
    }
}

/// Lifecycle of one chart instance's transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    /// Not started yet (pre-mount)
    #[default]
    Idle,
    /// A transition is in flight
    Animating,
    /// The transition finished or was stopped
    Settled,
}

/// Drives transition progress from host-supplied timestamps.
///
/// One cycle runs `Idle → Animating → Settled`; `reset` starts a new
/// cycle on refresh or dataset replacement, and `stop` cancels the
/// current one so no further frames are requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDriver {
    duration_ms: f64,
    easing: Easing,
    enabled: bool,
    start: Option<f64>,
    progress: f64,
    state: AnimationState,
}

impl AnimationDriver {
    /// Create a driver with the given duration and easing.
    ///
    /// A non-positive duration behaves like a disabled driver.
    #[must_use]
    pub fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            enabled: duration_ms > 0.0,
            start: None,
            progress: 0.0,
            state: AnimationState::Idle,
        }
    }

    /// Create a disabled driver: progress pinned at 1, no frames.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0.0, Easing::Linear)
    }

    /// Begin a transition cycle at timestamp `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        if self.enabled {
            self.start = Some(now_ms);
            self.progress = 0.0;
            self.state = AnimationState::Animating;
        } else {
            self.start = None;
            self.progress = 1.0;
            self.state = AnimationState::Settled;
        }
    }

    /// Advance to timestamp `now_ms` and return the raw progress.
    ///
    /// Progress is `clamp((now - start) / duration, 0, 1)` and never
    /// decreases within a cycle; reaching 1.0 settles the driver.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if let Some(start) = self.start {
            if self.state == AnimationState::Animating {
                let raw = ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0);
                self.progress = self.progress.max(raw);
                if self.progress >= 1.0 {
                    self.state = AnimationState::Settled;
                }
            }
        }
        self.progress
    }

    /// Raw progress in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress with the easing curve applied. This is the value the
    /// renderer scales primitives by.
    #[must_use]
    pub fn eased_progress(&self) -> f64 {
        self.easing.apply(self.progress)
    }

    /// Whether another frame should be scheduled.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.state == AnimationState::Animating && self.progress < 1.0
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Restart the transition from zero at timestamp `now_ms`.
    pub fn reset(&mut self, now_ms: f64) {
        self.start(now_ms);
    }

    /// Cancel the transition. Progress jumps to 1 and `needs_frame`
    /// returns false, so nothing schedules further work.
    pub fn stop(&mut self) {
        self.progress = 1.0;
        self.state = AnimationState::Settled;
        self.start = None;
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(300.0, Easing::EaseOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_progress_clamped_and_exact_at_duration() {
        let mut driver = AnimationDriver::new(300.0, Easing::Linear);
        driver.start(1000.0);
        assert_eq!(driver.tick(1000.0), 0.0);
        assert!((driver.tick(1150.0) - 0.5).abs() < 1e-9);
        assert_eq!(driver.tick(1300.0), 1.0);
        assert_eq!(driver.tick(9999.0), 1.0);
    }

    #[test]
    fn test_state_machine() {
        let mut driver = AnimationDriver::new(100.0, Easing::Linear);
        assert_eq!(driver.state(), AnimationState::Idle);
        driver.start(0.0);
        assert_eq!(driver.state(), AnimationState::Animating);
        assert!(driver.needs_frame());
        driver.tick(100.0);
        assert_eq!(driver.state(), AnimationState::Settled);
        assert!(!driver.needs_frame());
    }

    #[test]
    fn test_reset_replays() {
        let mut driver = AnimationDriver::new(100.0, Easing::Linear);
        driver.start(0.0);
        driver.tick(100.0);
        assert_eq!(driver.state(), AnimationState::Settled);
        driver.reset(200.0);
        assert_eq!(driver.state(), AnimationState::Animating);
        assert_eq!(driver.progress(), 0.0);
    }

    #[test]
    fn test_stop_cancels() {
        let mut driver = AnimationDriver::new(1000.0, Easing::Linear);
        driver.start(0.0);
        driver.tick(10.0);
        driver.stop();
        assert_eq!(driver.progress(), 1.0);
        assert!(!driver.needs_frame());
        // Further ticks are inert.
        assert_eq!(driver.tick(20.0), 1.0);
        assert_eq!(driver.state(), AnimationState::Settled);
    }

    #[test]
    fn test_disabled_pins_progress() {
        let mut driver = AnimationDriver::disabled();
        driver.start(0.0);
        assert_eq!(driver.progress(), 1.0);
        assert_eq!(driver.state(), AnimationState::Settled);
        assert!(!driver.needs_frame());
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_progress_monotonic(
            duration in 1.0f64..5000.0,
            mut times in proptest::collection::vec(0.0f64..10_000.0, 1..20),
        ) {
            times.sort_by(f64::total_cmp);
            let mut driver = AnimationDriver::new(duration, Easing::Linear);
            driver.start(0.0);
            let mut last = 0.0;
            for t in times {
                let p = driver.tick(t);
                prop_assert!(p >= last);
                prop_assert!((0.0..=1.0).contains(&p));
                last = p;
            }
        }

        #[test]
        fn prop_easing_in_unit_interval(t in 0.0f64..1.0) {
            for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
                let v = easing.apply(t);
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
