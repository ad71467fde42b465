#![forbid(unsafe_code)]

//! Tick-driven progress generator with restart-from-current semantics.
//!
//! # Invariants
//!
//! 1. `value()` is always in `[0.0, 1.0]`.
//! 2. Within one run the emitted values move monotonically from the start
//!    value toward the target.
//! 3. Each run delivers exactly one `on_complete`, always preceded by an
//!    `on_tick` carrying the exact target value.
//! 4. Restarting while playing abandons the old run silently (no completion)
//!    and starts the new run from the current value.
//!
//! # Failure Modes
//!
//! - Zero-length runs (zero duration, or start already at the target)
//!   complete on the next `advance`, still emitting tick-then-complete.
//! - `advance` while idle or finished is a no-op.

use std::time::Duration;

use super::Easing;

/// Receives progress notifications from [`AnimationDriver::advance`].
pub trait DriverListener {
    /// Called with the eased progress value after every advance.
    fn on_tick(&mut self, progress: f64);

    /// Called once when the run reaches its target.
    fn on_complete(&mut self);
}

impl<T, C> DriverListener for (T, C)
where
    T: FnMut(f64),
    C: FnMut(),
{
    fn on_tick(&mut self, progress: f64) {
        (self.0)(progress);
    }

    fn on_complete(&mut self) {
        (self.1)();
    }
}

/// Playback state of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No run started yet, or the last run was cancelled.
    #[default]
    Idle,
    /// A run is in flight.
    Playing,
    /// The last run reached its target.
    Finished,
}

/// Time-based progress generator.
///
/// The full `0.0 → 1.0` distance takes the configured duration. A run that
/// starts part way (an interrupted open being reversed, for example) covers
/// only the remaining distance, so its duration is scaled by `|to - from|`
/// and the motion keeps the same pace.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    easing: Easing,
    full_duration: Duration,
    run_duration: Duration,
    from: f64,
    to: f64,
    elapsed: Duration,
    value: f64,
    state: PlaybackState,
    runs: u64,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    /// Create an idle driver at value 0.0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            easing: Easing::default(),
            full_duration: Duration::ZERO,
            run_duration: Duration::ZERO,
            from: 0.0,
            to: 0.0,
            elapsed: Duration::ZERO,
            value: 0.0,
            state: PlaybackState::Idle,
            runs: 0,
        }
    }

    /// Current progress value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current playback state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Target of the current (or last) run.
    #[inline]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Number of runs started so far, restarts included.
    #[inline]
    pub fn runs_started(&self) -> u64 {
        self.runs
    }

    /// Duration configured for a full `0.0 → 1.0` run.
    #[inline]
    pub fn full_duration(&self) -> Duration {
        self.full_duration
    }

    /// Duration of the current run after distance scaling.
    #[inline]
    pub fn run_duration(&self) -> Duration {
        self.run_duration
    }

    /// Stop any run and jump to `value` without notifying anyone.
    pub fn reset(&mut self, value: f64) {
        self.value = clamp_unit(value);
        self.from = self.value;
        self.to = self.value;
        self.elapsed = Duration::ZERO;
        self.run_duration = Duration::ZERO;
        self.state = PlaybackState::Idle;
    }

    /// Abandon the in-flight run, keeping the current value.
    ///
    /// No completion is delivered for the abandoned run.
    pub fn cancel(&mut self) {
        if self.state == PlaybackState::Playing {
            tracing::trace!(value = self.value, target = self.to, "animation run cancelled");
        }
        self.state = PlaybackState::Idle;
        self.elapsed = Duration::ZERO;
    }

    /// Start a run from the current value toward `target`.
    ///
    /// If a run is in flight it is abandoned without a completion and the new
    /// run begins exactly where the old one stopped.
    pub fn start(&mut self, duration: Duration, easing: Easing, target: f64) {
        if self.state == PlaybackState::Playing {
            tracing::trace!(
                value = self.value,
                old_target = self.to,
                new_target = target,
                "animation run restarted from current value"
            );
        }
        let target = clamp_unit(target);
        self.easing = easing;
        self.full_duration = duration;
        self.from = self.value;
        self.to = target;
        self.run_duration = duration.mul_f64((target - self.from).abs());
        self.elapsed = Duration::ZERO;
        self.state = PlaybackState::Playing;
        self.runs += 1;
    }

    /// Jump to `from` and start a run toward `to`.
    ///
    /// Any in-flight run is abandoned without a completion.
    pub fn start_from(&mut self, duration: Duration, easing: Easing, from: f64, to: f64) {
        if self.state == PlaybackState::Playing {
            self.cancel();
        }
        self.value = clamp_unit(from);
        self.start(duration, easing, to);
    }

    /// Advance the run by `delta`, notifying `listener`.
    ///
    /// Returns `true` if this call completed the run.
    pub fn advance<L: DriverListener + ?Sized>(
        &mut self,
        delta: Duration,
        listener: &mut L,
    ) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        let t = self.normalized_time();
        let done = t >= 1.0;

        self.value = if done {
            self.to
        } else {
            clamp_unit(self.from + (self.to - self.from) * self.easing.apply(t))
        };
        listener.on_tick(self.value);

        if done {
            self.state = PlaybackState::Finished;
            listener.on_complete();
        }
        done
    }

    /// Progress the current run would report after `elapsed`, without
    /// mutating the driver.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.state != PlaybackState::Playing {
            return self.value;
        }
        let t = ratio(elapsed, self.run_duration);
        clamp_unit(self.from + (self.to - self.from) * self.easing.apply(t))
    }

    fn normalized_time(&self) -> f64 {
        ratio(self.elapsed, self.run_duration)
    }
}

fn ratio(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<f64>,
        completions: usize,
        tick_before_complete: bool,
    }

    impl DriverListener for Recorder {
        fn on_tick(&mut self, progress: f64) {
            self.ticks.push(progress);
        }

        fn on_complete(&mut self) {
            self.completions += 1;
            self.tick_before_complete = self.ticks.last().is_some();
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 0.02
    }

    #[test]
    fn linear_run_hits_expected_checkpoints() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.start(ms(300), Easing::Linear, 1.0);
        assert!(approx(driver.value(), 0.0));

        driver.advance(ms(150), &mut rec);
        assert!(approx(driver.value(), 0.5), "got {}", driver.value());
        assert_eq!(rec.completions, 0);

        let done = driver.advance(ms(150), &mut rec);
        assert!(done);
        assert!(approx(driver.value(), 1.0));
        assert_eq!(rec.completions, 1);
        assert_eq!(rec.ticks.last().copied(), Some(1.0));
        assert!(rec.tick_before_complete);
    }

    #[test]
    fn completion_fires_once_even_with_extra_ticks() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.start(ms(100), Easing::Linear, 1.0);
        for _ in 0..10 {
            driver.advance(ms(50), &mut rec);
        }
        assert_eq!(rec.completions, 1);
        assert_eq!(driver.state(), PlaybackState::Finished);
    }

    #[test]
    fn restart_starts_from_current_value_without_stray_completion() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.start(ms(300), Easing::Linear, 1.0);
        driver.advance(ms(90), &mut rec);
        assert!(approx(driver.value(), 0.3));

        driver.start(ms(300), Easing::Linear, 0.0);
        assert_eq!(rec.completions, 0);
        assert!(approx(driver.value(), 0.3));
        assert!((driver.run_duration().as_secs_f64() - 0.09).abs() < 1e-6);

        driver.advance(ms(45), &mut rec);
        let mid = driver.value();
        assert!(mid < 0.3 && mid > 0.0, "got {mid}");

        driver.advance(ms(100), &mut rec);
        assert_eq!(driver.value(), 0.0);
        assert_eq!(rec.completions, 1);
    }

    #[test]
    fn reversal_ticks_are_monotonic() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.start(ms(200), Easing::Standard, 1.0);
        driver.advance(ms(60), &mut rec);
        let turn = driver.value();
        rec.ticks.clear();

        driver.start(ms(200), Easing::Standard, 0.0);
        while driver.is_playing() {
            driver.advance(ms(7), &mut rec);
        }
        let mut prev = turn;
        for v in &rec.ticks {
            assert!(*v <= prev + 1e-9);
            prev = *v;
        }
        assert_eq!(prev, 0.0);
    }

    #[test]
    fn zero_duration_completes_on_next_advance() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.start(Duration::ZERO, Easing::Linear, 1.0);
        assert!(driver.advance(Duration::ZERO, &mut rec));
        assert_eq!(rec.ticks, vec![1.0]);
        assert_eq!(rec.completions, 1);
    }

    #[test]
    fn starting_at_target_still_completes() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.reset(1.0);
        driver.start(ms(300), Easing::Linear, 1.0);
        assert!(driver.advance(ms(1), &mut rec));
        assert_eq!(rec.completions, 1);
    }

    #[test]
    fn cancel_suppresses_completion() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.start(ms(100), Easing::Linear, 1.0);
        driver.advance(ms(50), &mut rec);
        driver.cancel();
        assert!(!driver.advance(ms(100), &mut rec));
        assert_eq!(rec.completions, 0);
        assert!(approx(driver.value(), 0.5));
    }

    #[test]
    fn closures_work_as_listeners() {
        let mut driver = AnimationDriver::new();
        let mut last = 0.0;
        let mut completed = 0;
        driver.start(ms(10), Easing::Linear, 1.0);
        driver.advance(ms(20), &mut (|p: f64| last = p, || completed += 1));
        assert_eq!(last, 1.0);
        assert_eq!(completed, 1);
    }

    #[test]
    fn start_from_jumps_then_runs() {
        let mut driver = AnimationDriver::new();
        let mut rec = Recorder::default();
        driver.start(ms(100), Easing::Linear, 1.0);
        driver.advance(ms(50), &mut rec);
        driver.start_from(ms(100), Easing::Linear, 1.0, 0.0);
        assert_eq!(driver.value(), 1.0);
        assert_eq!(rec.completions, 0);
        driver.advance(ms(100), &mut rec);
        assert_eq!(driver.value(), 0.0);
        assert_eq!(rec.completions, 1);
    }

    #[test]
    fn value_at_previews_without_mutation() {
        let mut driver = AnimationDriver::new();
        driver.start(ms(300), Easing::Linear, 1.0);
        assert!(approx(driver.value_at(ms(150)), 0.5));
        assert_eq!(driver.value(), 0.0);
        assert_eq!(driver.runs_started(), 1);
    }
}
