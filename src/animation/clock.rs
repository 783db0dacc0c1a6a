//! Frame clock shared by every entity of a mounted scene.
//!
//! The host calls [`FrameClock::tick`] once per display refresh with its own
//! monotonic timestamp. Entities only ever see the returned elapsed time, so a
//! paused clock freezes every entity together and they never drift apart.

use std::time::{Duration, Instant};

/// Monotonic elapsed time since scene activation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started_at: Instant,
    /// Total time spent paused, excluded from elapsed.
    paused_total: Duration,
    /// Set while paused.
    paused_at: Option<Instant>,
    /// Last value handed out; elapsed never goes below it.
    last_elapsed: f32,
    running: bool,
}

impl FrameClock {
    /// Starts a clock at `now`. The first tick at `now` reports `0.0`.
    pub fn start(now: Instant) -> Self {
        Self {
            started_at: now,
            paused_total: Duration::ZERO,
            paused_at: None,
            last_elapsed: 0.0,
            running: true,
        }
    }

    /// Advances the clock and returns elapsed seconds, or `None` once stopped.
    ///
    /// While paused the elapsed value stays frozen at the pause point.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if !self.running {
            return None;
        }
        let effective_now = self.paused_at.unwrap_or(now);
        let active = effective_now
            .saturating_duration_since(self.started_at)
            .saturating_sub(self.paused_total);
        let elapsed = active.as_secs_f32().max(self.last_elapsed);
        self.last_elapsed = elapsed;
        Some(elapsed)
    }

    /// Freezes elapsed time. Repeated calls keep the first pause point.
    pub fn pause(&mut self, now: Instant) {
        if self.running && self.paused_at.is_none() {
            tracing::debug!(elapsed = self.last_elapsed, "frame clock paused");
            self.paused_at = Some(now);
        }
    }

    /// Resumes after [`FrameClock::pause`], excluding the paused span.
    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
            tracing::debug!(paused_for = ?self.paused_total, "frame clock resumed");
        }
    }

    /// Stops issuing ticks. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(elapsed = self.last_elapsed, "frame clock stopped");
        }
        self.running = false;
        self.paused_at = None;
    }

    /// Whether ticks are still being issued.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the clock is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// The last elapsed value returned by [`FrameClock::tick`].
    pub fn elapsed(&self) -> f32 {
        self.last_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f32) -> Duration {
        Duration::from_secs_f32(value)
    }

    #[test]
    fn test_first_tick_is_zero() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        assert_eq!(clock.tick(t0), Some(0.0));
    }

    #[test]
    fn test_tick_reports_elapsed() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        let elapsed = clock.tick(t0 + secs(1.5)).unwrap();
        assert!((elapsed - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_elapsed_never_decreases() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        let later = clock.tick(t0 + secs(2.0)).unwrap();
        let earlier = clock.tick(t0 + secs(1.0)).unwrap();
        assert_eq!(earlier, later);
    }

    #[test]
    fn test_pause_excludes_time() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        clock.tick(t0 + secs(1.0));
        clock.pause(t0 + secs(1.0));

        let frozen = clock.tick(t0 + secs(5.0)).unwrap();
        assert!((frozen - 1.0).abs() < 1e-4);

        clock.resume(t0 + secs(11.0));
        let resumed = clock.tick(t0 + secs(12.0)).unwrap();
        assert!((resumed - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_double_pause_keeps_first_point() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        clock.pause(t0 + secs(1.0));
        clock.pause(t0 + secs(3.0));
        clock.resume(t0 + secs(4.0));
        let elapsed = clock.tick(t0 + secs(4.0)).unwrap();
        assert!((elapsed - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start(t0);
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.tick(t0 + secs(1.0)), None);
    }
}
