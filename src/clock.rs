// Wall-clock helpers for the main loop: the fixed-rate update tick and the FPS readout.

use std::time::{Duration, Instant};

/// Fires at most once per `interval`, reporting the real time since the last fire.
/// The reported dt carries the loop's jitter; the animation clock corrects for it.
pub struct IntervalScheduler {
    interval: Duration,
    last_fire: Instant,
}

impl IntervalScheduler {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last_fire: now }
    }

    /// Schedule `rate` ticks per second.
    pub fn with_rate(rate: u32, now: Instant) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / rate.max(1) as f64), now)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Some(dt seconds) once the interval has passed, None before that.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.last_fire);
        if elapsed < self.interval {
            return None;
        }
        self.last_fire = now;
        Some(elapsed.as_secs_f64())
    }
}

/// Counts presented frames and reports the rate once per second.
pub struct FpsCounter {
    last_report: Instant,
    frames: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self { last_report: now, frames: 0 }
    }

    pub fn frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let secs = now.saturating_duration_since(self.last_report);
        if secs < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames as f32 / secs.as_secs_f32();
        self.frames = 0;
        self.last_report = now;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_waits_for_interval() {
        let t0 = Instant::now();
        let mut s = IntervalScheduler::new(Duration::from_millis(10), t0);
        assert_eq!(s.poll(t0 + Duration::from_millis(9)), None);
        let dt = s.poll(t0 + Duration::from_millis(13)).unwrap();
        assert!((dt - 0.013).abs() < 1e-9);
        // the next interval counts from the last fire
        assert_eq!(s.poll(t0 + Duration::from_millis(20)), None);
        assert!(s.poll(t0 + Duration::from_millis(23)).is_some());
    }

    #[test]
    fn rate_becomes_interval() {
        let s = IntervalScheduler::with_rate(120, Instant::now());
        assert!((s.interval().as_secs_f64() - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn fps_reported_once_per_second() {
        let t0 = Instant::now();
        let mut c = FpsCounter::new(t0);
        for i in 1..60 {
            assert_eq!(c.frame(t0 + Duration::from_millis(i * 16)), None);
        }
        let fps = c.frame(t0 + Duration::from_secs(1)).unwrap();
        assert!((fps - 60.0).abs() < 0.01);
    }
}
