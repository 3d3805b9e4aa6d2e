use std::time::{Duration, Instant};

/// `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Time-based interpolation of a single value. Sampling reads the caller's
/// clock, so the speed does not depend on how often frames arrive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_ease_out_cubic_is_monotonic() {
        let mut last = 0.0;
        for step in 1..=100 {
            let value = ease_out_cubic(step as f32 / 100.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_tween_sampling() {
        let start = Instant::now();
        let tween = Tween::new(-60.0, -400.0, start, Duration::from_millis(300));

        assert_eq!(tween.sample(start), -60.0);
        let halfway = tween.sample(start + Duration::from_millis(150));
        assert!((halfway - (-60.0 - 340.0 * 0.875)).abs() < 1e-3);
        assert_eq!(tween.sample(start + Duration::from_millis(300)), -400.0);
        assert_eq!(tween.sample(start + Duration::from_secs(5)), -400.0);
        assert!(tween.is_finished(start + Duration::from_millis(300)));
        assert!(!tween.is_finished(start + Duration::from_millis(299)));
    }

    #[test]
    fn test_tween_before_start_is_at_origin() {
        let start = Instant::now() + Duration::from_millis(50);
        let tween = Tween::new(10.0, 0.0, start, Duration::from_millis(300));
        assert_eq!(tween.sample(Instant::now()), 10.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let start = Instant::now();
        let tween = Tween::new(10.0, 0.0, start, Duration::ZERO);
        assert!(tween.is_finished(start));
        assert_eq!(tween.sample(start), 0.0);
    }
}
