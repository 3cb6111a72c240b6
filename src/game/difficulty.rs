use std::time::Duration;

/// Score-driven speed curve. Every `level_threshold` points the tick
/// interval shrinks by one `interval_decrement`, never dropping below
/// `min_interval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyCurve {
    pub initial_interval: Duration,
    pub interval_decrement: Duration,
    pub min_interval: Duration,
    pub level_threshold: u32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(200),
            interval_decrement: Duration::from_millis(10),
            min_interval: Duration::from_millis(50),
            level_threshold: 30,
        }
    }
}

impl DifficultyCurve {
    /// Difficulty level for `score`, starting at 1.
    pub fn level(&self, score: u32) -> u32 {
        score / self.level_threshold.max(1) + 1
    }

    /// Time between simulation ticks at `score`.
    pub fn tick_interval(&self, score: u32) -> Duration {
        let steps = score / self.level_threshold.max(1);
        let interval = self
            .initial_interval
            .saturating_sub(self.interval_decrement * steps);
        interval.max(self.min_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_steps_every_threshold_points() {
        let curve = DifficultyCurve::default();

        assert_eq!(curve.level(0), 1);
        assert_eq!(curve.level(29), 1);
        assert_eq!(curve.level(30), 2);
        assert_eq!(curve.level(59), 2);
        assert_eq!(curve.level(60), 3);
    }

    #[test]
    fn interval_shrinks_with_score() {
        let curve = DifficultyCurve::default();

        assert_eq!(curve.tick_interval(0), Duration::from_millis(200));
        assert_eq!(curve.tick_interval(29), Duration::from_millis(200));
        assert_eq!(curve.tick_interval(30), Duration::from_millis(190));
        assert_eq!(curve.tick_interval(90), Duration::from_millis(170));
    }

    #[test]
    fn interval_never_drops_below_the_floor() {
        let curve = DifficultyCurve::default();

        // 15 steps would reach 50ms exactly; far beyond stays clamped.
        assert_eq!(curve.tick_interval(450), Duration::from_millis(50));
        assert_eq!(curve.tick_interval(100_000), Duration::from_millis(50));
    }

    #[test]
    fn interval_is_monotonic_non_increasing() {
        let curve = DifficultyCurve::default();
        let mut last = curve.tick_interval(0);

        for score in (0..1000).step_by(10) {
            let next = curve.tick_interval(score);
            assert!(next <= last, "interval rose at score {score}");
            last = next;
        }
    }

    #[test]
    fn zero_threshold_does_not_panic() {
        let curve = DifficultyCurve {
            level_threshold: 0,
            ..DifficultyCurve::default()
        };

        assert_eq!(curve.level(100), 101);
        assert_eq!(curve.tick_interval(100), Duration::from_millis(50));
    }
}
