use std::time::Duration;

/// A value animated linearly through evenly spaced keyframes.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    values: Vec<f64>,
    duration: Duration,
}

impl Keyframes {
    pub fn new(values: &[f64], duration: Duration) -> Self {
        debug_assert!(!values.is_empty(), "keyframes need at least one value");
        Self {
            values: values.to_vec(),
            duration,
        }
    }

    pub fn last(&self) -> f64 {
        self.values.last().copied().unwrap_or_default()
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Value at `elapsed`; holds the last keyframe once the duration is over.
    pub fn sample(&self, elapsed: Duration) -> f64 {
        if self.values.len() < 2 || self.is_finished(elapsed) {
            return self.last();
        }

        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let segments = (self.values.len() - 1) as f64;
        let position = progress * segments;
        let index = (position.floor() as usize).min(self.values.len() - 2);
        let t = position - index as f64;

        let (from, to) = (self.values[index], self.values[index + 1]);
        from + (to - from) * t
    }
}
