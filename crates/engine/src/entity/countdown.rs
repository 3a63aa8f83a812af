//! Pre-game countdown.

use protocol::snapshot::CountdownView;

/// Counts down from a start value at one-unit steps, then disappears.
/// Completion is signaled by `advance` returning true; the scene drops the
/// countdown on that tick.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    start_value: u32,
    value: u32,
    start_time: Option<f64>,
    value_time: f64,
}

impl Countdown {
    pub fn new(start_value: u32) -> Self {
        Self {
            start_value,
            // One above the start value so the first advance displays it.
            value: start_value + 1,
            start_time: None,
            value_time: 0.0,
        }
    }

    /// Advance; returns true once the count has run out.
    pub fn advance(&mut self, time: f64) -> bool {
        if self.start_time.is_none() {
            self.start_time = Some(time);
            self.value_time = time;
        }
        let age = time - self.start_time.unwrap_or(time);
        if self.value > 0 && age > (self.start_value + 1 - self.value) as f64 {
            self.value -= 1;
            self.value_time = time;
        }
        age > self.start_value as f64
    }

    pub fn view(&self, time: f64) -> CountdownView {
        CountdownView {
            // The internal value starts one above the display range.
            value: self.value.min(self.start_value),
            value_age: (time - self.value_time) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_at_unit_steps() {
        let mut countdown = Countdown::new(3);
        assert!(!countdown.advance(10.0));
        // First visible value appears on the next tick.
        assert!(!countdown.advance(10.02));
        assert_eq!(countdown.view(10.02).value, 3);
        assert!(!countdown.advance(10.9));
        assert_eq!(countdown.view(10.9).value, 3);
        assert!(!countdown.advance(11.1));
        assert_eq!(countdown.view(11.1).value, 2);
        assert!(!countdown.advance(12.1));
        assert_eq!(countdown.view(12.1).value, 1);
        assert!(countdown.advance(13.1));
    }

    #[test]
    fn value_age_tracks_the_last_change() {
        let mut countdown = Countdown::new(3);
        countdown.advance(0.0);
        countdown.advance(0.5);
        let view = countdown.view(0.8);
        assert_eq!(view.value, 3);
        assert!((view.value_age - 0.3).abs() < 1e-6);
    }
}
