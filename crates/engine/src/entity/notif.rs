//! Floating score-delta notifications.

use glam::Vec2;
use protocol::snapshot::NotifKind;

/// Upward drift speed, in units per time-unit.
const RISE_SPEED: f32 = 50.0;
/// Lifetime after the first advance, in time-units.
const LIFETIME: f64 = 1.0;

/// An ephemeral floating text ("+ 1", "- 1") spawned on hit events.
#[derive(Debug, Clone)]
pub struct Notif {
    pub text: String,
    pub kind: NotifKind,
    pub pos: Vec2,
    remove_time: Option<f64>,
}

impl Notif {
    pub fn new(text: String, kind: NotifKind, pos: Vec2) -> Self {
        Self {
            text,
            kind,
            pos,
            remove_time: None,
        }
    }

    pub fn advance(&mut self, time: f64, tick_rate: f32) {
        self.pos.y -= RISE_SPEED / tick_rate;
        self.remove_time.get_or_insert(time + LIFETIME);
    }

    pub fn is_done(&self, time: f64) -> bool {
        self.remove_time.is_some_and(|t| time > t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_up_then_expires() {
        let mut notif = Notif::new("+ 1".to_string(), NotifKind::Gain, Vec2::new(100.0, 300.0));
        assert!(!notif.is_done(0.0));
        notif.advance(5.0, 60.0);
        assert!(notif.pos.y < 300.0);
        assert!(!notif.is_done(5.9));
        assert!(notif.is_done(6.01));
    }
}
