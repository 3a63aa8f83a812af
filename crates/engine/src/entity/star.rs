//! Star pickup entity.

use crate::collision::HitBox;
use glam::Vec2;

/// Fraction of the visual size used for collection overlap.
const HIT_BOX_RATIO: f32 = 0.4;

/// A collectible star drifting leftward across the playfield.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    /// Fixed at spawn from the player count at that moment.
    pub size: f32,
}

impl Star {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    pub fn advance(&mut self, speed: f32, tick_rate: f32) {
        self.pos.x -= speed / tick_rate;
    }

    /// True once the star has fully left the field to the left; the scene
    /// removes it the same tick.
    pub fn is_gone(&self) -> bool {
        self.pos.x < -self.size
    }

    pub fn hit_box(&self) -> HitBox {
        HitBox::centered(
            self.pos.x,
            self.pos.y,
            self.size * HIT_BOX_RATIO,
            self.size * HIT_BOX_RATIO,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drifts_left_and_leaves_the_field() {
        let mut star = Star::new(Vec2::new(0.0, 300.0), 70.0);
        assert!(!star.is_gone());
        for _ in 0..90 {
            star.advance(50.0, 60.0);
        }
        // 90 ticks at 50/60 per tick = 75 units, past -70.
        assert!(star.is_gone());
    }

    #[test]
    fn hit_box_is_a_centered_fraction() {
        let star = Star::new(Vec2::new(100.0, 200.0), 70.0);
        let hit_box = star.hit_box();
        assert_eq!(hit_box.width, 28.0);
        assert_eq!(hit_box.left, 100.0 - 14.0);
        assert_eq!(hit_box.top, 200.0 - 14.0);
    }
}
