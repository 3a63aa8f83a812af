//! Monster hazard entity.

use crate::collision::HitBox;
use crate::config::MonsterConfig;
use glam::Vec2;

/// Fraction of the visual size used for bite overlap.
const HIT_BOX_RATIO: f32 = 0.7;

/// A monster swimming leftward, periodically jumping to attack.
///
/// The jump period is drawn once at spawn; a hero can only be harmed while
/// `attacking` is true.
#[derive(Debug, Clone, Copy)]
pub struct Monster {
    pub pos: Vec2,
    /// Resting row; the jump arc offsets from here.
    pub base_y: f32,
    pub size: f32,
    pub jump_period: f64,
    jump_time: f64,
    pub attacking: bool,
    /// Sprite rotation in radians, non-zero only mid-jump.
    pub rotation: f32,
}

impl Monster {
    pub fn new(pos: Vec2, size: f32, jump_period: f64) -> Self {
        Self {
            pos,
            base_y: pos.y,
            size,
            jump_period,
            // Armed so the first jump can fire as soon as the period allows.
            jump_time: -jump_period,
            attacking: false,
            rotation: 0.0,
        }
    }

    pub fn advance(&mut self, time: f64, cfg: &MonsterConfig, field_mid_x: f32, tick_rate: f32) {
        self.pos.x -= cfg.speed / tick_rate;

        // Jumps only re-arm while still in the right half of the field.
        if self.pos.x > field_mid_x && time - self.jump_time >= self.jump_period {
            self.jump_time = time;
        }

        let jump_frac = ((time - self.jump_time) / cfg.jump_duration as f64) as f32;
        if (0.0..1.0).contains(&jump_frac) {
            self.pos.y = self.base_y - (-0.7 + (1.0 - 2.0 * jump_frac).cos()) * self.size;
            self.rotation = 0.5 - jump_frac;
            self.attacking = true;
        } else {
            self.pos.y = self.base_y;
            self.rotation = 0.0;
            self.attacking = false;
        }
    }

    /// True once the monster has fully left the field to the left.
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
