//! Hero entity and its movement state machine.

use super::{bound, step_toward};
use crate::collision::HitBox;
use crate::config::PlaygroundConfig;
use glam::Vec2;
use protocol::snapshot::Facing;
use protocol::PlayerId;

/// Minimum delay between two applied movement impulses, in time-units.
/// Together with `INPUT_MAX_AGE` this turns bursty joypad input into
/// discrete dashes instead of continuous steering.
const MOVE_DEBOUNCE: f64 = 0.6;
/// How recent an input sample must be to produce an impulse.
const INPUT_MAX_AGE: f64 = 0.2;
/// Paralysis blink frequency, in Hz.
const BLINK_RATE: f64 = 4.0;

/// Hero behavior states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroState {
    /// Normal play: dashes, clamping, deceleration.
    Moving,
    /// Paralyzed after a monster hit, blinking.
    Attacked,
    /// Running back in from the left edge.
    Respawning,
}

/// Per-tick tuning derived from the current player count.
#[derive(Debug, Clone, Copy)]
pub struct HeroTuning {
    pub size: f32,
    pub max_speed: f32,
    pub deceleration: f32,
    pub paralysis_duration: f64,
}

/// The last directional sample received from the player's joypad.
#[derive(Debug, Clone, Copy)]
struct InputSample {
    dir: Vec2,
    time: f64,
}

/// A player-controlled hero.
#[derive(Debug, Clone)]
pub struct Hero {
    pub player_id: PlayerId,
    pub pos: Vec2,
    pub spd: Vec2,
    /// Recomputed every tick from the current player count.
    pub size: f32,
    pub state: HeroState,
    pub score: u32,
    /// Lobby readiness flag, set from joypad input during INTRO.
    pub ready: bool,
    pub facing: Facing,
    pub visible: bool,
    last_input: Option<InputSample>,
    /// When the last movement impulse was applied.
    move_time: f64,
    attack_time: f64,
    last_quack_time: f64,
}

impl Hero {
    pub fn new(player_id: PlayerId, pos: Vec2, size: f32) -> Self {
        Self {
            player_id,
            pos,
            spd: Vec2::ZERO,
            size,
            state: HeroState::Moving,
            score: 0,
            ready: false,
            facing: Facing::Left,
            visible: true,
            last_input: None,
            move_time: -1.0,
            attack_time: 0.0,
            last_quack_time: f64::NEG_INFINITY,
        }
    }

    /// Advance one tick. `others` holds every other hero's current position,
    /// in collection order, already including this tick's earlier updates.
    pub fn advance(
        &mut self,
        time: f64,
        tuning: &HeroTuning,
        others: &[Vec2],
        playground: &PlaygroundConfig,
        tick_rate: f32,
    ) {
        self.size = tuning.size;
        match self.state {
            HeroState::Moving => self.advance_moving(time, tuning, others, playground, tick_rate),
            HeroState::Attacked => {
                self.visible = (time * BLINK_RATE).fract() > 0.5;
                if time > self.attack_time + tuning.paralysis_duration {
                    self.state = HeroState::Respawning;
                    self.pos.x = -self.size;
                    self.spd = Vec2::new(tuning.max_speed, 0.0);
                    self.facing = Facing::Right;
                }
            }
            HeroState::Respawning => {
                self.visible = true;
                self.pos.x += self.spd.x / tick_rate;
                if self.pos.x >= self.size / 2.0 {
                    self.state = HeroState::Moving;
                }
            }
        }
    }

    fn advance_moving(
        &mut self,
        time: f64,
        tuning: &HeroTuning,
        others: &[Vec2],
        playground: &PlaygroundConfig,
        tick_rate: f32,
    ) {
        self.visible = true;

        if let Some(input) = self.last_input {
            if time - self.move_time >= MOVE_DEBOUNCE && time - input.time < INPUT_MAX_AGE {
                self.spd = input.dir * tuning.max_speed;
                self.move_time = time;
            }
        }

        // Playground bounds, narrowed per-axis against every nearby hero.
        // Narrowing is computed from cross-axis proximity: a hero within one
        // size horizontally restricts the vertical range and vice versa.
        let half = self.size / 2.0;
        let mut min_x = half;
        let mut max_x = playground.width - half;
        let mut min_y = playground.min_y + half;
        let mut max_y = playground.max_y - half;
        for other in others {
            if (self.pos.x - other.x).abs() < self.size {
                if other.y > self.pos.y {
                    max_y = max_y.min(other.y - self.size);
                } else {
                    min_y = min_y.max(other.y + self.size);
                }
            }
            if (self.pos.y - other.y).abs() < self.size {
                if other.x > self.pos.x {
                    max_x = max_x.min(other.x - self.size);
                } else {
                    min_x = min_x.max(other.x + self.size);
                }
            }
        }
        // Fixed order: x, then y.
        self.pos.x = bound(self.pos.x + self.spd.x / tick_rate, min_x, max_x);
        self.pos.y = bound(self.pos.y + self.spd.y / tick_rate, min_y, max_y);

        self.spd.x = step_toward(self.spd.x, tuning.deceleration / tick_rate, 0.0);
        self.spd.y = step_toward(self.spd.y, tuning.deceleration / tick_rate, 0.0);

        if self.spd.x < 0.0 {
            self.facing = Facing::Left;
        }
        if self.spd.x > 0.0 {
            self.facing = Facing::Right;
        }
    }

    /// Record a directional joypad sample; it becomes a dash on the next
    /// tick that clears the debounce window.
    pub fn on_direction_input(&mut self, dir: Vec2, time: f64) {
        self.last_input = Some(InputSample { dir, time });
    }

    /// Forced impulse (from a nearby quack): applied immediately and
    /// resetting the debounce window.
    pub fn apply_impulse(&mut self, spd: Vec2, time: f64) {
        if self.state != HeroState::Moving {
            return;
        }
        self.spd = spd;
        self.move_time = time;
    }

    /// Attempt a quack; returns false while on cooldown or paralyzed.
    pub fn try_quack(&mut self, time: f64, cooldown: f64) -> bool {
        if self.state != HeroState::Moving || time - self.last_quack_time < cooldown {
            return false;
        }
        self.last_quack_time = time;
        true
    }

    pub fn on_star_hit(&mut self) {
        self.score += 1;
    }

    pub fn on_monster_hit(&mut self, time: f64, score_penalty: bool) {
        self.state = HeroState::Attacked;
        self.attack_time = time;
        if score_penalty {
            self.score = self.score.saturating_sub(1);
        }
    }

    /// Only the lower body can be bitten: full width, half height, top edge
    /// at the hero's y.
    pub fn hit_box(&self) -> HitBox {
        HitBox {
            left: self.pos.x - self.size / 2.0,
            top: self.pos.y,
            width: self.size,
            height: self.size / 2.0,
        }
    }
}
