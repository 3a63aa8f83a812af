//! Timed star and monster spawning.

use crate::balance;
use crate::config::{MonsterConfig, PlaygroundConfig, StarConfig};
use crate::entity::{Monster, Star};
use glam::Vec2;
use rand::Rng;

/// How far past the right edge entities spawn.
const SPAWN_X_MARGIN: f32 = 50.0;

/// Maintains the next-spawn timestamps for stars and monsters.
///
/// Both timers are seeded on entering the game phase; the star period is
/// player-count dependent, the monster period is not.
#[derive(Debug, Clone, Copy)]
pub struct SpawnScheduler {
    next_star_time: f64,
    next_monster_time: f64,
}

impl SpawnScheduler {
    /// Scheduler with both timers armed for `time`.
    pub fn seeded(time: f64) -> Self {
        Self {
            next_star_time: time,
            next_monster_time: time,
        }
    }

    /// Spawn a star if one is due, rescheduling by the balanced period.
    pub fn poll_star<R: Rng>(
        &mut self,
        time: f64,
        nb_players: usize,
        cfg: &StarConfig,
        playground: &PlaygroundConfig,
        rng: &mut R,
    ) -> Option<Star> {
        if time <= self.next_star_time {
            return None;
        }
        self.next_star_time = time + balance::star_spawn_period(cfg, nb_players) as f64;
        let size = balance::star_size(cfg, nb_players);
        let y = band_position(playground, size, rng);
        Some(Star::new(
            Vec2::new(playground.width + SPAWN_X_MARGIN, y),
            size,
        ))
    }

    /// Spawn a monster if one is due, rescheduling by a uniform draw from
    /// the configured range.
    pub fn poll_monster<R: Rng>(
        &mut self,
        time: f64,
        cfg: &MonsterConfig,
        playground: &PlaygroundConfig,
        rng: &mut R,
    ) -> Option<Monster> {
        if time <= self.next_monster_time {
            return None;
        }
        self.next_monster_time =
            time + sample_range(rng, cfg.spawn_period_min, cfg.spawn_period_max) as f64;
        let base_y = band_position(playground, cfg.size, rng);
        let jump_period = sample_range(rng, cfg.jump_period_min, cfg.jump_period_max) as f64;
        Some(Monster::new(
            Vec2::new(playground.width + SPAWN_X_MARGIN, base_y),
            cfg.size,
            jump_period,
        ))
    }

    pub fn next_star_time(&self) -> f64 {
        self.next_star_time
    }

    pub fn next_monster_time(&self) -> f64 {
        self.next_monster_time
    }
}

/// Random y within the playground band, inset so the entity fits.
fn band_position<R: Rng>(playground: &PlaygroundConfig, size: f32, rng: &mut R) -> f32 {
    playground.min_y
        + size / 2.0
        + (playground.max_y - playground.min_y - size) * rng.random::<f32>()
}

fn sample_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
