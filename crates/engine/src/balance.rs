//! Player-count balancing formulas.
//!
//! Per-hero footprint and speed shrink as the lobby grows while the star
//! spawn rate increases, keeping per-capita difficulty roughly constant.

use crate::config::{HeroConfig, StarConfig};

/// Scale factor applied to per-hero quantities: `sqrt(2 / max(2, n))`.
///
/// Equal to 1.0 up to two players, then decreasing.
pub fn crowd_scale(nb_players: usize) -> f32 {
    (2.0 / nb_players.max(2) as f32).sqrt()
}

pub fn hero_size(cfg: &HeroConfig, nb_players: usize) -> f32 {
    cfg.size * crowd_scale(nb_players)
}

pub fn hero_max_speed(cfg: &HeroConfig, nb_players: usize) -> f32 {
    cfg.max_speed * crowd_scale(nb_players)
}

pub fn hero_deceleration(cfg: &HeroConfig, nb_players: usize) -> f32 {
    cfg.deceleration * crowd_scale(nb_players)
}

pub fn quack_range(cfg: &HeroConfig, nb_players: usize) -> f32 {
    cfg.quack_range * crowd_scale(nb_players)
}

pub fn star_size(cfg: &StarConfig, nb_players: usize) -> f32 {
    cfg.size * crowd_scale(nb_players)
}

/// Stars spawn faster as the lobby grows: `base / sqrt(n)`.
pub fn star_spawn_period(cfg: &StarConfig, nb_players: usize) -> f32 {
    cfg.spawn_period / (nb_players.max(1) as f32).sqrt()
}
