//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub playground: PlaygroundConfig,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub star: StarConfig,
    #[serde(default)]
    pub monster: MonsterConfig,
}

impl Config {
    /// Load configuration from `starpond.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new("starpond.toml");
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No starpond.toml found, creating default config");
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            playground: PlaygroundConfig::default(),
            hero: HeroConfig::default(),
            star: StarConfig::default(),
            monster: MonsterConfig::default(),
        }
    }
}

/// Session-level rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Simulation ticks per time-unit, supplied by the external clock.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
    /// Score that ends the game.
    #[serde(default = "default_victory_score")]
    pub victory_score: u32,
    /// Legacy rule: a monster hit also costs one point (floored at zero).
    #[serde(default)]
    pub monster_score_penalty: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            victory_score: default_victory_score(),
            monster_score_penalty: false,
        }
    }
}

fn default_tick_rate() -> f32 {
    60.0
}
fn default_victory_score() -> u32 {
    20
}

/// Playfield geometry. Heroes, stars and monsters move inside the band
/// between `min_y` and `max_y`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaygroundConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_min_y")]
    pub min_y: f32,
    #[serde(default = "default_max_y")]
    pub max_y: f32,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            min_y: default_min_y(),
            max_y: default_max_y(),
        }
    }
}

fn default_width() -> f32 {
    800.0
}
fn default_height() -> f32 {
    600.0
}
fn default_min_y() -> f32 {
    60.0
}
fn default_max_y() -> f32 {
    520.0
}

/// Hero tuning. Size, speed, deceleration and quack range are base values
/// for a 2-player lobby and shrink as more players join.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeroConfig {
    #[serde(default = "default_hero_size")]
    pub size: f32,
    #[serde(default = "default_hero_max_speed")]
    pub max_speed: f32,
    #[serde(default = "default_hero_deceleration")]
    pub deceleration: f32,
    /// How long a monster hit disables a hero, in time-units.
    #[serde(default = "default_paralysis_duration")]
    pub paralysis_duration: f32,
    #[serde(default = "default_quack_range")]
    pub quack_range: f32,
    /// Minimum delay between two quacks by the same hero.
    #[serde(default = "default_quack_cooldown")]
    pub quack_cooldown: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            size: default_hero_size(),
            max_speed: default_hero_max_speed(),
            deceleration: default_hero_deceleration(),
            paralysis_duration: default_paralysis_duration(),
            quack_range: default_quack_range(),
            quack_cooldown: default_quack_cooldown(),
        }
    }
}

fn default_hero_size() -> f32 {
    70.0
}
fn default_hero_max_speed() -> f32 {
    200.0
}
fn default_hero_deceleration() -> f32 {
    300.0
}
fn default_paralysis_duration() -> f32 {
    2.0
}
fn default_quack_range() -> f32 {
    150.0
}
fn default_quack_cooldown() -> f32 {
    10.0
}

/// Star tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StarConfig {
    #[serde(default = "default_star_size")]
    pub size: f32,
    #[serde(default = "default_star_speed")]
    pub speed: f32,
    /// Base spawn period for a solo lobby; divided by sqrt(nb_players).
    #[serde(default = "default_star_spawn_period")]
    pub spawn_period: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            size: default_star_size(),
            speed: default_star_speed(),
            spawn_period: default_star_spawn_period(),
        }
    }
}

fn default_star_size() -> f32 {
    70.0
}
fn default_star_speed() -> f32 {
    50.0
}
fn default_star_spawn_period() -> f32 {
    2.0
}

/// Monster tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonsterConfig {
    #[serde(default = "default_monster_size")]
    pub size: f32,
    #[serde(default = "default_monster_speed")]
    pub speed: f32,
    /// Spawn interval range, drawn uniformly per spawn.
    #[serde(default = "default_monster_spawn_period_min")]
    pub spawn_period_min: f32,
    #[serde(default = "default_monster_spawn_period_max")]
    pub spawn_period_max: f32,
    /// Length of the attacking jump window.
    #[serde(default = "default_monster_jump_duration")]
    pub jump_duration: f32,
    /// Jump period range, drawn once per monster at spawn.
    #[serde(default = "default_monster_jump_period_min")]
    pub jump_period_min: f32,
    #[serde(default = "default_monster_jump_period_max")]
    pub jump_period_max: f32,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            size: default_monster_size(),
            speed: default_monster_speed(),
            spawn_period_min: default_monster_spawn_period_min(),
            spawn_period_max: default_monster_spawn_period_max(),
            jump_duration: default_monster_jump_duration(),
            jump_period_min: default_monster_jump_period_min(),
            jump_period_max: default_monster_jump_period_max(),
        }
    }
}

fn default_monster_size() -> f32 {
    60.0
}
fn default_monster_speed() -> f32 {
    150.0
}
fn default_monster_spawn_period_min() -> f32 {
    1.0
}
fn default_monster_spawn_period_max() -> f32 {
    4.0
}
fn default_monster_jump_duration() -> f32 {
    1.0
}
fn default_monster_jump_period_min() -> f32 {
    1.5
}
fn default_monster_jump_period_max() -> f32 {
    3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.game.victory_score, 20);
        assert_eq!(back.playground.max_y, 520.0);
        assert_eq!(back.monster.jump_period_max, 3.0);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.game.tick_rate, 60.0);
        assert!(!config.game.monster_score_penalty);
        assert_eq!(config.hero.size, 70.0);
    }
}
