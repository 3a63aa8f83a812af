//! Top-level simulation facade.
//!
//! The external layer (transport, renderer, asset loader) talks only to
//! `Game`: it pushes the player roster and joypad events, drives the clock,
//! and pulls step events plus a renderable snapshot every tick.

use crate::config::Config;
use crate::scene::{GameScene, TickReport};
use protocol::{EventError, GameStep, JoypadInput, PlayerId, PlayerInfo, SceneSnapshot};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// One game session, LOADING through VICTORY and restarts.
#[derive(Debug, Clone)]
pub struct Game {
    config: Config,
    players: HashMap<PlayerId, PlayerInfo>,
    assets_ready: bool,
    pending_inputs: Vec<(PlayerId, JoypadInput)>,
    scene: GameScene,
    /// Seeds successive scenes, so a seeded session replays identically
    /// across restarts.
    rng: SmallRng,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let scene_seed = rng.random();
        Self {
            scene: GameScene::new(config.clone(), scene_seed),
            config,
            players: HashMap::new(),
            assets_ready: false,
            pending_inputs: Vec::new(),
            rng,
        }
    }

    /// External readiness signal; gates LOADING → INTRO.
    pub fn set_assets_ready(&mut self, ready: bool) {
        self.assets_ready = ready;
    }

    /// Replace the player roster wholesale. The scene diffs it against its
    /// hero collection on the next INTRO tick.
    pub fn sync_players(&mut self, players: HashMap<PlayerId, PlayerInfo>) {
        debug!(count = players.len(), "player roster replaced");
        self.players = players;
    }

    /// Queue a joypad event for the next tick.
    ///
    /// Invalid events are rejected here (and logged); the returned error is
    /// the same value a stale event would surface in `TickReport::rejected`.
    pub fn handle_input(&mut self, player_id: &str, input: JoypadInput) -> Result<(), EventError> {
        if let Err(err) = validate_input(&self.players, player_id, &input) {
            warn!(player = player_id, %err, "rejected joypad input");
            return Err(err);
        }
        self.pending_inputs.push((player_id.to_owned(), input));
        Ok(())
    }

    /// Advance the simulation by one tick of the external clock.
    pub fn update(&mut self, time: f64) -> TickReport {
        let inputs = std::mem::take(&mut self.pending_inputs);
        let report = self
            .scene
            .update(time, &self.players, self.assets_ready, &inputs);
        for err in &report.rejected {
            warn!(%err, "joypad input dropped during tick");
        }
        if self.scene.take_restart_request() {
            info!("restart requested, resetting scene");
            self.scene = GameScene::new(self.config.clone(), self.rng.random());
        }
        report
    }

    /// Renderable view of the current tick.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.scene.snapshot(&self.players)
    }

    pub fn step(&self) -> GameStep {
        self.scene.step()
    }
}

/// Shared validation for joypad events, applied both when queueing and when
/// a queued event finally lands on a tick.
pub(crate) fn validate_input(
    players: &HashMap<PlayerId, PlayerInfo>,
    player_id: &str,
    input: &JoypadInput,
) -> Result<(), EventError> {
    if !players.contains_key(player_id) {
        return Err(EventError::UnknownPlayer(player_id.to_owned()));
    }
    let dir_x = input.dir_x.unwrap_or(0.0);
    let dir_y = input.dir_y.unwrap_or(0.0);
    if !dir_x.is_finite() || !dir_y.is_finite() {
        return Err(EventError::NonFiniteDirection(dir_x, dir_y));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Color;

    fn roster(ids: &[&str]) -> HashMap<PlayerId, PlayerInfo> {
        ids.iter()
            .map(|id| {
                (
                    id.to_string(),
                    PlayerInfo {
                        name: id.to_uppercase(),
                        color: Color::new(10, 20, 30),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn unknown_player_is_rejected_at_the_boundary() {
        let mut game = Game::with_seed(Config::default(), 1);
        game.sync_players(roster(&["p1"]));
        let err = game
            .handle_input("nope", JoypadInput::default())
            .unwrap_err();
        assert_eq!(err, EventError::UnknownPlayer("nope".to_string()));
    }

    #[test]
    fn non_finite_direction_is_rejected() {
        let mut game = Game::with_seed(Config::default(), 1);
        game.sync_players(roster(&["p1"]));
        let input = JoypadInput {
            dir_x: Some(f32::NAN),
            dir_y: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            game.handle_input("p1", input),
            Err(EventError::NonFiniteDirection(_, _))
        ));
    }

    #[test]
    fn stale_input_surfaces_in_the_tick_report() {
        let mut game = Game::with_seed(Config::default(), 1);
        game.set_assets_ready(true);
        game.sync_players(roster(&["p1", "p2"]));
        game.update(1.0);
        // Queued while valid, stale by the time the tick runs.
        game.handle_input("p2", JoypadInput::default()).unwrap();
        game.sync_players(roster(&["p1"]));
        let report = game.update(1.02);
        assert_eq!(
            report.rejected,
            vec![EventError::UnknownPlayer("p2".to_string())]
        );
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let run = || {
            let mut game = Game::with_seed(Config::default(), 99);
            game.set_assets_ready(true);
            game.sync_players(roster(&["p1", "p2"]));
            let ready = JoypadInput {
                ready: Some(true),
                ..Default::default()
            };
            let mut frame = 0u64;
            let mut step_at = None;
            while frame < 600 {
                frame += 1;
                let time = frame as f64 / 60.0;
                if frame == 30 {
                    game.handle_input("p1", ready).unwrap();
                    game.handle_input("p2", ready).unwrap();
                }
                game.update(time);
                if step_at.is_none() && game.step() == GameStep::Game {
                    step_at = Some(frame);
                }
            }
            (step_at, game.snapshot())
        };
        let (step_a, snap_a) = run();
        let (step_b, snap_b) = run();
        assert_eq!(step_a, Some(30));
        assert_eq!(step_a, step_b);
        assert_eq!(snap_a, snap_b);
    }
}
