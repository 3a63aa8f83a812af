//! Input and state events crossing the simulation boundary.

use serde::{Deserialize, Serialize};

/// Game phase, matching the wire values broadcast in step events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStep {
    /// Waiting for the external asset loader.
    Loading,
    /// Lobby: players join and signal ready.
    Intro,
    /// Active play.
    Game,
    /// A winner has been declared.
    Victory,
}

/// Phase change event, emitted by the core on every transition.
///
/// The external layer forwards it both as a state broadcast and as a
/// joypad-bound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub step: GameStep,
}

/// A joypad input event routed to one player's hero.
///
/// Missing fields are no-ops. `ready` is only honored during INTRO and
/// `restart` during VICTORY; both are silently ignored otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoypadInput {
    /// Horizontal direction impulse, usually -1, 0 or 1.
    pub dir_x: Option<f32>,
    /// Vertical direction impulse.
    pub dir_y: Option<f32>,
    /// Ready toggle while in the lobby.
    pub ready: Option<bool>,
    /// Trigger the quack ability.
    pub quack: Option<bool>,
    /// Request a full game reset after a victory.
    pub restart: Option<bool>,
}
