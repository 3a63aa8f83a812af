//! Per-tick renderable scene snapshot.
//!
//! Everything the rendering collaborator needs is expressed as plain data
//! here; sprite selection, tinting and text layout stay on the render side.

use crate::events::GameStep;
use crate::{Color, PlayerId};
use serde::{Deserialize, Serialize};

/// Horizontal facing of a hero sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Kind of a score-delta notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifKind {
    /// A star was collected.
    Gain,
    /// A point was lost to a monster hit.
    Loss,
}

/// One hero, as visible this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroView {
    pub player_id: PlayerId,
    pub name: String,
    pub color: Color,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub facing: Facing,
    /// False on the off-frames of the paralysis blink.
    pub visible: bool,
    /// True while the hero is paralyzed by a monster hit.
    pub paralyzed: bool,
    pub score: u32,
}

/// One drifting star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// One monster, with its jump animation state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonsterView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Sprite rotation in radians, non-zero only mid-jump.
    pub rotation: f32,
    /// True during the jump window (mouth-open frame).
    pub jumping: bool,
}

/// One floating score-delta text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifView {
    pub text: String,
    pub kind: NotifKind,
    pub x: f32,
    pub y: f32,
}

/// Countdown display state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountdownView {
    /// Current displayed value.
    pub value: u32,
    /// Time since the value last changed, for the pop animation.
    pub value_age: f32,
}

/// One line of the scores panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub name: String,
    pub score: u32,
}

/// The full renderable state of one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub step: GameStep,
    /// Scene-relative time in time-units.
    pub time: f64,
    pub heroes: Vec<HeroView>,
    pub stars: Vec<StarView>,
    pub monsters: Vec<MonsterView>,
    pub notifs: Vec<NotifView>,
    pub countdown: Option<CountdownView>,
    /// Scores panel lines, empty before the game phase.
    pub scoreboard: Vec<ScoreLine>,
    /// Winner name, set during VICTORY.
    pub winner: Option<String>,
}
