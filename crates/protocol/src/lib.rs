//! Shared boundary types for starpond.
//!
//! This crate contains:
//! - Player records as supplied by the session layer
//! - Joypad input events and phase/step events
//! - Renderable scene snapshots
//! - Boundary error types

mod error;
pub mod events;
pub mod snapshot;

pub use error::EventError;
pub use events::{GameStep, JoypadInput, StepEvent};
pub use snapshot::SceneSnapshot;

use serde::{Deserialize, Serialize};

/// RGB color used to tint hero sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Represents a 2D position using glam's Vec2.
pub type Position = glam::Vec2;

/// Identifier assigned to a player by the session layer.
pub type PlayerId = String;

/// Player record owned by the session layer; the core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Display name.
    pub name: String,
    /// Sprite tint color.
    pub color: Color,
}
