//! Boundary error types.

use thiserror::Error;

/// Errors reported when an external event cannot be applied to the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("unknown player id: {0}")]
    UnknownPlayer(String),

    #[error("non-finite input direction: ({0}, {1})")]
    NonFiniteDirection(f32, f32),
}
