//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    /// Ticks are frozen; the bus keeps its queue until play resumes.
    Paused,
}
