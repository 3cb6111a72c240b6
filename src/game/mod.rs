//! Core game rules for Snake
//!
//! Everything in here is pure simulation with no I/O or rendering
//! dependencies, so the whole module is exercisable from tests.

pub mod config;
pub mod difficulty;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use difficulty::DifficultyCurve;
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use grid::{Cell, Grid};
pub use session::{GameOverCause, GameSession};
pub use snake::Snake;
