use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The head left the field.
    WallCollision,
    /// The head ran into the snake's own body.
    SelfCollision,
    /// The snake covers every cell; there is nowhere left to put food.
    GridFull,
}

impl GameOverCause {
    /// Filling the grid ends the session as a win.
    pub fn is_win(self) -> bool {
        matches!(self, GameOverCause::GridFull)
    }
}

/// Live state of one game: everything the simulation mutates per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub level: u32,
}

impl GameSession {
    pub fn new(grid: Grid, snake: Snake, food: Cell) -> Self {
        Self {
            grid,
            snake,
            food,
            score: 0,
            level: 1,
        }
    }
}
