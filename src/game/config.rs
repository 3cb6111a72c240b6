use super::difficulty::DifficultyCurve;

/// Smallest playable field edge. Keeps the starting snake and its food
/// from filling the board on the first tick.
const MIN_EDGE: usize = 8;

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub initial_snake_length: usize,
    pub points_per_food: u32,
    pub curve: DifficultyCurve,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_snake_length: 3,
            points_per_food: 10,
            curve: DifficultyCurve::default(),
        }
    }
}

impl GameConfig {
    /// Config with a custom field size, clamped to the playable minimum.
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        Self {
            grid_width: grid_width.max(MIN_EDGE),
            grid_height: grid_height.max(MIN_EDGE),
            ..Default::default()
        }
    }

    /// A compact field, handy for tests.
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}
