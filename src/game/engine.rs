use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;
use rand::Rng;

use super::config::GameConfig;
use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::session::{GameOverCause, GameSession};
use super::snake::Snake;

/// What one simulation tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Food was eaten this tick.
    pub ate_food: bool,
    /// The score crossed a level threshold this tick.
    pub leveled_up: bool,
    /// The session ended this tick.
    pub ended: Option<GameOverCause>,
}

impl StepResult {
    fn fatal(cause: GameOverCause) -> Self {
        Self {
            ended: Some(cause),
            ..Self::default()
        }
    }
}

/// Runs the per-tick rules of the game. Generic over the RNG so tests
/// can pin food placement with a seed.
#[derive(Debug)]
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh session: the snake sits at the center heading
    /// right, with one food placed on a free cell.
    pub fn new_session(&mut self) -> GameSession {
        let grid = Grid::new(self.config.grid_width, self.config.grid_height);
        let length = self
            .config
            .initial_snake_length
            .clamp(1, self.config.grid_width / 2);
        let snake = Snake::new(grid.center(), Direction::Right, length);
        let food = self
            .spawn_food(&grid, &snake)
            .expect("a fresh board always has free cells");

        GameSession::new(grid, snake, food)
    }

    /// Advance the session by one tick: commit the buffered turn, move
    /// the head, resolve collisions, then growth, scoring and food.
    /// The session is left untouched when the move is fatal.
    pub fn step(&mut self, session: &mut GameSession) -> StepResult {
        let heading = session.snake.take_heading();
        let target = session.snake.head().step(heading);

        if !session.grid.contains(target) {
            return StepResult::fatal(GameOverCause::WallCollision);
        }

        let eating = target == session.food;
        if self.hits_body(&session.snake, target, eating) {
            return StepResult::fatal(GameOverCause::SelfCollision);
        }

        session.snake.advance(target, eating);

        let mut result = StepResult {
            ate_food: eating,
            ..StepResult::default()
        };

        if eating {
            session.score += self.config.points_per_food;
            let level = self.config.curve.level(session.score);
            if level > session.level {
                session.level = level;
                result.leveled_up = true;
            }
            match self.spawn_food(&session.grid, &session.snake) {
                Some(cell) => session.food = cell,
                // The snake covers the whole field: a win.
                None => result.ended = Some(GameOverCause::GridFull),
            }
        }

        result
    }

    /// True if moving into `target` hits the body. The tail cell does
    /// not count unless the snake grows this tick, because the tail
    /// vacates it in the same move.
    fn hits_body(&self, snake: &Snake, target: Cell, eating: bool) -> bool {
        match snake.segments().iter().position(|&cell| cell == target) {
            None => false,
            Some(index) => {
                let is_tail = index == snake.len() - 1;
                !is_tail || eating
            }
        }
    }

    /// Pick a food cell uniformly among the free cells, or `None` when
    /// the snake covers the entire grid.
    pub fn spawn_food(&mut self, grid: &Grid, snake: &Snake) -> Option<Cell> {
        grid.cells()
            .filter(|&cell| !snake.occupies(cell))
            .choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_engine() -> GameEngine<StdRng> {
        GameEngine::with_rng(GameConfig::small(), StdRng::seed_from_u64(42))
    }

    /// Session on a 10x10 grid with the snake and food placed by hand.
    fn session_with(snake: Snake, food: Cell) -> GameSession {
        GameSession::new(Grid::new(10, 10), snake, food)
    }

    #[test]
    fn new_session_places_snake_at_center_and_food_clear() {
        let mut engine = test_engine();
        let session = engine.new_session();

        assert_eq!(session.snake.head(), Cell::new(5, 5));
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.snake.direction(), Direction::Right);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert!(!session.snake.occupies(session.food));
        assert!(session.grid.contains(session.food));
    }

    #[test]
    fn plain_move_keeps_length_and_score() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(5, 5), Direction::Right, 3),
            Cell::new(0, 0),
        );

        let result = engine.step(&mut session);

        assert_eq!(result, StepResult::default());
        assert_eq!(session.snake.head(), Cell::new(6, 5));
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn eating_scores_grows_and_respawns_food() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(5, 5), Direction::Right, 3),
            Cell::new(6, 5),
        );

        let result = engine.step(&mut session);

        assert!(result.ate_food);
        assert_eq!(result.ended, None);
        assert_eq!(session.score, 10);
        assert_eq!(session.snake.len(), 4);
        assert_eq!(session.snake.head(), Cell::new(6, 5));
        assert_eq!(session.snake.tail(), Cell::new(3, 5));

        // Replacement food lands somewhere free.
        assert_ne!(session.food, Cell::new(6, 5));
        assert!(!session.snake.occupies(session.food));
        assert!(session.grid.contains(session.food));
    }

    #[test]
    fn hitting_a_wall_ends_the_session_untouched() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(9, 5), Direction::Right, 3),
            Cell::new(0, 0),
        );

        let result = engine.step(&mut session);

        assert_eq!(result.ended, Some(GameOverCause::WallCollision));
        assert!(!result.ate_food);
        assert_eq!(session.snake.head(), Cell::new(9, 5));
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn turning_into_the_body_ends_the_session() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(5, 5), Direction::Right, 5),
            Cell::new(0, 0),
        );

        // Curl back into the middle of the body.
        session.snake.buffer_turn(Direction::Up);
        assert_eq!(engine.step(&mut session).ended, None);
        session.snake.buffer_turn(Direction::Left);
        assert_eq!(engine.step(&mut session).ended, None);
        session.snake.buffer_turn(Direction::Down);

        let result = engine.step(&mut session);
        assert_eq!(result.ended, Some(GameOverCause::SelfCollision));
    }

    #[test]
    fn chasing_the_tail_is_legal() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(5, 5), Direction::Right, 4),
            Cell::new(0, 0),
        );

        // A 4-cell snake circling a 2x2 block steps into the cell its
        // tail is vacating every fourth move.
        let circle = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];
        for _ in 0..3 {
            for turn in circle {
                session.snake.buffer_turn(turn);
                let result = engine.step(&mut session);
                assert_eq!(result.ended, None);
            }
        }
        assert_eq!(session.snake.len(), 4);
    }

    #[test]
    fn tail_cell_is_fatal_when_eating_there() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(5, 5), Direction::Right, 4),
            Cell::new(0, 0),
        );

        // Walk three sides of the 2x2 circle, then put food on the
        // tail cell before closing the loop. Growing means the tail
        // stays put, so the move is a self collision.
        session.snake.buffer_turn(Direction::Up);
        engine.step(&mut session);
        session.snake.buffer_turn(Direction::Right);
        engine.step(&mut session);
        session.snake.buffer_turn(Direction::Down);
        engine.step(&mut session);

        session.food = session.snake.tail();
        session.snake.buffer_turn(Direction::Left);
        let result = engine.step(&mut session);

        assert_eq!(result.ended, Some(GameOverCause::SelfCollision));
        assert!(!result.ate_food);
    }

    #[test]
    fn level_rises_every_thirty_points() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(5, 5), Direction::Right, 3),
            Cell::new(6, 5),
        );
        session.score = 20;

        let result = engine.step(&mut session);

        assert!(result.ate_food);
        assert!(result.leveled_up);
        assert_eq!(session.score, 30);
        assert_eq!(session.level, 2);
    }

    #[test]
    fn no_level_up_between_thresholds() {
        let mut engine = test_engine();
        let mut session = session_with(
            Snake::new(Cell::new(5, 5), Direction::Right, 3),
            Cell::new(6, 5),
        );
        session.score = 40;
        session.level = 2;

        let result = engine.step(&mut session);

        assert!(result.ate_food);
        assert!(!result.leveled_up);
        assert_eq!(session.level, 2);
    }

    #[test]
    fn spawn_food_only_uses_free_cells() {
        let mut engine = test_engine();
        let grid = Grid::new(2, 2);

        // Snake covering all but (0, 1).
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Right, 1);
        snake.advance(Cell::new(1, 0), true);
        snake.advance(Cell::new(1, 1), true);

        assert_eq!(engine.spawn_food(&grid, &snake), Some(Cell::new(0, 1)));

        snake.advance(Cell::new(0, 1), true);
        assert_eq!(engine.spawn_food(&grid, &snake), None);
    }

    #[test]
    fn filling_the_grid_wins() {
        let mut engine = test_engine();
        let grid = Grid::new(2, 2);
        let snake = Snake::new(Cell::new(0, 0), Direction::Right, 1);
        let mut session = GameSession::new(grid, snake, Cell::new(1, 0));

        assert_eq!(engine.step(&mut session).ended, None);

        session.food = Cell::new(1, 1);
        session.snake.buffer_turn(Direction::Down);
        assert_eq!(engine.step(&mut session).ended, None);

        // Last free cell is (0, 1); eating it leaves nowhere to spawn.
        assert_eq!(session.food, Cell::new(0, 1));
        session.snake.buffer_turn(Direction::Left);
        let result = engine.step(&mut session);

        assert!(result.ate_food);
        assert_eq!(result.ended, Some(GameOverCause::GridFull));
        assert!(result.ended.is_some_and(GameOverCause::is_win));
        assert_eq!(session.score, 30);
        assert_eq!(session.snake.len(), 4);
    }
}
