use super::direction::Direction;
use super::grid::Cell;

/// The player's snake: an ordered run of cells, head first, plus its
/// heading and at most one buffered turn for the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Cell>,
    direction: Direction,
    pending_turn: Option<Direction>,
}

impl Snake {
    /// Lay out `length` segments starting at `head` and trailing away
    /// against `direction`. Length is clamped to at least one segment.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let (dx, dy) = direction.opposite().delta();
        let segments = (0..length as i32)
            .map(|i| Cell::new(head.x + dx * i, head.y + dy * i))
            .collect();

        Self {
            segments,
            direction,
            pending_turn: None,
        }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn tail(&self) -> Cell {
        *self.segments.last().expect("snake body is never empty")
    }

    /// Body cells from head to tail.
    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Heading the snake is currently travelling in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True if any segment covers `cell`.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Buffer a turn for the next tick. A reversal of the current
    /// heading is refused while the snake is longer than one cell; any
    /// later valid request before the tick replaces the buffered one.
    /// Returns whether the request was accepted.
    pub fn buffer_turn(&mut self, requested: Direction) -> bool {
        if self.segments.len() > 1 && requested.is_reverse_of(self.direction) {
            return false;
        }
        self.pending_turn = Some(requested);
        true
    }

    /// Commit the buffered turn, if any, and return the heading for
    /// this tick's move.
    pub fn take_heading(&mut self) -> Direction {
        if let Some(turn) = self.pending_turn.take() {
            self.direction = turn;
        }
        self.direction
    }

    /// Move the head to `new_head`; the tail stays put when growing.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.segments.insert(0, new_head);
        if !grow {
            self.segments.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_trails_away_from_heading() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        assert_eq!(
            snake.segments(),
            &[Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn zero_length_is_clamped_to_one_segment() {
        let snake = Snake::new(Cell::new(2, 2), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), snake.tail());
    }

    #[test]
    fn advance_moves_without_growing() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        snake.advance(Cell::new(6, 5), false);

        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn advance_keeps_tail_when_growing() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        snake.advance(Cell::new(6, 5), true);

        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn reversal_is_refused_while_longer_than_one() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        assert!(!snake.buffer_turn(Direction::Left));
        assert_eq!(snake.take_heading(), Direction::Right);
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 1);

        assert!(snake.buffer_turn(Direction::Left));
        assert_eq!(snake.take_heading(), Direction::Left);
    }

    #[test]
    fn latest_valid_turn_wins_within_a_tick() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        assert!(snake.buffer_turn(Direction::Up));
        assert!(snake.buffer_turn(Direction::Down));
        assert_eq!(snake.take_heading(), Direction::Down);
    }

    #[test]
    fn refused_reversal_leaves_earlier_buffer_intact() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        assert!(snake.buffer_turn(Direction::Up));
        assert!(!snake.buffer_turn(Direction::Left));
        assert_eq!(snake.take_heading(), Direction::Up);
    }

    #[test]
    fn reversal_check_uses_committed_heading_not_buffer() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        // Up is buffered but not committed, so Down is still a valid
        // request relative to the current Right heading.
        assert!(snake.buffer_turn(Direction::Up));
        assert!(snake.buffer_turn(Direction::Down));
        assert_eq!(snake.take_heading(), Direction::Down);

        // After the commit the heading is Down, so Up is now refused.
        assert!(!snake.buffer_turn(Direction::Up));
    }

    #[test]
    fn heading_persists_between_ticks_without_input() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        assert_eq!(snake.take_heading(), Direction::Right);
        assert_eq!(snake.take_heading(), Direction::Right);
    }
}
