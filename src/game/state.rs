use std::collections::VecDeque;

use super::action::Direction;
use super::grid;

/// A position on the board, in pixels; always a multiple of the cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Position one cell away in `direction`. No bounds check: off-board
    /// results are valid intermediate values for the collision classifier.
    pub fn moved_in(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta(cell_size);
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    pub body: VecDeque<Position>,
    /// Current heading
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of `length` segments trailing away from `head`
    /// opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let mut body = VecDeque::with_capacity(length + 1);
        body.push_back(head);

        let (dx, dy) = direction.delta(cell_size);
        for i in 1..length {
            let prev = body[i - 1];
            body.push_back(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// True if `pos` overlaps any segment behind the head slot
    pub fn hits_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&p| p == pos)
    }

    /// Prepend a new head segment
    pub fn grow_to(&mut self, new_head: Position) {
        self.body.push_front(new_head);
    }

    /// Drop the tail segment
    pub fn drop_tail(&mut self) {
        self.body.pop_back();
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Kind of fatal contact for a candidate head position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Position left the board
    Wall,
    /// Position landed on the snake's own body
    SelfHit,
}

/// Complete per-episode state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub score: u32,
    /// Frames elapsed this episode; drives the runaway cutoff
    pub frame: u32,
    pub alive: bool,
    /// Gates the caller's loop only; the simulation never consults it
    pub paused: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            snake,
            food,
            width,
            height,
            cell_size,
            score: 0,
            frame: 0,
            alive: true,
            paused: false,
        }
    }

    /// Whether a position is on the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        grid::in_bounds(pos, self.width, self.height, self.cell_size)
    }

    /// Whether a position is occupied by any snake segment
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }
}
