use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use super::action::Direction;
use super::grid::Grid;

/// A position on the game grid
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

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Direction that leads from `self` to `other`, if they are unit-adjacent
    pub fn adjacent_to(&self, other: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.moved_in_direction(d) == other)
    }

    /// Index of the first occurrence of `self` in `points`
    pub fn index_in<'a, I>(&self, points: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a Position>,
    {
        points.into_iter().position(|p| p == self)
    }

    /// Check if the position lies inside `grid`
    pub fn within(&self, grid: &Grid) -> bool {
        grid.contains(*self)
    }

    /// The four unit neighbours in canonical order (up, right, down, left)
    pub fn neighbours(&self) -> [Position; 4] {
        Direction::ALL.map(|d| self.moved_in_direction(d))
    }

    /// The four unit neighbours in a uniformly random order
    pub fn shuffled_neighbours<R: Rng + ?Sized>(&self, rng: &mut R) -> [Position; 4] {
        let mut neighbours = self.neighbours();
        neighbours.shuffle(rng);
        neighbours
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: VecDeque<Position>,
    /// Length the body grows to; the tail is trimmed beyond it
    pub target_length: usize,
}

impl Snake {
    /// Create a one-segment snake that will grow to `target_length`
    pub fn new(head: Position, target_length: usize) -> Self {
        Self {
            body: VecDeque::from([head]),
            target_length,
        }
    }

    /// Create a snake from explicit segments, head first; `None` without a head
    pub fn from_segments<I>(segments: I, target_length: usize) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            target_length,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True when the next move drops the tail segment
    pub fn is_full_grown(&self) -> bool {
        self.body.len() >= self.target_length
    }

    /// Prepend a new head and trim the tail down to the target length
    pub fn advance(&mut self, new_head: Position) {
        self.body.push_front(new_head);
        while self.body.len() > self.target_length {
            self.body.pop_back();
        }
    }

    /// Get the number of segments currently on the grid
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What happened to the snake on the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeStatus {
    /// Moved onto a free cell
    Cruising,
    /// Moved onto the food and grew
    Eating,
    /// Moved into its own body; the run is over
    Colliding,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` once no free cell remains
    pub food: Option<Position>,
    pub grid: Grid,
    pub score: u32,
    pub ticks: u64,
    pub status: SnakeStatus,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, grid: Grid) -> Self {
        Self {
            snake,
            food,
            grid,
            score: 0,
            ticks: 0,
            status: SnakeStatus::Cruising,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }

    /// Every cell the snake fills
    pub fn is_grid_filled(&self) -> bool {
        self.snake.len() >= self.grid.cell_count()
    }
}
