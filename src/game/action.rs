/// Direction the snake can move
///
/// The discriminants are stable ids: 1=up, 2=right, 3=down, 4=left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 1,
    Right = 2,
    Down = 3,
    Left = 4,
}

impl Direction {
    /// All directions in canonical order (up, right, down, left)
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Numeric id of this direction
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Look up a direction by its numeric id
    pub fn from_id(id: u8) -> Option<Direction> {
        match id {
            1 => Some(Direction::Up),
            2 => Some(Direction::Right),
            3 => Some(Direction::Down),
            4 => Some(Direction::Left),
            _ => None,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// How the controller arrived at a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Next cell along the Hamiltonian cycle
    Forward,
    /// A neighbour that passed the safety margin and is closer to the food
    Shortcut,
}

/// A move chosen by the controller for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub direction: Direction,
    pub kind: MoveKind,
}

impl Move {
    pub fn forward(direction: Direction) -> Self {
        Self {
            direction,
            kind: MoveKind::Forward,
        }
    }

    pub fn shortcut(direction: Direction) -> Self {
        Self {
            direction,
            kind: MoveKind::Shortcut,
        }
    }

    pub fn is_shortcut(&self) -> bool {
        self.kind == MoveKind::Shortcut
    }
}
