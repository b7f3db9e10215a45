use super::action::Direction;

/// A position on the field grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset position by delta
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell in a direction
    pub fn neighbour(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

/// The simulated snake
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake with its head at `head`, trailing backwards from the
    /// direction of movement
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length as i32)
            .map(|i| head.offset(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body segments excluding the head
    pub fn segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if a position collides with the body (excluding the head)
    pub fn hits_body(&self, pos: Position) -> bool {
        self.segments().contains(&pos)
    }

    /// Check if a position is occupied by any part of the snake
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance one cell in the current direction, growing if `grow` is true
    pub fn advance(&mut self, grow: bool) {
        let new_head = self.head().neighbour(self.direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete state of the playing field for one run
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub snake: Snake,
    pub apple: Position,
    pub width: usize,
    pub height: usize,
    pub alive: bool,
}

impl FieldState {
    pub fn new(snake: Snake, apple: Position, width: usize, height: usize) -> Self {
        Self {
            snake,
            apple,
            width,
            height,
            alive: true,
        }
    }

    /// Check if a position is within the field bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }
}
