use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, FieldState, Position, Snake},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Result of applying one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the snake is still alive after this step
    pub alive: bool,
    /// Whether the snake consumed an apple this step
    pub ate_apple: bool,
    /// Type of collision, if this step ended the run
    pub collision: Option<CollisionType>,
}

/// The simulation the session drives, one move at a time
///
/// Implementations own placement and collision rules; the session only
/// depends on the reported outcome of each step.
pub trait Simulation {
    /// Start a fresh run: place the snake and spawn exactly one apple
    fn reset(&mut self) -> FieldState;

    /// Apply one move to the field, reporting liveness and apple consumption
    fn apply(&mut self, field: &mut FieldState, direction: Direction) -> StepOutcome;
}

/// The standard grid simulation
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed RNG seed, for reproducible runs
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Check whether moving the head to `pos` causes a collision
    fn check_collision(&self, field: &FieldState, pos: Position) -> Option<CollisionType> {
        if !field.in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if field.snake.hits_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn an apple at a random cell not occupied by the snake
    fn spawn_apple(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.field_width) as i32;
            let y = self.rng.gen_range(0..self.config.field_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}

impl Simulation for GameEngine {
    fn reset(&mut self) -> FieldState {
        let center = Position::new(
            (self.config.field_width / 2) as i32,
            (self.config.field_height / 2) as i32,
        );

        let snake = Snake::new(center, Direction::Right, self.config.initial_snake_length);
        let apple = self.spawn_apple(&snake);

        FieldState::new(
            snake,
            apple,
            self.config.field_width,
            self.config.field_height,
        )
    }

    fn apply(&mut self, field: &mut FieldState, direction: Direction) -> StepOutcome {
        if !field.alive {
            return StepOutcome {
                alive: false,
                ate_apple: false,
                collision: None,
            };
        }

        // Ignore 180-degree turns, keep the current heading
        if !field.snake.direction.is_opposite(direction) {
            field.snake.direction = direction;
        }

        let new_head = field.snake.head().neighbour(field.snake.direction);

        if let Some(collision) = self.check_collision(field, new_head) {
            field.alive = false;

            return StepOutcome {
                alive: false,
                ate_apple: false,
                collision: Some(collision),
            };
        }

        let ate_apple = new_head == field.apple;
        field.snake.advance(ate_apple);

        if ate_apple {
            field.apple = self.spawn_apple(&field.snake);
        }

        StepOutcome {
            alive: true,
            ate_apple,
            collision: None,
        }
    }
}
