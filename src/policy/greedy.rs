use super::{is_safe, DecisionPolicy};
use crate::game::{Direction, FieldState};

/// Scripted heuristic: chase the apple along whichever axis is off, falling
/// back to any safe move when the direct approach is blocked.
#[derive(Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Directions that reduce the distance to the apple, preferred axis first
    fn towards_apple(field: &FieldState) -> Vec<Direction> {
        let head = field.snake.head();
        let apple = field.apple;
        let mut preferred = Vec::with_capacity(2);

        if apple.x != head.x {
            preferred.push(if apple.x > head.x {
                Direction::Right
            } else {
                Direction::Left
            });
        }
        if apple.y != head.y {
            preferred.push(if apple.y > head.y {
                Direction::Down
            } else {
                Direction::Up
            });
        }

        preferred
    }
}

impl DecisionPolicy for GreedyPolicy {
    fn next_direction(&mut self, field: &FieldState) -> Direction {
        for dir in Self::towards_apple(field) {
            if is_safe(field, dir) {
                return dir;
            }
        }

        // Apple unreachable directly, take any safe move
        for dir in Direction::ALL {
            if is_safe(field, dir) {
                return dir;
            }
        }

        // Boxed in, keep heading and let the engine end the run
        field.snake.direction
    }
}
