//! Decision policies that choose the snake's next move
//!
//! A policy sees the settled field state from the previous step and returns
//! the direction for the next one. It is consulted exactly once per step and
//! never mutates the field.

pub mod greedy;
pub mod random;

use crate::game::{Direction, FieldState};

pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;

/// Strategy choosing the snake's next move each step
pub trait DecisionPolicy {
    /// Pick a direction given the current field state
    fn next_direction(&mut self, field: &FieldState) -> Direction;
}

/// A move is safe if it is not a 180-degree reversal and the target cell is
/// inside the field and free of the snake's body.
pub(crate) fn is_safe(field: &FieldState, direction: Direction) -> bool {
    if field.snake.direction.is_opposite(direction) {
        return false;
    }

    let target = field.snake.head().neighbour(direction);
    field.in_bounds(target) && !field.snake.hits_body(target)
}
