use super::{is_safe, DecisionPolicy};
use crate::game::{Direction, FieldState};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Picks uniformly among the safe moves each step
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionPolicy for RandomPolicy {
    fn next_direction(&mut self, field: &FieldState) -> Direction {
        let safe: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| is_safe(field, *dir))
            .collect();

        safe.choose(&mut self.rng)
            .copied()
            .unwrap_or(field.snake.direction)
    }
}
