use serde::{Deserialize, Serialize};

/// Configuration for the playing field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the field in cells
    pub field_width: usize,
    /// Height of the field in cells
    pub field_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 16,
            field_height: 16,
            initial_snake_length: 3,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom field size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Default::default()
        }
    }

    /// Small field for tests
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}
