//! snake_lab - a snake-style grid simulation driven step by step by a
//! pluggable decision policy, with per-run score logging
//!
//! This library provides:
//! - Core grid simulation (game module)
//! - Decision policies that choose the next move each step (policy module)
//! - Display backends (render module)
//! - The game session driving one run to completion (session module)

pub mod game;
pub mod policy;
pub mod render;
pub mod session;
