use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Largest grid side accepted; the board must fit on a terminal
pub const MAX_GRID_SIDE: usize = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid (x axis)
    pub grid_width: usize,
    /// Height of the game grid (z axis)
    pub grid_height: usize,
    /// Number of segments the snake starts with
    pub initial_length: usize,
    /// Starting head column
    pub start_x: i32,
    /// Starting head row; the rest of the body trails toward lower z
    pub start_z: i32,
    /// Segments appended per berry eaten
    pub growth_per_berry: usize,
    /// Milliseconds between two simulation ticks
    pub tick_interval_ms: u64,
    /// Preferred minimum distance between the head and a new berry
    pub spawn_min_distance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_length: 5,
            start_x: 10,
            start_z: 10,
            growth_per_berry: 3,
            tick_interval_ms: 200,
            spawn_min_distance: 5.0,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size, starting in its center
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            start_x: (width / 2) as i32,
            start_z: (height / 2) as i32,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields fall back to the defaults.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Check that a game can start from this configuration
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| -> Result<(), GameError> { Err(GameError::InvalidConfig(msg)) };

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid("grid dimensions must be non-zero".into());
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return invalid(format!(
                "a {}x{} grid exceeds the {} cell limit per side",
                self.grid_width, self.grid_height, MAX_GRID_SIDE
            ));
        }
        if self.initial_length == 0 {
            return invalid("initial_length must be at least 1".into());
        }
        if self.growth_per_berry == 0 {
            return invalid("growth_per_berry must be at least 1".into());
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be non-zero".into());
        }
        if !self.spawn_min_distance.is_finite() || self.spawn_min_distance < 0.0 {
            return invalid(format!(
                "spawn_min_distance {} must be a finite, non-negative number",
                self.spawn_min_distance
            ));
        }

        let width = self.grid_width as i32;
        let height = self.grid_height as i32;
        let tail_z = self.start_z as i64 - (self.initial_length as i64 - 1);
        if self.start_x < 0 || self.start_x >= width || self.start_z >= height || tail_z < 0 {
            return invalid(format!(
                "a snake of length {} starting at ({}, {}) does not fit in a {}x{} grid",
                self.initial_length, self.start_x, self.start_z, width, height
            ));
        }
        if self.initial_length >= self.cell_count() {
            return invalid("the starting snake leaves no room for a berry".into());
        }

        Ok(())
    }
}
