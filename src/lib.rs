//! berrysnek - a berry-hunting snake on a fixed grid
//!
//! - `game`: the tick-driven simulation core
//! - `ui`: a crossterm frontend that plays it in a terminal

pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use config::GameConfig;
pub use error::GameError;
