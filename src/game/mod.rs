//! Simulation core for the snake
//!
//! Pure game logic without any terminal or rendering dependencies. A caller
//! feeds it axis samples and frame times and reads back positions and events.

pub mod clock;
pub mod collision;
pub mod direction;
pub mod engine;
pub mod input;
pub mod snake;
pub mod spawner;

pub use clock::GameClock;
pub use collision::{will_collide, CollisionKind};
pub use direction::{Axis, Direction, Sign};
pub use engine::{GameEvent, GameLoop};
pub use input::{PendingTurn, TurnInputBuffer};
pub use snake::{Position, SnakeBody};
pub use spawner::{shuffle, BerrySpawner, RandomSource};
