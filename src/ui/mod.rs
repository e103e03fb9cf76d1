pub mod keys;
pub mod terminal;

pub use keys::{map_key, KeyAction};
pub use terminal::TerminalApp;
