use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Axis;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// A raw axis sample, as a joystick or arrow key would report it
    Steer(Axis, f32),
    Restart,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            KeyAction::Steer(Axis::Horizontal, -1.0)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Steer(Axis::Horizontal, 1.0)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            KeyAction::Steer(Axis::Vertical, 1.0)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            KeyAction::Steer(Axis::Vertical, -1.0)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
