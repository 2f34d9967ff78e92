//! Key events to controller commands
//!
//! Key down on a movement key starts the paddle, key up on either movement
//! key stops it, and a key press on the pause key toggles pause.

use crate::settings::KeyBindings;
use crate::sim::{Command, Direction};

/// What happened to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
    /// Character-producing press (fires after Down)
    Press,
}

/// Translate one key event into a command, if it is bound
pub fn map_key(bindings: &KeyBindings, key: &str, action: KeyAction) -> Option<Command> {
    let is = |bound: &str| key.eq_ignore_ascii_case(bound);

    match action {
        KeyAction::Down if is(&bindings.left) => Some(Command::StartPaddleMove(Direction::Left)),
        KeyAction::Down if is(&bindings.right) => Some(Command::StartPaddleMove(Direction::Right)),
        KeyAction::Up if is(&bindings.left) || is(&bindings.right) => Some(Command::StopPaddleMove),
        KeyAction::Press if is(&bindings.pause) => Some(Command::TogglePause),
        _ => None,
    }
}
