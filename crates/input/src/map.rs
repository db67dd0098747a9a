//! Key mapping from terminal events to game actions.
//!
//! Letters are matched case-insensitively: arrows, vi keys (`hjkl`) and `wasd` all steer.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Letter bindings; `k`/`w`/`x` share rotate-clockwise with the up arrow.
const LETTER_BINDINGS: [(char, GameAction); 11] = [
    ('h', GameAction::MoveLeft),
    ('a', GameAction::MoveLeft),
    ('l', GameAction::MoveRight),
    ('d', GameAction::MoveRight),
    ('j', GameAction::MoveDown),
    ('s', GameAction::MoveDown),
    ('k', GameAction::RotateCw),
    ('w', GameAction::RotateCw),
    ('x', GameAction::RotateCw),
    ('z', GameAction::RotateCcw),
    ('p', GameAction::Pause),
];

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::MoveDown),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            LETTER_BINDINGS
                .iter()
                .find(|&&(key, _)| key == c)
                .map(|&(_, action)| action)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Check if key should start a new session.
///
/// Restart replaces the session, so it is handled by the runner rather than mapped to an
/// action.
pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r' | 'R'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn arrows_and_letters_agree() {
        let groups = [
            (KeyCode::Left, "hHaA", GameAction::MoveLeft),
            (KeyCode::Right, "lLdD", GameAction::MoveRight),
            (KeyCode::Down, "jJsS", GameAction::MoveDown),
            (KeyCode::Up, "kKwWxX", GameAction::RotateCw),
        ];
        for (arrow, letters, action) in groups {
            assert_eq!(map(arrow), Some(action));
            for c in letters.chars() {
                assert_eq!(map(KeyCode::Char(c)), Some(action), "key {:?}", c);
            }
        }
        assert_eq!(map(KeyCode::Char('Z')), Some(GameAction::RotateCcw));
        assert_eq!(map(KeyCode::Char('P')), Some(GameAction::Pause));
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(map(KeyCode::Char('Q')), Some(GameAction::Quit));
    }

    #[test]
    fn restart_and_unmapped_keys() {
        assert!(should_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert_eq!(map(KeyCode::Char('r')), None);
        assert_eq!(map(KeyCode::Char(' ')), None);
        assert_eq!(map(KeyCode::Enter), None);
    }
}
