//! Held-key repeat handler for terminal environments.
//!
//! A press emits its action immediately. Once the key has been held for
//! `REPEAT_DELAY_MS`, the action repeats every `MOVE_REPEAT_MS` (left/right) or
//! `DOWN_REPEAT_MS` (down).
//!
//! Terminals that never report releases are handled by an idle timeout: terminal
//! auto-repeat keeps refreshing the press, and once it stops the key counts as released.
//! The timeout is shorter than the repeat delay, so a single tap moves exactly once.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent};

use crate::map::handle_key_event;
use crate::types::{GameAction, DOWN_REPEAT_MS, MOVE_REPEAT_MS, REPEAT_DELAY_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Idle time after which a key counts as released; must stay below `REPEAT_DELAY_MS`.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Hold time and repeat accumulator of one key channel.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatTimer {
    held_ms: u32,
    accumulator: u32,
}

impl RepeatTimer {
    /// Advance by `elapsed_ms`; returns how many repeats came due.
    fn advance(&mut self, elapsed_ms: u32, delay_ms: u32, interval_ms: u32) -> u32 {
        let before = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < delay_ms {
            return 0;
        }

        let mut due = 0;
        if before < delay_ms {
            // First repeat fires when the delay is crossed.
            due = 1;
            self.accumulator = self.held_ms - delay_ms;
        } else {
            self.accumulator = self.accumulator.saturating_add(elapsed_ms);
        }
        due += self.accumulator / interval_ms;
        self.accumulator %= interval_ms;
        due
    }
}

/// Tracks held movement keys and produces repeat actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    horizontal_timer: RepeatTimer,
    down_timer: RepeatTimer,
    /// Time since the last movement key press
    idle_ms: u32,
    repeat_delay_ms: u32,
    horizontal_repeat_ms: u32,
    down_repeat_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(REPEAT_DELAY_MS, MOVE_REPEAT_MS, DOWN_REPEAT_MS)
    }

    pub fn with_config(repeat_delay_ms: u32, horizontal_repeat_ms: u32, down_repeat_ms: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            horizontal_timer: RepeatTimer::default(),
            down_timer: RepeatTimer::default(),
            idle_ms: 0,
            repeat_delay_ms,
            horizontal_repeat_ms: horizontal_repeat_ms.max(1),
            down_repeat_ms: down_repeat_ms.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Override the idle auto-release. Pass `u32::MAX` when the terminal reports releases.
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Register a press; returns the action to apply now, if any.
    ///
    /// A repeated press of a key that is already held only refreshes it.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match handle_key_event(KeyEvent::from(code))? {
            GameAction::MoveLeft => self.press_horizontal(HorizontalDirection::Left),
            GameAction::MoveRight => self.press_horizontal(HorizontalDirection::Right),
            GameAction::MoveDown => {
                self.idle_ms = 0;
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_timer = RepeatTimer::default();
                Some(GameAction::MoveDown)
            }
            _ => None,
        }
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> Option<GameAction> {
        self.idle_ms = 0;
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_timer = RepeatTimer::default();
        direction.action()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match handle_key_event(KeyEvent::from(code)) {
            Some(GameAction::MoveLeft) if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            Some(GameAction::MoveRight) if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            Some(GameAction::MoveDown) => self.release_down(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_timer = RepeatTimer::default();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_timer = RepeatTimer::default();
    }

    /// Advance the repeat timers and collect the repeats that came due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.release_horizontal();
            self.release_down();
        }

        if let Some(action) = self.horizontal.action() {
            let due =
                self.horizontal_timer
                    .advance(elapsed_ms, self.repeat_delay_ms, self.horizontal_repeat_ms);
            for _ in 0..due {
                let _ = actions.try_push(action);
            }
        }

        if self.down_held {
            let due = self
                .down_timer
                .advance(elapsed_ms, self.repeat_delay_ms, self.down_repeat_ms);
            for _ in 0..due {
                let _ = actions.try_push(GameAction::MoveDown);
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
