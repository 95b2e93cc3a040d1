use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;
use std::time::{Duration, Instant};

use crate::entities::GameState;

/// Without key-release reporting a held key counts as released this long after its
/// last press or auto-repeat
const HELD_KEY_TIMEOUT: Duration = Duration::from_millis(150);

/// Represents one-shot game actions triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Start,
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Movement directions currently held on the keyboard
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Everything the game reads from the input devices in one frame
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameInput {
    pub keys: DirectionKeys,
    /// World position of the pointer while the fire button is held
    pub pointer: Option<Vec2>,
    /// Gamepad movement stick, once a pad has reported one
    pub main_stick: Option<Vec2>,
    /// Gamepad aiming stick
    pub second_stick: Option<Vec2>,
    /// Any key, click or pad activity this frame
    pub start_requested: bool,
}

/// When each movement key was last seen going down
#[derive(Debug, Default)]
struct KeyState {
    up: Option<Instant>,
    down: Option<Instant>,
    left: Option<Instant>,
    right: Option<Instant>,
}

#[derive(Debug, Default, Clone, Copy)]
struct PointerState {
    down: bool,
    column: u16,
    row: u16,
}

/// Manages input polling and translates raw terminal events into game input
pub struct InputManager {
    key_state: KeyState,
    pointer: PointerState,
    /// `None` when the terminal reports key releases
    held_key_timeout: Option<Duration>,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    /// `reports_key_release` is true when keyboard enhancement is active
    pub fn new(reports_key_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            pointer: PointerState::default(),
            held_key_timeout: (!reports_key_release).then_some(HELD_KEY_TIMEOUT),
            oneshot_actions: Vec::new(),
        }
    }

    /// Polls for all input events and stores one-shot actions.
    /// Should be called once per frame before reading actions.
    pub fn poll_events(&mut self, game_state: &GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    self.handle_key_event(key_event, game_state, Instant::now());
                }
                Event::Mouse(mouse_event) => {
                    self.handle_mouse_event(mouse_event, game_state);
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: &GameState, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => {
                self.handle_key_press(key_event, game_state, now);
            }
            KeyEventKind::Repeat => {
                if *game_state == GameState::Playing {
                    self.hold_direction(key_event.code, now);
                }
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: &GameState, now: Instant) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::AwaitingStart => {
                self.oneshot_actions.push(InputAction::Start);
                return;
            }
            GameState::Playing => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Pause);
                    return;
                }
            }
            GameState::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Resume);
                    return;
                }
            }
            GameState::GameOver => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.oneshot_actions.push(InputAction::Restart);
                    return;
                }
            }
        }

        // Continuous keys are only tracked while playing
        if *game_state == GameState::Playing {
            self.hold_direction(key_event.code, now);
        }
    }

    fn hold_direction(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = Some(now);
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = Some(now);
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = Some(now);
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = Some(now);
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = None;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = None;
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = None;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = None;
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, game_state: &GameState) {
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if *game_state == GameState::AwaitingStart {
                    self.oneshot_actions.push(InputAction::Start);
                }
                self.pointer.down = true;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.pointer.down = false;
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {}
            _ => return,
        }
        self.pointer.column = mouse_event.column;
        self.pointer.row = mouse_event.row;
    }

    /// Returns the one-shot actions of this frame.
    /// Must be called after poll_events()
    pub fn get_actions(&self) -> Vec<InputAction> {
        self.oneshot_actions.clone()
    }

    /// Movement keys held at `now`
    pub fn held_directions(&self, now: Instant) -> DirectionKeys {
        let held = |seen: Option<Instant>| {
            seen.is_some_and(|at| {
                self.held_key_timeout
                    .is_none_or(|timeout| now.saturating_duration_since(at) <= timeout)
            })
        };
        DirectionKeys {
            left: held(self.key_state.left),
            right: held(self.key_state.right),
            up: held(self.key_state.up),
            down: held(self.key_state.down),
        }
    }

    /// Terminal cell under the pointer while the left button is held
    pub fn pointer_cell(&self) -> Option<(u16, u16)> {
        self.pointer
            .down
            .then_some((self.pointer.column, self.pointer.row))
    }

    /// Forgets held keys and the mouse button, e.g. after a pause
    pub fn release_all(&mut self) {
        self.key_state = KeyState::default();
        self.pointer.down = false;
    }
}
