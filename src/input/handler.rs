use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Control signal decoded from a key event
///
/// Signals only ever reach presentation flags or the outer loop; none of
/// them touch simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    ToggleHistory,
    ToggleStats,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Pause => KeyAction::TogglePause,
            KeyCode::F(1) | KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::ToggleHistory,
            KeyCode::F(2) | KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::ToggleStats,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
