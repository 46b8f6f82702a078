use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Show or hide the Hamiltonian cycle
    TogglePath,
    Pause,
    /// Halve the tick period
    Faster,
    /// Double the tick period
    Slower,
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
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePath,
            KeyCode::Char(' ') => KeyAction::Pause,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => KeyAction::Faster,
            KeyCode::Char('-') | KeyCode::Down => KeyAction::Slower,

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
