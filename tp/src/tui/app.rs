//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, trace};

use super::state::AppState;

/// Lines moved per PageUp/PageDown
const PAGE_SCROLL: u16 = 10;

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        debug!("App::new: called");
        Self { state: AppState::new() }
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if self.state.show_help {
            debug!("App::handle_key: closing help");
            self.state.show_help = false;
            return false;
        }

        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                debug!("App::handle_key: quit requested");
                self.state.should_quit = true;
                return true;
            }

            // === Help ===
            (KeyCode::F(1), _) => {
                self.state.show_help = true;
            }

            // === Download ===
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                debug!("App::handle_key: download requested");
                self.state.request_download();
            }

            // === Results scrolling ===
            (KeyCode::Up, _) => self.state.scroll_up(1),
            (KeyCode::Down, _) => self.state.scroll_down(1),
            (KeyCode::PageUp, _) => self.state.scroll_up(PAGE_SCROLL),
            (KeyCode::PageDown, _) => self.state.scroll_down(PAGE_SCROLL),

            // Everything below edits the form, which is disabled while pending
            _ if !self.state.input_enabled() => {
                debug!("App::handle_key: form disabled while pending");
            }

            (KeyCode::Enter, _) => {
                debug!("App::handle_key: submit");
                self.state.submit();
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.state.clear_input(),
            (KeyCode::Backspace, _) => self.state.delete_before_cursor(),
            (KeyCode::Delete, _) => self.state.delete_at_cursor(),
            (KeyCode::Left, _) => self.state.cursor_left(),
            (KeyCode::Right, _) => self.state.cursor_right(),
            (KeyCode::Home, _) => self.state.cursor_home(),
            (KeyCode::End, _) => self.state.cursor_end(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.state.insert_char(c),
            _ => {
                trace!("App::handle_key: unbound key");
            }
        }

        false
    }
}
