// Event Handling
// Application event types and handler infrastructure

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Quit the application
    Quit,

    /// Select the tab to the left
    PreviousTab,

    /// Select the tab to the right
    NextTab,

    /// Jump to a tab by index
    SelectTab(usize),

    /// Append a tab
    AddTab,

    /// Remove the last tab
    RemoveTab,

    /// Switch between fixed and scrollable tabs
    ToggleScrollable,

    /// Switch label upper-casing
    ToggleUppercase,

    /// Switch between animated and instant transitions
    ToggleReducedMotion,

    /// Left click at a screen position
    Tap { column: u16, row: u16 },

    /// Terminal size changed
    Resize,

    /// No operation
    None,
}

/// Event handler that converts terminal events to application events
pub struct EventHandler;

impl EventHandler {
    /// Convert a crossterm event to an application event
    pub fn handle(event: Event) -> AppEvent {
        match event {
            Event::Key(key) => Self::handle_key(key),
            Event::Mouse(mouse) => Self::handle_mouse(mouse),
            Event::Resize(_, _) => AppEvent::Resize,
            _ => AppEvent::None,
        }
    }

    /// Handle keyboard events
    fn handle_key(key: KeyEvent) -> AppEvent {
        // Only handle key press events
        if key.kind != KeyEventKind::Press {
            return AppEvent::None;
        }

        match key.code {
            // Quit
            KeyCode::Char('q') => AppEvent::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppEvent::Quit,

            // Navigation
            KeyCode::Left | KeyCode::Char('h') => AppEvent::PreviousTab,
            KeyCode::Right | KeyCode::Char('l') => AppEvent::NextTab,
            KeyCode::Char(c @ '1'..='9') => AppEvent::SelectTab(c as usize - '1' as usize),

            // Tab list
            KeyCode::Char('a') => AppEvent::AddTab,
            KeyCode::Char('d') => AppEvent::RemoveTab,

            // Toggles
            KeyCode::Char('s') => AppEvent::ToggleScrollable,
            KeyCode::Char('u') => AppEvent::ToggleUppercase,
            KeyCode::Char('m') => AppEvent::ToggleReducedMotion,

            _ => AppEvent::None,
        }
    }

    /// Handle mouse events
    fn handle_mouse(mouse: MouseEvent) -> AppEvent {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => AppEvent::Tap {
                column: mouse.column,
                row: mouse.row,
            },
            _ => AppEvent::None,
        }
    }
}
