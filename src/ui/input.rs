//! Keyboard input handling with vim-style navigation support.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Board navigation and dragging
    #[default]
    Normal,
    /// Typing into the new-project form
    Insert,
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SwitchColumn,
    Home,
    End,

    // Drag and drop
    PickUp,
    Drop,
    Back,

    // Projects
    NewProject,
    MoveProject,

    // Misc
    Help,
    Quit,
}

/// Keyboard bindings configuration
pub struct KeyBindings {
    pub vim_navigation: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            vim_navigation: true,
        }
    }
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new(vim_navigation: bool) -> Self {
        Self {
            bindings: KeyBindings { vim_navigation },
        }
    }

    /// Whether h/j/k/l/g/G are bound
    pub fn vim_navigation(&self) -> bool {
        self.bindings.vim_navigation
    }

    /// Handle a key event and return the corresponding action
    pub fn handle_key(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        match mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            // Navigation - arrow keys always work
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchColumn),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),

            // Vim-style navigation (j/k/h/l)
            KeyCode::Char('j') if self.bindings.vim_navigation => Some(Action::MoveDown),
            KeyCode::Char('k') if self.bindings.vim_navigation => Some(Action::MoveUp),
            KeyCode::Char('h') if self.bindings.vim_navigation => Some(Action::MoveLeft),
            KeyCode::Char('l') if self.bindings.vim_navigation => Some(Action::MoveRight),
            KeyCode::Char('g') if self.bindings.vim_navigation => Some(Action::Home),
            KeyCode::Char('G') if self.bindings.vim_navigation => Some(Action::End),

            // Drag and drop
            KeyCode::Char(' ') => Some(Action::PickUp),
            KeyCode::Enter => Some(Action::Drop),
            KeyCode::Esc => Some(Action::Back),

            // Projects
            KeyCode::Char('n') => Some(Action::NewProject),
            KeyCode::Char('m') => Some(Action::MoveProject),

            // Misc
            KeyCode::Char('?') => Some(Action::Help),
            KeyCode::Char('q') => Some(Action::Quit),

            _ => None,
        }
    }

    /// Handle key in insert mode
    fn handle_insert_key(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C leaves the form without quitting
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Back);
        }

        // Other keys are handled by the form
        None
    }
}
