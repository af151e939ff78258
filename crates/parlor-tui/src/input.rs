//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor) and handles
//! character-level key events. Command parsing happens here on Enter.
//! When a modal surface is open (invitation prompt or review), keys are
//! routed to it instead of the text buffer.

use parlor_app::{App, AppAction, KeyInput};

use crate::commands::{self, Command};

/// Input state for the TUI.
///
/// Manages the text input buffer and cursor position.
/// Handles all character-level key events.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position within the buffer.
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    ///
    /// Returns actions to process (may be empty for input-only keys,
    /// or contain protocol actions for commands and modal answers).
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        // Modal surfaces capture the keyboard while open.
        if app.review().is_some() {
            return Self::handle_review_key(key, app);
        }
        if app.prompt().is_some() {
            return Self::handle_prompt_key(key, app);
        }

        match key {
            KeyInput::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor = self.cursor.saturating_add(1);
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    self.buffer.remove(self.cursor);
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.buffer.len();
                vec![AppAction::Render]
            },
            KeyInput::Up => app.scroll_up(1),
            KeyInput::Down => app.scroll_down(1),
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Tab => Self::handle_tab(app),
            KeyInput::Esc => app.quit(),
        }
    }

    /// Handle Enter key - parse command and call App API.
    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }

        match commands::parse(text) {
            Command::Message { content } => app.send_text(content),
            Command::JoinRoom { room } => app.join_room(room),
            Command::Rename { username } => app.rename(username),
            Command::Recolor { color } => app.recolor(color),
            Command::Invite { username } => app.invite(username),
            Command::ForgetRoom { room } => app.forget_room(room),
            Command::Quit => app.quit(),
            Command::Unknown { input } => {
                app.set_status(format!("Unknown command: {input}"));
                vec![AppAction::Render]
            },
            Command::InvalidArgs { command, error } => {
                app.set_status(format!("/{command}: {error}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Handle Tab key - cycle to the next room in history.
    ///
    /// Unlike a local view switch, this is a real room change: leave notice,
    /// re-subscribe, join notice.
    fn handle_tab(app: &mut App) -> Vec<AppAction> {
        let rooms = app.rooms();
        if rooms.len() < 2 {
            return vec![];
        }

        let current = rooms.iter().position(|room| room == app.active_room());
        let next_index = current.map_or(0, |index| (index + 1) % rooms.len());
        let Some(next_room) = rooms.get(next_index).cloned() else {
            return vec![];
        };
        app.join_room(next_room)
    }

    /// Keys while an invitation prompt is open: `y` accepts, `n` or Esc
    /// declines.
    fn handle_prompt_key(key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char('y' | 'Y') => app.answer_prompt(true),
            KeyInput::Char('n' | 'N') | KeyInput::Esc => app.answer_prompt(false),
            _ => vec![],
        }
    }

    /// Keys while the review surface is open: arrows move, `y` accepts,
    /// `n` declines, Enter or Esc closes.
    fn handle_review_key(key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Up => app.review_prev(),
            KeyInput::Down => app.review_next(),
            KeyInput::Char('y' | 'Y') => app.review_resolve(true),
            KeyInput::Char('n' | 'N') => app.review_resolve(false),
            KeyInput::Enter | KeyInput::Esc => app.review_close(),
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use parlor_app::AppEvent;
    use parlor_proto::Invitation;

    use super::*;

    #[test]
    fn char_input_adds_to_buffer() {
        let mut input = InputState::new();
        let mut app = App::new();

        input.handle_key(KeyInput::Char('h'), &mut app);
        input.handle_key(KeyInput::Char('i'), &mut app);

        assert_eq!(input.buffer(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut input = InputState::new();
        let mut app = App::new();

        input.handle_key(KeyInput::Char('a'), &mut app);
        input.handle_key(KeyInput::Char('b'), &mut app);
        input.handle_key(KeyInput::Backspace, &mut app);

        assert_eq!(input.buffer(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn enter_sends_buffer_as_chat() {
        let mut input = InputState::new();
        let mut app = App::new();

        for c in "hello".chars() {
            input.handle_key(KeyInput::Char(c), &mut app);
        }
        let actions = input.handle_key(KeyInput::Enter, &mut app);

        assert!(input.buffer().is_empty());
        assert!(matches!(
            &actions[0],
            AppAction::SendText { text } if text == "hello"
        ));
    }

    #[test]
    fn slash_exit_quits() {
        let mut input = InputState::new();
        let mut app = App::new();

        for c in "/exit".chars() {
            input.handle_key(KeyInput::Char(c), &mut app);
        }
        let actions = input.handle_key(KeyInput::Enter, &mut app);
        assert_eq!(actions, vec![AppAction::Quit]);
    }

    #[test]
    fn tab_cycles_rooms_through_a_join() {
        let mut input = InputState::new();
        let mut app = App::new();
        app.handle(AppEvent::RoomsChanged {
            rooms: vec!["lobby".into(), "den".into()],
            active: "lobby".into(),
        });

        let actions = input.handle_key(KeyInput::Tab, &mut app);
        assert!(matches!(&actions[0], AppAction::JoinRoom { room } if room == "den"));
    }

    #[test]
    fn prompt_captures_keys_before_the_buffer() {
        let mut input = InputState::new();
        let mut app = App::new();
        app.handle(AppEvent::InvitePrompt {
            invitation: Invitation::new("bob", "den", ""),
            origin: parlor_app::InviteOrigin::Personal,
        });

        let actions = input.handle_key(KeyInput::Char('y'), &mut app);
        assert!(matches!(&actions[0], AppAction::AnswerInvite { accepted: true, .. }));
        assert!(input.buffer().is_empty());
    }

    #[test]
    fn review_keys_resolve_and_close() {
        let mut input = InputState::new();
        let mut app = App::new();
        app.handle(AppEvent::ReviewOpened {
            invitations: vec![Invitation::new("bob", "den", "")],
        });

        let actions = input.handle_key(KeyInput::Char('n'), &mut app);
        assert_eq!(actions, vec![AppAction::Render]);

        let actions = input.handle_key(KeyInput::Esc, &mut app);
        assert!(matches!(
            &actions[0],
            AppAction::ReviewClose { remaining } if remaining.is_empty()
        ));
    }
}
