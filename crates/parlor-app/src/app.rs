//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the application completely decoupled from I/O and
//! protocol mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Holds the message view (lines, scroll position, auto-scroll rule).
//! - Tracks the room sidebar, status line, and connection state.
//! - Queues invitation prompts and drives the review surface.

use std::collections::VecDeque;

use parlor_client::ChatLine;
use parlor_core::ColorToken;

use crate::{
    AppAction, AppEvent,
    state::{ConnectionState, PendingPrompt, ReviewState},
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    connection: ConnectionState,
    /// Status line text.
    status: String,
    /// Rendered chat lines, oldest first.
    lines: Vec<ChatLine>,
    /// Lines scrolled up from the bottom. Zero means pinned to the bottom.
    scroll_offset: usize,
    /// Known rooms in insertion order.
    rooms: Vec<String>,
    /// Currently active room.
    active_room: String,
    /// Synthetic line shown after the last view reset.
    banner: Option<String>,
    /// Live invitation prompts, front first.
    prompts: VecDeque<PendingPrompt>,
    /// Review surface, when open.
    review: Option<ReviewState>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create a new App.
    pub fn new() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            status: String::new(),
            lines: Vec::new(),
            scroll_offset: 0,
            rooms: Vec::new(),
            active_room: String::new(),
            banner: None,
            prompts: VecDeque::new(),
            review: None,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.connection = ConnectionState::Connecting;
                vec![AppAction::Render]
            },
            AppEvent::ConnAckReceived { code } => {
                self.connection = if code == 0 {
                    ConnectionState::Connected
                } else {
                    ConnectionState::Failed { reason: format!("code {code}") }
                };
                vec![AppAction::Render]
            },
            AppEvent::LinkClosed { reason } => {
                self.connection = ConnectionState::Failed { reason: reason.clone() };
                self.status = format!("Connection lost: {reason}");
                vec![AppAction::Render]
            },
            AppEvent::StatusChanged { status } => {
                self.status = status;
                vec![AppAction::Render]
            },
            AppEvent::LineReceived { line } => {
                self.push_line(line);
                vec![AppAction::Render]
            },
            AppEvent::ViewCleared { banner } => {
                self.lines.clear();
                self.scroll_offset = 0;
                self.banner = Some(banner);
                vec![AppAction::Render]
            },
            AppEvent::InvitePrompt { invitation, origin } => {
                self.prompts.push_back(PendingPrompt { invitation, origin });
                vec![AppAction::Render]
            },
            AppEvent::ReviewOpened { invitations } => {
                self.review = Some(ReviewState::new(invitations));
                vec![AppAction::Render]
            },
            AppEvent::RoomsChanged { rooms, active } => {
                self.rooms = rooms;
                self.active_room = active;
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status = format!("Error: {message}");
                vec![AppAction::Render]
            },
        }
    }

    /// Append a line, auto-scrolling only if the view was already within
    /// 10% of the bottom; otherwise the manual scroll-back position stays
    /// anchored to the content.
    fn push_line(&mut self, line: ChatLine) {
        let near_bottom = self.scroll_offset * 10 < self.lines.len().max(1);
        self.lines.push(line);
        if near_bottom {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset += 1;
        }
    }

    // --- user intents, called by the frontend's input handler ---

    /// Send chat text to the active room.
    pub fn send_text(&self, text: impl Into<String>) -> Vec<AppAction> {
        vec![AppAction::SendText { text: text.into() }, AppAction::Render]
    }

    /// Join a room by name.
    pub fn join_room(&self, room: impl Into<String>) -> Vec<AppAction> {
        vec![AppAction::JoinRoom { room: room.into() }, AppAction::Render]
    }

    /// Change username.
    pub fn rename(&self, username: impl Into<String>) -> Vec<AppAction> {
        vec![AppAction::Rename { username: username.into() }, AppAction::Render]
    }

    /// Change display color.
    pub fn recolor(&self, color: ColorToken) -> Vec<AppAction> {
        vec![AppAction::Recolor { color }, AppAction::Render]
    }

    /// Invite a user to the active room.
    pub fn invite(&self, username: impl Into<String>) -> Vec<AppAction> {
        vec![AppAction::Invite { username: username.into() }, AppAction::Render]
    }

    /// Remove a room from history.
    pub fn forget_room(&self, room: impl Into<String>) -> Vec<AppAction> {
        vec![AppAction::ForgetRoom { room: room.into() }, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Scroll the message view back by `n` lines.
    pub fn scroll_up(&mut self, n: usize) -> Vec<AppAction> {
        let max_offset = self.lines.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max_offset);
        vec![AppAction::Render]
    }

    /// Scroll the message view forward by `n` lines.
    pub fn scroll_down(&mut self, n: usize) -> Vec<AppAction> {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
        vec![AppAction::Render]
    }

    /// Answer the front invitation prompt. No-op when none is pending.
    pub fn answer_prompt(&mut self, accepted: bool) -> Vec<AppAction> {
        let Some(prompt) = self.prompts.pop_front() else {
            return vec![];
        };
        vec![
            AppAction::AnswerInvite {
                invitation: prompt.invitation,
                origin: prompt.origin,
                accepted,
            },
            AppAction::Render,
        ]
    }

    /// Move the review cursor down.
    pub fn review_next(&mut self) -> Vec<AppAction> {
        if let Some(review) = &mut self.review {
            review.select_next();
        }
        vec![AppAction::Render]
    }

    /// Move the review cursor up.
    pub fn review_prev(&mut self) -> Vec<AppAction> {
        if let Some(review) = &mut self.review {
            review.select_prev();
        }
        vec![AppAction::Render]
    }

    /// Accept or decline the highlighted review entry. Accepting joins the
    /// room immediately; store cleanup waits for close.
    pub fn review_resolve(&mut self, accepted: bool) -> Vec<AppAction> {
        let Some(review) = &mut self.review else {
            return vec![];
        };
        match review.resolve_current(accepted) {
            Some(invitation) if accepted => {
                vec![AppAction::ReviewAccept { invitation }, AppAction::Render]
            },
            _ => vec![AppAction::Render],
        }
    }

    /// Close the review surface, removing exactly the resolved subset from
    /// the store.
    pub fn review_close(&mut self) -> Vec<AppAction> {
        let Some(review) = self.review.take() else {
            return vec![];
        };
        vec![AppAction::ReviewClose { remaining: review.remaining() }, AppAction::Render]
    }

    // --- accessors for rendering ---

    /// Current connection state.
    pub fn connection_state(&self) -> &ConnectionState {
        &self.connection
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Rendered chat lines, oldest first.
    pub fn lines(&self) -> &[ChatLine] {
        &self.lines
    }

    /// Lines scrolled up from the bottom.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Synthetic line from the last view reset, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Known rooms in insertion order.
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Currently active room.
    pub fn active_room(&self) -> &str {
        &self.active_room
    }

    /// Front invitation prompt, if any.
    pub fn prompt(&self) -> Option<&PendingPrompt> {
        self.prompts.front()
    }

    /// Review surface, when open.
    pub fn review(&self) -> Option<&ReviewState> {
        self.review.as_ref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use parlor_client::InviteOrigin;
    use parlor_core::DisplayTag;
    use parlor_proto::Invitation;

    use super::*;

    fn line(n: usize) -> ChatLine {
        ChatLine {
            timestamp: "10:00:00".into(),
            username: "bob".into(),
            text: format!("line {n}"),
            tag: DisplayTag::System,
        }
    }

    fn filled_app(lines: usize) -> App {
        let mut app = App::new();
        for n in 0..lines {
            app.handle(AppEvent::LineReceived { line: line(n) });
        }
        app
    }

    #[test]
    fn new_lines_stay_pinned_to_bottom() {
        let app = filled_app(50);
        assert_eq!(app.scroll_offset(), 0);
    }

    #[test]
    fn scrolled_back_view_holds_position() {
        let mut app = filled_app(100);
        app.scroll_up(50);
        assert_eq!(app.scroll_offset(), 50);

        // Far from the bottom: the new line must not steal the view. The
        // offset grows so the same content stays on screen.
        app.handle(AppEvent::LineReceived { line: line(100) });
        assert_eq!(app.scroll_offset(), 51);
    }

    #[test]
    fn near_bottom_view_auto_scrolls() {
        let mut app = filled_app(100);
        app.scroll_up(5); // within 10% of the bottom
        app.handle(AppEvent::LineReceived { line: line(100) });
        assert_eq!(app.scroll_offset(), 0);
    }

    #[test]
    fn view_clear_resets_lines_and_scroll() {
        let mut app = filled_app(30);
        app.scroll_up(10);
        app.handle(AppEvent::ViewCleared { banner: "--- You have joined den ---".into() });
        assert!(app.lines().is_empty());
        assert_eq!(app.scroll_offset(), 0);
        assert_eq!(app.banner(), Some("--- You have joined den ---"));
    }

    #[test]
    fn prompts_are_answered_in_arrival_order() {
        let mut app = App::new();
        let first = Invitation::new("alice", "lobby", "1");
        let second = Invitation::new("bob", "den", "2");
        app.handle(AppEvent::InvitePrompt {
            invitation: first.clone(),
            origin: InviteOrigin::Personal,
        });
        app.handle(AppEvent::InvitePrompt {
            invitation: second.clone(),
            origin: InviteOrigin::Embedded,
        });

        let actions = app.answer_prompt(true);
        assert!(matches!(
            &actions[0],
            AppAction::AnswerInvite { invitation, accepted: true, .. } if *invitation == first
        ));
        assert_eq!(app.prompt().map(|p| p.invitation.clone()), Some(second));
    }

    #[test]
    fn answer_without_prompt_is_a_no_op() {
        let mut app = App::new();
        assert!(app.answer_prompt(true).is_empty());
    }

    #[test]
    fn review_accept_emits_join_and_close_emits_remainder() {
        let mut app = App::new();
        let first = Invitation::new("alice", "lobby", "1");
        let second = Invitation::new("bob", "den", "2");
        let third = Invitation::new("carol", "attic", "3");
        app.handle(AppEvent::ReviewOpened {
            invitations: vec![first.clone(), second.clone(), third.clone()],
        });

        // Accept the first, decline the second, leave the third untouched.
        let actions = app.review_resolve(true);
        assert!(matches!(
            &actions[0],
            AppAction::ReviewAccept { invitation } if *invitation == first
        ));
        app.review_next();
        let actions = app.review_resolve(false);
        assert_eq!(actions, [AppAction::Render]);

        let actions = app.review_close();
        assert!(matches!(
            &actions[0],
            AppAction::ReviewClose { remaining } if *remaining == [third.clone()]
        ));
        assert!(app.review().is_none());
    }

    #[test]
    fn conn_ack_failure_marks_connection_failed() {
        let mut app = App::new();
        app.handle(AppEvent::ConnAckReceived { code: 3 });
        assert!(matches!(app.connection_state(), ConnectionState::Failed { .. }));

        app.handle(AppEvent::ConnAckReceived { code: 0 });
        assert_eq!(*app.connection_state(), ConnectionState::Connected);
    }

    #[test]
    fn error_event_lands_in_the_status_line() {
        let mut app = App::new();
        app.handle(AppEvent::Error { message: "cannot remove the active chatroom 'lobby'".into() });
        assert!(app.status().starts_with("Error:"));
    }
}
