//! Client identity and room state.
//!
//! A single owned value behind the UI-context boundary. Background delivery
//! never touches it; the router mutates it only inside a synchronous event
//! handler, so topic derivation always observes a consistent
//! username/room pair.

use parlor_proto::topic;

use crate::ColorToken;

/// Current username, display color, and active chatroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    base_topic: String,
    username: String,
    color: ColorToken,
    room: String,
}

impl Identity {
    /// Create an identity for a session joining `room` as `username`.
    pub fn new(
        base_topic: impl Into<String>,
        username: impl Into<String>,
        room: impl Into<String>,
        color: ColorToken,
    ) -> Self {
        Self {
            base_topic: base_topic.into(),
            username: username.into(),
            color,
            room: room.into(),
        }
    }

    /// Current username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current display color.
    pub fn color(&self) -> ColorToken {
        self.color
    }

    /// Currently active chatroom.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Topic namespace prefix shared by every client on the broker.
    pub fn base_topic(&self) -> &str {
        &self.base_topic
    }

    /// Chat topic for the active room: `<base>/<room>`.
    pub fn chat_topic(&self) -> String {
        topic::chat_topic(&self.base_topic, &self.room)
    }

    /// Personal invitation topic: `<base>/invites/<username>`.
    pub fn personal_topic(&self) -> String {
        topic::invite_topic(&self.base_topic, &self.username)
    }

    /// Replace the username. The caller owns re-subscribing the personal
    /// topic; the active room is unchanged by a rename.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Replace the display color.
    pub fn set_color(&mut self, color: ColorToken) {
        self.color = color;
    }

    /// Replace the active room. The caller owns the
    /// unsubscribe/notice/subscribe sequence around this.
    pub fn set_room(&mut self, room: impl Into<String>) {
        self.room = room.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new("parlor", "alice", "lobby", ColorToken::Red)
    }

    #[test]
    fn topics_derive_from_state() {
        let id = identity();
        assert_eq!(id.chat_topic(), "parlor/lobby");
        assert_eq!(id.personal_topic(), "parlor/invites/alice");
    }

    #[test]
    fn room_change_leaves_personal_topic_alone() {
        let mut id = identity();
        let personal = id.personal_topic();
        id.set_room("den");
        assert_eq!(id.chat_topic(), "parlor/den");
        assert_eq!(id.personal_topic(), personal);
    }

    #[test]
    fn rename_leaves_chat_topic_alone() {
        let mut id = identity();
        let chat = id.chat_topic();
        id.set_username("alyce");
        assert_eq!(id.personal_topic(), "parlor/invites/alyce");
        assert_eq!(id.chat_topic(), chat);
    }
}
