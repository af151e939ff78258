//! Chat message payload.
//!
//! A [`ChatMessage`] is what every room subscriber receives, including the
//! sender (the broker echoes publishes back on subscribed topics). System
//! notices are ordinary chat messages from the reserved [`SYSTEM_USERNAME`].

use serde::{Deserialize, Serialize};

use crate::{Invitation, ProtocolError};

/// Reserved username for join/leave/rename/color announcements.
pub const SYSTEM_USERNAME: &str = "System";

fn default_username() -> String {
    "unknown user".to_string()
}

fn default_timestamp() -> String {
    "unknown time".to_string()
}

/// A message broadcast on a chat topic.
///
/// Decoding is lenient: a peer may omit any field and the message still
/// renders, with `username` falling back to `"unknown user"`, `timestamp` to
/// `"unknown time"`, and `message` to the empty string. Only payloads that
/// are not JSON objects at all are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender's display name.
    #[serde(default = "default_username")]
    pub username: String,

    /// Message text. Empty for some system notices.
    #[serde(default)]
    pub message: String,

    /// Sender-formatted wall-clock string (`%H:%M:%S`).
    ///
    /// Purely cosmetic; there is no ordering guarantee beyond per-topic
    /// delivery order.
    #[serde(default = "default_timestamp")]
    pub timestamp: String,

    /// Sender's display color as a hex token. Cosmetic metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Invitation piggybacked on a room broadcast instead of the invitee's
    /// personal topic. Only meaningful to the client whose username matches
    /// the `to` field; everyone else renders the carrying message as chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation: Option<EmbeddedInvitation>,
}

impl ChatMessage {
    /// Create a user message.
    pub fn new(
        username: impl Into<String>,
        message: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            timestamp: timestamp.into(),
            color: None,
            invitation: None,
        }
    }

    /// Create a system notice.
    pub fn system(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::new(SYSTEM_USERNAME, message, timestamp)
    }

    /// Attach the sender's display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether this message is a system notice.
    pub fn is_system(&self) -> bool {
        self.username == SYSTEM_USERNAME
    }

    /// Encode to the JSON wire form.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from the wire with field defaulting.
    ///
    /// Returns `None` for payloads that are not a JSON object; those are
    /// dropped by the router.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        serde_json::from_slice(payload).ok()
    }
}

/// Invitation embedded inside a [`ChatMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedInvitation {
    /// Username the invitation is addressed to.
    #[serde(default)]
    pub to: String,

    /// Username of the inviter.
    #[serde(default)]
    pub from: String,

    /// Room the invitee is asked to join.
    #[serde(default)]
    pub chatroom: String,

    /// When the invitation was created.
    #[serde(default)]
    pub timestamp: String,
}

impl EmbeddedInvitation {
    /// Lift into the common [`Invitation`] shape used by prompts and the
    /// persistent store, applying the store's field defaults.
    pub fn to_invitation(&self) -> Invitation {
        let from = if self.from.is_empty() { None } else { Some(self.from.as_str()) };
        Invitation::new(
            from.unwrap_or("Someone"),
            if self.chatroom.is_empty() { "unknown" } else { &self.chatroom },
            self.timestamp.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let msg = ChatMessage::decode(b"{}").unwrap();
        assert_eq!(msg.username, "unknown user");
        assert_eq!(msg.timestamp, "unknown time");
        assert_eq!(msg.message, "");
        assert!(msg.color.is_none());
        assert!(msg.invitation.is_none());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(ChatMessage::decode(b"not json").is_none());
        assert!(ChatMessage::decode(b"[1,2,3]").is_none());
    }

    #[test]
    fn system_notice_uses_reserved_username() {
        let msg = ChatMessage::system("alice has joined the chat", "10:00:00");
        assert!(msg.is_system());
        assert_eq!(msg.username, SYSTEM_USERNAME);
    }

    #[test]
    fn color_is_omitted_when_absent() {
        let bare = ChatMessage::new("alice", "hi", "10:00:00");
        let encoded = bare.encode().unwrap();
        let text = String::from_utf8(encoded).unwrap();
        assert!(!text.contains("color"));

        let colored = ChatMessage::new("alice", "hi", "10:00:00").with_color("#FF6B6B");
        let text = String::from_utf8(colored.encode().unwrap()).unwrap();
        assert!(text.contains("#FF6B6B"));
    }

    #[test]
    fn embedded_invitation_survives_decode() {
        let payload = br#"{
            "username": "alice",
            "message": "come join us",
            "timestamp": "10:00:00",
            "invitation": {"to": "carol", "from": "alice", "chatroom": "lobby"}
        }"#;
        let msg = ChatMessage::decode(payload).unwrap();
        let invite = msg.invitation.unwrap();
        assert_eq!(invite.to, "carol");
        assert_eq!(invite.to_invitation().chatroom, "lobby");
    }

    #[test]
    fn embedded_invitation_defaults_on_lift() {
        let embedded =
            EmbeddedInvitation { to: "carol".into(), from: String::new(), chatroom: String::new(), timestamp: String::new() };
        let invite = embedded.to_invitation();
        assert_eq!(invite.from, "Someone");
        assert_eq!(invite.chatroom, "unknown");
    }
}
