//! Invitation payload.
//!
//! Invitations travel two ways: pushed live to the invitee's personal topic
//! while they are online, and appended to the persistent per-user store for
//! offline review. Both forms carry the same JSON object, distinguished from
//! chat traffic by the `type` tag.

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Value of the `type` tag identifying an invitation payload.
pub const INVITATION_TYPE: &str = "invitation";

fn default_from() -> String {
    "Someone".to_string()
}

fn default_chatroom() -> String {
    "unknown".to_string()
}

fn default_timestamp() -> String {
    String::new()
}

/// An offer from one user to another to join a specific chatroom.
///
/// Duplicate invitations for the same `(chatroom, from)` pair are allowed in
/// flight and in the store; de-duplication happens only on the resolve path,
/// which removes every matching entry at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Type tag, always [`INVITATION_TYPE`] on encode. Kept in the struct so
    /// persisted entries round-trip byte-compatibly with live payloads.
    #[serde(rename = "type", default)]
    kind: String,

    /// Username of the inviter.
    #[serde(default = "default_from")]
    pub from: String,

    /// Room the invitee is asked to join.
    #[serde(default = "default_chatroom")]
    pub chatroom: String,

    /// When the invitation was created (`%H:%M:%S - %d/%m/%Y`).
    #[serde(default = "default_timestamp")]
    pub timestamp: String,
}

impl Invitation {
    /// Create an invitation with the proper type tag.
    pub fn new(
        from: impl Into<String>,
        chatroom: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            kind: INVITATION_TYPE.to_string(),
            from: from.into(),
            chatroom: chatroom.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Encode to the JSON wire form.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode an invitation from a personal-topic payload.
    ///
    /// Returns `None` unless the payload is a JSON object carrying the
    /// invitation type tag. Payloads on a personal topic that fail this
    /// check fall through to ordinary chat classification.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(payload).ok().filter(|i| i.kind == INVITATION_TYPE)
    }

    /// Whether this entry matches a resolved `(chatroom, from)` pair.
    pub fn matches(&self, chatroom: &str, from: &str) -> bool {
        self.chatroom == chatroom && self.from == from
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_requires_type_tag() {
        let tagged = br#"{"type": "invitation", "from": "alice", "chatroom": "lobby"}"#;
        assert!(Invitation::decode(tagged).is_some());

        let untagged = br#"{"from": "alice", "chatroom": "lobby"}"#;
        assert!(Invitation::decode(untagged).is_none());

        let wrong_tag = br#"{"type": "message", "from": "alice", "chatroom": "lobby"}"#;
        assert!(Invitation::decode(wrong_tag).is_none());
    }

    #[test]
    fn decode_defaults_missing_fields() {
        let minimal = br#"{"type": "invitation"}"#;
        let invite = Invitation::decode(minimal).unwrap();
        assert_eq!(invite.from, "Someone");
        assert_eq!(invite.chatroom, "unknown");
    }

    #[test]
    fn encode_carries_type_tag() {
        let invite = Invitation::new("alice", "lobby", "10:00:00 - 01/02/2026");
        let text = String::from_utf8(invite.encode().unwrap()).unwrap();
        assert!(text.contains(r#""type":"invitation""#));
    }

    #[test]
    fn matches_requires_both_fields() {
        let invite = Invitation::new("alice", "lobby", "");
        assert!(invite.matches("lobby", "alice"));
        assert!(!invite.matches("lobby", "bob"));
        assert!(!invite.matches("den", "alice"));
    }
}
