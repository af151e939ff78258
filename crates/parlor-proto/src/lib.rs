//! Wire types for the parlor chat protocol.
//!
//! Everything on the broker is a UTF-8 JSON object. This crate defines the
//! payload structs, their encode/decode rules (including best-effort field
//! defaulting for lenient peers), and the topic namespace shared by every
//! client.
//!
//! # Components
//!
//! - [`ChatMessage`]: room broadcast, optionally carrying an embedded
//!   invitation
//! - [`Invitation`]: type-tagged invitation delivered on a personal topic
//!   and persisted for offline review
//! - [`topic`]: pure topic-derivation functions

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod invitation;
mod payload;
pub mod topic;

pub use invitation::{INVITATION_TYPE, Invitation};
pub use payload::{ChatMessage, EmbeddedInvitation, SYSTEM_USERNAME};

/// Errors produced while encoding wire payloads.
///
/// Decoding never surfaces errors to callers: malformed inbound payloads are
/// either repaired by field defaulting or dropped at the router.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Payload could not be serialized to JSON.
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
