//! Client error types.

use parlor_core::storage::StorageError;
use parlor_proto::ProtocolError;
use thiserror::Error;

/// Errors from the client state machine.
///
/// Malformed inbound payloads are not errors — the router drops them after
/// best-effort defaulting. Errors here are either invalid user intents or
/// storage write failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A username intent was empty or blank.
    #[error("username cannot be empty")]
    EmptyUsername,

    /// A room intent was empty or blank.
    #[error("chatroom name cannot be empty")]
    EmptyRoom,

    /// The active room cannot be removed from history.
    #[error("cannot remove the active chatroom '{room}'")]
    ActiveRoomRemoval {
        /// The room that was asked to be removed.
        room: String,
    },

    /// A store write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An outgoing payload could not be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
