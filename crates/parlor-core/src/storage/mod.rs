//! Storage abstraction for persisted client state.
//!
//! Two independent keyed stores live behind one trait: pending invitations
//! by invitee username, and room history by username. Every operation is a
//! whole-store load-modify-persist; there is no append log and no file
//! locking. That is acceptable for the single-client-per-process model —
//! concurrent processes sharing a store file are last-writer-wins, a
//! documented limitation.
//!
//! The trait is synchronous and only ever driven from the UI-owned context.

mod json;
mod memory;

use parlor_proto::Invitation;
use thiserror::Error;

pub use self::{
    json::{INVITATIONS_FILE, JsonFileStore, ROOMS_FILE},
    memory::MemoryStore,
};

/// Errors from storage backends.
///
/// Reads never fail: malformed or absent backing state loads as an empty
/// store. Only writes surface errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem write failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Store could not be serialized.
    #[error("storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistent invitation and room-history state.
///
/// Must be `Clone` (handles share the same underlying store), `Send + Sync`
/// (the handle crosses task boundaries even though all calls happen on the
/// UI context), and synchronous.
pub trait Storage: Clone + Send + Sync + 'static {
    /// Append an invitation to `user`'s pending list, creating the list if
    /// absent. Duplicates are not de-duplicated here.
    fn store_invitation(&self, user: &str, invitation: &Invitation)
    -> Result<(), StorageError>;

    /// All pending invitations for `user`, oldest first.
    fn pending_invitations(&self, user: &str) -> Result<Vec<Invitation>, StorageError>;

    /// Remove **every** entry in `user`'s list matching both `chatroom` and
    /// `from`. Applying the same resolution twice removes nothing the
    /// second time.
    fn resolve_invitations(
        &self,
        user: &str,
        chatroom: &str,
        from: &str,
    ) -> Result<(), StorageError>;

    /// Replace `user`'s pending list wholesale. Used by the review surface,
    /// which rewrites the unresolved remainder on close.
    fn set_pending_invitations(
        &self,
        user: &str,
        invitations: &[Invitation],
    ) -> Result<(), StorageError>;

    /// Room history for `user`, in insertion order. Empty if absent.
    fn room_history(&self, user: &str) -> Result<Vec<String>, StorageError>;

    /// Replace `user`'s room history.
    fn save_room_history(&self, user: &str, rooms: &[String]) -> Result<(), StorageError>;
}
