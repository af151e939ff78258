//! In-memory storage for tests and simulation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use parlor_proto::Invitation;

use super::{Storage, StorageError};

/// In-memory storage implementation for testing and simulation.
///
/// State is wrapped in `Arc<Mutex<>>` so clones share one store, matching
/// the file-backed backend's sharing semantics. Uses `lock().expect()`,
/// which panics if the mutex is poisoned - acceptable for test code.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Pending invitations keyed by invitee username.
    invitations: HashMap<String, Vec<Invitation>>,

    /// Room history keyed by username.
    rooms: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with at least one pending invitation.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn invitee_count(&self) -> usize {
        let inner = self.inner.lock().expect("Mutex poisoned");
        inner.invitations.values().filter(|list| !list.is_empty()).count()
    }
}

impl Storage for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn store_invitation(
        &self,
        user: &str,
        invitation: &Invitation,
    ) -> Result<(), StorageError> {
        self.inner
            .lock()
            .expect("Mutex poisoned")
            .invitations
            .entry(user.to_string())
            .or_default()
            .push(invitation.clone());
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn pending_invitations(&self, user: &str) -> Result<Vec<Invitation>, StorageError> {
        let inner = self.inner.lock().expect("Mutex poisoned");
        Ok(inner.invitations.get(user).cloned().unwrap_or_default())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn resolve_invitations(
        &self,
        user: &str,
        chatroom: &str,
        from: &str,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        if let Some(list) = inner.invitations.get_mut(user) {
            list.retain(|invite| !invite.matches(chatroom, from));
        }
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn set_pending_invitations(
        &self,
        user: &str,
        invitations: &[Invitation],
    ) -> Result<(), StorageError> {
        self.inner
            .lock()
            .expect("Mutex poisoned")
            .invitations
            .insert(user.to_string(), invitations.to_vec());
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn room_history(&self, user: &str) -> Result<Vec<String>, StorageError> {
        let inner = self.inner.lock().expect("Mutex poisoned");
        Ok(inner.rooms.get(user).cloned().unwrap_or_default())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    fn save_room_history(&self, user: &str, rooms: &[String]) -> Result<(), StorageError> {
        self.inner
            .lock()
            .expect("Mutex poisoned")
            .rooms
            .insert(user.to_string(), rooms.to_vec());
        Ok(())
    }
}
