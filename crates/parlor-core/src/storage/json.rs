//! JSON file-backed storage.
//!
//! Two human-readable JSON files, each a map keyed by username. Every
//! mutation rewrites the whole file through a temp-file-and-rename, so a
//! crash mid-write never leaves a torn store. A legacy binary-serialized
//! sibling file (`.bin`) from a prior version is consulted once when the
//! JSON is unreadable or absent, then the store is rewritten in the active
//! format; the legacy format is never written again.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use parlor_proto::Invitation;
use serde::{Serialize, de::DeserializeOwned};

use super::{Storage, StorageError};

/// Invitation store file name.
pub const INVITATIONS_FILE: &str = ".parlor_invitations.json";

/// Room history store file name.
pub const ROOMS_FILE: &str = ".parlor_rooms.json";

/// Extension of the deprecated binary-serialized store files.
const LEGACY_EXTENSION: &str = "bin";

type InvitationMap = HashMap<String, Vec<Invitation>>;
type RoomMap = HashMap<String, Vec<String>>;

/// File-backed storage under a state directory.
///
/// Clones refer to the same files. All access happens from the UI context;
/// a second process pointed at the same directory is last-writer-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    invitations_path: PathBuf,
    rooms_path: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `state_dir`, using the well-known file names.
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        let dir = state_dir.as_ref();
        Self {
            invitations_path: dir.join(INVITATIONS_FILE),
            rooms_path: dir.join(ROOMS_FILE),
        }
    }

    /// Path of the invitation store file.
    pub fn invitations_path(&self) -> &Path {
        &self.invitations_path
    }

    /// Path of the room history store file.
    pub fn rooms_path(&self) -> &Path {
        &self.rooms_path
    }

    fn load_invitations(&self) -> InvitationMap {
        load_map(&self.invitations_path)
    }

    fn load_rooms(&self) -> RoomMap {
        load_map(&self.rooms_path)
    }
}

/// Load a whole store, treating malformed or absent state as empty.
///
/// When the active JSON is unreadable, the legacy binary sibling is tried as
/// a one-time migration source and the result is immediately rewritten as
/// JSON so the legacy file is never consulted again for a healthy store.
fn load_map<T>(path: &Path) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(map) => return map,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "store unreadable, trying legacy format");
            },
        },
        Err(error) if error.kind() == io::ErrorKind::NotFound => {},
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "store unreadable, trying legacy format");
        },
    }

    let legacy_path = path.with_extension(LEGACY_EXTENSION);
    if let Ok(bytes) = fs::read(&legacy_path) {
        match bincode::deserialize::<T>(&bytes) {
            Ok(map) => {
                tracing::info!(path = %legacy_path.display(), "migrating legacy store");
                if let Err(error) = write_map(path, &map) {
                    tracing::warn!(path = %path.display(), %error, "legacy store migration write failed");
                }
                return map;
            },
            Err(error) => {
                tracing::warn!(path = %legacy_path.display(), %error, "legacy store unreadable");
            },
        }
    }

    T::default()
}

/// Rewrite a whole store atomically: write a temp sibling, then rename over
/// the active file.
fn write_map<T: Serialize>(path: &Path, map: &T) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(map)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

impl Storage for JsonFileStore {
    fn store_invitation(
        &self,
        user: &str,
        invitation: &Invitation,
    ) -> Result<(), StorageError> {
        let mut map = self.load_invitations();
        map.entry(user.to_string()).or_default().push(invitation.clone());
        write_map(&self.invitations_path, &map)
    }

    fn pending_invitations(&self, user: &str) -> Result<Vec<Invitation>, StorageError> {
        Ok(self.load_invitations().remove(user).unwrap_or_default())
    }

    fn resolve_invitations(
        &self,
        user: &str,
        chatroom: &str,
        from: &str,
    ) -> Result<(), StorageError> {
        let mut map = self.load_invitations();
        if let Some(list) = map.get_mut(user) {
            list.retain(|invite| !invite.matches(chatroom, from));
            write_map(&self.invitations_path, &map)?;
        }
        Ok(())
    }

    fn set_pending_invitations(
        &self,
        user: &str,
        invitations: &[Invitation],
    ) -> Result<(), StorageError> {
        let mut map = self.load_invitations();
        map.insert(user.to_string(), invitations.to_vec());
        write_map(&self.invitations_path, &map)
    }

    fn room_history(&self, user: &str) -> Result<Vec<String>, StorageError> {
        Ok(self.load_rooms().remove(user).unwrap_or_default())
    }

    fn save_room_history(&self, user: &str, rooms: &[String]) -> Result<(), StorageError> {
        let mut map = self.load_rooms();
        map.insert(user.to_string(), rooms.to_vec());
        write_map(&self.rooms_path, &map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite(from: &str, room: &str) -> Invitation {
        Invitation::new(from, room, "10:00:00 - 01/02/2026")
    }

    #[test]
    fn missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.pending_invitations("carol").unwrap().is_empty());
        assert!(store.room_history("carol").unwrap().is_empty());
    }

    #[test]
    fn corrupt_json_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.invitations_path(), b"{ not json").unwrap();
        assert!(store.pending_invitations("carol").unwrap().is_empty());
    }

    #[test]
    fn invitations_round_trip_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.store_invitation("carol", &invite("alice", "lobby")).unwrap();
        store.store_invitation("carol", &invite("bob", "den")).unwrap();

        // A fresh handle over the same directory sees the same state.
        let reopened = JsonFileStore::new(dir.path());
        let pending = reopened.pending_invitations("carol").unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].from, "alice");
        assert_eq!(pending[1].from, "bob");
    }

    #[test]
    fn resolve_removes_all_matches_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.store_invitation("carol", &invite("alice", "lobby")).unwrap();
        store.store_invitation("carol", &invite("alice", "lobby")).unwrap();
        store.store_invitation("carol", &invite("bob", "lobby")).unwrap();

        store.resolve_invitations("carol", "lobby", "alice").unwrap();
        store.resolve_invitations("carol", "lobby", "alice").unwrap();

        let remaining = store.pending_invitations("carol").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].from, "bob");
    }

    #[test]
    fn room_history_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let rooms: Vec<String> =
            ["lobby", "den", "attic"].iter().map(ToString::to_string).collect();
        store.save_room_history("alice", &rooms).unwrap();

        assert_eq!(JsonFileStore::new(dir.path()).room_history("alice").unwrap(), rooms);
    }

    #[test]
    fn stores_are_independent_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.store_invitation("carol", &invite("alice", "lobby")).unwrap();
        store.save_room_history("alice", &["lobby".to_string()]).unwrap();

        assert!(store.invitations_path().exists());
        assert!(store.rooms_path().exists());
        assert_ne!(store.invitations_path(), store.rooms_path());
    }

    #[test]
    fn legacy_binary_store_migrates_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut legacy: HashMap<String, Vec<Invitation>> = HashMap::new();
        legacy.insert("carol".to_string(), vec![invite("alice", "lobby")]);
        let legacy_path = store.invitations_path().with_extension("bin");
        fs::write(&legacy_path, bincode::serialize(&legacy).unwrap()).unwrap();

        // First read migrates from the binary file...
        let pending = store.pending_invitations("carol").unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].from, "alice");

        // ...and rewrites the active format, so the legacy file is no
        // longer load-bearing.
        assert!(store.invitations_path().exists());
        fs::remove_file(&legacy_path).unwrap();
        assert_eq!(store.pending_invitations("carol").unwrap().len(), 1);
    }

    #[test]
    fn corrupt_legacy_store_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.invitations_path().with_extension("bin"), b"\xFF\xFF").unwrap();
        assert!(store.pending_invitations("carol").unwrap().is_empty());
    }
}
