//! Room history.
//!
//! An ordered set of chatroom names: insertion order, no duplicates. The
//! router persists the set through [`crate::storage::Storage`] on every
//! effective mutation.

/// Ordered set of rooms a user has joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomHistory {
    rooms: Vec<String>,
}

impl RoomHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History loaded from a persisted list, dropping any duplicates the
    /// backing file accumulated while preserving first-seen order.
    pub fn from_rooms(rooms: Vec<String>) -> Self {
        let mut history = Self::new();
        for room in rooms {
            history.add(&room);
        }
        history
    }

    /// Rooms in insertion order.
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Whether `room` is present.
    pub fn contains(&self, room: &str) -> bool {
        self.rooms.iter().any(|r| r == room)
    }

    /// Append `room` if absent. Returns `true` when the set changed.
    pub fn add(&mut self, room: &str) -> bool {
        if self.contains(room) {
            return false;
        }
        self.rooms.push(room.to_string());
        true
    }

    /// Remove `room` if present. Returns `true` when the set changed.
    pub fn remove(&mut self, room: &str) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|r| r != room);
        self.rooms.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut history = RoomHistory::new();
        assert!(history.add("lobby"));
        assert!(!history.add("lobby"));
        assert_eq!(history.rooms(), ["lobby"]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut history = RoomHistory::new();
        history.add("lobby");
        history.add("den");
        history.add("attic");
        history.remove("den");
        assert_eq!(history.rooms(), ["lobby", "attic"]);
    }

    #[test]
    fn remove_absent_room_is_a_no_op() {
        let mut history = RoomHistory::new();
        history.add("lobby");
        assert!(!history.remove("den"));
        assert_eq!(history.rooms(), ["lobby"]);
    }

    #[test]
    fn from_rooms_deduplicates() {
        let history = RoomHistory::from_rooms(vec![
            "lobby".into(),
            "den".into(),
            "lobby".into(),
        ]);
        assert_eq!(history.rooms(), ["lobby", "den"]);
    }
}
