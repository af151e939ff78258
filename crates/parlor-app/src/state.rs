//! Observable application state types.
//!
//! These structures are the "View Model" for the frontend: the subset of
//! session state necessary for rendering without exposing the router or the
//! stores behind it.

use parlor_client::InviteOrigin;
use parlor_proto::Invitation;

/// Connection state for the status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected to a broker.
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Broker accepted the session.
    Connected,
    /// Broker refused or dropped the session. The user retries manually.
    Failed {
        /// Failure description.
        reason: String,
    },
}

/// A live invitation awaiting an accept/decline answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrompt {
    /// The invitation being offered.
    pub invitation: Invitation,
    /// Where it came from; decides store cleanup on answer.
    pub origin: InviteOrigin,
}

/// One entry on the review surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// The stored invitation.
    pub invitation: Invitation,
    /// `None` until acted upon, then `Some(accepted)`.
    pub resolution: Option<bool>,
}

/// The invitation review surface shown at session start.
///
/// All pending invitations are presented at once, each independently
/// accept/declinable. On close, exactly the resolved subset is removed from
/// the store; unreviewed entries stay pending for next time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewState {
    entries: Vec<ReviewEntry>,
    cursor: usize,
}

impl ReviewState {
    /// Surface over the given pending invitations, oldest first.
    pub fn new(invitations: Vec<Invitation>) -> Self {
        let entries = invitations
            .into_iter()
            .map(|invitation| ReviewEntry { invitation, resolution: None })
            .collect();
        Self { entries, cursor: 0 }
    }

    /// All entries in store order.
    pub fn entries(&self) -> &[ReviewEntry] {
        &self.entries
    }

    /// Currently highlighted entry index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the highlight down, saturating at the last entry.
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Move the highlight up, saturating at the first entry.
    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Resolve the highlighted entry. Returns its invitation when this call
    /// changed an unresolved entry, `None` when it was already resolved.
    pub fn resolve_current(&mut self, accepted: bool) -> Option<Invitation> {
        let entry = self.entries.get_mut(self.cursor)?;
        if entry.resolution.is_some() {
            return None;
        }
        entry.resolution = Some(accepted);
        Some(entry.invitation.clone())
    }

    /// Entries not explicitly acted upon; these stay pending after close.
    pub fn remaining(&self) -> Vec<Invitation> {
        self.entries
            .iter()
            .filter(|entry| entry.resolution.is_none())
            .map(|entry| entry.invitation.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite(from: &str, room: &str) -> Invitation {
        Invitation::new(from, room, "")
    }

    #[test]
    fn resolve_marks_exactly_one_entry() {
        let mut review =
            ReviewState::new(vec![invite("alice", "lobby"), invite("bob", "den")]);

        assert!(review.resolve_current(true).is_some());
        // Already resolved: a second answer on the same entry is ignored.
        assert!(review.resolve_current(false).is_none());

        assert_eq!(review.remaining(), [invite("bob", "den")]);
    }

    #[test]
    fn declined_entries_leave_the_remainder_too() {
        let mut review =
            ReviewState::new(vec![invite("alice", "lobby"), invite("bob", "den")]);
        review.resolve_current(false);
        review.select_next();
        review.resolve_current(true);
        assert!(review.remaining().is_empty());
    }

    #[test]
    fn cursor_saturates_at_both_ends() {
        let mut review = ReviewState::new(vec![invite("alice", "lobby")]);
        review.select_prev();
        assert_eq!(review.cursor(), 0);
        review.select_next();
        assert_eq!(review.cursor(), 0);
    }
}
