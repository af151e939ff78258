//! Environment abstraction for deterministic testing.
//!
//! Decouples the protocol state machine from the system clock. Outgoing
//! payloads carry formatted wall-clock strings, so the abstraction hands out
//! local `DateTime`s rather than monotonic instants; simulation environments
//! freeze the clock to make scenario transcripts reproducible.

use chrono::{DateTime, Local};

/// Message timestamp format (`10:00:00`).
const MESSAGE_TIME_FORMAT: &str = "%H:%M:%S";

/// Invitation timestamp format (`10:00:00 - 02/08/2026`).
const INVITE_TIME_FORMAT: &str = "%H:%M:%S - %d/%m/%Y";

/// Abstract environment providing wall-clock time.
///
/// Implementations must be cheap to clone; the state machine calls
/// [`Environment::now`] once per outgoing payload.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Local>;

    /// Timestamp string attached to chat messages and system notices.
    fn message_timestamp(&self) -> String {
        self.now().format(MESSAGE_TIME_FORMAT).to_string()
    }

    /// Longer timestamp string attached to invitations, which may sit in the
    /// store for days before review.
    fn invite_timestamp(&self) -> String {
        self.now().format(INVITE_TIME_FORMAT).to_string()
    }
}
