//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - The frontend (ticks, terminal resize).
//! - Protocol notifications translated from the underlying client by the
//!   [`crate::Bridge`].

use parlor_client::{ChatLine, InviteOrigin};
use parlor_proto::Invitation;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection attempt in progress.
    Connecting,

    /// Broker acknowledged the connect; zero is success.
    ConnAckReceived {
        /// Broker return code.
        code: u8,
    },

    /// The broker link is gone and will not come back by itself.
    LinkClosed {
        /// Why the link closed.
        reason: String,
    },

    /// Status indicator text changed.
    StatusChanged {
        /// New status text.
        status: String,
    },

    /// A chat line arrived for the message view.
    LineReceived {
        /// The rendered line.
        line: ChatLine,
    },

    /// The message view resets after a room switch.
    ViewCleared {
        /// Synthetic line shown at the top of the fresh view.
        banner: String,
    },

    /// A live invitation needs an accept/decline answer.
    InvitePrompt {
        /// The invitation.
        invitation: Invitation,
        /// Where it came from.
        origin: InviteOrigin,
    },

    /// Stored invitations are ready for review.
    ReviewOpened {
        /// Pending invitations, oldest first.
        invitations: Vec<Invitation>,
    },

    /// Room history or active room changed.
    RoomsChanged {
        /// Known rooms in insertion order.
        rooms: Vec<String>,
        /// Currently active room.
        active: String,
    },

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
