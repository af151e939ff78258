//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use parlor_client::InviteOrigin;
use parlor_core::ColorToken;
use parlor_proto::Invitation;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Send chat text to the active room.
    SendText {
        /// Message text.
        text: String,
    },

    /// Join a room by name.
    JoinRoom {
        /// Room to join.
        room: String,
    },

    /// Change username.
    Rename {
        /// New username.
        username: String,
    },

    /// Change display color.
    Recolor {
        /// New color.
        color: ColorToken,
    },

    /// Invite a user to the active room.
    Invite {
        /// Invitee username.
        username: String,
    },

    /// Remove a room from history.
    ForgetRoom {
        /// Room to remove.
        room: String,
    },

    /// Answer a live invitation prompt.
    AnswerInvite {
        /// The prompted invitation.
        invitation: Invitation,
        /// Where the prompt came from.
        origin: InviteOrigin,
        /// `true` to join the room.
        accepted: bool,
    },

    /// A review-surface entry was accepted; join its room now.
    ReviewAccept {
        /// The accepted invitation.
        invitation: Invitation,
    },

    /// The review surface closed with these entries left pending.
    ReviewClose {
        /// Unresolved remainder to keep in the store.
        remaining: Vec<Invitation>,
    },
}
