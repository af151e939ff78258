//! Client events and actions.

use parlor_core::{ColorToken, DisplayTag};
use parlor_proto::Invitation;

/// Where an invitation prompt came from.
///
/// Only personal-topic invitations touch the persistent store on
/// resolution; embedded ones are transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteOrigin {
    /// Delivered live on the invitee's personal topic.
    Personal,
    /// Piggybacked inside a chat-topic broadcast.
    Embedded,
}

/// A line ready for the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// Sender-supplied timestamp string.
    pub timestamp: String,
    /// Sender's display name.
    pub username: String,
    /// Message text.
    pub text: String,
    /// Deterministic display tag for the sender.
    pub tag: DisplayTag,
}

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Receiving payloads from the broker link and forwarding them here
/// - Forwarding user intents (send text, switch room, invite, ...)
/// - Relaying prompt and review answers back from the presentation boundary
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Transport connected; start the session (subscribe, announce, check
    /// stored invitations).
    SessionStarted,

    /// Broker connection acknowledgement. Zero is success; anything else is
    /// a failure description for the status line, not a teardown.
    ConnAck {
        /// Broker return code.
        code: u8,
    },

    /// Raw payload delivered on a subscribed topic, own echoes included.
    PayloadReceived {
        /// Topic the payload arrived on.
        topic: String,
        /// Raw payload bytes.
        payload: Vec<u8>,
    },

    /// User sends chat text to the active room.
    SendText {
        /// Message text.
        text: String,
    },

    /// User switches to another room.
    ChangeRoom {
        /// Room to join.
        room: String,
        /// Whether the switch answers an invitation.
        via_invitation: bool,
    },

    /// User changes their username. Room membership is unchanged.
    ChangeUsername {
        /// New username.
        username: String,
    },

    /// User picks a new display color.
    ChangeColor {
        /// New color.
        color: ColorToken,
    },

    /// User invites another user to the active room.
    InviteUser {
        /// Invitee username.
        username: String,
    },

    /// User removes a room from their history.
    ForgetRoom {
        /// Room to remove. Must not be the active room.
        room: String,
    },

    /// Answer to a live invitation prompt.
    InvitationAnswered {
        /// The invitation that was prompted.
        invitation: Invitation,
        /// Where the prompt came from.
        origin: InviteOrigin,
        /// `true` to join the room.
        accepted: bool,
    },

    /// A stored invitation was accepted in the review surface. Store
    /// cleanup happens when the surface closes.
    ReviewAccepted {
        /// The accepted invitation.
        invitation: Invitation,
    },

    /// The review surface closed; `remaining` entries stay pending.
    ReviewClosed {
        /// Entries that were not explicitly acted upon.
        remaining: Vec<Invitation>,
    },

    /// Session teardown: announce the departure. The driver disconnects
    /// after a short grace period.
    SessionEnding,
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Subscribe to a topic.
    Subscribe {
        /// Topic to subscribe.
        topic: String,
    },

    /// Unsubscribe from a topic. Stale subscriptions must never persist, so
    /// every identity change pairs this with a `Subscribe`.
    Unsubscribe {
        /// Topic to unsubscribe.
        topic: String,
    },

    /// Publish a payload. Fire-and-forget; delivery is never confirmed.
    Publish {
        /// Target topic.
        topic: String,
        /// Encoded payload.
        payload: Vec<u8>,
    },

    /// Render a chat line.
    RenderLine {
        /// The line to render.
        line: ChatLine,
    },

    /// Reset the message view after a room switch.
    ClearView {
        /// Synthetic line shown at the top of the fresh view.
        banner: String,
    },

    /// Update the status indicator.
    SetStatus {
        /// New status text.
        status: String,
    },

    /// Ask the user to accept or decline an invitation. The answer comes
    /// back as [`ClientEvent::InvitationAnswered`].
    PromptInvitation {
        /// The invitation to prompt.
        invitation: Invitation,
        /// Where it came from.
        origin: InviteOrigin,
    },

    /// Present all stored invitations for review at once.
    ShowReview {
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
}
