//! Client state machine.
//!
//! The `Client` is the message router: it classifies every inbound payload
//! (chat message, system notice, personal invitation, embedded invitation),
//! drives room-switch transitions, and manages the persistent invitation
//! and room-history state.
//!
//! Every handler runs synchronously on the UI-owned context, so a
//! room-switch sequence is atomic with respect to inbound delivery: no
//! payload is ever classified against a half-updated identity.

use parlor_core::{
    ColorToken, Environment, Identity, Palette, RoomHistory,
    storage::Storage,
};
use parlor_proto::{ChatMessage, Invitation, topic};

use crate::{
    error::ClientError,
    event::{ChatLine, ClientAction, ClientEvent, InviteOrigin},
};

/// Protocol state machine for one chat session.
pub struct Client<S: Storage, E: Environment> {
    /// Environment for wall-clock timestamps.
    env: E,

    /// Persistent invitation and room-history state.
    store: S,

    /// Current username, color, and active room.
    identity: Identity,

    /// Per-username display tags.
    palette: Palette,

    /// Rooms this user has joined, loaded at session start.
    history: RoomHistory,
}

impl<S: Storage, E: Environment> Client<S, E> {
    /// Create a client for the given identity.
    pub fn new(env: E, store: S, identity: Identity, palette: Palette) -> Self {
        Self { env, store, identity, palette, history: RoomHistory::new() }
    }

    /// Current identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Room history as loaded and mutated this session.
    pub fn history(&self) -> &RoomHistory {
        &self.history
    }

    /// Process an event and return actions for the caller to execute, in
    /// order.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::SessionStarted => self.session_started(),
            ClientEvent::ConnAck { code } => Ok(self.conn_ack(code)),
            ClientEvent::PayloadReceived { topic, payload } => {
                Ok(self.payload_received(&topic, &payload))
            },
            ClientEvent::SendText { text } => self.send_text(&text),
            ClientEvent::ChangeRoom { room, via_invitation } => {
                self.change_room(&room, via_invitation)
            },
            ClientEvent::ChangeUsername { username } => self.change_username(&username),
            ClientEvent::ChangeColor { color } => self.change_color(color),
            ClientEvent::InviteUser { username } => self.invite_user(&username),
            ClientEvent::ForgetRoom { room } => self.forget_room(&room),
            ClientEvent::InvitationAnswered { invitation, origin, accepted } => {
                self.invitation_answered(&invitation, origin, accepted)
            },
            ClientEvent::ReviewAccepted { invitation } => {
                self.change_room(&invitation.chatroom, true)
            },
            ClientEvent::ReviewClosed { remaining } => self.review_closed(&remaining),
            ClientEvent::SessionEnding => self.session_ending(),
        }
    }

    /// Start the session: subscribe both topics, announce the join, seed
    /// room history, and surface any stored invitations for review.
    fn session_started(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let mut actions = vec![
            ClientAction::Subscribe { topic: self.identity.chat_topic() },
            ClientAction::Subscribe { topic: self.identity.personal_topic() },
            self.system_notice(
                self.identity.chat_topic(),
                format!("{} has joined the chat", self.identity.username()),
            )?,
        ];

        self.history =
            RoomHistory::from_rooms(self.store.room_history(self.identity.username())?);
        if self.history.add(self.identity.room()) {
            self.persist_history()?;
        }
        actions.push(self.rooms_changed());

        let pending = self.store.pending_invitations(self.identity.username())?;
        if !pending.is_empty() {
            actions.push(ClientAction::ShowReview { invitations: pending });
        }

        Ok(actions)
    }

    /// Connection acknowledgement. A failure code only updates the status
    /// indicator; the session stays up and the user retries manually.
    fn conn_ack(&self, code: u8) -> Vec<ClientAction> {
        let status = if code == 0 {
            self.connected_status()
        } else {
            format!("Connection failed, code: {code}")
        };
        vec![ClientAction::SetStatus { status }]
    }

    /// Classify an inbound payload. Rules, in order:
    ///
    /// 1. Personal topic + invitation type tag → personal invitation prompt
    ///    (short-circuits, no chat render).
    /// 2. Chat message embedding an invitation addressed to us → prompt in
    ///    addition to rendering the carrying message.
    /// 3. Everything else renders as chat with a deterministic tag.
    fn payload_received(&self, arrival_topic: &str, payload: &[u8]) -> Vec<ClientAction> {
        if arrival_topic == self.identity.personal_topic()
            && let Some(invitation) = Invitation::decode(payload)
        {
            return vec![ClientAction::PromptInvitation {
                invitation,
                origin: InviteOrigin::Personal,
            }];
        }

        let Some(message) = ChatMessage::decode(payload) else {
            tracing::debug!(topic = arrival_topic, "dropping undecodable payload");
            return Vec::new();
        };

        let mut actions = Vec::new();
        if let Some(embedded) = &message.invitation
            && embedded.to == self.identity.username()
        {
            actions.push(ClientAction::PromptInvitation {
                invitation: embedded.to_invitation(),
                origin: InviteOrigin::Embedded,
            });
        }

        let tag = self.palette.tag_for(&message.username);
        actions.push(ClientAction::RenderLine {
            line: ChatLine {
                timestamp: message.timestamp,
                username: message.username,
                text: message.message,
                tag,
            },
        });
        actions
    }

    /// Publish chat text to the active room, carrying the sender's color.
    fn send_text(&self, text: &str) -> Result<Vec<ClientAction>, ClientError> {
        let message =
            ChatMessage::new(self.identity.username(), text, self.env.message_timestamp())
                .with_color(self.identity.color().hex());
        Ok(vec![ClientAction::Publish {
            topic: self.identity.chat_topic(),
            payload: message.encode()?,
        }])
    }

    /// Switch rooms: leave notice, unsubscribe, re-point, subscribe, join
    /// notice, history append, view reset. The whole sequence is emitted by
    /// this one synchronous call.
    fn change_room(
        &mut self,
        room: &str,
        via_invitation: bool,
    ) -> Result<Vec<ClientAction>, ClientError> {
        let room = room.trim();
        if room.is_empty() {
            return Err(ClientError::EmptyRoom);
        }
        if room == self.identity.room() {
            return Ok(Vec::new());
        }

        let username = self.identity.username().to_string();
        let mut actions = vec![
            self.system_notice(
                self.identity.chat_topic(),
                format!("{username} has left the chat"),
            )?,
            ClientAction::Unsubscribe { topic: self.identity.chat_topic() },
        ];

        self.identity.set_room(room);
        actions.push(ClientAction::Subscribe { topic: self.identity.chat_topic() });

        let mut join_notice = format!("{username} has joined the chat");
        if via_invitation {
            join_notice.push_str(" in response to an invitation");
        }
        actions.push(self.system_notice(self.identity.chat_topic(), join_notice)?);

        if self.history.add(room) {
            self.persist_history()?;
        }

        let mut banner = format!("--- You have joined {room}");
        if via_invitation {
            banner.push_str(" via invitation");
        }
        banner.push_str(" ---");
        actions.push(ClientAction::ClearView { banner });
        actions.push(ClientAction::SetStatus { status: self.connected_status() });
        actions.push(self.rooms_changed());

        Ok(actions)
    }

    /// Rename: announce to the current room, then swap the personal topic
    /// subscription. Room membership is unchanged.
    fn change_username(&mut self, username: &str) -> Result<Vec<ClientAction>, ClientError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ClientError::EmptyUsername);
        }

        let old = self.identity.username().to_string();
        let mut actions = vec![
            self.system_notice(
                self.identity.chat_topic(),
                format!("{old} has changed their name to {username}"),
            )?,
            ClientAction::Unsubscribe { topic: self.identity.personal_topic() },
        ];

        self.identity.set_username(username);
        actions.push(ClientAction::Subscribe { topic: self.identity.personal_topic() });
        actions.push(ClientAction::SetStatus { status: self.connected_status() });

        Ok(actions)
    }

    /// Recolor and announce it.
    fn change_color(&mut self, color: ColorToken) -> Result<Vec<ClientAction>, ClientError> {
        self.identity.set_color(color);
        Ok(vec![self.system_notice(
            self.identity.chat_topic(),
            format!("{} has changed their color to {}", self.identity.username(), color.name()),
        )?])
    }

    /// Invite a user to the active room: announce it in the room, push the
    /// invitation to their personal topic, and persist it for offline
    /// review.
    fn invite_user(&mut self, username: &str) -> Result<Vec<ClientAction>, ClientError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ClientError::EmptyUsername);
        }

        let invitation = Invitation::new(
            self.identity.username(),
            self.identity.room(),
            self.env.invite_timestamp(),
        );

        let actions = vec![
            self.system_notice(
                self.identity.chat_topic(),
                format!(
                    "{} has invited {username} to join this chatroom",
                    self.identity.username()
                ),
            )?,
            ClientAction::Publish {
                topic: topic::invite_topic(self.identity.base_topic(), username),
                payload: invitation.encode()?,
            },
            ClientAction::SetStatus { status: format!("Invitation sent to {username}") },
        ];

        self.store.store_invitation(username, &invitation)?;
        Ok(actions)
    }

    /// Drop a room from history. The active room is protected.
    fn forget_room(&mut self, room: &str) -> Result<Vec<ClientAction>, ClientError> {
        if room == self.identity.room() {
            return Err(ClientError::ActiveRoomRemoval { room: room.to_string() });
        }
        if self.history.remove(room) {
            self.persist_history()?;
        }
        Ok(vec![self.rooms_changed()])
    }

    /// A live invitation prompt was answered. Accepting joins the room; a
    /// personal invitation is resolved in the store regardless of the
    /// answer, clearing any duplicate persisted copy.
    fn invitation_answered(
        &mut self,
        invitation: &Invitation,
        origin: InviteOrigin,
        accepted: bool,
    ) -> Result<Vec<ClientAction>, ClientError> {
        let actions =
            if accepted { self.change_room(&invitation.chatroom, true)? } else { Vec::new() };

        if origin == InviteOrigin::Personal {
            self.store.resolve_invitations(
                self.identity.username(),
                &invitation.chatroom,
                &invitation.from,
            )?;
        }

        Ok(actions)
    }

    /// The review surface closed: exactly the resolved subset disappears,
    /// which is the same as rewriting the pending list to the remainder.
    fn review_closed(&mut self, remaining: &[Invitation]) -> Result<Vec<ClientAction>, ClientError> {
        self.store.set_pending_invitations(self.identity.username(), remaining)?;
        Ok(Vec::new())
    }

    /// Announce the departure. The driver owns the disconnect grace period.
    fn session_ending(&self) -> Result<Vec<ClientAction>, ClientError> {
        Ok(vec![self.system_notice(
            self.identity.chat_topic(),
            format!("{} has left the chat", self.identity.username()),
        )?])
    }

    fn system_notice(
        &self,
        topic: String,
        text: String,
    ) -> Result<ClientAction, ClientError> {
        let notice = ChatMessage::system(text, self.env.message_timestamp());
        Ok(ClientAction::Publish { topic, payload: notice.encode()? })
    }

    fn connected_status(&self) -> String {
        format!("Connected as {} in {}", self.identity.username(), self.identity.room())
    }

    fn rooms_changed(&self) -> ClientAction {
        ClientAction::RoomsChanged {
            rooms: self.history.rooms().to_vec(),
            active: self.identity.room().to_string(),
        }
    }

    fn persist_history(&self) -> Result<(), ClientError> {
        self.store.save_room_history(self.identity.username(), self.history.rooms())?;
        Ok(())
    }
}
