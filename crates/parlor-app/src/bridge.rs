//! Protocol-to-Application translation layer.
//!
//! The [`Bridge`] wraps the low-level [`parlor_client::Client`] and adapts
//! it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`] into client events.
//! - Accumulates outgoing [`TransportOp`]s to be executed by the driver in
//!   the next I/O cycle.
//! - Interprets client actions and converts them back into
//!   [`crate::AppEvent`]s to update the UI.

use parlor_client::{Client, ClientAction, ClientEvent};
use parlor_core::{Environment, Identity, Palette, storage::Storage};

use crate::{
    AppAction, AppEvent,
    driver::{LinkDelivery, TransportOp},
};

/// Bridge between App and Client protocol logic.
///
/// Generic over storage and environment to support both production and
/// simulation.
pub struct Bridge<S: Storage, E: Environment> {
    client: Client<S, E>,
    outgoing: Vec<TransportOp>,
}

impl<S: Storage, E: Environment> Bridge<S, E> {
    /// Create a new Bridge for the given identity.
    pub fn new(env: E, store: S, identity: Identity, palette: Palette) -> Self {
        let client = Client::new(env, store, identity, palette);
        Self { client, outgoing: Vec::new() }
    }

    /// Current username.
    pub fn username(&self) -> &str {
        self.client.identity().username()
    }

    /// Start the session after the transport connects.
    pub fn start_session(&mut self) -> Vec<AppEvent> {
        let result = self.client.handle(ClientEvent::SessionStarted);
        self.handle_client_result(result)
    }

    /// End the session: queue the leave notice for the driver to flush.
    pub fn end_session(&mut self) -> Vec<AppEvent> {
        let result = self.client.handle(ClientEvent::SessionEnding);
        self.handle_client_result(result)
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        let event = match action {
            AppAction::SendText { text } => ClientEvent::SendText { text },
            AppAction::JoinRoom { room } => {
                ClientEvent::ChangeRoom { room, via_invitation: false }
            },
            AppAction::Rename { username } => ClientEvent::ChangeUsername { username },
            AppAction::Recolor { color } => ClientEvent::ChangeColor { color },
            AppAction::Invite { username } => ClientEvent::InviteUser { username },
            AppAction::ForgetRoom { room } => ClientEvent::ForgetRoom { room },
            AppAction::AnswerInvite { invitation, origin, accepted } => {
                ClientEvent::InvitationAnswered { invitation, origin, accepted }
            },
            AppAction::ReviewAccept { invitation } => {
                ClientEvent::ReviewAccepted { invitation }
            },
            AppAction::ReviewClose { remaining } => ClientEvent::ReviewClosed { remaining },
            AppAction::Render | AppAction::Quit => return vec![],
        };

        let result = self.client.handle(event);
        self.handle_client_result(result)
    }

    /// Handle a delivery from the broker link.
    pub fn handle_delivery(&mut self, delivery: LinkDelivery) -> Vec<AppEvent> {
        match delivery {
            LinkDelivery::ConnAck { code } => {
                let result = self.client.handle(ClientEvent::ConnAck { code });
                let mut events = vec![AppEvent::ConnAckReceived { code }];
                events.extend(self.handle_client_result(result));
                events
            },
            LinkDelivery::Message { topic, payload } => {
                let result = self.client.handle(ClientEvent::PayloadReceived { topic, payload });
                self.handle_client_result(result)
            },
            LinkDelivery::Closed { reason } => vec![AppEvent::LinkClosed { reason }],
        }
    }

    /// Take pending outgoing transport operations.
    pub fn take_outgoing(&mut self) -> Vec<TransportOp> {
        std::mem::take(&mut self.outgoing)
    }

    fn handle_client_result(
        &mut self,
        result: Result<Vec<ClientAction>, parlor_client::ClientError>,
    ) -> Vec<AppEvent> {
        match result {
            Ok(actions) => self.process_client_actions(actions),
            Err(e) => vec![AppEvent::Error { message: e.to_string() }],
        }
    }

    fn process_client_actions(&mut self, actions: Vec<ClientAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                ClientAction::Subscribe { topic } => {
                    self.outgoing.push(TransportOp::Subscribe { topic });
                },
                ClientAction::Unsubscribe { topic } => {
                    self.outgoing.push(TransportOp::Unsubscribe { topic });
                },
                ClientAction::Publish { topic, payload } => {
                    self.outgoing.push(TransportOp::Publish { topic, payload });
                },
                ClientAction::RenderLine { line } => {
                    events.push(AppEvent::LineReceived { line });
                },
                ClientAction::ClearView { banner } => {
                    events.push(AppEvent::ViewCleared { banner });
                },
                ClientAction::SetStatus { status } => {
                    events.push(AppEvent::StatusChanged { status });
                },
                ClientAction::PromptInvitation { invitation, origin } => {
                    events.push(AppEvent::InvitePrompt { invitation, origin });
                },
                ClientAction::ShowReview { invitations } => {
                    events.push(AppEvent::ReviewOpened { invitations });
                },
                ClientAction::RoomsChanged { rooms, active } => {
                    events.push(AppEvent::RoomsChanged { rooms, active });
                },
            }
        }

        events
    }
}
