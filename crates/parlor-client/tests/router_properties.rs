//! Property-based tests for the message router.
//!
//! Invariants: the router never fails on inbound bytes, classification
//! priority holds for every well-formed invitation, and topic derivation is
//! a pure function of identity state.

use chrono::{DateTime, Local, TimeZone};
use parlor_client::{Client, ClientAction, ClientEvent, Environment, Identity, InviteOrigin, Palette};
use parlor_core::{ColorToken, storage::MemoryStore};
use parlor_proto::{Invitation, topic};
use proptest::prelude::*;

#[derive(Clone)]
struct FrozenEnv;

impl Environment for FrozenEnv {
    fn now(&self) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 2, 10, 0, 0).unwrap()
    }
}

fn client(username: &str, room: &str) -> Client<MemoryStore, FrozenEnv> {
    let identity = Identity::new("parlor", username, room, ColorToken::Red);
    Client::new(FrozenEnv, MemoryStore::new(), identity, Palette::new())
}

proptest! {
    // Arbitrary bytes on arbitrary topics never error and never prompt.
    #[test]
    fn router_never_fails_on_inbound_bytes(
        topic in "[a-z/]{1,20}",
        payload in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut client = client("alice", "lobby");
        let actions = client
            .handle(ClientEvent::PayloadReceived { topic, payload })
            .unwrap();
        // Raw bytes can render as defaulted chat or be dropped, never more.
        prop_assert!(actions.len() <= 1);
    }

    // Rule 1 short-circuits: any invitation payload on the personal topic
    // is a personal prompt, even when it carries chat-looking fields.
    #[test]
    fn personal_topic_invitations_always_prompt(
        from in "[a-z]{1,8}",
        chatroom in "[a-z]{1,8}",
        extra_message in "[a-z ]{0,20}",
    ) {
        let mut client = client("alice", "lobby");
        let payload = format!(
            r#"{{"type": "invitation", "from": "{from}", "chatroom": "{chatroom}",
                "timestamp": "t", "username": "{from}", "message": "{extra_message}"}}"#
        );

        let actions = client
            .handle(ClientEvent::PayloadReceived {
                topic: "parlor/invites/alice".to_string(),
                payload: payload.into_bytes(),
            })
            .unwrap();

        prop_assert_eq!(actions.len(), 1);
        prop_assert!(
            matches!(
                &actions[0],
                ClientAction::PromptInvitation { origin: InviteOrigin::Personal, .. }
            ),
            "expected personal invitation prompt"
        );
    }

    // Topic derivation is pure: room changes never move the personal topic
    // and renames never move the chat topic.
    #[test]
    fn topic_derivation_is_independent(
        username in "[a-z]{1,8}",
        room_a in "[a-z]{1,8}",
        room_b in "[a-z]{1,8}",
    ) {
        let mut client = client(&username, &room_a);
        let personal = client.identity().personal_topic();

        let _ = client
            .handle(ClientEvent::ChangeRoom { room: room_b.clone(), via_invitation: false })
            .unwrap();

        prop_assert_eq!(client.identity().personal_topic(), personal);
        prop_assert_eq!(
            client.identity().chat_topic(),
            topic::chat_topic("parlor", &room_b)
        );
    }

    // Resolution is idempotent through the router path.
    #[test]
    fn answering_the_same_invitation_twice_is_harmless(
        from in "[a-z]{1,8}",
        chatroom in "[a-z]{1,8}",
    ) {
        let mut client = client("alice", "lobby");
        let invitation = Invitation::new(from, chatroom, "t");

        for _ in 0..2 {
            let _ = client
                .handle(ClientEvent::InvitationAnswered {
                    invitation: invitation.clone(),
                    origin: InviteOrigin::Personal,
                    accepted: false,
                })
                .unwrap();
        }
    }
}
