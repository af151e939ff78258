//! Offline invitation delivery (spec scenario: invite while the invitee is
//! away, review at next session start).

use parlor_app::{App, AppAction, Bridge, TransportOp};
use parlor_core::{
    ColorToken, Identity, Palette,
    storage::{MemoryStore, Storage},
};
use parlor_harness::{FixedEnv, SimBroker};
use parlor_proto::Invitation;

fn start_session(
    broker: &SimBroker,
    store: MemoryStore,
    username: &str,
    room: &str,
) -> (App, Bridge<MemoryStore, FixedEnv>) {
    let identity = Identity::new("parlor", username, room, ColorToken::Blue);
    let mut bridge = Bridge::new(FixedEnv::new(), store, identity, Palette::new());
    let mut app = App::new();

    broker.attach(username);
    let events = bridge.start_session();
    apply_ops(broker, username, &mut bridge);
    for event in events {
        let actions = app.handle(event);
        drive(&mut app, &mut bridge, broker, username, actions);
    }
    (app, bridge)
}

fn apply_ops(
    broker: &SimBroker,
    client_id: &str,
    bridge: &mut Bridge<MemoryStore, FixedEnv>,
) {
    for op in bridge.take_outgoing() {
        match op {
            TransportOp::Subscribe { topic } => broker.subscribe(client_id, &topic),
            TransportOp::Unsubscribe { topic } => broker.unsubscribe(client_id, &topic),
            TransportOp::Publish { topic, payload } => broker.publish(&topic, &payload),
        }
    }
}

fn drive(
    app: &mut App,
    bridge: &mut Bridge<MemoryStore, FixedEnv>,
    broker: &SimBroker,
    client_id: &str,
    initial: Vec<AppAction>,
) {
    let mut pending = initial;
    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            if matches!(action, AppAction::Render | AppAction::Quit) {
                continue;
            }
            let events = bridge.process_app_action(action);
            apply_ops(broker, client_id, bridge);
            for event in events {
                pending.extend(app.handle(event));
            }
        }
    }
}

#[test]
fn offline_invitation_is_stored_reviewed_and_resolved() {
    let broker = SimBroker::new();
    let store = MemoryStore::new();

    // Alice invites carol, who is offline: nobody subscribes carol's
    // personal topic, but the invitation lands in the store.
    let (mut alice_app, mut alice_bridge) =
        start_session(&broker, store.clone(), "alice", "lobby");
    let actions = alice_app.invite("carol");
    drive(&mut alice_app, &mut alice_bridge, &broker, "alice", actions);

    let stored = store.pending_invitations("carol").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].from, "alice");
    assert_eq!(stored[0].chatroom, "lobby");

    // The live copy went to carol's personal topic regardless.
    assert!(broker.published().iter().any(|(topic, _)| topic == "parlor/invites/carol"));

    // Carol's next session start surfaces exactly that entry for review.
    let (mut carol_app, mut carol_bridge) =
        start_session(&broker, store.clone(), "carol", "den");
    let review = carol_app.review().expect("review surface shown");
    assert_eq!(review.entries().len(), 1);
    assert_eq!(review.entries()[0].invitation, stored[0]);

    // Accepting joins the room immediately; closing removes the entry.
    let actions = carol_app.review_resolve(true);
    drive(&mut carol_app, &mut carol_bridge, &broker, "carol", actions);
    assert_eq!(carol_app.active_room(), "lobby");

    let actions = carol_app.review_close();
    drive(&mut carol_app, &mut carol_bridge, &broker, "carol", actions);
    assert!(store.pending_invitations("carol").unwrap().is_empty());
}

#[test]
fn unreviewed_entries_stay_pending_across_sessions() {
    let broker = SimBroker::new();
    let store = MemoryStore::new();
    let first = Invitation::new("alice", "lobby", "1");
    let second = Invitation::new("bob", "den", "2");
    store.store_invitation("carol", &first).unwrap();
    store.store_invitation("carol", &second).unwrap();

    // First session: decline the first entry, never touch the second.
    let (mut app, mut bridge) = start_session(&broker, store.clone(), "carol", "attic");
    let actions = app.review_resolve(false);
    drive(&mut app, &mut bridge, &broker, "carol", actions);
    let actions = app.review_close();
    drive(&mut app, &mut bridge, &broker, "carol", actions);

    // Declined entries are removed; unreviewed ones survive.
    assert_eq!(store.pending_invitations("carol").unwrap(), [second.clone()]);

    // The survivor comes back at the next session start.
    broker.detach("carol");
    let (app, _bridge) = start_session(&broker, store.clone(), "carol", "attic");
    let review = app.review().expect("review surface shown again");
    assert_eq!(review.entries().len(), 1);
    assert_eq!(review.entries()[0].invitation, second);
}

#[test]
fn duplicate_invitations_all_clear_on_one_resolution() {
    let broker = SimBroker::new();
    let store = MemoryStore::new();
    // The same (chatroom, from) pair stored twice: not de-duplicated on
    // insert.
    let invitation = Invitation::new("alice", "lobby", "09:00:00 - 01/08/2026");
    store.store_invitation("carol", &invitation).unwrap();
    store.store_invitation("carol", &invitation).unwrap();

    let (mut app, mut bridge) = start_session(&broker, store.clone(), "carol", "den");
    // Dismiss the review untouched; the live prompt path is under test.
    let actions = app.review_close();
    drive(&mut app, &mut bridge, &broker, "carol", actions);

    // The live copy arrives and is declined; resolution still clears every
    // persisted duplicate for that (chatroom, from) pair.
    broker.publish("parlor/invites/carol", &invitation.encode().unwrap());
    while let Some(delivery) = broker.drain("carol") {
        let events = bridge.handle_delivery(delivery);
        apply_ops(&broker, "carol", &mut bridge);
        for event in events {
            let actions = app.handle(event);
            drive(&mut app, &mut bridge, &broker, "carol", actions);
        }
    }
    assert!(app.prompt().is_some());
    let actions = app.answer_prompt(false);
    drive(&mut app, &mut bridge, &broker, "carol", actions);

    assert!(store.pending_invitations("carol").unwrap().is_empty());
    assert_eq!(app.active_room(), "den");
}
