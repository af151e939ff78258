//! Topic namespace.
//!
//! Topic derivation is an interop invariant: every client on the broker must
//! produce byte-identical topics for the same base/room/username, so these
//! are pure functions with no configuration beyond the base prefix.

/// Chat topic for a room: `<base>/<chatroom>`.
pub fn chat_topic(base: &str, chatroom: &str) -> String {
    format!("{base}/{chatroom}")
}

/// Personal invitation topic for a user: `<base>/invites/<username>`.
pub fn invite_topic(base: &str, username: &str) -> String {
    format!("{base}/invites/{username}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_and_invite_topics_are_disjoint_namespaces() {
        // A room named "invites/bob" must not collide with bob's personal
        // topic only by accident of the base prefix; the derivations are
        // still distinct functions of their inputs.
        assert_eq!(chat_topic("parlor", "lobby"), "parlor/lobby");
        assert_eq!(invite_topic("parlor", "bob"), "parlor/invites/bob");
    }

    #[test]
    fn room_change_does_not_affect_personal_topic() {
        let personal = invite_topic("parlor", "alice");
        let _lobby = chat_topic("parlor", "lobby");
        let _den = chat_topic("parlor", "den");
        assert_eq!(personal, invite_topic("parlor", "alice"));
    }
}
