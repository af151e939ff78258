//! Slash-command parsing.
//!
//! Anything not starting with `/` is chat text for the active room. The
//! command set covers the session controls the protocol exposes: room
//! switching, renaming, recoloring, inviting, and pruning room history.

use parlor_core::ColorToken;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain chat text.
    Message {
        /// The text to send.
        content: String,
    },
    /// `/join <room>` - switch to a room.
    JoinRoom {
        /// Target room.
        room: String,
    },
    /// `/nick <name>` - change username.
    Rename {
        /// New username.
        username: String,
    },
    /// `/color <name>` - change display color.
    Recolor {
        /// New color.
        color: ColorToken,
    },
    /// `/invite <user>` - invite a user to the active room.
    Invite {
        /// Invitee username.
        username: String,
    },
    /// `/forget <room>` - remove a room from history.
    ForgetRoom {
        /// Room to remove.
        room: String,
    },
    /// `/exit` - leave the chat and quit.
    Quit,
    /// Unrecognized command.
    Unknown {
        /// The raw input.
        input: String,
    },
    /// Recognized command with bad arguments.
    InvalidArgs {
        /// The command name.
        command: &'static str,
        /// What went wrong.
        error: String,
    },
}

/// Parse one input line.
pub fn parse(text: &str) -> Command {
    let Some(rest) = text.strip_prefix('/') else {
        return Command::Message { content: text.to_string() };
    };

    let mut parts = rest.splitn(2, ' ');
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "join" => require_arg("join", arg, |room| Command::JoinRoom { room }),
        "nick" => require_arg("nick", arg, |username| Command::Rename { username }),
        "invite" => require_arg("invite", arg, |username| Command::Invite { username }),
        "forget" => require_arg("forget", arg, |room| Command::ForgetRoom { room }),
        "color" => parse_color(arg),
        "exit" | "quit" => Command::Quit,
        _ => Command::Unknown { input: text.to_string() },
    }
}

fn require_arg(
    command: &'static str,
    arg: &str,
    build: impl FnOnce(String) -> Command,
) -> Command {
    if arg.is_empty() {
        Command::InvalidArgs { command, error: "missing argument".to_string() }
    } else {
        build(arg.to_string())
    }
}

fn parse_color(arg: &str) -> Command {
    match ColorToken::parse(arg) {
        Some(ColorToken::White) => Command::InvalidArgs {
            command: "color",
            error: "white is reserved".to_string(),
        },
        Some(color) => Command::Recolor { color },
        None => Command::InvalidArgs {
            command: "color",
            error: format!("unknown color '{arg}'"),
        },
    }
}
