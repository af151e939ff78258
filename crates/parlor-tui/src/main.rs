//! parlor TUI entry point.

use std::path::PathBuf;

use clap::Parser;
use parlor_app::{Bridge, Runtime};
use parlor_client::transport::LinkConfig;
use parlor_core::{ColorToken, DisplayTag, Identity, Palette, storage::JsonFileStore};
use parlor_tui::{SystemEnv, TerminalDriver};
use tracing_subscriber::EnvFilter;

/// parlor terminal chat client
#[derive(Parser, Debug)]
#[command(name = "parlor-tui")]
#[command(about = "Terminal chatroom client over an MQTT broker")]
#[command(version)]
struct Args {
    /// Username to chat as
    #[arg(short, long)]
    username: String,

    /// Chatroom to join
    #[arg(short, long)]
    room: String,

    /// Broker hostname
    #[arg(long, default_value = "broker.hivemq.com")]
    host: String,

    /// Broker port
    #[arg(long, default_value_t = 1883)]
    port: u16,

    /// Topic namespace prefix shared by every client
    #[arg(long, default_value = "parlor")]
    base_topic: String,

    /// Display color (defaults to the palette hash for the username)
    #[arg(long)]
    color: Option<String>,

    /// Directory for the invitation and room-history stores
    /// (defaults to the home directory)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Broker username
    #[arg(long)]
    broker_user: Option<String>,

    /// Broker password
    #[arg(long)]
    broker_password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let username = args.username.trim().to_string();
    if username.is_empty() {
        return Err("username cannot be empty".into());
    }
    let room = args.room.trim().to_string();
    if room.is_empty() {
        return Err("chatroom name cannot be empty".into());
    }

    let color = match args.color.as_deref() {
        Some(name) => match ColorToken::parse(name) {
            Some(ColorToken::White) => return Err("white is reserved".into()),
            Some(color) => color,
            None => return Err(format!("unknown color '{name}'").into()),
        },
        None => default_color(&username),
    };

    let state_dir = match args.state_dir {
        Some(dir) => dir,
        None => std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from),
    };
    let store = JsonFileStore::new(state_dir);

    let identity = Identity::new(args.base_topic, username.clone(), room, color);
    let bridge = Bridge::new(SystemEnv, store, identity, Palette::new());

    // Client IDs must be unique per live broker session.
    let client_id = format!("parlor-{username}-{}", std::process::id());
    tracing::info!(%username, host = %args.host, port = args.port, "starting session");
    let mut config = LinkConfig::new(args.host, args.port, client_id);
    if let (Some(user), Some(password)) = (args.broker_user, args.broker_password) {
        config = config.with_credentials(user, password);
    }

    let driver = TerminalDriver::new(config)?;
    let runtime = Runtime::new(driver, bridge);

    Ok(runtime.run().await?)
}

/// Pick the same color the palette hash would render this user in.
fn default_color(username: &str) -> ColorToken {
    match Palette::new().tag_for(username) {
        DisplayTag::User(token) => token,
        DisplayTag::System => ColorToken::Red,
    }
}
