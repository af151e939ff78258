//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The broker link comes from
//! [`parlor_client::transport`].

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use parlor_app::{App, AppAction, AppEvent, Driver, KeyInput, LinkDelivery, TransportOp};
use parlor_client::transport::{self, BrokerLink, LinkCommand, LinkConfig, LinkEvent, TransportError};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{InputState, ui};

/// How long the queued leave notice gets to reach the wire before the link
/// closes.
const DISCONNECT_GRACE: Duration = Duration::from_millis(500);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the broker
/// link (rumqttc). Owns the input state for text editing.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    link: Option<BrokerLink>,
    config: LinkConfig,
    input_state: InputState,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    pub fn new(config: LinkConfig) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, link: None, config, input_state: InputState::new() })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        match Self::convert_key(key_event.code) {
                            Some(key_input) => Ok(self.input_state.handle_key(key_input, app)),
                            None => Ok(vec![]),
                        }
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(app.handle(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(vec![]),
                }
            }

            // Tick timeout keeps deliveries draining
            () = tokio::time::sleep(timeout) => {
                Ok(app.handle(AppEvent::Tick))
            }
        }
    }

    async fn send_op(&mut self, op: TransportOp) -> Result<(), Self::Error> {
        let Some(link) = &self.link else {
            return Ok(());
        };
        let command = match op {
            TransportOp::Subscribe { topic } => LinkCommand::Subscribe(topic),
            TransportOp::Unsubscribe { topic } => LinkCommand::Unsubscribe(topic),
            TransportOp::Publish { topic, payload } => LinkCommand::Publish { topic, payload },
        };
        link.commands.send(command).await.map_err(|_| TerminalError::ChannelSend)
    }

    async fn recv_delivery(&mut self) -> Option<LinkDelivery> {
        let link = self.link.as_mut()?;
        match link.events.try_recv().ok()? {
            LinkEvent::ConnAck { code } => Some(LinkDelivery::ConnAck { code }),
            LinkEvent::Message { topic, payload } => {
                Some(LinkDelivery::Message { topic, payload: payload.to_vec() })
            },
            LinkEvent::Closed { reason } => Some(LinkDelivery::Closed { reason }),
        }
    }

    async fn connect(&mut self) -> Result<(), Self::Error> {
        let link = transport::connect(&self.config).await?;
        self.link = Some(link);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app, &self.input_state);
        })?;
        Ok(())
    }

    async fn stop(&mut self) {
        let Some(link) = self.link.take() else {
            return;
        };
        // Deliberate grace wait so the leave notice flushes; failures past
        // this point are end-of-life noise.
        tokio::time::sleep(DISCONNECT_GRACE).await;
        if link.commands.send(LinkCommand::Disconnect).await.is_err() {
            link.stop();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        if let Some(link) = &self.link {
            link.stop();
        }
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
