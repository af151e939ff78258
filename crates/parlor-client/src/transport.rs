//! MQTT transport for the client.
//!
//! Provides [`BrokerLink`], a channel pair to a live broker connection.
//! This is a thin layer that just moves payloads - all protocol logic
//! remains in the Sans-IO [`Client`](crate::Client).
//!
//! The delivery loop runs on a background tokio task; inbound traffic is
//! marshalled to the UI-owned context through the event channel, never by
//! calling into client state. There is no automatic reconnect: once the
//! event loop errors after a successful handshake, a [`LinkEvent::Closed`]
//! is emitted and the loop stops, matching the manual-retry behavior of the
//! reference protocol.

use std::time::Duration;

use bytes::Bytes;
use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS};
use thiserror::Error;
use tokio::sync::mpsc;

/// Bounded handshake timeout for the initial connect.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Broker keep-alive interval.
const KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Depth of the command and event channels.
const CHANNEL_CAPACITY: usize = 64;

/// Transport errors. Connect failure is fatal to the session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Broker did not acknowledge the session in time.
    #[error("connect timed out after {elapsed:?}")]
    Timeout {
        /// How long we waited.
        elapsed: Duration,
    },
}

/// Broker connection parameters.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Broker hostname.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// Client identifier, unique per live session.
    pub client_id: String,
    /// Optional username/password pair.
    pub credentials: Option<(String, String)>,
    /// Handshake timeout. Defaults to 60 seconds.
    pub connect_timeout: Duration,
}

impl LinkConfig {
    /// Config with the default handshake timeout and no credentials.
    pub fn new(host: impl Into<String>, port: u16, client_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: client_id.into(),
            credentials: None,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }

    /// Attach broker credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }
}

/// Commands the UI context sends to the link task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCommand {
    /// Subscribe to a topic. Idempotent at the broker.
    Subscribe(String),
    /// Unsubscribe from a topic. Idempotent at the broker.
    Unsubscribe(String),
    /// Publish a payload at QoS 0. Fire-and-forget.
    Publish {
        /// Target topic.
        topic: String,
        /// Encoded payload.
        payload: Vec<u8>,
    },
    /// Flush and close the connection.
    Disconnect,
}

/// Events the link task delivers to the UI context.
#[derive(Debug, Clone)]
pub enum LinkEvent {
    /// Broker connection acknowledgement (0 = accepted).
    ConnAck {
        /// MQTT 3.1.1 return code.
        code: u8,
    },
    /// Payload delivered on a subscribed topic, own echoes included.
    Message {
        /// Topic the payload arrived on.
        topic: String,
        /// Raw payload bytes.
        payload: Bytes,
    },
    /// The connection is gone and will not come back by itself.
    Closed {
        /// Why the link closed.
        reason: String,
    },
}

/// Handle to a connected broker link.
///
/// Commands and events flow over the channels; an internal task owns the
/// MQTT I/O.
pub struct BrokerLink {
    /// Send commands to the link task.
    pub commands: mpsc::Sender<LinkCommand>,
    /// Receive deliveries from the link task.
    pub events: mpsc::Receiver<LinkEvent>,
    /// Abort handle to stop the link task.
    abort_handle: tokio::task::AbortHandle,
}

impl BrokerLink {
    /// Stop the link task immediately.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Connect to an MQTT broker.
///
/// Drives the handshake until the broker acknowledges the session, under
/// the configured timeout, then hands the connection to a background task.
/// The acknowledgement code is re-delivered as the first [`LinkEvent`] so
/// the status indicator sees it.
pub async fn connect(config: &LinkConfig) -> Result<BrokerLink, TransportError> {
    let mut options =
        MqttOptions::new(config.client_id.clone(), config.host.clone(), config.port);
    options.set_keep_alive(KEEP_ALIVE);
    if let Some((username, password)) = &config.credentials {
        options.set_credentials(username.clone(), password.clone());
    }

    let (client, mut event_loop) = AsyncClient::new(options, CHANNEL_CAPACITY);

    let code = tokio::time::timeout(config.connect_timeout, wait_for_connack(&mut event_loop))
        .await
        .map_err(|_| TransportError::Timeout { elapsed: config.connect_timeout })??;

    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);

    // The handshake result precedes all other deliveries.
    let _ = event_tx.try_send(LinkEvent::ConnAck { code });

    let handle = tokio::spawn(run_link(client, event_loop, command_rx, event_tx));

    Ok(BrokerLink {
        commands: command_tx,
        events: event_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Poll the event loop until the broker answers the CONNECT.
async fn wait_for_connack(event_loop: &mut EventLoop) -> Result<u8, TransportError> {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => return Ok(return_code(ack.code)),
            Ok(_) => {},
            Err(error) => return Err(TransportError::Connection(error.to_string())),
        }
    }
}

/// Run the connection, bridging between channels and the MQTT event loop.
async fn run_link(
    client: AsyncClient,
    mut event_loop: EventLoop,
    mut commands: mpsc::Receiver<LinkCommand>,
    events: mpsc::Sender<LinkEvent>,
) {
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(LinkCommand::Subscribe(topic)) => {
                    if let Err(error) = client.subscribe(topic.as_str(), QoS::AtMostOnce).await {
                        tracing::warn!(%topic, %error, "subscribe failed");
                    }
                },
                Some(LinkCommand::Unsubscribe(topic)) => {
                    if let Err(error) = client.unsubscribe(topic.as_str()).await {
                        tracing::warn!(%topic, %error, "unsubscribe failed");
                    }
                },
                Some(LinkCommand::Publish { topic, payload }) => {
                    // Fire-and-forget: failures are logged, never surfaced.
                    if let Err(error) =
                        client.publish(topic.as_str(), QoS::AtMostOnce, false, payload).await
                    {
                        tracing::warn!(%topic, %error, "publish failed");
                    }
                },
                Some(LinkCommand::Disconnect) | None => {
                    drain_and_close(&client, &mut event_loop).await;
                    return;
                },
            },
            event = event_loop.poll() => match event {
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let delivery = LinkEvent::Message {
                        topic: publish.topic.clone(),
                        payload: publish.payload,
                    };
                    if events.send(delivery).await.is_err() {
                        return;
                    }
                },
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    let code = return_code(ack.code);
                    if events.send(LinkEvent::ConnAck { code }).await.is_err() {
                        return;
                    }
                },
                Ok(_) => {},
                Err(error) => {
                    // No reconnect/backoff: report and stop. The user
                    // restarts the session manually.
                    tracing::warn!(%error, "broker link lost");
                    let _ = events.send(LinkEvent::Closed { reason: error.to_string() }).await;
                    return;
                },
            },
        }
    }
}

/// Best-effort shutdown: request the DISCONNECT and poll until it is on the
/// wire. Failures here are end-of-life noise, never fatal.
async fn drain_and_close(client: &AsyncClient, event_loop: &mut EventLoop) {
    if let Err(error) = client.disconnect().await {
        tracing::debug!(%error, "disconnect request failed");
        return;
    }
    loop {
        match event_loop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) | Err(_) => return,
            Ok(_) => {},
        }
    }
}

/// MQTT 3.1.1 CONNACK return code as a bare number for the status line.
fn return_code(code: ConnectReturnCode) -> u8 {
    match code {
        ConnectReturnCode::Success => 0,
        ConnectReturnCode::RefusedProtocolVersion => 1,
        ConnectReturnCode::BadClientId => 2,
        ConnectReturnCode::ServiceUnavailable => 3,
        ConnectReturnCode::BadUserNamePassword => 4,
        ConnectReturnCode::NotAuthorized => 5,
    }
}
