//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations - it is the presentation boundary plus the transport
//! seam. Each frontend implements the trait to provide platform-specific
//! I/O, while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppAction};

/// A transport operation the client asked the driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOp {
    /// Subscribe to a topic.
    Subscribe {
        /// Topic to subscribe.
        topic: String,
    },
    /// Unsubscribe from a topic.
    Unsubscribe {
        /// Topic to unsubscribe.
        topic: String,
    },
    /// Publish a payload, fire-and-forget.
    Publish {
        /// Target topic.
        topic: String,
        /// Encoded payload.
        payload: Vec<u8>,
    },
}

/// A delivery from the broker link, marshalled onto the UI context.
#[derive(Debug, Clone)]
pub enum LinkDelivery {
    /// Broker connection acknowledgement (0 = accepted).
    ConnAck {
        /// Broker return code.
        code: u8,
    },
    /// Payload delivered on a subscribed topic, own echoes included.
    Message {
        /// Topic the payload arrived on.
        topic: String,
        /// Raw payload bytes.
        payload: Vec<u8>,
    },
    /// The link is gone and will not come back by itself.
    Closed {
        /// Why the link closed.
        reason: String,
    },
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the production TUI and in
/// simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, rumqttc for the broker link
/// - **Simulation**: in-memory broker with scripted input
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event, translating it through the app's
    /// intent API. Must yield within a bounded tick interval so deliveries
    /// keep draining.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Execute a transport operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is closed and the operation cannot even
    /// be queued. Publish delivery itself is fire-and-forget.
    fn send_op(&mut self, op: TransportOp)
    -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Next pending delivery from the link, or `None` if nothing is
    /// currently queued. Must not block.
    fn recv_delivery(&mut self) -> impl Future<Output = Option<LinkDelivery>> + Send;

    /// Establish the broker connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established; this is
    /// fatal to the session.
    fn connect(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Check if connected to the broker.
    fn is_connected(&self) -> bool;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    ///
    /// Called after the leave notice is queued; implementations allow a
    /// short grace period (~500ms) for it to flush before closing the link.
    /// This is the only deliberate wait on the UI context. Failures are
    /// swallowed - shutdown always proceeds.
    fn stop(&mut self) -> impl Future<Output = ()> + Send;
}
