//! Scripted driver over the sim broker.
//!
//! Each poll hands the runtime the next scripted step; when the script and
//! the mailbox are both exhausted the driver quits, so `Runtime::run`
//! terminates deterministically.

use std::collections::VecDeque;

use parlor_app::{App, AppAction, AppEvent, Driver, LinkDelivery, TransportOp};
use thiserror::Error;

use crate::SimBroker;

/// One scripted input: a closure over the app's intent API, standing in for
/// the frontend's key handling.
type ScriptStep = Box<dyn FnOnce(&mut App) -> Vec<AppAction> + Send>;

/// Errors from the sim driver.
///
/// The sim has no real I/O; the type exists to satisfy the driver contract
/// and to let tests inject failures later.
#[derive(Debug, Error)]
pub enum SimDriverError {
    /// The broker rejected the connect.
    #[error("sim broker refused the connection")]
    Refused,
}

/// Deterministic [`Driver`] over a [`SimBroker`].
pub struct SimDriver {
    broker: SimBroker,
    client_id: String,
    script: VecDeque<ScriptStep>,
    connected: bool,
    renders: usize,
}

impl SimDriver {
    /// Driver for `client_id` on the given broker.
    pub fn new(broker: SimBroker, client_id: impl Into<String>) -> Self {
        Self {
            broker,
            client_id: client_id.into(),
            script: VecDeque::new(),
            connected: false,
            renders: 0,
        }
    }

    /// Append a scripted step, run on a later poll.
    pub fn script(&mut self, step: impl FnOnce(&mut App) -> Vec<AppAction> + Send + 'static) {
        self.script.push_back(Box::new(step));
    }

    /// How many times the runtime rendered.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        // Let pending deliveries drain before the next scripted step, so
        // scripts observe the same ordering a live session would.
        if self.broker.has_pending(&self.client_id) {
            return Ok(app.handle(AppEvent::Tick));
        }
        match self.script.pop_front() {
            Some(step) => Ok(step(app)),
            None => Ok(app.quit()),
        }
    }

    async fn send_op(&mut self, op: TransportOp) -> Result<(), Self::Error> {
        match op {
            TransportOp::Subscribe { topic } => self.broker.subscribe(&self.client_id, &topic),
            TransportOp::Unsubscribe { topic } => {
                self.broker.unsubscribe(&self.client_id, &topic);
            },
            TransportOp::Publish { topic, payload } => self.broker.publish(&topic, &payload),
        }
        Ok(())
    }

    async fn recv_delivery(&mut self) -> Option<LinkDelivery> {
        self.broker.drain(&self.client_id)
    }

    async fn connect(&mut self) -> Result<(), Self::Error> {
        self.broker.attach(&self.client_id);
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
        self.renders += 1;
        Ok(())
    }

    async fn stop(&mut self) {
        // No grace period in simulation: the publish log is already
        // synchronous.
        self.broker.detach(&self.client_id);
        self.connected = false;
    }
}
