//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Protocol bridge to Client
//! - [`Driver`]: Platform-specific I/O

use parlor_core::{Environment, storage::Storage};

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Storage backend for the invitation and room-history stores
/// - `E`: Environment for wall-clock timestamps
pub struct Runtime<D, S, E>
where
    D: Driver,
    S: Storage,
    E: Environment,
{
    driver: D,
    app: App,
    bridge: Bridge<S, E>,
}

impl<D, S, E> Runtime<D, S, E>
where
    D: Driver,
    S: Storage,
    E: Environment,
{
    /// Create a new runtime with the given driver and bridge.
    pub fn new(driver: D, bridge: Bridge<S, E>) -> Self {
        Self { driver, app: App::new(), bridge }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Connects and starts the session (fatal on connect failure)
    /// 2. Polls for input events from the driver
    /// 3. Drains deliveries from the broker link
    /// 4. Processes actions and events between App and Bridge
    /// 5. On quit, announces the departure and stops the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error or the
    /// initial connect fails.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        self.connect().await?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.shutdown().await
    }

    /// Connect the transport and start the protocol session.
    async fn connect(&mut self) -> Result<(), D::Error> {
        let actions = self.app.handle(AppEvent::Connecting);
        let _ = self.process_actions(actions).await?;

        // Connect failure is fatal to the session: surfaced to the caller,
        // the loop never starts.
        self.driver.connect().await?;

        let events = self.bridge.start_session();
        self.flush_ops().await?;
        let _ = self.process_events(events).await?;
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if !actions.is_empty() && self.process_actions(actions).await? {
            return Ok(true);
        }

        while let Some(delivery) = self.driver.recv_delivery().await {
            let events = self.bridge.handle_delivery(delivery);
            self.flush_ops().await?;
            if self.process_events(events).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),

                    // Protocol operations go through the bridge
                    AppAction::SendText { .. }
                    | AppAction::JoinRoom { .. }
                    | AppAction::Rename { .. }
                    | AppAction::Recolor { .. }
                    | AppAction::Invite { .. }
                    | AppAction::ForgetRoom { .. }
                    | AppAction::AnswerInvite { .. }
                    | AppAction::ReviewAccept { .. }
                    | AppAction::ReviewClose { .. } => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            let new_actions = self.app.handle(event);
                            pending_actions.extend(new_actions);
                        }
                        self.flush_ops().await?;
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from Bridge back to App.
    async fn process_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Send all pending transport operations through the driver.
    async fn flush_ops(&mut self) -> Result<(), D::Error> {
        for op in self.bridge.take_outgoing() {
            self.driver.send_op(op).await?;
        }
        Ok(())
    }

    /// Announce the departure, flush it, and stop the driver. The driver
    /// owns the flush grace period; failures past this point are
    /// end-of-life noise.
    async fn shutdown(mut self) -> Result<(), D::Error> {
        let events = self.bridge.end_session();
        if let Err(error) = self.flush_ops().await {
            tracing::debug!(%error, "leave notice flush failed");
        }
        for event in events {
            let _ = self.app.handle(event);
        }
        self.driver.stop().await;
        Ok(())
    }

    /// Get a reference to the App.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
