//! Client
//!
//! Action-based protocol state machine for the parlor chat protocol.
//! Manages the session identity, room membership, message classification,
//! and the invitation protocol.
//!
//! # Architecture
//!
//! The client is Sans-IO: it receives events ([`ClientEvent`]), processes
//! them through pure state machine logic plus synchronous store access, and
//! returns actions ([`ClientAction`]) for the caller to execute. All calls
//! happen on the UI-owned context; the transport's background delivery loop
//! only ever enqueues events, it never touches client state.
//!
//! # Components
//!
//! - [`Client`]: the message router / protocol state machine
//! - [`ClientEvent`]: events fed into the client
//! - [`ClientAction`]: actions produced by the client
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::BrokerLink`]: channel pair to a live MQTT connection
//! - [`transport::connect`]: connect to a broker

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::Client;
pub use error::ClientError;
pub use event::{ChatLine, ClientAction, ClientEvent, InviteOrigin};
pub use parlor_core::{Environment, Identity, Palette, storage::Storage};
