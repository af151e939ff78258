//! Core state for the parlor chat client.
//!
//! Everything here is synchronous and I/O-free apart from the storage
//! backends, which the protocol state machine drives from the UI-owned
//! context only.
//!
//! # Components
//!
//! - [`Identity`]: current username, display color, and active room; derives
//!   the subscribed topics
//! - [`Palette`]: deterministic per-username display tags
//! - [`RoomHistory`]: ordered set of rooms a user has joined
//! - [`Environment`]: wall-clock abstraction for deterministic testing
//! - [`storage`]: trait-based persistence for invitations and room history

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod env;
mod history;
mod identity;
mod palette;
pub mod storage;

pub use env::Environment;
pub use history::RoomHistory;
pub use identity::Identity;
pub use palette::{ColorToken, DisplayTag, Palette, USER_COLORS};
