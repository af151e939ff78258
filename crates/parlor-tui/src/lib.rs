//! Terminal UI for parlor
//!
//! A thin shell over [`parlor_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`parlor_app::Runtime`].
//!
//! This crate only handles terminal rendering, key conversion, and
//! slash-command parsing.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod input;
pub mod system_env;
pub mod terminal;
pub mod ui;

pub use input::InputState;
pub use parlor_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
