//! Deterministic simulation harness for parlor.
//!
//! Runs the same App/Bridge/Client code as production against an in-memory
//! broker and a frozen clock, so scenario transcripts are reproducible.
//!
//! # Components
//!
//! - [`SimBroker`]: in-memory topic-exact pub/sub
//! - [`SimDriver`]: scripted [`parlor_app::Driver`] over the sim broker
//! - [`FixedEnv`]: frozen wall clock

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod fixed_env;
mod sim_broker;
mod sim_driver;

pub use fixed_env::FixedEnv;
pub use sim_broker::SimBroker;
pub use sim_driver::{SimDriver, SimDriverError};
