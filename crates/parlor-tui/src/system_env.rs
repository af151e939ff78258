//! Production environment using the system clock.

use chrono::{DateTime, Local};
use parlor_core::Environment;

/// Environment backed by the real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
