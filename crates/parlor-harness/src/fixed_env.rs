//! Frozen wall clock for reproducible transcripts.

use chrono::{DateTime, Local, TimeZone};
use parlor_core::Environment;

/// Environment whose clock never moves.
#[derive(Debug, Clone)]
pub struct FixedEnv {
    now: DateTime<Local>,
}

impl FixedEnv {
    /// Clock frozen at 2026-08-02 10:00:00 local time.
    pub fn new() -> Self {
        // Construction only fails for nonexistent local times; the epoch
        // fallback keeps this infallible regardless of timezone.
        let now = Local
            .with_ymd_and_hms(2026, 8, 2, 10, 0, 0)
            .single()
            .unwrap_or_else(|| Local.timestamp_nanos(0));
        Self { now }
    }
}

impl Default for FixedEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for FixedEnv {
    fn now(&self) -> DateTime<Local> {
        self.now
    }
}
