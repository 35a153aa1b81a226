use serde::{Deserialize, Serialize};

/// schedule projection configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// how many months past "today" an open-ended contract is projected.
    /// Contracts with an expiry date always run to the expiry month instead.
    pub lookahead_months: u32,
}

impl ScheduleConfig {
    pub const DEFAULT_LOOKAHEAD_MONTHS: u32 = 12;

    pub fn new(lookahead_months: u32) -> Self {
        Self { lookahead_months }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            lookahead_months: Self::DEFAULT_LOOKAHEAD_MONTHS,
        }
    }
}
