use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::whole_months_between;
use crate::decimal::Money;
use crate::schedule::Schedule;

/// aggregates reduced from a schedule on every read.
///
/// Never cached independently of the schedule they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationStats {
    /// whole months until expiry, `None` for open-ended contracts
    pub months_remaining: Option<u32>,
    pub total_paid_months: u32,
    pub total_unpaid_past_months: u32,
}

impl ReconciliationStats {
    pub fn compute(
        schedule: &Schedule,
        expiry_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let months_remaining = expiry_date
            .map(|expiry| whole_months_between(today, expiry).max(0) as u32);

        Self {
            months_remaining,
            total_paid_months: schedule.iter().filter(|m| m.is_paid).count() as u32,
            total_unpaid_past_months: schedule.iter().filter(|m| m.is_debt()).count() as u32,
        }
    }

    /// debt months priced at the contract's monthly fee
    pub fn debt_amount(&self, monthly_fee: Money) -> Money {
        monthly_fee.times(self.total_unpaid_past_months)
    }

    pub fn has_debt(&self) -> bool {
        self.total_unpaid_past_months > 0
    }
}
