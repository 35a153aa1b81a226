pub mod applicator;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::types::ContractId;

pub use applicator::{apply_payment, next_period_start, PaymentApplicator};

/// intent to pay `months` billing periods on a contract.
///
/// `expected_paid_through` is the watermark the caller observed when it
/// decided to pay; the ledger rejects the intent as a retryable conflict
/// if the live watermark has moved since (read-modify-write guard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub contract_id: ContractId,
    pub months: u32,
    /// explicit first month to cover; defaults to the next unpaid period
    pub start_month: Option<NaiveDate>,
    /// manual override for the charged amount (fee adjustments, partial
    /// sums collected at the counter)
    pub amount_override: Option<Money>,
    pub expected_paid_through: Option<NaiveDate>,
}

impl PaymentIntent {
    pub fn new(contract_id: ContractId, months: u32) -> Self {
        Self {
            contract_id,
            months,
            start_month: None,
            amount_override: None,
            expected_paid_through: None,
        }
    }

    pub fn starting(mut self, month: NaiveDate) -> Self {
        self.start_month = Some(month);
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount_override = Some(amount);
        self
    }

    pub fn expecting(mut self, paid_through: Option<NaiveDate>) -> Self {
        self.expected_paid_through = paid_through;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.months == 0 {
            return Err(BillingError::InvalidMonthCount {
                months: self.months,
            });
        }
        Ok(())
    }
}

/// outcome of a successfully applied payment, recorded together with the
/// watermark advance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub contract_id: ContractId,
    pub months: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: Money,
    pub new_paid_through: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}
