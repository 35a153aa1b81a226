use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("invalid schedule input: {message}")]
    InvalidScheduleInput {
        message: String,
    },

    #[error("invalid month count: {months}")]
    InvalidMonthCount {
        months: u32,
    },

    #[error("payment start {requested} precedes next unpaid period {next_period_start}")]
    PaymentIntoPaidPeriod {
        requested: NaiveDate,
        next_period_start: NaiveDate,
    },

    #[error("stale watermark: expected {expected:?}, found {found:?}")]
    StaleWatermark {
        expected: Option<NaiveDate>,
        found: Option<NaiveDate>,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("contract is archived")]
    ContractArchived,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl BillingError {
    /// conflicts from concurrent watermark updates are safe to retry
    /// after re-fetching the snapshot
    pub fn is_retryable(&self) -> bool {
        matches!(self, BillingError::StaleWatermark { .. })
    }
}

pub type Result<T> = std::result::Result<T, BillingError>;
