use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a lease contract
pub type ContractId = Uuid;

/// unique identifier for a market stall
pub type StallId = Uuid;

/// how a contract is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractPaymentType {
    /// paid through the online gateway
    Online,
    /// bank transfer only
    BankOnly,
}

/// settlement status of a recorded transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Reversed,
}

/// daily stall attendance payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Paid,
    Unpaid,
}

/// ledger entry recorded together with each watermark advance.
///
/// The paid-through watermark is the collapsed view of these entries;
/// a watermark update is never observed without its entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub transaction_id: Uuid,
    pub contract_id: ContractId,
    pub months: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: Money,
    pub status: TransactionStatus,
    pub recorded_at: DateTime<Utc>,
}
