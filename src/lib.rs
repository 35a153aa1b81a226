pub mod attendance;
pub mod calendar;
pub mod config;
pub mod contract;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod payments;
pub mod schedule;
pub mod serialization;
pub mod stats;
pub mod types;

// re-export key types
pub use attendance::{AttendanceEntry, AttendanceLedger};
pub use config::ScheduleConfig;
pub use contract::{Contract, ContractDto, PaymentSnapshot, PaymentSnapshotDto};
pub use decimal::Money;
pub use errors::{BillingError, Result};
pub use events::{Event, EventStore};
pub use ledger::{ContractLedger, Reconciliation};
pub use payments::{
    apply_payment, next_period_start, PaymentApplicator, PaymentIntent, PaymentReceipt,
};
pub use schedule::{BillingMonth, Schedule, ScheduleCalculator};
pub use serialization::ContractView;
pub use stats::ReconciliationStats;
pub use types::{
    AttendanceStatus, ContractId, ContractPaymentType, PaymentRecord, StallId,
    TransactionStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
