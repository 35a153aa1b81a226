use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{AttendanceStatus, ContractId, StallId};

/// all events emitted by billing operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    ContractRegistered {
        contract_id: ContractId,
        issue_date: NaiveDate,
        expiry_date: Option<NaiveDate>,
        monthly_fee: Money,
    },
    ContractArchived {
        contract_id: ContractId,
        timestamp: DateTime<Utc>,
    },
    ContractRestored {
        contract_id: ContractId,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentApplied {
        contract_id: ContractId,
        transaction_id: Uuid,
        months: u32,
        period_start: NaiveDate,
        period_end: NaiveDate,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    WatermarkAdvanced {
        contract_id: ContractId,
        old_paid_through: Option<NaiveDate>,
        new_paid_through: NaiveDate,
    },
    DebtSettled {
        contract_id: ContractId,
        months: u32,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    // data quality flags
    ScheduleInputFlagged {
        contract_id: ContractId,
        message: String,
    },
    ZeroFeeContract {
        contract_id: ContractId,
    },

    // attendance events
    AttendanceMarked {
        stall_id: StallId,
        date: NaiveDate,
        status: AttendanceStatus,
        amount: Money,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
