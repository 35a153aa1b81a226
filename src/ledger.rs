use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::month_start;
use crate::contract::{Contract, ContractDto, PaymentSnapshot};
use crate::errors::{BillingError, Result};
use crate::events::{Event, EventStore};
use crate::payments::{apply_payment, PaymentIntent, PaymentReceipt};
use crate::schedule::{Schedule, ScheduleCalculator};
use crate::stats::ReconciliationStats;
use crate::types::{ContractId, PaymentRecord, TransactionStatus};

/// one reconciliation read: the fresh schedule plus everything reduced
/// from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub schedule: Schedule,
    pub stats: ReconciliationStats,
    pub snapshot: PaymentSnapshot,
}

/// a contract together with its payment records and event stream.
///
/// Reads recompute the schedule from the watermark every time. Writes
/// validate the full intent, then advance the watermark and append the
/// ledger entry together; a watermark update is never visible without
/// its entry. Serializing concurrent writers per contract is the storage
/// layer's job; the ledger still refuses intents whose observed watermark
/// is stale.
pub struct ContractLedger {
    pub id: ContractId,
    pub contract: Contract,
    pub records: Vec<PaymentRecord>,
    pub events: EventStore,
    calculator: ScheduleCalculator,
}

impl ContractLedger {
    /// wrap an already validated contract
    pub fn new(contract: Contract) -> Self {
        Self::with_calculator(contract, ScheduleCalculator::new())
    }

    pub fn with_calculator(contract: Contract, calculator: ScheduleCalculator) -> Self {
        let mut events = EventStore::new();
        events.emit(Event::ContractRegistered {
            contract_id: contract.id,
            issue_date: contract.issue_date,
            expiry_date: contract.expiry_date,
            monthly_fee: contract.shop_monthly_fee,
        });
        if contract.shop_monthly_fee.is_zero() {
            // valid (promotional) but worth surfacing
            events.emit(Event::ZeroFeeContract {
                contract_id: contract.id,
            });
        }

        Self {
            id: contract.id,
            contract,
            records: Vec::new(),
            events,
            calculator,
        }
    }

    /// parse, validate and wrap a backend read model
    pub fn register(dto: ContractDto) -> Result<Self> {
        Ok(Self::new(Contract::from_wire(dto)?))
    }

    /// recompute the month-by-month schedule as of the provided clock
    pub fn schedule(&mut self, time_provider: &SafeTimeProvider) -> Schedule {
        self.schedule_at(time_provider.now().date_naive())
    }

    fn schedule_at(&mut self, today: NaiveDate) -> Schedule {
        let schedule = self.calculator.compute(
            self.contract.issue_date,
            self.contract.expiry_date,
            self.contract.paid_through,
            today,
        );
        if schedule.is_empty() {
            self.events.emit(Event::ScheduleInputFlagged {
                contract_id: self.id,
                message: format!(
                    "no billing months between issue {} and calculation end",
                    self.contract.issue_date
                ),
            });
        }
        schedule
    }

    /// full reconciliation read: schedule, aggregates and derived snapshot
    pub fn reconcile(&mut self, time_provider: &SafeTimeProvider) -> Reconciliation {
        let today = time_provider.now().date_naive();
        let schedule = self.schedule_at(today);
        let stats =
            ReconciliationStats::compute(&schedule, self.contract.expiry_date, today);
        let snapshot = self.contract.snapshot(&schedule, today);

        Reconciliation {
            schedule,
            stats,
            snapshot,
        }
    }

    /// apply a payment intent: validate everything, then advance the
    /// watermark and record the ledger entry in one step
    pub fn apply_payment(
        &mut self,
        intent: PaymentIntent,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        intent.validate()?;

        if !self.contract.is_active {
            return Err(BillingError::ContractArchived);
        }

        // the caller pays against the watermark it observed; a mismatch
        // means another payment landed in between, so re-fetch and retry
        if intent.expected_paid_through != self.contract.paid_through {
            return Err(BillingError::StaleWatermark {
                expected: intent.expected_paid_through,
                found: self.contract.paid_through,
            });
        }

        let old_paid_through = self.contract.paid_through;
        let new_paid_through = apply_payment(
            old_paid_through,
            self.contract.issue_date,
            intent.months,
            intent.start_month,
        )?;

        let period_start = intent
            .start_month
            .map(month_start)
            .unwrap_or_else(|| self.contract.next_period_start());
        let amount = intent
            .amount_override
            .unwrap_or_else(|| self.contract.shop_monthly_fee.times(intent.months));
        let now = time_provider.now();

        // validation is done; mutate watermark and ledger together
        self.contract.advance_watermark(new_paid_through);

        let transaction_id = Uuid::new_v4();
        self.records.push(PaymentRecord {
            transaction_id,
            contract_id: self.id,
            months: intent.months,
            period_start,
            period_end: new_paid_through,
            amount,
            status: TransactionStatus::Paid,
            recorded_at: now,
        });

        self.events.emit(Event::PaymentApplied {
            contract_id: self.id,
            transaction_id,
            months: intent.months,
            period_start,
            period_end: new_paid_through,
            amount,
            timestamp: now,
        });
        self.events.emit(Event::WatermarkAdvanced {
            contract_id: self.id,
            old_paid_through,
            new_paid_through,
        });

        Ok(PaymentReceipt {
            transaction_id,
            contract_id: self.id,
            months: intent.months,
            period_start,
            period_end: new_paid_through,
            amount,
            new_paid_through,
            recorded_at: now,
        })
    }

    /// pay exactly the next unpaid period
    pub fn quick_pay(&mut self, time_provider: &SafeTimeProvider) -> Result<PaymentReceipt> {
        let intent =
            PaymentIntent::new(self.id, 1).expecting(self.contract.paid_through);
        self.apply_payment(intent, time_provider)
    }

    /// pay every past unpaid month, starting at the first one
    pub fn pay_off_debt(&mut self, time_provider: &SafeTimeProvider) -> Result<PaymentReceipt> {
        let today = time_provider.now().date_naive();
        let schedule = self.schedule_at(today);
        let debt_months = schedule.iter().filter(|m| m.is_debt()).count() as u32;
        let first_unpaid = schedule.first_unpaid_past_month();

        let mut intent =
            PaymentIntent::new(self.id, debt_months).expecting(self.contract.paid_through);
        if let Some(start) = first_unpaid {
            intent = intent.starting(start);
        }

        let receipt = self.apply_payment(intent, time_provider)?;
        self.events.emit(Event::DebtSettled {
            contract_id: self.id,
            months: receipt.months,
            amount: receipt.amount,
            timestamp: receipt.recorded_at,
        });
        Ok(receipt)
    }

    /// archive the contract; reads stay available, payments are refused
    pub fn archive(&mut self, time_provider: &SafeTimeProvider) {
        if self.contract.is_active {
            self.contract.is_active = false;
            self.events.emit(Event::ContractArchived {
                contract_id: self.id,
                timestamp: time_provider.now(),
            });
        }
    }

    /// bring an archived contract back
    pub fn restore(&mut self, time_provider: &SafeTimeProvider) {
        if !self.contract.is_active {
            self.contract.is_active = true;
            self.events.emit(Event::ContractRestored {
                contract_id: self.id,
                timestamp: time_provider.now(),
            });
        }
    }

    /// drain collected events
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
