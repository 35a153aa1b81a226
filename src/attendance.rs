use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::events::{Event, EventStore};
use crate::types::{AttendanceStatus, StallId};

/// one day's attendance fee for one stall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub stall_id: StallId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub amount: Money,
}

/// flat per-day fee ledger keyed by `(stall, date)`.
///
/// Deliberately nothing like the contract engine: no watermark, no monthly
/// aggregation, no debt projection. Each day is marked independently.
#[derive(Debug, Default)]
pub struct AttendanceLedger {
    entries: BTreeMap<(StallId, NaiveDate), AttendanceEntry>,
}

impl AttendanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// set the day's status, overwriting any previous mark
    pub fn mark(
        &mut self,
        stall_id: StallId,
        date: NaiveDate,
        status: AttendanceStatus,
        amount: Money,
        events: &mut EventStore,
    ) {
        self.entries.insert(
            (stall_id, date),
            AttendanceEntry {
                stall_id,
                date,
                status,
                amount,
            },
        );
        events.emit(Event::AttendanceMarked {
            stall_id,
            date,
            status,
            amount,
        });
    }

    pub fn mark_paid(
        &mut self,
        stall_id: StallId,
        date: NaiveDate,
        amount: Money,
        events: &mut EventStore,
    ) {
        self.mark(stall_id, date, AttendanceStatus::Paid, amount, events);
    }

    pub fn mark_unpaid(
        &mut self,
        stall_id: StallId,
        date: NaiveDate,
        amount: Money,
        events: &mut EventStore,
    ) {
        self.mark(stall_id, date, AttendanceStatus::Unpaid, amount, events);
    }

    pub fn entry(&self, stall_id: StallId, date: NaiveDate) -> Option<&AttendanceEntry> {
        self.entries.get(&(stall_id, date))
    }

    /// unmarked days are unpaid
    pub fn is_paid(&self, stall_id: StallId, date: NaiveDate) -> bool {
        self.entry(stall_id, date)
            .map(|e| e.status == AttendanceStatus::Paid)
            .unwrap_or(false)
    }

    /// all marks for one stall over a date range, ascending by date
    pub fn entries_for_stall(
        &self,
        stall_id: StallId,
        range: RangeInclusive<NaiveDate>,
    ) -> Vec<AttendanceEntry> {
        self.entries
            .range((stall_id, *range.start())..=(stall_id, *range.end()))
            .map(|(_, entry)| *entry)
            .collect()
    }

    /// sum of amounts marked paid for one stall over a date range
    pub fn collected_for_stall(
        &self,
        stall_id: StallId,
        range: RangeInclusive<NaiveDate>,
    ) -> Money {
        self.entries_for_stall(stall_id, range)
            .iter()
            .filter(|e| e.status == AttendanceStatus::Paid)
            .map(|e| e.amount)
            .fold(Money::ZERO, |acc, x| acc + x)
    }
}
