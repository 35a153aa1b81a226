use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{add_months, month_start, same_month};
use crate::config::ScheduleConfig;

/// one calendar month of a contract's lifetime.
///
/// Paid status is a watermark comparison, not a stored flag: a month is paid
/// iff the contract's paid-through date falls in that month or later. Exactly
/// one of `is_past`, `is_current`, `is_future` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingMonth {
    pub month_start: NaiveDate,
    pub is_paid: bool,
    pub is_past: bool,
    pub is_current: bool,
    pub is_future: bool,
}

impl BillingMonth {
    /// a past month the watermark does not cover
    pub fn is_debt(&self) -> bool {
        self.is_past && !self.is_paid
    }

    /// a future month already covered by the watermark
    pub fn is_prepaid(&self) -> bool {
        self.is_future && self.is_paid
    }
}

/// ordered month-by-month payment schedule for one contract evaluation.
///
/// Produced fresh on every read; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schedule {
    pub months: Vec<BillingMonth>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BillingMonth> {
        self.months.iter()
    }

    /// first past month not covered by the watermark, if any
    pub fn first_unpaid_past_month(&self) -> Option<NaiveDate> {
        self.months
            .iter()
            .find(|m| m.is_debt())
            .map(|m| m.month_start)
    }

    /// calendar years the schedule spans, descending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.months.iter().map(|m| m.month_start.year()).collect();
        years.dedup();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years
    }

    /// months falling in one calendar year
    pub fn months_in_year(&self, year: i32) -> Vec<BillingMonth> {
        self.months
            .iter()
            .copied()
            .filter(|m| m.month_start.year() == year)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a BillingMonth;
    type IntoIter = std::slice::Iter<'a, BillingMonth>;

    fn into_iter(self) -> Self::IntoIter {
        self.months.iter()
    }
}

/// derives payment schedules from contract dates and the paid-through
/// watermark. Pure: identical inputs yield identical schedules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleCalculator {
    config: ScheduleConfig,
}

impl ScheduleCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// compute the ordered list of billing months from the issue month to the
    /// calculation end month.
    ///
    /// The end boundary is the expiry month when an expiry exists (even when
    /// it lies in the past), otherwise today's month plus the configured
    /// lookahead. Malformed input where the start month would follow the end
    /// month yields an empty schedule; callers treat empty as "no applicable
    /// months" rather than an error.
    pub fn compute(
        &self,
        issue_date: NaiveDate,
        expiry_date: Option<NaiveDate>,
        paid_through: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Schedule {
        let calc_end =
            expiry_date.unwrap_or_else(|| add_months(today, self.config.lookahead_months));

        let start = month_start(issue_date);
        let end_month = month_start(calc_end);
        if start > end_month {
            return Schedule::default();
        }

        let current = month_start(today);
        let paid_month = paid_through.map(month_start);

        let mut months = Vec::new();
        let mut month = start;
        while month <= end_month {
            months.push(BillingMonth {
                month_start: month,
                is_paid: paid_month.map(|p| month <= p).unwrap_or(false),
                is_past: month < current,
                is_current: same_month(month, today),
                is_future: month > current,
            });
            month = add_months(month, 1);
        }

        Schedule { months }
    }
}
