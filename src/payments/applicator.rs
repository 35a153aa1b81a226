use chrono::NaiveDate;

use crate::calendar::{add_months, month_end, month_start};
use crate::errors::{BillingError, Result};

/// first day of the first month not covered by the watermark
pub fn next_period_start(paid_through: Option<NaiveDate>, issue_date: NaiveDate) -> NaiveDate {
    match paid_through {
        Some(paid) => add_months(month_start(paid), 1),
        None => month_start(issue_date),
    }
}

/// advance the paid-through watermark for a payment of `months` periods.
///
/// `start_month` defaults to the next unpaid period. An explicit start
/// strictly before it is rejected: those months are already covered and
/// accepting the payment would double-book them. An explicit start beyond
/// it is accepted (paying ahead); because paid status is a prefix test on
/// the watermark, the skipped months in between read as paid afterwards.
/// Partial or out-of-order month payment is not representable in this
/// model.
///
/// Returns the new watermark, the last day of the final month paid. The
/// result never precedes the current watermark.
pub fn apply_payment(
    paid_through: Option<NaiveDate>,
    issue_date: NaiveDate,
    months: u32,
    start_month: Option<NaiveDate>,
) -> Result<NaiveDate> {
    if months == 0 {
        return Err(BillingError::InvalidMonthCount { months });
    }

    let next_period = next_period_start(paid_through, issue_date);
    let effective_start = start_month.map(month_start).unwrap_or(next_period);
    if effective_start < next_period {
        return Err(BillingError::PaymentIntoPaidPeriod {
            requested: effective_start,
            next_period_start: next_period,
        });
    }

    Ok(month_end(add_months(effective_start, months - 1)))
}

/// stateless helper bundling the watermark rules; mirrors the shape of the
/// schedule calculator for callers that inject both
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentApplicator;

impl PaymentApplicator {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(
        &self,
        paid_through: Option<NaiveDate>,
        issue_date: NaiveDate,
        months: u32,
        start_month: Option<NaiveDate>,
    ) -> Result<NaiveDate> {
        apply_payment(paid_through, issue_date, months, start_month)
    }

    pub fn next_period_start(
        &self,
        paid_through: Option<NaiveDate>,
        issue_date: NaiveDate,
    ) -> NaiveDate {
        next_period_start(paid_through, issue_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_first_payment_starts_at_issue_month() {
        // four months from a clean slate covers January through April
        let new_watermark = apply_payment(None, d(2024, 1, 1), 4, None).unwrap();
        assert_eq!(new_watermark, d(2024, 4, 30));
    }

    #[test]
    fn test_default_start_is_next_unpaid_period() {
        let new_watermark = apply_payment(Some(d(2024, 2, 29)), d(2024, 1, 1), 1, None).unwrap();
        assert_eq!(new_watermark, d(2024, 3, 31));
    }

    #[test]
    fn test_explicit_start_at_next_period_succeeds() {
        let new_watermark =
            apply_payment(Some(d(2024, 2, 29)), d(2024, 1, 1), 1, Some(d(2024, 3, 1))).unwrap();
        assert_eq!(new_watermark, d(2024, 3, 31));
    }

    #[test]
    fn test_start_before_next_period_is_rejected() {
        let err = apply_payment(Some(d(2024, 2, 29)), d(2024, 1, 1), 1, Some(d(2024, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, BillingError::PaymentIntoPaidPeriod { .. }));
    }

    #[test]
    fn test_zero_months_rejected() {
        let err = apply_payment(None, d(2024, 1, 1), 0, None).unwrap_err();
        assert!(matches!(err, BillingError::InvalidMonthCount { months: 0 }));
    }

    #[test]
    fn test_paying_ahead_skips_over_gap() {
        // paying June while March is next: allowed, and the watermark lands
        // on June, implicitly covering March through May
        let new_watermark =
            apply_payment(Some(d(2024, 2, 29)), d(2024, 1, 1), 1, Some(d(2024, 6, 1))).unwrap();
        assert_eq!(new_watermark, d(2024, 6, 30));
    }

    #[test]
    fn test_mid_month_start_is_aligned() {
        let new_watermark =
            apply_payment(None, d(2024, 1, 15), 2, Some(d(2024, 1, 20))).unwrap();
        assert_eq!(new_watermark, d(2024, 2, 29));
    }

    #[test]
    fn test_watermark_never_decreases() {
        let issue = d(2023, 6, 1);
        let mut watermark: Option<NaiveDate> = None;
        for months in [1u32, 3, 1, 12, 2] {
            let advanced = apply_payment(watermark, issue, months, None).unwrap();
            if let Some(previous) = watermark {
                assert!(advanced > previous);
            }
            watermark = Some(advanced);
        }
        assert_eq!(watermark, Some(month_end(add_months(d(2023, 6, 1), 18))));
    }

    #[test]
    fn test_year_boundary() {
        let new_watermark = apply_payment(Some(d(2024, 11, 30)), d(2024, 1, 1), 2, None).unwrap();
        assert_eq!(new_watermark, d(2025, 1, 31));
    }
}
