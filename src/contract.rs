use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::month_start;
use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::schedule::{Schedule, ScheduleCalculator};
use crate::types::{ContractId, ContractPaymentType};

/// validated lease contract snapshot.
///
/// `paid_through` is the only field payments mutate; every paid/unpaid
/// judgement is derived from it by comparison. It never moves backwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    pub certificate_number: Option<String>,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub payment_type: ContractPaymentType,
    pub shop_monthly_fee: Money,
    pub is_active: bool,
    pub paid_through: Option<NaiveDate>,
}

impl Contract {
    /// create a validated contract
    pub fn new(
        issue_date: NaiveDate,
        expiry_date: Option<NaiveDate>,
        payment_type: ContractPaymentType,
        shop_monthly_fee: Money,
    ) -> Result<Self> {
        if let Some(expiry) = expiry_date {
            if expiry < issue_date {
                return Err(BillingError::InvalidScheduleInput {
                    message: format!("expiry {expiry} precedes issue {issue_date}"),
                });
            }
        }
        if shop_monthly_fee.is_negative() {
            return Err(BillingError::InvalidScheduleInput {
                message: format!("negative monthly fee {shop_monthly_fee}"),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            certificate_number: None,
            issue_date,
            expiry_date,
            payment_type,
            shop_monthly_fee,
            is_active: true,
            paid_through: None,
        })
    }

    /// parse and validate the backend read model.
    ///
    /// Malformed payloads are rejected here rather than propagated into
    /// calculations. Only the watermark is trusted from the incoming
    /// snapshot; the derived fields are recomputed on every read.
    pub fn from_wire(dto: ContractDto) -> Result<Self> {
        let issue_date = match dto.issue_date.as_deref() {
            Some(raw) => parse_iso_date("issueDate", raw)?,
            None => {
                return Err(BillingError::InvalidScheduleInput {
                    message: "missing issue date".to_string(),
                })
            }
        };
        let expiry_date = dto
            .expiry_date
            .as_deref()
            .map(|raw| parse_iso_date("expiryDate", raw))
            .transpose()?;
        if let Some(expiry) = expiry_date {
            if expiry < issue_date {
                return Err(BillingError::InvalidScheduleInput {
                    message: format!("expiry {expiry} precedes issue {issue_date}"),
                });
            }
        }

        // a missing fee is a valid zero-fee contract; the ledger flags it
        let shop_monthly_fee = dto
            .shop_monthly_fee
            .map(Money::from_decimal)
            .unwrap_or(Money::ZERO);
        if shop_monthly_fee.is_negative() {
            return Err(BillingError::InvalidScheduleInput {
                message: format!("negative monthly fee {shop_monthly_fee}"),
            });
        }

        let paid_through = dto
            .payment_snapshot
            .and_then(|snapshot| snapshot.paid_through)
            .as_deref()
            .map(|raw| parse_iso_date("paidThrough", raw))
            .transpose()?;

        Ok(Self {
            id: dto.id.unwrap_or_else(Uuid::new_v4),
            certificate_number: dto.certificate_number,
            issue_date,
            expiry_date,
            payment_type: dto.payment_type.unwrap_or(ContractPaymentType::BankOnly),
            shop_monthly_fee,
            is_active: dto.is_active.unwrap_or(true),
            paid_through,
        })
    }

    /// first day of the first month not yet covered by the watermark
    pub fn next_period_start(&self) -> NaiveDate {
        crate::payments::next_period_start(self.paid_through, self.issue_date)
    }

    /// true when the watermark covers the month containing `today`
    pub fn is_paid_current_month(&self, today: NaiveDate) -> bool {
        self.paid_through
            .map(|paid| month_start(today) <= month_start(paid))
            .unwrap_or(false)
    }

    /// derive the payment snapshot from a freshly computed schedule
    pub fn snapshot(&self, schedule: &Schedule, today: NaiveDate) -> PaymentSnapshot {
        PaymentSnapshot::derive(self, schedule, today)
    }

    /// move the watermark forward. A regression is ignored; callers validate
    /// before calling.
    pub(crate) fn advance_watermark(&mut self, new_paid_through: NaiveDate) {
        let advanced = self
            .paid_through
            .map(|paid| new_paid_through > paid)
            .unwrap_or(true);
        if advanced {
            self.paid_through = Some(new_paid_through);
        }
    }
}

/// derived per-read payment position. Recomputed from the watermark and a
/// fresh schedule; never persisted or trusted from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSnapshot {
    pub paid_through: Option<NaiveDate>,
    pub next_period_start: NaiveDate,
    pub months_ahead: u32,
    pub debt_months: u32,
    pub debt_amount: Money,
    pub has_current_period_paid: bool,
}

impl PaymentSnapshot {
    pub fn derive(contract: &Contract, schedule: &Schedule, today: NaiveDate) -> Self {
        let debt_months = schedule.iter().filter(|m| m.is_debt()).count() as u32;
        Self {
            paid_through: contract.paid_through,
            next_period_start: contract.next_period_start(),
            months_ahead: schedule.iter().filter(|m| m.is_prepaid()).count() as u32,
            debt_months,
            debt_amount: contract.shop_monthly_fee.times(debt_months),
            has_current_period_paid: contract.is_paid_current_month(today),
        }
    }

    /// derive using a calculator, for callers without a schedule at hand
    pub fn derive_with(
        contract: &Contract,
        calculator: &ScheduleCalculator,
        today: NaiveDate,
    ) -> Self {
        let schedule = calculator.compute(
            contract.issue_date,
            contract.expiry_date,
            contract.paid_through,
            today,
        );
        Self::derive(contract, &schedule, today)
    }
}

/// backend read model for a contract, exactly as the API ships it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub certificate_number: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub payment_type: Option<ContractPaymentType>,
    #[serde(default)]
    pub shop_monthly_fee: Option<Decimal>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub payment_snapshot: Option<PaymentSnapshotDto>,
}

/// backend read model for the persisted snapshot. Only `paidThrough` feeds
/// the validated contract; the rest is stale the moment it is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSnapshotDto {
    #[serde(default)]
    pub paid_through: Option<String>,
    #[serde(default)]
    pub next_period_start: Option<String>,
    #[serde(default)]
    pub months_ahead: Option<u32>,
    #[serde(default)]
    pub debt_months: Option<u32>,
    #[serde(default)]
    pub debt_amount: Option<Decimal>,
    #[serde(default)]
    pub has_current_period_paid: Option<bool>,
}

/// accept plain ISO dates and full RFC 3339 timestamps
fn parse_iso_date(field: &str, raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|e| BillingError::InvalidDate {
            message: format!("{field}: {e} ({raw})"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dto(issue: Option<&str>, expiry: Option<&str>, fee: Option<Decimal>) -> ContractDto {
        ContractDto {
            issue_date: issue.map(str::to_string),
            expiry_date: expiry.map(str::to_string),
            shop_monthly_fee: fee,
            ..ContractDto::default()
        }
    }

    #[test]
    fn test_from_wire_valid() {
        let contract = Contract::from_wire(dto(
            Some("2024-01-01"),
            Some("2025-12-31"),
            Some(dec!(250000)),
        ))
        .unwrap();

        assert_eq!(contract.issue_date, d(2024, 1, 1));
        assert_eq!(contract.expiry_date, Some(d(2025, 12, 31)));
        assert_eq!(contract.shop_monthly_fee, Money::from_major(250_000));
        assert!(contract.is_active);
        assert_eq!(contract.paid_through, None);
    }

    #[test]
    fn test_from_wire_accepts_rfc3339_timestamps() {
        let contract = Contract::from_wire(dto(
            Some("2024-01-01T00:00:00.000Z"),
            None,
            Some(dec!(100000)),
        ))
        .unwrap();
        assert_eq!(contract.issue_date, d(2024, 1, 1));
    }

    #[test]
    fn test_from_wire_rejects_missing_issue_date() {
        let err = Contract::from_wire(dto(None, None, Some(dec!(100000)))).unwrap_err();
        assert!(matches!(err, BillingError::InvalidScheduleInput { .. }));
    }

    #[test]
    fn test_from_wire_rejects_garbage_dates() {
        let err = Contract::from_wire(dto(Some("01.06.2024"), None, None)).unwrap_err();
        assert!(matches!(err, BillingError::InvalidDate { .. }));
    }

    #[test]
    fn test_from_wire_rejects_expiry_before_issue() {
        let err = Contract::from_wire(dto(
            Some("2024-06-01"),
            Some("2024-01-31"),
            Some(dec!(100000)),
        ))
        .unwrap_err();
        assert!(matches!(err, BillingError::InvalidScheduleInput { .. }));
    }

    #[test]
    fn test_missing_fee_becomes_zero() {
        let contract = Contract::from_wire(dto(Some("2024-01-01"), None, None)).unwrap();
        assert!(contract.shop_monthly_fee.is_zero());
    }

    #[test]
    fn test_watermark_parsed_from_snapshot() {
        let contract = Contract::from_wire(ContractDto {
            issue_date: Some("2024-01-01".to_string()),
            payment_snapshot: Some(PaymentSnapshotDto {
                paid_through: Some("2024-02-29".to_string()),
                // derived fields from the wire are ignored
                debt_months: Some(99),
                ..PaymentSnapshotDto::default()
            }),
            ..ContractDto::default()
        })
        .unwrap();
        assert_eq!(contract.paid_through, Some(d(2024, 2, 29)));
    }

    #[test]
    fn test_next_period_start() {
        let mut contract = Contract::new(
            d(2024, 1, 15),
            None,
            ContractPaymentType::Online,
            Money::from_major(100_000),
        )
        .unwrap();

        assert_eq!(contract.next_period_start(), d(2024, 1, 1));

        contract.advance_watermark(d(2024, 2, 29));
        assert_eq!(contract.next_period_start(), d(2024, 3, 1));
    }

    #[test]
    fn test_watermark_never_regresses() {
        let mut contract = Contract::new(
            d(2024, 1, 1),
            None,
            ContractPaymentType::Online,
            Money::from_major(100_000),
        )
        .unwrap();

        contract.advance_watermark(d(2024, 6, 30));
        contract.advance_watermark(d(2024, 3, 31));
        assert_eq!(contract.paid_through, Some(d(2024, 6, 30)));
    }

    #[test]
    fn test_snapshot_derivation_prepaid() {
        let calculator = ScheduleCalculator::new();
        let mut contract = Contract::new(
            d(2024, 1, 1),
            None,
            ContractPaymentType::Online,
            Money::from_major(100_000),
        )
        .unwrap();
        contract.advance_watermark(d(2024, 6, 30));

        let today = d(2024, 4, 15);
        let snapshot = PaymentSnapshot::derive_with(&contract, &calculator, today);

        // May and June are paid ahead of current April
        assert_eq!(snapshot.months_ahead, 2);
        assert_eq!(snapshot.debt_months, 0);
        assert_eq!(snapshot.debt_amount, Money::ZERO);
        assert_eq!(snapshot.next_period_start, d(2024, 7, 1));
        assert!(snapshot.has_current_period_paid);
    }

    #[test]
    fn test_snapshot_derivation_in_debt() {
        let calculator = ScheduleCalculator::new();
        let contract = Contract::new(
            d(2024, 1, 1),
            None,
            ContractPaymentType::Online,
            Money::from_major(250_000),
        )
        .unwrap();

        let today = d(2024, 4, 15);
        let snapshot = PaymentSnapshot::derive_with(&contract, &calculator, today);

        assert_eq!(snapshot.debt_months, 3);
        assert_eq!(snapshot.debt_amount, Money::from_major(750_000));
        assert_eq!(snapshot.months_ahead, 0);
        assert_eq!(snapshot.next_period_start, d(2024, 1, 1));
        assert!(!snapshot.has_current_period_paid);
    }

    #[test]
    fn test_contract_wire_round_trip() {
        let contract = Contract::from_wire(dto(
            Some("2024-01-01"),
            Some("2025-12-31"),
            Some(dec!(250000)),
        ))
        .unwrap();

        let json = serde_json::to_string(&contract).unwrap();
        assert!(json.contains("\"issueDate\":\"2024-01-01\""));
        assert!(json.contains("\"shopMonthlyFee\":\"250000\""));

        let back: Contract = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contract);
    }
}
