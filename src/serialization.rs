/// serialization support for the consuming API layer
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::contract::{Contract, PaymentSnapshot};
use crate::decimal::Money;
use crate::schedule::{Schedule, ScheduleCalculator};
use crate::stats::ReconciliationStats;
use crate::types::{ContractId, ContractPaymentType};

/// serializable view of a contract with everything derived for display
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractView {
    pub id: ContractId,
    pub certificate_number: Option<String>,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub payment_type: ContractPaymentType,
    pub shop_monthly_fee: Money,
    pub is_active: bool,
    pub is_paid_current_month: bool,
    pub payment_snapshot: PaymentSnapshot,
    pub stats: ReconciliationStats,
    pub schedule: Schedule,
}

impl ContractView {
    pub fn from_contract(
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
        let stats = ReconciliationStats::compute(&schedule, contract.expiry_date, today);
        let payment_snapshot = contract.snapshot(&schedule, today);

        ContractView {
            id: contract.id,
            certificate_number: contract.certificate_number.clone(),
            issue_date: contract.issue_date,
            expiry_date: contract.expiry_date,
            payment_type: contract.payment_type,
            shop_monthly_fee: contract.shop_monthly_fee,
            is_active: contract.is_active,
            is_paid_current_month: contract.is_paid_current_month(today),
            payment_snapshot,
            stats,
            schedule,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
