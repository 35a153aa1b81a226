/// json state - parse the backend read model, pay, and serialize the view
use lease_billing_rs::chrono::{TimeZone, Utc};
use lease_billing_rs::{
    ContractDto, ContractLedger, ContractView, SafeTimeProvider, ScheduleCalculator,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap(),
    ));

    // the shape the API ships
    let payload = r#"{
        "certificateNumber": "A-1042",
        "issueDate": "2024-01-01",
        "expiryDate": "2025-12-31",
        "paymentType": "ONLINE",
        "shopMonthlyFee": "250000",
        "isActive": true,
        "paymentSnapshot": {
            "paidThrough": "2024-02-29",
            "nextPeriodStart": "2024-03-01",
            "monthsAhead": 0,
            "debtMonths": 1,
            "debtAmount": "250000"
        }
    }"#;

    let dto: ContractDto = serde_json::from_str(payload)?;
    let mut ledger = ContractLedger::register(dto)?;

    // clear the outstanding March debt
    let receipt = ledger.pay_off_debt(&time)?;
    println!("paid {} for {} month(s)\n", receipt.amount, receipt.months);

    // serialize the recomputed view for the API layer
    let view = ContractView::from_contract(
        &ledger.contract,
        &ScheduleCalculator::new(),
        time.now().date_naive(),
    );
    println!("{}", view.to_json_pretty()?);

    Ok(())
}
