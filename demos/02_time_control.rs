/// controlled time - watch debt accrue as the clock advances
use lease_billing_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use lease_billing_rs::{
    Contract, ContractLedger, ContractPaymentType, Money, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

    let contract = Contract::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        None,
        ContractPaymentType::BankOnly,
        Money::from_major(150_000),
    )?;
    let mut ledger = ContractLedger::new(contract);

    // re-read the same contract at four points in time; nothing is cached,
    // the schedule is recomputed from the watermark on every read
    for day_offset in [0i64, 40, 95, 185] {
        let time = SafeTimeProvider::new(TimeSource::Test(start + Duration::days(day_offset)));
        let recon = ledger.reconcile(&time);
        println!(
            "day {:>3}: {} unpaid past months, {} debt",
            day_offset, recon.snapshot.debt_months, recon.snapshot.debt_amount
        );
    }

    Ok(())
}
