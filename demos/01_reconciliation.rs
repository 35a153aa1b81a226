/// month-by-month reconciliation of a contract in arrears
use lease_billing_rs::chrono::{NaiveDate, TimeZone, Utc};
use lease_billing_rs::{
    Contract, ContractLedger, ContractPaymentType, Money, PaymentIntent, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // pin the clock so the walkthrough is reproducible
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap(),
    ));

    let contract = Contract::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
        ContractPaymentType::Online,
        Money::from_major(250_000),
    )?;
    let mut ledger = ContractLedger::new(contract);

    // three months behind: January through March unpaid, April current
    let recon = ledger.reconcile(&time);
    println!("months remaining: {:?}", recon.stats.months_remaining);
    for month in &recon.schedule {
        let status = if month.is_paid {
            "paid"
        } else if month.is_past {
            "debt"
        } else if month.is_current {
            "current"
        } else {
            "future"
        };
        println!("{}  {}", month.month_start, status);
    }

    // settle the arrears in one payment
    let receipt = ledger.pay_off_debt(&time)?;
    println!(
        "settled {} months, {} total, paid through {}",
        receipt.months, receipt.amount, receipt.new_paid_through
    );

    // then pay the current month and two ahead
    let intent = PaymentIntent::new(ledger.id, 3).expecting(ledger.contract.paid_through);
    let receipt = ledger.apply_payment(intent, &time)?;
    println!("now paid through {}", receipt.new_paid_through);

    let recon = ledger.reconcile(&time);
    println!(
        "debt {} months, {} months ahead",
        recon.snapshot.debt_months, recon.snapshot.months_ahead
    );

    Ok(())
}
