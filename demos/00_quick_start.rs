/// quick start - minimal example to get started
use lease_billing_rs::chrono::NaiveDate;
use lease_billing_rs::{
    Contract, ContractLedger, ContractPaymentType, Money, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // a store leased from January 2024 at 250,000 per month
    let contract = Contract::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        None,
        ContractPaymentType::BankOnly,
        Money::from_major(250_000),
    )?;
    let mut ledger = ContractLedger::new(contract);

    // pay the next unpaid month
    let receipt = ledger.quick_pay(&time)?;
    println!("paid through {}", receipt.new_paid_through);

    // see where the contract stands
    let recon = ledger.reconcile(&time);
    println!(
        "debt: {} months ({})",
        recon.snapshot.debt_months,
        recon.snapshot.debt_amount
    );

    Ok(())
}
