/// amortization schedule - generate and walk the payment rows
use loan_engine_rs::chrono::NaiveDate;
use loan_engine_rs::{
    AmortizationSchedule, InterestType, LoanTerms, Money, PaymentFrequency, Rate,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== amortization schedule ===\n");

    let terms = LoanTerms {
        principal: Money::from_major(20_000),
        annual_rate: Rate::from_percentage(dec!(7.8)),
        term_months: 48,
        payment_frequency: PaymentFrequency::Monthly,
        interest_type: InterestType::Amortizing,
        balloon_payment: None,
        rounding: None,
    };
    let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    let schedule = AmortizationSchedule::generate(&terms, start)?;

    println!(
        "{:>3}  {:>10}  {:>11}  {:>10}  {:>12}",
        "no", "date", "payment", "interest", "balance"
    );
    for payment in &schedule.payments {
        println!(
            "{:>3}  {}  {:>11}  {:>10}  {:>12}",
            payment.payment_number,
            payment.payment_date,
            payment.payment_amount.format_currency("$", 2),
            payment.interest_portion.format_currency("$", 2),
            payment.ending_balance.format_currency("$", 2),
        );
    }

    println!("\ntotal paid:     {}", schedule.total_payment.format_currency("$", 2));
    println!("total interest: {}", schedule.total_interest.format_currency("$", 2));

    Ok(())
}
