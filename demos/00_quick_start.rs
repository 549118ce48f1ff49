/// quick start - price a loan payment
use loan_engine_rs::{
    calculate_loan_payment, InterestType, LoanTerms, Money, PaymentFrequency, Rate,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 30-year $250,000 mortgage at 4.5%
    let terms = LoanTerms {
        principal: Money::from_major(250_000),
        annual_rate: Rate::from_percentage(dec!(4.5)),
        term_months: 360,
        payment_frequency: PaymentFrequency::Monthly,
        interest_type: InterestType::Amortizing,
        balloon_payment: None,
        rounding: None,
    };

    let result = calculate_loan_payment(&terms)?;

    println!("monthly payment: {}", result.periodic_payment.format_currency("$", 2));
    println!("total interest:  {}", result.total_interest.format_currency("$", 2));
    println!("effective rate:  {}", result.effective_rate.format_percentage(3));

    Ok(())
}
