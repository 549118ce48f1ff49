/// payment waterfall - split a payment across outstanding obligations
use loan_engine_rs::{
    Money, OutstandingAmounts, PaymentFlags, WaterfallAllocator, WaterfallConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== payment waterfall ===\n");

    let outstanding = OutstandingAmounts {
        fees: Money::from_major(50),
        penalties: Money::ZERO,
        interest: Money::from_major(400),
        principal: Money::from_major(1_000),
        escrow: Money::from_major(100),
    };

    // standard order: fees, penalties, interest, principal, escrow
    let allocator = WaterfallAllocator::new(WaterfallConfig::default())?;
    let result = allocator.allocate(
        Money::from_major(1_500),
        &outstanding,
        PaymentFlags::default(),
    )?;

    println!("fees and penalties: {}", result.fees_and_penalties_paid.format_currency("$", 2));
    println!("interest:           {}", result.interest_paid.format_currency("$", 2));
    println!("principal:          {}", result.principal_paid.format_currency("$", 2));
    println!("escrow:             {}", result.escrow_paid.format_currency("$", 2));
    println!("remaining:          {}", result.remaining_payment.format_currency("$", 2));
    println!("\nunpaid escrow:      {}", result.unpaid_amounts.escrow.format_currency("$", 2));

    Ok(())
}
