use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{round_optional, safe_divide, Money, Rate, RoundingConfig};
use crate::errors::{CalculationError, Result};

/// compound interest over a number of compounding periods; fractional
/// period counts are allowed and resolve through a fractional exponent
pub fn compound_interest(
    principal: Money,
    annual_rate: Rate,
    periods: Decimal,
    compounding_frequency: u32,
    rounding: Option<RoundingConfig>,
) -> Result<Money> {
    if principal.is_negative() {
        return Err(CalculationError::InvalidPrincipal { amount: principal });
    }
    if annual_rate.as_decimal().is_sign_negative() {
        return Err(CalculationError::InvalidInterestRate { rate: annual_rate });
    }
    if periods.is_sign_negative() {
        return Err(CalculationError::InvalidPeriodCount { periods });
    }

    let period_rate = safe_divide(
        annual_rate.as_decimal(),
        Decimal::from(compounding_frequency),
        Decimal::ZERO,
    );
    let factor = growth_factor(period_rate, periods)?;
    let interest = Money::from_decimal(principal.as_decimal() * (factor - Decimal::ONE));

    Ok(round_optional(interest, rounding))
}

/// (1 + r)^n, taking the integer power path when n has no fraction;
/// errors when the factor overflows the representable decimal range
pub(crate) fn growth_factor(period_rate: Decimal, periods: Decimal) -> Result<Decimal> {
    let base = Decimal::ONE + period_rate;
    let factor = if periods.fract().is_zero() {
        periods.to_i64().and_then(|n| base.checked_powi(n))
    } else {
        base.checked_powd(periods)
    };
    factor.ok_or(CalculationError::InvalidPeriodCount { periods })
}
