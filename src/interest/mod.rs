pub mod accrual;
pub mod compound;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};

use crate::daycount::DayCountConvention;
use crate::decimal::{Money, Rate, RoundingConfig};
use crate::errors::{CalculationError, Result};

pub use accrual::{daily_accrual, simple_interest};
pub use compound::compound_interest;

/// interest between two dates, simple or compound depending on whether
/// a compounding frequency is given; None or 0 means simple interest
pub fn accrued_interest(
    principal: Money,
    annual_rate: Rate,
    start: NaiveDate,
    end: NaiveDate,
    convention: DayCountConvention,
    compounding_frequency: Option<u32>,
    rounding: Option<RoundingConfig>,
) -> Result<Money> {
    match compounding_frequency {
        None | Some(0) => simple_interest(principal, annual_rate, start, end, convention, rounding),
        Some(frequency) => {
            let days = convention.day_count(start, end)?;
            let basis = convention.year_denominator(end.year());
            let periods = Decimal::from(days) * Decimal::from(frequency) / Decimal::from(basis);
            compound_interest(principal, annual_rate, periods, frequency, rounding)
        }
    }
}

/// effective annual rate from a nominal rate compounded n times a year;
/// rates whose compounding factor overflows are rejected
pub fn effective_rate(nominal: Rate, compounding_frequency: u32) -> Result<Rate> {
    validate_conversion_inputs(nominal, compounding_frequency)?;

    let n = Decimal::from(compounding_frequency);
    let factor = (Decimal::ONE + nominal.as_decimal() / n)
        .checked_powi(compounding_frequency as i64)
        .ok_or(CalculationError::InvalidInterestRate { rate: nominal })?;
    Ok(Rate::from_decimal(factor - Decimal::ONE))
}

/// nominal rate compounded n times a year from an effective annual
/// rate; inverts effective_rate
pub fn nominal_rate(effective: Rate, compounding_frequency: u32) -> Result<Rate> {
    validate_conversion_inputs(effective, compounding_frequency)?;

    let n = Decimal::from(compounding_frequency);
    let root = (Decimal::ONE + effective.as_decimal())
        .checked_powd(Decimal::ONE / n)
        .ok_or(CalculationError::InvalidInterestRate { rate: effective })?;
    Ok(Rate::from_decimal(n * (root - Decimal::ONE)))
}

fn validate_conversion_inputs(rate: Rate, compounding_frequency: u32) -> Result<()> {
    if rate.as_decimal().is_sign_negative() {
        return Err(CalculationError::InvalidInterestRate { rate });
    }
    if compounding_frequency == 0 {
        return Err(CalculationError::InvalidPeriodCount {
            periods: Decimal::ZERO,
        });
    }
    Ok(())
}
