use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::daycount::DayCountConvention;
use crate::decimal::{round_optional, Money, Rate, RoundingConfig};
use crate::errors::{CalculationError, Result};

/// simple interest (no compounding) between two dates; the daily rate
/// uses the denominator for the end date's year
pub fn simple_interest(
    principal: Money,
    annual_rate: Rate,
    start: NaiveDate,
    end: NaiveDate,
    convention: DayCountConvention,
    rounding: Option<RoundingConfig>,
) -> Result<Money> {
    validate_accrual_inputs(principal, annual_rate)?;

    let days = convention.day_count(start, end)?;
    let basis = convention.year_denominator(end.year());
    let daily_rate = annual_rate.as_decimal() / Decimal::from(basis);
    let interest = Money::from_decimal(principal.as_decimal() * daily_rate * Decimal::from(days));

    Ok(round_optional(interest, rounding))
}

/// one day of interest on a balance, at the denominator for the
/// accrual date's year
pub fn daily_accrual(
    balance: Money,
    annual_rate: Rate,
    convention: DayCountConvention,
    date: NaiveDate,
    rounding: Option<RoundingConfig>,
) -> Result<Money> {
    validate_accrual_inputs(balance, annual_rate)?;

    let basis = convention.year_denominator(date.year());
    let interest = Money::from_decimal(balance.as_decimal() * annual_rate.as_decimal() / Decimal::from(basis));

    Ok(round_optional(interest, rounding))
}

fn validate_accrual_inputs(principal: Money, annual_rate: Rate) -> Result<()> {
    if principal.is_negative() {
        return Err(CalculationError::InvalidPrincipal { amount: principal });
    }
    if annual_rate.as_decimal().is_sign_negative() {
        return Err(CalculationError::InvalidInterestRate { rate: annual_rate });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_simple_interest_30_days() {
        let interest = simple_interest(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(5)),
            date(2023, 1, 1),
            date(2023, 1, 31),
            DayCountConvention::Actual365,
            None,
        )
        .unwrap();

        assert_eq!(interest.round_dp(2), Money::from_str_exact("41.10").unwrap());
    }

    #[test]
    fn test_simple_interest_actual_360() {
        // jan 1 to jul 1 is 181 actual days
        let interest = simple_interest(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(6)),
            date(2023, 1, 1),
            date(2023, 7, 1),
            DayCountConvention::Actual360,
            Some(RoundingConfig::default()),
        )
        .unwrap();

        assert_eq!(interest, Money::from_str_exact("301.67").unwrap());
    }

    #[test]
    fn test_daily_accrual_leap_year_denominator() {
        let balance = Money::from_major(10_000);
        let rate = Rate::from_percentage(dec!(5));

        let leap = daily_accrual(balance, rate, DayCountConvention::Actual365, date(2024, 2, 29), None)
            .unwrap();
        let common = daily_accrual(balance, rate, DayCountConvention::Actual365, date(2023, 3, 1), None)
            .unwrap();

        assert_eq!(leap, Money::from_decimal(dec!(500) / dec!(366)));
        assert_eq!(common, Money::from_decimal(dec!(500) / dec!(365)));
        assert!(leap < common);
    }

    #[test]
    fn test_zero_rate_accrues_nothing() {
        let interest = simple_interest(
            Money::from_major(50_000),
            Rate::ZERO,
            date(2024, 1, 1),
            date(2024, 12, 31),
            DayCountConvention::Actual365,
            None,
        )
        .unwrap();

        assert!(interest.is_zero());
    }

    #[test]
    fn test_negative_principal_rejected() {
        let result = simple_interest(
            Money::from_major(-1),
            Rate::from_percentage(dec!(5)),
            date(2024, 1, 1),
            date(2024, 2, 1),
            DayCountConvention::Actual360,
            None,
        );

        assert!(matches!(
            result,
            Err(CalculationError::InvalidPrincipal { .. })
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = daily_accrual(
            Money::from_major(1_000),
            Rate::from_decimal(dec!(-0.05)),
            DayCountConvention::Actual365,
            date(2024, 6, 1),
            None,
        );

        assert!(matches!(
            result,
            Err(CalculationError::InvalidInterestRate { .. })
        ));
    }
}
