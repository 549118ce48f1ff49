use rust_decimal::Decimal;

use crate::decimal::{round_optional, Money, Rate, RoundingConfig};
use crate::errors::{CalculationError, Result};
use crate::interest::compound::growth_factor;
use crate::interest::effective_rate;
use crate::payments::solver::solve_period_rate;
use crate::types::{InterestType, LoanTerms, PaymentCalculationResult, PaymentFrequency};

/// level payment that fully amortizes the principal over the given
/// number of payments; a zero rate degenerates to principal / n
pub fn amortizing_payment(
    principal: Money,
    annual_rate: Rate,
    number_of_payments: u32,
    frequency: PaymentFrequency,
    rounding: Option<RoundingConfig>,
) -> Result<Money> {
    validate_payment_inputs(principal, annual_rate, number_of_payments)?;

    let period_rate = annual_rate
        .period_rate(frequency.periods_per_year())
        .as_decimal();

    let payment = if period_rate.is_zero() {
        principal / Decimal::from(number_of_payments)
    } else {
        // P * r * (1 + r)^n / ((1 + r)^n - 1)
        let factor = growth_factor(period_rate, Decimal::from(number_of_payments))?;
        Money::from_decimal(
            principal.as_decimal() * period_rate * factor / (factor - Decimal::ONE),
        )
    };

    Ok(round_optional(payment, rounding))
}

/// periodic payment covering interest only, principal untouched
pub fn interest_only_payment(
    principal: Money,
    annual_rate: Rate,
    frequency: PaymentFrequency,
    rounding: Option<RoundingConfig>,
) -> Result<Money> {
    validate_payment_inputs(principal, annual_rate, 1)?;

    let period_rate = annual_rate
        .period_rate(frequency.periods_per_year())
        .as_decimal();
    let payment = principal * period_rate;

    Ok(round_optional(payment, rounding))
}

/// level payment for a loan that leaves a balloon due at maturity; the
/// balloon is discounted to present value and the remainder amortized
pub fn payment_with_balloon(
    principal: Money,
    annual_rate: Rate,
    number_of_payments: u32,
    balloon: Money,
    frequency: PaymentFrequency,
    rounding: Option<RoundingConfig>,
) -> Result<Money> {
    validate_payment_inputs(principal, annual_rate, number_of_payments)?;
    if balloon.is_negative() || balloon >= principal {
        return Err(CalculationError::InvalidBalloonPayment { balloon, principal });
    }

    let period_rate = annual_rate
        .period_rate(frequency.periods_per_year())
        .as_decimal();

    let payment = if period_rate.is_zero() {
        (principal - balloon) / Decimal::from(number_of_payments)
    } else {
        let factor = growth_factor(period_rate, Decimal::from(number_of_payments))?;
        let balloon_present_value = balloon.as_decimal() / factor;
        let amortized = principal.as_decimal() - balloon_present_value;
        Money::from_decimal(amortized * period_rate * factor / (factor - Decimal::ONE))
    };

    Ok(round_optional(payment, rounding))
}

/// level payment and the amount still due at maturity for a set of
/// loan terms; a balloon takes precedence over the interest type
pub(crate) fn level_payment(
    terms: &LoanTerms,
    rounding: Option<RoundingConfig>,
) -> Result<(Money, Money)> {
    let number_of_payments = terms.number_of_payments();
    let frequency = terms.payment_frequency;
    let balloon = terms.balloon_payment.unwrap_or(Money::ZERO);

    if balloon.is_positive() {
        let payment = payment_with_balloon(
            terms.principal,
            terms.annual_rate,
            number_of_payments,
            balloon,
            frequency,
            rounding,
        )?;
        return Ok((payment, balloon));
    }

    match terms.interest_type {
        InterestType::Simple => {
            let payment =
                interest_only_payment(terms.principal, terms.annual_rate, frequency, rounding)?;
            Ok((payment, terms.principal))
        }
        InterestType::Amortizing => {
            let payment = amortizing_payment(
                terms.principal,
                terms.annual_rate,
                number_of_payments,
                frequency,
                rounding,
            )?;
            Ok((payment, Money::ZERO))
        }
    }
}

/// payment, totals, and realized effective rate for a set of loan terms
pub fn calculate_loan_payment(terms: &LoanTerms) -> Result<PaymentCalculationResult> {
    terms.validate()?;

    let number_of_payments = terms.number_of_payments();
    let periods_per_year = terms.payment_frequency.periods_per_year();

    // the unrounded payment drives the totals; rounding comes last
    let (payment, terminal) = level_payment(terms, None)?;

    let total_payments = payment * Decimal::from(number_of_payments) + terminal;
    let total_interest = total_payments - terms.principal;

    // a flat rate has nothing to solve for and would stall the solver
    let (effective, rate_converged) = if terms.annual_rate.is_effectively_zero() {
        (Rate::ZERO, true)
    } else {
        let solution = solve_period_rate(
            payment,
            terms.principal,
            number_of_payments,
            terminal,
            periods_per_year,
        );
        let nominal = Rate::from_decimal(
            solution.period_rate.as_decimal() * Decimal::from(periods_per_year),
        );
        (effective_rate(nominal, periods_per_year)?, solution.converged)
    };

    let rounding = terms.rounding.unwrap_or_default();
    Ok(PaymentCalculationResult {
        periodic_payment: rounding.apply(payment),
        total_interest: rounding.apply(total_interest),
        total_payments: rounding.apply(total_payments),
        effective_rate: effective,
        rate_converged,
    })
}

fn validate_payment_inputs(
    principal: Money,
    annual_rate: Rate,
    number_of_payments: u32,
) -> Result<()> {
    if !principal.is_positive() {
        return Err(CalculationError::InvalidPrincipal { amount: principal });
    }
    if annual_rate.as_decimal().is_sign_negative() {
        return Err(CalculationError::InvalidInterestRate { rate: annual_rate });
    }
    if number_of_payments == 0 {
        return Err(CalculationError::InvalidPeriodCount {
            periods: Decimal::ZERO,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mortgage_terms() -> LoanTerms {
        LoanTerms {
            principal: Money::from_major(250_000),
            annual_rate: Rate::from_percentage(dec!(4.5)),
            term_months: 360,
            payment_frequency: PaymentFrequency::Monthly,
            interest_type: InterestType::Amortizing,
            balloon_payment: None,
            rounding: None,
        }
    }

    #[test]
    fn test_thirty_year_mortgage_payment() {
        let payment = amortizing_payment(
            Money::from_major(250_000),
            Rate::from_percentage(dec!(4.5)),
            360,
            PaymentFrequency::Monthly,
            Some(RoundingConfig::default()),
        )
        .unwrap();

        assert_eq!(payment, Money::from_str_exact("1266.71").unwrap());
    }

    #[test]
    fn test_zero_rate_payment_is_principal_over_n() {
        let payment = amortizing_payment(
            Money::from_major(10_000),
            Rate::ZERO,
            12,
            PaymentFrequency::Monthly,
            Some(RoundingConfig::default()),
        )
        .unwrap();

        assert_eq!(payment, Money::from_str_exact("833.33").unwrap());
    }

    #[test]
    fn test_interest_only_payment() {
        let payment = interest_only_payment(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(6)),
            PaymentFrequency::Monthly,
            Some(RoundingConfig::default()),
        )
        .unwrap();

        assert_eq!(payment, Money::from_str_exact("500.00").unwrap());
    }

    #[test]
    fn test_balloon_payment_sits_between_styles() {
        let principal = Money::from_major(250_000);
        let rate = Rate::from_percentage(dec!(4.5));

        let full = amortizing_payment(principal, rate, 360, PaymentFrequency::Monthly, None).unwrap();
        let interest_only =
            interest_only_payment(principal, rate, PaymentFrequency::Monthly, None).unwrap();
        let with_balloon = payment_with_balloon(
            principal,
            rate,
            360,
            Money::from_major(100_000),
            PaymentFrequency::Monthly,
            None,
        )
        .unwrap();

        assert!(with_balloon < full);
        assert!(with_balloon > interest_only);
    }

    #[test]
    fn test_zero_rate_balloon_payment() {
        let payment = payment_with_balloon(
            Money::from_major(10_000),
            Rate::ZERO,
            12,
            Money::from_major(4_000),
            PaymentFrequency::Monthly,
            Some(RoundingConfig::default()),
        )
        .unwrap();

        assert_eq!(payment, Money::from_str_exact("500.00").unwrap());
    }

    #[test]
    fn test_balloon_must_stay_below_principal() {
        let result = payment_with_balloon(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(5)),
            12,
            Money::from_major(10_000),
            PaymentFrequency::Monthly,
            None,
        );

        assert!(matches!(
            result,
            Err(CalculationError::InvalidBalloonPayment { .. })
        ));
    }

    #[test]
    fn test_extreme_payment_count_rejected() {
        // the compounding factor at 100000 periods overflows the
        // representable decimal range
        let result = amortizing_payment(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(4.5)),
            100_000,
            PaymentFrequency::Monthly,
            None,
        );
        assert!(matches!(
            result,
            Err(CalculationError::InvalidPeriodCount { .. })
        ));

        let mut terms = mortgage_terms();
        terms.term_months = 100_000;
        assert!(matches!(
            calculate_loan_payment(&terms),
            Err(CalculationError::InvalidPeriodCount { .. })
        ));
    }

    #[test]
    fn test_calculate_loan_payment_mortgage() {
        let result = calculate_loan_payment(&mortgage_terms()).unwrap();

        assert_eq!(
            result.periodic_payment,
            Money::from_str_exact("1266.71").unwrap()
        );
        assert_eq!(
            result.total_payments,
            result.total_interest + Money::from_major(250_000)
        );
        assert!(result.rate_converged);
        assert!(result.effective_rate.as_percentage() > dec!(4.59));
        assert!(result.effective_rate.as_percentage() < dec!(4.60));
    }

    #[test]
    fn test_calculate_loan_payment_interest_only() {
        let terms = LoanTerms {
            principal: Money::from_major(100_000),
            annual_rate: Rate::from_percentage(dec!(6)),
            term_months: 12,
            payment_frequency: PaymentFrequency::Monthly,
            interest_type: InterestType::Simple,
            balloon_payment: None,
            rounding: None,
        };

        let result = calculate_loan_payment(&terms).unwrap();

        // principal comes due at maturity on top of the interest stream
        assert_eq!(result.periodic_payment, Money::from_str_exact("500.00").unwrap());
        assert_eq!(result.total_payments, Money::from_major(106_000));
        assert_eq!(result.total_interest, Money::from_major(6_000));
        assert!(result.rate_converged);
        assert!(result.effective_rate.as_percentage() > dec!(6.16));
        assert!(result.effective_rate.as_percentage() < dec!(6.18));
    }

    #[test]
    fn test_calculate_loan_payment_zero_rate() {
        let terms = LoanTerms {
            principal: Money::from_major(10_000),
            annual_rate: Rate::ZERO,
            term_months: 12,
            payment_frequency: PaymentFrequency::Monthly,
            interest_type: InterestType::Amortizing,
            balloon_payment: None,
            rounding: None,
        };

        let result = calculate_loan_payment(&terms).unwrap();

        assert_eq!(result.periodic_payment, Money::from_str_exact("833.33").unwrap());
        assert!(result.total_interest.is_zero());
        assert_eq!(result.effective_rate, Rate::ZERO);
        assert!(result.rate_converged);
    }

    #[test]
    fn test_balloon_takes_precedence_over_interest_type() {
        let mut terms = mortgage_terms();
        terms.interest_type = InterestType::Simple;
        terms.balloon_payment = Some(Money::from_major(100_000));

        let result = calculate_loan_payment(&terms).unwrap();
        let direct = payment_with_balloon(
            terms.principal,
            terms.annual_rate,
            360,
            Money::from_major(100_000),
            PaymentFrequency::Monthly,
            Some(RoundingConfig::default()),
        )
        .unwrap();

        assert_eq!(result.periodic_payment, direct);
        assert!(result.effective_rate.as_percentage() > dec!(4.59));
        assert!(result.effective_rate.as_percentage() < dec!(4.60));
    }

    #[test]
    fn test_rounding_mode_flows_through() {
        let mut terms = mortgage_terms();
        terms.rounding = Some(RoundingConfig::new(2, crate::decimal::RoundingMode::Up));

        let result = calculate_loan_payment(&terms).unwrap();
        assert_eq!(
            result.periodic_payment,
            Money::from_str_exact("1266.72").unwrap()
        );
    }

    #[test]
    fn test_bi_weekly_loan() {
        let terms = LoanTerms {
            principal: Money::from_major(20_000),
            annual_rate: Rate::from_percentage(dec!(7.8)),
            term_months: 48,
            payment_frequency: PaymentFrequency::BiWeekly,
            interest_type: InterestType::Amortizing,
            balloon_payment: None,
            rounding: None,
        };

        let result = calculate_loan_payment(&terms).unwrap();

        // 48 months at 26 periods a year is 104 payments
        assert_eq!(terms.number_of_payments(), 104);
        assert!(result.periodic_payment > Money::from_major(220));
        assert!(result.periodic_payment < Money::from_major(230));
        assert!(result.rate_converged);
    }
}
