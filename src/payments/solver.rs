use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{safe_divide, Money, Rate};

/// iteration cap for the rate solver; reaching it returns the last
/// iterate marked not converged instead of failing
pub const MAX_ITERATIONS: u32 = 100;

/// absolute present-value tolerance for convergence
pub const CONVERGENCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// finite-difference step for the numerical derivative
pub const DERIVATIVE_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// lowest period rate an update may land on; keeps iterates out of the
/// non-positive region where the discounting math degenerates
pub const RATE_FLOOR: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// annual starting guess, scaled down by the periods per year
const INITIAL_ANNUAL_GUESS: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// outcome of a rate solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSolution {
    pub period_rate: Rate,
    pub iterations: u32,
    pub converged: bool,
}

/// value today of a level payment stream plus an optional terminal
/// amount due with the final payment
pub fn present_value(payment: Money, period_rate: Rate, periods: u32, terminal: Money) -> Money {
    let r = period_rate.as_decimal();
    if r.is_zero() {
        return payment * Decimal::from(periods) + terminal;
    }

    // 1 / (1+r)^n; at extreme iterates the factor can overflow, where
    // the discounted tail is effectively zero anyway
    let inv_factor = match (Decimal::ONE + r).checked_powi(periods as i64) {
        Some(factor) if !factor.is_zero() => Decimal::ONE / factor,
        _ => Decimal::ZERO,
    };

    let annuity = payment.as_decimal() * (Decimal::ONE - inv_factor) / r;
    Money::from_decimal(annuity + terminal.as_decimal() * inv_factor)
}

/// newton-raphson solve for the period rate at which the payment
/// stream discounts to the principal; best-effort on non-convergence
pub fn solve_period_rate(
    payment: Money,
    principal: Money,
    periods: u32,
    terminal: Money,
    periods_per_year: u32,
) -> RateSolution {
    let mut rate = safe_divide(
        INITIAL_ANNUAL_GUESS,
        Decimal::from(periods_per_year),
        INITIAL_ANNUAL_GUESS,
    );
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS {
        let difference = present_value(payment, Rate::from_decimal(rate), periods, terminal)
            .as_decimal()
            - principal.as_decimal();
        if difference.abs() < CONVERGENCE_TOLERANCE {
            return RateSolution {
                period_rate: Rate::from_decimal(rate),
                iterations,
                converged: true,
            };
        }

        let shifted = present_value(
            payment,
            Rate::from_decimal(rate + DERIVATIVE_STEP),
            periods,
            terminal,
        )
        .as_decimal()
            - principal.as_decimal();
        let derivative = (shifted - difference) / DERIVATIVE_STEP;

        // a flat or overflowing slope leaves nothing to iterate on
        let step = match difference.checked_div(derivative) {
            Some(step) => step,
            None => break,
        };

        let next = rate - step;
        rate = if next <= Decimal::ZERO { RATE_FLOOR } else { next };
        iterations += 1;
    }

    RateSolution {
        period_rate: Rate::from_decimal(rate),
        iterations,
        converged: false,
    }
}
