use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{CalculationError, Result};

/// Money type holding exact decimal amounts; arithmetic never rounds,
/// rounding happens only through an explicit call or a RoundingConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents, etc)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(Decimal::from(amount) / Decimal::from(10_u64.pow(scale)))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half-up to the given decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }

    /// round away from zero to the given decimal places
    pub fn round_up_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp_with_strategy(dp, RoundingStrategy::AwayFromZero))
    }

    /// round toward zero to the given decimal places
    pub fn round_down_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp_with_strategy(dp, RoundingStrategy::ToZero))
    }

    /// check if exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// smallest value in a non-empty set
    pub fn min_of(values: &[Money]) -> Result<Money> {
        values
            .iter()
            .copied()
            .reduce(Money::min)
            .ok_or(CalculationError::EmptyValueSet)
    }

    /// largest value in a non-empty set
    pub fn max_of(values: &[Money]) -> Result<Money> {
        values
            .iter()
            .copied()
            .reduce(Money::max)
            .ok_or(CalculationError::EmptyValueSet)
    }

    /// calculate percentage (e.g., 5% of $100)
    pub fn percentage(&self, rate: Decimal) -> Self {
        Money(self.0 * rate / Decimal::from(100))
    }

    /// format with a currency symbol, rounding half-up for display only
    pub fn format_currency(&self, symbol: &str, dp: u32) -> String {
        let rounded = self.round_dp(dp).0;
        let sign = if rounded.is_sign_negative() { "-" } else { "" };
        format!("{}{}{:.prec$}", sign, symbol, rounded.abs(), prec = dp as usize)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0 * other)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money(self.0 / other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// rate type for interest rates, percentages, and ratios, stored as a fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);
    /// comparison epsilon for rates and ratios, never currency amounts
    pub const EPSILON: Rate = Rate(Decimal::from_parts(1, 0, 0, false, 7));

    /// create from decimal fraction (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 4.5 for 4.5%)
    pub fn from_percentage(p: Decimal) -> Self {
        Rate(p / Decimal::from(100))
    }

    /// create from basis points (e.g., 450 for 4.5%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    /// get as decimal fraction
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    /// get as basis points
    pub fn as_bps(&self) -> Decimal {
        self.0 * Decimal::from(10000)
    }

    /// per-period rate from an annual rate
    pub fn period_rate(&self, periods_per_year: u32) -> Rate {
        Rate(safe_divide(
            self.0,
            Decimal::from(periods_per_year),
            Decimal::ZERO,
        ))
    }

    /// true when within EPSILON of zero; the residue of iterative rate
    /// math, not a substitute for exact zero checks on amounts
    pub fn is_effectively_zero(&self) -> bool {
        self.0.abs() < Self::EPSILON.0
    }

    /// format as a percentage string, rounding half-up for display only
    pub fn format_percentage(&self, dp: u32) -> String {
        let pct = self
            .as_percentage()
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.prec$}%", pct, prec = dp as usize)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

/// division that treats a zero denominator as a recoverable case,
/// returning the given default instead of failing
pub fn safe_divide(numerator: Decimal, denominator: Decimal, default: Decimal) -> Decimal {
    if denominator.is_zero() {
        default
    } else {
        numerator / denominator
    }
}

/// rounding direction for monetary results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// half-up (midpoint away from zero)
    HalfUp,
    /// always away from zero
    Up,
    /// always toward zero
    Down,
}

impl RoundingMode {
    fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
        }
    }
}

/// where and how monetary results get rounded; passed explicitly,
/// there is no process-wide rounding context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingConfig {
    pub decimal_places: u32,
    pub mode: RoundingMode,
}

impl RoundingConfig {
    pub fn new(decimal_places: u32, mode: RoundingMode) -> Self {
        RoundingConfig {
            decimal_places,
            mode,
        }
    }

    /// round a monetary amount per this config
    pub fn apply(&self, amount: Money) -> Money {
        Money(
            amount
                .0
                .round_dp_with_strategy(self.decimal_places, self.mode.strategy()),
        )
    }
}

impl Default for RoundingConfig {
    fn default() -> Self {
        RoundingConfig {
            decimal_places: 2,
            mode: RoundingMode::HalfUp,
        }
    }
}

/// round when a config is given, otherwise keep full precision
pub(crate) fn round_optional(amount: Money, rounding: Option<RoundingConfig>) -> Money {
    match rounding {
        Some(config) => config.apply(amount),
        None => amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_addition() {
        let a = Money::from_str_exact("0.1").unwrap();
        let b = Money::from_str_exact("0.2").unwrap();
        assert_eq!(a + b, Money::from_str_exact("0.3").unwrap());
    }

    #[test]
    fn test_arithmetic_keeps_full_precision() {
        let m = Money::from_decimal(dec!(100.123456789)) * dec!(3);
        assert_eq!(m.as_decimal(), dec!(300.370370367));
    }

    #[test]
    fn test_rounding_modes() {
        let m = Money::from_decimal(dec!(1.005));
        assert_eq!(m.round_dp(2).as_decimal(), dec!(1.01));
        assert_eq!(m.round_down_dp(2).as_decimal(), dec!(1.00));

        let n = Money::from_decimal(dec!(1.001));
        assert_eq!(n.round_up_dp(2).as_decimal(), dec!(1.01));

        // away from zero on the negative side
        let neg = Money::from_decimal(dec!(-1.005));
        assert_eq!(neg.round_dp(2).as_decimal(), dec!(-1.01));
    }

    #[test]
    fn test_rounding_config() {
        let config = RoundingConfig::default();
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.mode, RoundingMode::HalfUp);
        assert_eq!(
            config.apply(Money::from_decimal(dec!(833.333333))).as_decimal(),
            dec!(833.33)
        );

        let up = RoundingConfig::new(2, RoundingMode::Up);
        assert_eq!(
            up.apply(Money::from_decimal(dec!(10.001))).as_decimal(),
            dec!(10.01)
        );
    }

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(dec!(10), dec!(4), Decimal::ZERO), dec!(2.5));
        assert_eq!(safe_divide(dec!(10), Decimal::ZERO, dec!(-1)), dec!(-1));
    }

    #[test]
    fn test_min_max_of() {
        let values = [
            Money::from_major(30),
            Money::from_major(-5),
            Money::from_major(12),
        ];
        assert_eq!(Money::min_of(&values).unwrap(), Money::from_major(-5));
        assert_eq!(Money::max_of(&values).unwrap(), Money::from_major(30));

        assert!(matches!(
            Money::min_of(&[]),
            Err(CalculationError::EmptyValueSet)
        ));
    }

    #[test]
    fn test_from_minor() {
        assert_eq!(
            Money::from_minor(123_456, 2),
            Money::from_str_exact("1234.56").unwrap()
        );
        assert_eq!(Money::from_minor(1, 2), Money::CENT);
    }

    #[test]
    fn test_format_currency() {
        let m = Money::from_decimal(dec!(1234.5));
        assert_eq!(m.format_currency("$", 2), "$1234.50");

        let neg = Money::from_decimal(dec!(-42.129));
        assert_eq!(neg.format_currency("$", 2), "-$42.13");
    }

    #[test]
    fn test_rate_units() {
        let r = Rate::from_percentage(dec!(4.5));
        assert_eq!(r.as_decimal(), dec!(0.045));
        assert_eq!(r.as_bps(), dec!(450));
        assert_eq!(r, Rate::from_bps(450));
        assert_eq!(r.period_rate(12).as_decimal(), dec!(0.00375));
    }

    #[test]
    fn test_rate_epsilon() {
        assert!(Rate::from_decimal(dec!(0.00000001)).is_effectively_zero());
        assert!(Rate::from_decimal(dec!(-0.00000001)).is_effectively_zero());
        assert!(!Rate::from_decimal(dec!(0.000001)).is_effectively_zero());
        assert!(Rate::ZERO.is_effectively_zero());
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(Rate::from_percentage(dec!(4.5)).format_percentage(2), "4.50%");
        assert_eq!(Rate::from_decimal(dec!(0.19561)).format_percentage(2), "19.56%");
    }
}
