use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::{Money, Rate, RoundingConfig};
use crate::errors::{CalculationError, Result};

/// how often payments fall due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Monthly,
    SemiMonthly,
    BiWeekly,
    Weekly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl PaymentFrequency {
    /// number of payment periods in a year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::SemiMonthly => 24,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::SemiAnnually => 2,
            PaymentFrequency::Annually => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::SemiMonthly => "semi-monthly",
            PaymentFrequency::BiWeekly => "bi-weekly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::SemiAnnually => "semi-annually",
            PaymentFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = CalculationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "semi-monthly" => Ok(PaymentFrequency::SemiMonthly),
            "bi-weekly" => Ok(PaymentFrequency::BiWeekly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "semi-annually" => Ok(PaymentFrequency::SemiAnnually),
            "annually" => Ok(PaymentFrequency::Annually),
            _ => Err(CalculationError::UnsupportedPaymentFrequency {
                value: s.to_string(),
            }),
        }
    }
}

/// how periodic payments treat principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestType {
    /// level payments covering interest plus a principal portion
    Amortizing,
    /// interest-only servicing, principal repaid at maturity
    Simple,
}

/// the contractual shape of a loan, as handed in by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub payment_frequency: PaymentFrequency,
    pub interest_type: InterestType,
    pub balloon_payment: Option<Money>,
    pub rounding: Option<RoundingConfig>,
}

impl LoanTerms {
    /// reject terms no payment can be computed for
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(CalculationError::InvalidPrincipal {
                amount: self.principal,
            });
        }
        if self.annual_rate.as_decimal().is_sign_negative() {
            return Err(CalculationError::InvalidInterestRate {
                rate: self.annual_rate,
            });
        }
        if self.term_months == 0 {
            return Err(CalculationError::InvalidTerm {
                months: self.term_months,
            });
        }
        if let Some(balloon) = self.balloon_payment {
            if balloon.is_negative() || balloon >= self.principal {
                return Err(CalculationError::InvalidBalloonPayment {
                    balloon,
                    principal: self.principal,
                });
            }
        }
        Ok(())
    }

    /// total payment count over the term, rounded half-up and never below one
    pub fn number_of_payments(&self) -> u32 {
        let periods = Decimal::from(self.term_months)
            * Decimal::from(self.payment_frequency.periods_per_year())
            / Decimal::from(12);
        periods
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(1)
            .max(1)
    }

    /// per-period interest rate for the configured frequency
    pub fn period_rate(&self) -> Rate {
        self.annual_rate
            .period_rate(self.payment_frequency.periods_per_year())
    }
}

/// loan payment figures; monetary fields carry the terms' rounding,
/// the effective rate stays unrounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCalculationResult {
    pub periodic_payment: Money,
    pub total_interest: Money,
    pub total_payments: Money,
    pub effective_rate: Rate,
    /// false when the rate solver hit its iteration cap; the rate is
    /// then the best available approximation
    pub rate_converged: bool,
}
