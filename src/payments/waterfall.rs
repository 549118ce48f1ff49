use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::decimal::Money;
use crate::errors::{CalculationError, Result};
use crate::payments::{OutstandingAmounts, PaymentCategory, PaymentFlags};

/// built-in allocation orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterfallPreset {
    /// fees -> penalties -> interest -> principal -> escrow
    Standard,
    /// interest -> fees -> penalties -> principal -> escrow
    InterestFirst,
}

impl WaterfallPreset {
    fn priority_order(&self) -> Vec<PaymentCategory> {
        match self {
            WaterfallPreset::Standard => vec![
                PaymentCategory::Fees,
                PaymentCategory::Penalties,
                PaymentCategory::Interest,
                PaymentCategory::Principal,
                PaymentCategory::Escrow,
            ],
            WaterfallPreset::InterestFirst => vec![
                PaymentCategory::Interest,
                PaymentCategory::Fees,
                PaymentCategory::Penalties,
                PaymentCategory::Principal,
                PaymentCategory::Escrow,
            ],
        }
    }
}

impl FromStr for WaterfallPreset {
    type Err = CalculationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "standard" => Ok(WaterfallPreset::Standard),
            "interest-first" => Ok(WaterfallPreset::InterestFirst),
            _ => Err(CalculationError::InvalidWaterfallConfig {
                message: format!("unknown preset: {}", s),
            }),
        }
    }
}

/// one percentage-split step; percentages are of the whole payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub category: PaymentCategory,
    pub percentage: Decimal,
}

/// how an incoming payment is split across obligation categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaterfallConfig {
    Preset(WaterfallPreset),
    PercentageSplit(Vec<WaterfallStep>),
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        WaterfallConfig::Preset(WaterfallPreset::Standard)
    }
}

enum Strategy {
    Priority(Vec<PaymentCategory>),
    Split(Vec<WaterfallStep>),
}

/// applies payments to an obligation ledger; the config is resolved
/// and validated once here, allocate never revalidates it
pub struct WaterfallAllocator {
    strategy: Strategy,
}

impl WaterfallAllocator {
    pub fn new(config: WaterfallConfig) -> Result<Self> {
        let strategy = match config {
            WaterfallConfig::Preset(preset) => Strategy::Priority(preset.priority_order()),
            WaterfallConfig::PercentageSplit(steps) => {
                validate_steps(&steps)?;
                Strategy::Split(steps)
            }
        };
        Ok(Self { strategy })
    }

    /// split a payment across the outstanding categories; every unit of
    /// the payment lands in exactly one paid bucket or in the remainder
    pub fn allocate(
        &self,
        payment: Money,
        outstanding: &OutstandingAmounts,
        flags: PaymentFlags,
    ) -> Result<WaterfallResult> {
        if payment.is_negative() {
            return Err(CalculationError::InvalidPaymentAmount { amount: payment });
        }
        outstanding.validate()?;

        let mut unpaid = *outstanding;
        let mut paid = OutstandingAmounts::default();

        match &self.strategy {
            Strategy::Priority(order) => {
                let mut remaining = payment;
                for category in order {
                    let balance = unpaid.category_mut(*category);
                    let applied = remaining.min(*balance);
                    *balance -= applied;
                    *paid.category_mut(*category) += applied;
                    remaining -= applied;

                    if remaining.is_zero() {
                        break;
                    }
                }
            }
            Strategy::Split(steps) => {
                for step in steps {
                    let share = payment.percentage(step.percentage);
                    let balance = unpaid.category_mut(step.category);
                    let applied = share.min(*balance);
                    *balance -= applied;
                    *paid.category_mut(step.category) += applied;
                }
            }
        }

        let remaining_payment = payment - paid.total();

        Ok(WaterfallResult {
            fees_and_penalties_paid: paid.fees + paid.penalties,
            interest_paid: paid.interest,
            principal_paid: paid.principal,
            escrow_paid: paid.escrow,
            remaining_payment,
            unpaid_amounts: unpaid,
            is_prepayment: flags.is_prepayment,
            is_curtailment: flags.is_curtailment,
            reduces_term_not_payment: flags.reduces_term_not_payment,
        })
    }
}

fn validate_steps(steps: &[WaterfallStep]) -> Result<()> {
    if steps.is_empty() {
        return Err(CalculationError::InvalidWaterfallConfig {
            message: "percentage split needs at least one step".to_string(),
        });
    }

    let mut total = Decimal::ZERO;
    for step in steps {
        if step.percentage < Decimal::ZERO || step.percentage > Decimal::from(100) {
            return Err(CalculationError::InvalidWaterfallConfig {
                message: format!("step percentage {} is out of range", step.percentage),
            });
        }
        total += step.percentage;
    }
    if total > Decimal::from(100) {
        return Err(CalculationError::InvalidWaterfallConfig {
            message: format!("step percentages total {} exceeds 100", total),
        });
    }
    Ok(())
}

/// where a payment went; paid buckets plus the remainder always sum
/// back to the incoming payment, with no rounding anywhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallResult {
    pub fees_and_penalties_paid: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub escrow_paid: Money,
    pub remaining_payment: Money,
    pub unpaid_amounts: OutstandingAmounts,
    /// carried through from the caller's flags, never interpreted here
    pub is_prepayment: bool,
    pub is_curtailment: bool,
    pub reduces_term_not_payment: bool,
}

impl WaterfallResult {
    pub fn total_allocated(&self) -> Money {
        self.fees_and_penalties_paid + self.interest_paid + self.principal_paid + self.escrow_paid
    }
}
