pub mod amortization;
pub mod schedule;
pub mod solver;
pub mod waterfall;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalculationError, Result};

pub use amortization::{
    amortizing_payment, calculate_loan_payment, interest_only_payment, payment_with_balloon,
};
pub use schedule::{AmortizationSchedule, ScheduledPayment};
pub use solver::{solve_period_rate, RateSolution};
pub use waterfall::{
    WaterfallAllocator, WaterfallConfig, WaterfallPreset, WaterfallResult, WaterfallStep,
};

/// obligation categories a payment can be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentCategory {
    Fees,
    Penalties,
    Interest,
    Principal,
    Escrow,
}

/// outstanding balances by category at the moment a payment arrives
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutstandingAmounts {
    pub fees: Money,
    pub penalties: Money,
    pub interest: Money,
    pub principal: Money,
    pub escrow: Money,
}

impl OutstandingAmounts {
    pub fn total(&self) -> Money {
        self.fees + self.penalties + self.interest + self.principal + self.escrow
    }

    pub fn category(&self, category: PaymentCategory) -> Money {
        match category {
            PaymentCategory::Fees => self.fees,
            PaymentCategory::Penalties => self.penalties,
            PaymentCategory::Interest => self.interest,
            PaymentCategory::Principal => self.principal,
            PaymentCategory::Escrow => self.escrow,
        }
    }

    pub fn category_mut(&mut self, category: PaymentCategory) -> &mut Money {
        match category {
            PaymentCategory::Fees => &mut self.fees,
            PaymentCategory::Penalties => &mut self.penalties,
            PaymentCategory::Interest => &mut self.interest,
            PaymentCategory::Principal => &mut self.principal,
            PaymentCategory::Escrow => &mut self.escrow,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let categories = [
            PaymentCategory::Fees,
            PaymentCategory::Penalties,
            PaymentCategory::Interest,
            PaymentCategory::Principal,
            PaymentCategory::Escrow,
        ];
        for category in categories {
            let amount = self.category(category);
            if amount.is_negative() {
                return Err(CalculationError::NegativeOutstanding { category, amount });
            }
        }
        Ok(())
    }
}

/// caller-supplied markers describing the payment's intent; the
/// allocator carries them into the result untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentFlags {
    pub is_prepayment: bool,
    pub is_curtailment: bool,
    pub reduces_term_not_payment: bool,
}
