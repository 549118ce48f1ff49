pub mod daycount;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod payments;
pub mod types;

// re-export key types
pub use daycount::DayCountConvention;
pub use decimal::{Money, Rate, RoundingConfig, RoundingMode};
pub use errors::{CalculationError, Result};
pub use interest::{
    accrued_interest, compound_interest, daily_accrual, effective_rate, nominal_rate,
    simple_interest,
};
pub use payments::{
    calculate_loan_payment, AmortizationSchedule, OutstandingAmounts, PaymentCategory,
    PaymentFlags, ScheduledPayment, WaterfallAllocator, WaterfallConfig, WaterfallPreset,
    WaterfallResult, WaterfallStep,
};
pub use types::{InterestType, LoanTerms, PaymentCalculationResult, PaymentFrequency};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
