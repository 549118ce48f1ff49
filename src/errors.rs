use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::payments::PaymentCategory;

#[derive(Error, Debug)]
pub enum CalculationError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: u32,
    },

    #[error("invalid period count: {periods}")]
    InvalidPeriodCount {
        periods: Decimal,
    },

    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid balloon payment: {balloon} must be below principal {principal}")]
    InvalidBalloonPayment {
        balloon: Money,
        principal: Money,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("negative outstanding balance in {category:?}: {amount}")]
    NegativeOutstanding {
        category: PaymentCategory,
        amount: Money,
    },

    #[error("cannot take min or max of an empty value set")]
    EmptyValueSet,

    #[error("unsupported payment frequency: {value}")]
    UnsupportedPaymentFrequency {
        value: String,
    },

    #[error("invalid waterfall config: {message}")]
    InvalidWaterfallConfig {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CalculationError>;
