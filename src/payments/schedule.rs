use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::amortization::level_payment;
use crate::types::{LoanTerms, PaymentFrequency};

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// full payment schedule for a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub start_date: NaiveDate,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate the payment schedule; the closing row absorbs rounding
    /// residue and any balloon so the balance lands exactly on zero
    pub fn generate(terms: &LoanTerms, start_date: NaiveDate) -> Result<Self> {
        terms.validate()?;

        let number_of_payments = terms.number_of_payments();
        let rounding = terms.rounding.unwrap_or_default();
        let period_rate = terms.period_rate().as_decimal();
        let (payment, _) = level_payment(terms, Some(rounding))?;

        let mut payments = Vec::with_capacity(number_of_payments as usize);
        let mut balance = terms.principal;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;

        for i in 1..=number_of_payments {
            let date = payment_date(start_date, terms.payment_frequency, i);
            let interest_portion = rounding.apply(balance * period_rate);

            let (payment_amount, principal_portion, ending_balance) = if i == number_of_payments {
                (interest_portion + balance, balance, Money::ZERO)
            } else {
                let principal_portion = payment - interest_portion;
                let ending_balance = (balance - principal_portion).max(Money::ZERO);
                (payment, principal_portion, ending_balance)
            };

            cumulative_interest += interest_portion;
            cumulative_principal += principal_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                payment_date: date,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
                cumulative_principal,
            });

            balance = ending_balance;
        }

        let total_interest = payments
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            terms: terms.clone(),
            start_date,
            payments,
            total_interest,
            total_payment,
        })
    }

    /// get payment for a specific period, 1-based
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        if payment_number == 0 {
            return None;
        }
        self.payments.get((payment_number - 1) as usize)
    }

    /// remaining balance after the given payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.terms.principal)
    }
}

/// due date of the k-th payment; month-based frequencies step from the
/// start date so month-end days clamp instead of drifting
fn payment_date(start: NaiveDate, frequency: PaymentFrequency, payment_number: u32) -> NaiveDate {
    match frequency {
        PaymentFrequency::Monthly => start + Months::new(payment_number),
        PaymentFrequency::SemiMonthly => {
            let date = start + Months::new(payment_number / 2);
            if payment_number % 2 == 1 {
                date + Duration::days(15)
            } else {
                date
            }
        }
        PaymentFrequency::BiWeekly => start + Duration::weeks(2 * i64::from(payment_number)),
        PaymentFrequency::Weekly => start + Duration::weeks(i64::from(payment_number)),
        PaymentFrequency::Quarterly => start + Months::new(3 * payment_number),
        PaymentFrequency::SemiAnnually => start + Months::new(6 * payment_number),
        PaymentFrequency::Annually => start + Months::new(12 * payment_number),
    }
}
