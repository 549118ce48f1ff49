use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::errors::{CalculationError, Result};

/// day count convention for interest calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DayCountConvention {
    /// actual days / 365 (366 in leap years)
    Actual365,
    /// actual days / 360
    Actual360,
    /// 30 days per month / 360 days per year
    Thirty360,
    /// actual days / actual days in year
    ActualActual,
}

impl DayCountConvention {
    /// days between two dates under this convention; an end date before
    /// the start date is an error, never silently negated
    pub fn day_count(&self, start: NaiveDate, end: NaiveDate) -> Result<u32> {
        if end < start {
            return Err(CalculationError::InvalidDateRange { start, end });
        }

        let days = match self {
            DayCountConvention::Actual365
            | DayCountConvention::Actual360
            | DayCountConvention::ActualActual => (end - start).num_days() as u32,
            DayCountConvention::Thirty360 => days_30_360(start, end),
        };
        Ok(days)
    }

    /// days in the given year used as the accrual denominator
    pub fn year_denominator(&self, year: i32) -> u32 {
        match self {
            DayCountConvention::Actual360 | DayCountConvention::Thirty360 => 360,
            DayCountConvention::Actual365 | DayCountConvention::ActualActual => {
                if is_leap_year(year) {
                    366
                } else {
                    365
                }
            }
        }
    }

    /// fraction of a year between two dates, denominated at the end date's year
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> Result<Decimal> {
        let days = self.day_count(start, end)?;
        let basis = self.year_denominator(end.year());
        Ok(Decimal::from(days) / Decimal::from(basis))
    }
}

/// calculate 30/360 days with the month-end adjustment
fn days_30_360(start: NaiveDate, end: NaiveDate) -> u32 {
    let y1 = start.year();
    let y2 = end.year();
    let m1 = start.month() as i32;
    let m2 = end.month() as i32;
    let d1 = start.day().min(30) as i32;
    let d2 = if d1 == 30 {
        end.day().min(30) as i32
    } else {
        end.day() as i32
    };

    let days = 360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1);
    days.max(0) as u32
}

/// check if year is a leap year
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
