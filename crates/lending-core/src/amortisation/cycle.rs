use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LendingError;
use crate::types::Rate;
use crate::LendingResult;

/// Repayment frequency of a loan.
///
/// Determines both the periodic rate divisor and the calendar offset
/// between installment due dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepaymentCycle {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annually,
}

impl RepaymentCycle {
    /// Number of repayment periods in a year.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            RepaymentCycle::Daily => 365,
            RepaymentCycle::Weekly => 52,
            RepaymentCycle::Biweekly => 26,
            RepaymentCycle::Monthly => 12,
            RepaymentCycle::Quarterly => 4,
            RepaymentCycle::Annually => 1,
        }
    }

    /// Periodic rate from a nominal annual percentage (12 means 12%/year).
    pub fn periodic_rate(&self, annual_rate_percent: Decimal) -> Rate {
        annual_rate_percent / dec!(100) / Decimal::from(self.periods_per_year())
    }

    /// Due date of the 1-based `period_index`-th installment.
    ///
    /// Month-based cycles step in calendar months from the start date
    /// rather than from the previous due date, so a month-end start
    /// cannot drift (31 Jan -> 29 Feb -> 31 Mar).
    pub fn due_date(&self, start: NaiveDate, period_index: u32) -> LendingResult<NaiveDate> {
        let stepped = match self {
            RepaymentCycle::Daily => start.checked_add_days(Days::new(u64::from(period_index))),
            RepaymentCycle::Weekly => {
                start.checked_add_days(Days::new(u64::from(period_index) * 7))
            }
            RepaymentCycle::Biweekly => {
                start.checked_add_days(Days::new(u64::from(period_index) * 14))
            }
            RepaymentCycle::Monthly => start.checked_add_months(Months::new(period_index)),
            RepaymentCycle::Quarterly => start.checked_add_months(Months::new(period_index * 3)),
            RepaymentCycle::Annually => start.checked_add_months(Months::new(period_index * 12)),
        };

        stepped.ok_or_else(|| {
            LendingError::DateError(format!(
                "Due date overflow stepping {period_index} period(s) from {start}"
            ))
        })
    }
}

impl fmt::Display for RepaymentCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepaymentCycle::Daily => "daily",
            RepaymentCycle::Weekly => "weekly",
            RepaymentCycle::Biweekly => "biweekly",
            RepaymentCycle::Monthly => "monthly",
            RepaymentCycle::Quarterly => "quarterly",
            RepaymentCycle::Annually => "annually",
        };
        f.write_str(name)
    }
}

impl FromStr for RepaymentCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "daily" => Ok(RepaymentCycle::Daily),
            "weekly" => Ok(RepaymentCycle::Weekly),
            "biweekly" | "fortnightly" => Ok(RepaymentCycle::Biweekly),
            "monthly" => Ok(RepaymentCycle::Monthly),
            "quarterly" => Ok(RepaymentCycle::Quarterly),
            "annually" | "annual" | "yearly" => Ok(RepaymentCycle::Annually),
            other => Err(format!(
                "Unknown repayment cycle '{other}' (expected daily, weekly, biweekly, monthly, quarterly or annually)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(RepaymentCycle::Daily.periods_per_year(), 365);
        assert_eq!(RepaymentCycle::Weekly.periods_per_year(), 52);
        assert_eq!(RepaymentCycle::Biweekly.periods_per_year(), 26);
        assert_eq!(RepaymentCycle::Monthly.periods_per_year(), 12);
        assert_eq!(RepaymentCycle::Quarterly.periods_per_year(), 4);
        assert_eq!(RepaymentCycle::Annually.periods_per_year(), 1);
    }

    #[test]
    fn test_periodic_rate() {
        // 12%/year monthly => 1%/period
        assert_eq!(
            RepaymentCycle::Monthly.periodic_rate(dec!(12)),
            dec!(0.01)
        );
        // 13%/year quarterly => 3.25%/period
        assert_eq!(
            RepaymentCycle::Quarterly.periodic_rate(dec!(13)),
            dec!(0.0325)
        );
    }

    #[test]
    fn test_monthly_due_dates_do_not_drift() {
        let start = d(2024, 1, 31);
        assert_eq!(
            RepaymentCycle::Monthly.due_date(start, 1).unwrap(),
            d(2024, 2, 29)
        );
        // Stepped from the origin, not from 29 Feb
        assert_eq!(
            RepaymentCycle::Monthly.due_date(start, 2).unwrap(),
            d(2024, 3, 31)
        );
    }

    #[test]
    fn test_day_based_due_dates() {
        let start = d(2026, 3, 1);
        assert_eq!(
            RepaymentCycle::Weekly.due_date(start, 3).unwrap(),
            d(2026, 3, 22)
        );
        assert_eq!(
            RepaymentCycle::Biweekly.due_date(start, 2).unwrap(),
            d(2026, 3, 29)
        );
    }

    #[test]
    fn test_parse_cycle() {
        assert_eq!(
            "fortnightly".parse::<RepaymentCycle>().unwrap(),
            RepaymentCycle::Biweekly
        );
        assert_eq!(
            "Monthly".parse::<RepaymentCycle>().unwrap(),
            RepaymentCycle::Monthly
        );
        assert!("hourly".parse::<RepaymentCycle>().is_err());
    }
}
