use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LendingError;
use crate::types::{Money, Rate};
use crate::LendingResult;

use super::cycle::RepaymentCycle;

/// Interest calculation method for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestMethod {
    /// Interest charged once on the original principal for the full
    /// term and split equally across installments.
    Flat,
    /// Standard annuity: level installments, interest accrues on the
    /// outstanding balance.
    ReducingBalanceEqualInstallment,
    /// Level principal portions with interest on the outstanding
    /// balance, so installments decline over the term.
    ReducingBalanceEqualPrincipal,
    /// Interest-only installments; the principal falls due as a
    /// balloon in the final period.
    InterestOnly,
    /// Interest capitalised at the repayment frequency. Capitalisation
    /// and repayment share the same frequency here, so splitting the
    /// capitalised balance into level installments reduces to the
    /// standard annuity and the schedule matches
    /// `ReducingBalanceEqualInstallment`.
    Compound,
}

impl fmt::Display for InterestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterestMethod::Flat => "flat",
            InterestMethod::ReducingBalanceEqualInstallment => {
                "reducing-balance-equal-installment"
            }
            InterestMethod::ReducingBalanceEqualPrincipal => "reducing-balance-equal-principal",
            InterestMethod::InterestOnly => "interest-only",
            InterestMethod::Compound => "compound",
        };
        f.write_str(name)
    }
}

impl FromStr for InterestMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "flat" => Ok(InterestMethod::Flat),
            "reducing-balance" | "reducing-balance-equal-installment" | "equal-installment" => {
                Ok(InterestMethod::ReducingBalanceEqualInstallment)
            }
            "reducing-balance-equal-principal" | "equal-principal" => {
                Ok(InterestMethod::ReducingBalanceEqualPrincipal)
            }
            "interest-only" => Ok(InterestMethod::InterestOnly),
            "compound" => Ok(InterestMethod::Compound),
            other => Err(format!(
                "Unknown interest method '{other}' (expected flat, reducing-balance-equal-installment, \
                 reducing-balance-equal-principal, interest-only or compound)"
            )),
        }
    }
}

/// Immutable terms of a single loan calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Nominal annual rate as a percentage (12 means 12%/year).
    pub annual_rate_percent: Decimal,
    /// Number of repayment periods, scaled by the repayment cycle.
    pub term_periods: u32,
    pub interest_method: InterestMethod,
    pub repayment_cycle: RepaymentCycle,
}

impl LoanTerms {
    /// Check every precondition before any schedule entry is produced.
    pub fn validate(&self) -> LendingResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LendingError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LendingError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }
        if self.term_periods == 0 {
            return Err(LendingError::InvalidInput {
                field: "term_periods".into(),
                reason: "Term must be at least 1 period".into(),
            });
        }
        Ok(())
    }

    /// Rate per repayment period as a decimal.
    pub fn periodic_rate(&self) -> Rate {
        self.repayment_cycle.periodic_rate(self.annual_rate_percent)
    }
}
