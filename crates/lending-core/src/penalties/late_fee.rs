use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::LendingError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LendingResult;

/// Amount the penalty rate is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyBasis {
    /// The missed installment amount.
    OverdueInstallment,
    /// The full outstanding principal at the time of default.
    OutstandingPrincipal,
}

impl fmt::Display for PenaltyBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PenaltyBasis::OverdueInstallment => "overdue-installment",
            PenaltyBasis::OutstandingPrincipal => "outstanding-principal",
        };
        f.write_str(name)
    }
}

impl FromStr for PenaltyBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "overdue-installment" | "installment" => Ok(PenaltyBasis::OverdueInstallment),
            "outstanding-principal" | "principal" => Ok(PenaltyBasis::OutstandingPrincipal),
            other => Err(format!(
                "Unknown penalty basis '{other}' (expected overdue-installment or outstanding-principal)"
            )),
        }
    }
}

/// How the penalty accrues once the grace window is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyAccrual {
    /// A single charge regardless of how long the arrears run.
    OneOff,
    /// The rate applies per chargeable day overdue.
    PerDayOverdue,
}

impl fmt::Display for PenaltyAccrual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PenaltyAccrual::OneOff => "one-off",
            PenaltyAccrual::PerDayOverdue => "per-day-overdue",
        };
        f.write_str(name)
    }
}

impl FromStr for PenaltyAccrual {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "one-off" | "oneoff" => Ok(PenaltyAccrual::OneOff),
            "per-day-overdue" | "per-day" | "daily" => Ok(PenaltyAccrual::PerDayOverdue),
            other => Err(format!(
                "Unknown penalty accrual '{other}' (expected one-off or per-day-overdue)"
            )),
        }
    }
}

/// Late-repayment penalty rule as configured on a loan product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyPolicy {
    /// Penalty rate as a percentage of the basis amount.
    pub penalty_rate_percent: Decimal,
    pub basis: PenaltyBasis,
    pub accrual: PenaltyAccrual,
    /// Days overdue before any penalty is charged.
    pub grace_days: u32,
    /// Optional ceiling on the accrued penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_penalty: Option<Money>,
}

impl PenaltyPolicy {
    pub fn validate(&self) -> LendingResult<()> {
        if self.penalty_rate_percent < Decimal::ZERO {
            return Err(LendingError::InvalidInput {
                field: "penalty_rate_percent".into(),
                reason: "Penalty rate cannot be negative".into(),
            });
        }
        if let Some(cap) = self.max_penalty {
            if cap < Decimal::ZERO {
                return Err(LendingError::InvalidInput {
                    field: "max_penalty".into(),
                    reason: "Penalty cap cannot be negative".into(),
                });
            }
        }
        Ok(())
    }
}

/// Input for a single penalty assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyInput {
    pub policy: PenaltyPolicy,
    pub installment_due: Money,
    pub outstanding_principal: Money,
    pub days_overdue: u32,
}

/// Outcome of a penalty assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyAssessment {
    /// Days overdue beyond the grace window.
    pub chargeable_days: u32,
    pub penalty: Money,
    /// Missed installment plus the penalty.
    pub total_due: Money,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Assess the penalty on an overdue installment.
pub fn assess_penalty(
    input: &PenaltyInput,
) -> LendingResult<ComputationOutput<PenaltyAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.policy.validate()?;
    if input.installment_due < Decimal::ZERO {
        return Err(LendingError::InvalidInput {
            field: "installment_due".into(),
            reason: "Installment amount cannot be negative".into(),
        });
    }
    if input.outstanding_principal < Decimal::ZERO {
        return Err(LendingError::InvalidInput {
            field: "outstanding_principal".into(),
            reason: "Outstanding principal cannot be negative".into(),
        });
    }

    let chargeable_days = input.days_overdue.saturating_sub(input.policy.grace_days);

    let basis_amount = match input.policy.basis {
        PenaltyBasis::OverdueInstallment => input.installment_due,
        PenaltyBasis::OutstandingPrincipal => input.outstanding_principal,
    };

    let rate = input.policy.penalty_rate_percent / dec!(100);
    let accrued = if chargeable_days == 0 {
        Decimal::ZERO
    } else {
        match input.policy.accrual {
            PenaltyAccrual::OneOff => basis_amount * rate,
            PenaltyAccrual::PerDayOverdue => {
                basis_amount * rate * Decimal::from(chargeable_days)
            }
        }
    };

    let mut penalty = round2(accrued);
    if let Some(cap) = input.policy.max_penalty {
        if penalty > cap {
            warnings.push(format!(
                "Accrued penalty {penalty} exceeds the policy cap {cap}; charged at the cap"
            ));
            penalty = cap;
        }
    }

    let assessment = PenaltyAssessment {
        chargeable_days,
        penalty,
        total_due: input.installment_due + penalty,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Late Repayment Penalty",
        &serde_json::json!({
            "penalty_rate_percent": input.policy.penalty_rate_percent.to_string(),
            "basis": input.policy.basis.to_string(),
            "accrual": input.policy.accrual.to_string(),
            "grace_days": input.policy.grace_days,
            "days_overdue": input.days_overdue,
        }),
        warnings,
        elapsed,
        assessment,
    ))
}
