use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortisation::{InterestMethod, RepaymentCycle};
use crate::error::LendingError;
use crate::penalties::PenaltyPolicy;
use crate::types::{Currency, Money};
use crate::LendingResult;

/// Lending product configuration: the envelope a branch is allowed to
/// originate loans within, plus the pricing attached to the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanProduct {
    pub name: String,
    pub currency: Currency,
    pub interest_method: InterestMethod,
    pub repayment_cycle: RepaymentCycle,
    /// Contract rate applied when the request carries no override.
    pub annual_rate_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_annual_rate_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_annual_rate_percent: Option<Decimal>,
    pub min_principal: Money,
    pub max_principal: Money,
    pub min_term_periods: u32,
    pub max_term_periods: u32,
    /// Upfront origination fee, percentage of principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_fee_percent: Option<Decimal>,
    /// Upfront credit-life insurance fee, percentage of principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_fee_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty: Option<PenaltyPolicy>,
}

impl LoanProduct {
    pub fn validate(&self) -> LendingResult<()> {
        if self.name.trim().is_empty() {
            return Err(LendingError::InvalidInput {
                field: "name".into(),
                reason: "Product name cannot be empty".into(),
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LendingError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }
        if self.min_principal <= Decimal::ZERO {
            return Err(LendingError::InvalidInput {
                field: "min_principal".into(),
                reason: "Minimum principal must be positive".into(),
            });
        }
        if self.max_principal < self.min_principal {
            return Err(LendingError::InvalidInput {
                field: "max_principal".into(),
                reason: "Maximum principal cannot be below the minimum".into(),
            });
        }
        if self.min_term_periods == 0 {
            return Err(LendingError::InvalidInput {
                field: "min_term_periods".into(),
                reason: "Minimum term must be at least 1 period".into(),
            });
        }
        if self.max_term_periods < self.min_term_periods {
            return Err(LendingError::InvalidInput {
                field: "max_term_periods".into(),
                reason: "Maximum term cannot be below the minimum".into(),
            });
        }
        if let (Some(lo), Some(hi)) = (self.min_annual_rate_percent, self.max_annual_rate_percent)
        {
            if hi < lo {
                return Err(LendingError::InvalidInput {
                    field: "max_annual_rate_percent".into(),
                    reason: "Maximum rate cannot be below the minimum".into(),
                });
            }
        }
        for (field, fee) in [
            ("processing_fee_percent", self.processing_fee_percent),
            ("insurance_fee_percent", self.insurance_fee_percent),
        ] {
            if let Some(pct) = fee {
                if pct < Decimal::ZERO {
                    return Err(LendingError::InvalidInput {
                        field: field.into(),
                        reason: "Fee percentage cannot be negative".into(),
                    });
                }
            }
        }
        if let Some(ref policy) = self.penalty {
            policy.validate()?;
        }
        Ok(())
    }
}
