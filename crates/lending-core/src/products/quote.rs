use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortisation::{analysis, schedule, LoanTerms, ScheduleEntry, ScheduleSummary};
use crate::error::LendingError;
use crate::types::{with_metadata, ComputationOutput, Currency, Money};
use crate::LendingResult;

use super::product::LoanProduct;

/// A borrower's request priced against a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub principal: Money,
    pub term_periods: u32,
    pub start_date: NaiveDate,
    /// Negotiated rate; must sit within the product's rate bounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate_percent: Option<Decimal>,
}

/// Serde-facing input: the product plus the request priced against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    pub product: LoanProduct,
    pub request: QuoteRequest,
}

/// Priced loan offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuote {
    pub product_name: String,
    pub currency: Currency,
    pub terms: LoanTerms,
    pub summary: ScheduleSummary,
    pub entries: Vec<ScheduleEntry>,
    pub processing_fee: Money,
    pub insurance_fee: Money,
    /// Principal less upfront fees, the amount actually paid out.
    pub net_disbursement: Money,
    /// Total interest plus upfront fees.
    pub total_cost_of_credit: Money,
    pub effective_annual_rate_percent: Decimal,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price a request against a product: enforce the product envelope,
/// build the schedule, apply upfront fees and report the true cost.
pub fn build_quote(input: &QuoteInput) -> LendingResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();
    let product = &input.product;
    let request = &input.request;

    product.validate()?;

    if request.principal < product.min_principal || request.principal > product.max_principal {
        return Err(LendingError::InvalidInput {
            field: "principal".into(),
            reason: format!(
                "Principal must be between {} and {} for product '{}'",
                product.min_principal, product.max_principal, product.name
            ),
        });
    }
    if request.term_periods < product.min_term_periods
        || request.term_periods > product.max_term_periods
    {
        return Err(LendingError::InvalidInput {
            field: "term_periods".into(),
            reason: format!(
                "Term must be between {} and {} periods for product '{}'",
                product.min_term_periods, product.max_term_periods, product.name
            ),
        });
    }

    let annual_rate_percent = match request.annual_rate_percent {
        Some(rate) => {
            let lo = product
                .min_annual_rate_percent
                .unwrap_or(product.annual_rate_percent);
            let hi = product
                .max_annual_rate_percent
                .unwrap_or(product.annual_rate_percent);
            if rate < lo || rate > hi {
                return Err(LendingError::InvalidInput {
                    field: "annual_rate_percent".into(),
                    reason: format!(
                        "Rate override must be between {lo}% and {hi}% for product '{}'",
                        product.name
                    ),
                });
            }
            rate
        }
        None => product.annual_rate_percent,
    };

    let terms = LoanTerms {
        principal: request.principal,
        annual_rate_percent,
        term_periods: request.term_periods,
        interest_method: product.interest_method,
        repayment_cycle: product.repayment_cycle,
    };

    let (amortisation, mut warnings) = schedule::compute(&terms, request.start_date)?;

    let processing_fee = fee_amount(request.principal, product.processing_fee_percent);
    let insurance_fee = fee_amount(request.principal, product.insurance_fee_percent);
    let net_disbursement = request.principal - processing_fee - insurance_fee;

    if net_disbursement <= Decimal::ZERO {
        return Err(LendingError::InvalidInput {
            field: "processing_fee_percent".into(),
            reason: "Upfront fees equal or exceed the principal".into(),
        });
    }

    let effective_annual_rate = analysis::effective_annual_rate(
        net_disbursement,
        request.start_date,
        &amortisation.entries,
    )?;
    let effective_annual_rate_percent = round2(effective_annual_rate * dec!(100));

    if effective_annual_rate_percent > annual_rate_percent + dec!(20) {
        warnings.push(format!(
            "Effective annual rate {effective_annual_rate_percent}% is far above the contract rate {annual_rate_percent}%; review the fee load"
        ));
    }

    let quote = LoanQuote {
        product_name: product.name.clone(),
        currency: product.currency.clone(),
        terms,
        summary: amortisation.summary.clone(),
        entries: amortisation.entries,
        processing_fee,
        insurance_fee,
        net_disbursement,
        total_cost_of_credit: amortisation.summary.total_interest
            + processing_fee
            + insurance_fee,
        effective_annual_rate_percent,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Product Quote",
        &serde_json::json!({
            "product": product.name,
            "principal": request.principal.to_string(),
            "term_periods": request.term_periods,
            "annual_rate_percent": annual_rate_percent.to_string(),
            "start_date": request.start_date.to_string(),
        }),
        warnings,
        elapsed,
        quote,
    ))
}

fn fee_amount(principal: Money, fee_percent: Option<Decimal>) -> Money {
    match fee_percent {
        Some(pct) => round2(principal * pct / dec!(100)),
        None => Decimal::ZERO,
    }
}
