use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LendingResult;

use super::terms::{InterestMethod, LoanTerms};

/// A single installment in a repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based sequence number.
    pub period_index: u32,
    pub due_date: NaiveDate,
    pub principal_component: Money,
    pub interest_component: Money,
    pub total_payment: Money,
    /// Outstanding principal after this installment. Exactly zero on
    /// the final entry.
    pub remaining_balance: Money,
}

/// Aggregate figures over a full schedule.
///
/// `periodic_payment` is the first installment; for equal-principal and
/// interest-only methods the installments vary, so the first value is
/// the representative one and `final_payment` carries the other end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periodic_payment: Money,
    pub final_payment: Money,
    pub total_interest: Money,
    pub total_payable: Money,
}

/// Full output of a schedule computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortisationSchedule {
    pub entries: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

/// Serde-facing request: the loan terms plus the disbursement date the
/// due dates are stepped from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(flatten)]
    pub terms: LoanTerms,
    pub start_date: NaiveDate,
}

/// Round to the currency quantum, halves away from zero.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Build the repayment schedule for the given terms.
///
/// Validation happens before any entry is produced; a partial schedule
/// is never returned. Each entry is rounded to 2 decimal places and the
/// final period absorbs the cumulative rounding residue, so principal
/// components sum to the principal exactly and the last remaining
/// balance is exactly zero.
pub fn build_schedule(
    terms: &LoanTerms,
    start_date: NaiveDate,
) -> LendingResult<ComputationOutput<AmortisationSchedule>> {
    let start = Instant::now();
    let (schedule, warnings) = compute(terms, start_date)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Amortisation Schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "term_periods": terms.term_periods,
            "interest_method": terms.interest_method.to_string(),
            "repayment_cycle": terms.repayment_cycle.to_string(),
            "periodic_rate": terms.periodic_rate().to_string(),
            "start_date": start_date.to_string(),
        }),
        warnings,
        elapsed,
        schedule,
    ))
}

/// Unwrapped computation shared with the quoting layer.
pub(crate) fn compute(
    terms: &LoanTerms,
    start_date: NaiveDate,
) -> LendingResult<(AmortisationSchedule, Vec<String>)> {
    terms.validate()?;

    let mut warnings = Vec::new();
    let rate = terms.periodic_rate();

    let components = match terms.interest_method {
        InterestMethod::Flat => flat_components(terms),
        InterestMethod::ReducingBalanceEqualInstallment | InterestMethod::Compound => {
            annuity_components(terms, rate)?
        }
        InterestMethod::ReducingBalanceEqualPrincipal => equal_principal_components(terms, rate),
        InterestMethod::InterestOnly => interest_only_components(terms, rate, &mut warnings),
    };

    let schedule = assemble(terms, start_date, components)?;
    Ok((schedule, warnings))
}

/// Flat: interest charged once on the original principal and split
/// equally across the term.
fn flat_components(terms: &LoanTerms) -> Vec<(Money, Money)> {
    let n = terms.term_periods;
    let n_dec = Decimal::from(n);
    let periods_per_year = Decimal::from(terms.repayment_cycle.periods_per_year());

    let total_interest =
        terms.principal * terms.annual_rate_percent / dec!(100) * (n_dec / periods_per_year);
    let level_payment = round2((terms.principal + total_interest) / n_dec);
    let level_interest = round2(total_interest / n_dec);

    let mut components = Vec::with_capacity(n as usize);
    let mut principal_left = terms.principal;
    let mut interest_left = round2(total_interest);

    for period in 1..=n {
        if period == n {
            components.push((principal_left, interest_left));
            break;
        }
        // Sub-cent interest can run dry before the final period.
        let interest = level_interest.min(interest_left);
        let principal_part = (level_payment - interest)
            .max(Decimal::ZERO)
            .min(principal_left);
        principal_left -= principal_part;
        interest_left -= interest;
        components.push((principal_part, interest));
    }

    components
}

/// Standard annuity: level payment, interest on the outstanding balance.
fn annuity_components(terms: &LoanTerms, rate: Rate) -> LendingResult<Vec<(Money, Money)>> {
    let n = terms.term_periods;

    // PMT gives the lender-side sign; flip to the borrower's view.
    let level_payment = round2(-time_value::pmt(
        rate,
        n,
        terms.principal,
        Decimal::ZERO,
    )?);

    let mut components = Vec::with_capacity(n as usize);
    let mut balance = terms.principal;

    for period in 1..=n {
        let interest = round2(balance * rate);
        let principal_part = if period == n {
            balance
        } else {
            (level_payment - interest).max(Decimal::ZERO).min(balance)
        };
        balance -= principal_part;
        components.push((principal_part, interest));
    }

    Ok(components)
}

/// Equal principal portions, declining interest.
fn equal_principal_components(terms: &LoanTerms, rate: Rate) -> Vec<(Money, Money)> {
    let n = terms.term_periods;
    let level_principal = round2(terms.principal / Decimal::from(n));

    let mut components = Vec::with_capacity(n as usize);
    let mut balance = terms.principal;

    for period in 1..=n {
        let interest = round2(balance * rate);
        let principal_part = if period == n {
            balance
        } else {
            level_principal.min(balance)
        };
        balance -= principal_part;
        components.push((principal_part, interest));
    }

    components
}

/// Interest-only installments with a final balloon repayment.
fn interest_only_components(
    terms: &LoanTerms,
    rate: Rate,
    warnings: &mut Vec<String>,
) -> Vec<(Money, Money)> {
    let n = terms.term_periods;
    let level_interest = round2(terms.principal * rate);

    if rate.is_zero() {
        warnings.push(
            "Zero-rate interest-only schedule: every installment before the final balloon is zero"
                .into(),
        );
    }

    let mut components = Vec::with_capacity(n as usize);
    for period in 1..=n {
        let principal_part = if period == n {
            terms.principal
        } else {
            Decimal::ZERO
        };
        components.push((principal_part, level_interest));
    }

    components
}

fn assemble(
    terms: &LoanTerms,
    start_date: NaiveDate,
    components: Vec<(Money, Money)>,
) -> LendingResult<AmortisationSchedule> {
    let mut entries = Vec::with_capacity(components.len());
    let mut balance = terms.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_payable = Decimal::ZERO;

    for (idx, (principal_part, interest)) in components.into_iter().enumerate() {
        let period_index = idx as u32 + 1;
        let due_date = terms.repayment_cycle.due_date(start_date, period_index)?;

        balance -= principal_part;
        let total_payment = principal_part + interest;
        total_interest += interest;
        total_payable += total_payment;

        entries.push(ScheduleEntry {
            period_index,
            due_date,
            principal_component: principal_part,
            interest_component: interest,
            total_payment,
            remaining_balance: balance,
        });
    }

    let summary = ScheduleSummary {
        periodic_payment: entries.first().map(|e| e.total_payment).unwrap_or_default(),
        final_payment: entries.last().map(|e| e.total_payment).unwrap_or_default(),
        total_interest,
        total_payable,
    };

    Ok(AmortisationSchedule { entries, summary })
}
