use lending_core::penalties::{
    assess_penalty, PenaltyAccrual, PenaltyAssessment, PenaltyBasis, PenaltyInput, PenaltyPolicy,
};
use lending_core::LendingError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn policy() -> PenaltyPolicy {
    PenaltyPolicy {
        penalty_rate_percent: dec!(1),
        basis: PenaltyBasis::OverdueInstallment,
        accrual: PenaltyAccrual::PerDayOverdue,
        grace_days: 3,
        max_penalty: None,
    }
}

fn overdue(days: u32) -> PenaltyInput {
    PenaltyInput {
        policy: policy(),
        installment_due: dec!(500.00),
        outstanding_principal: dec!(6000.00),
        days_overdue: days,
    }
}

fn assess(input: &PenaltyInput) -> PenaltyAssessment {
    assess_penalty(input).unwrap().result
}

// ===========================================================================
// Grace window
// ===========================================================================

#[test]
fn test_on_time_charges_nothing() {
    let result = assess(&overdue(0));
    assert_eq!(result.chargeable_days, 0);
    assert_eq!(result.penalty, Decimal::ZERO);
    assert_eq!(result.total_due, dec!(500.00));
}

#[test]
fn test_grace_boundary() {
    assert_eq!(assess(&overdue(3)).penalty, Decimal::ZERO);
    // First chargeable day: 500 * 1% = 5.00
    assert_eq!(assess(&overdue(4)).penalty, dec!(5.00));
}

// ===========================================================================
// Accrual
// ===========================================================================

#[test]
fn test_per_day_accrual_is_linear() {
    let five_days = assess(&overdue(8)).penalty;
    let ten_days = assess(&overdue(13)).penalty;
    assert_eq!(five_days, dec!(25.00));
    assert_eq!(ten_days, dec!(50.00));
}

#[test]
fn test_one_off_accrual() {
    let mut input = overdue(30);
    input.policy.accrual = PenaltyAccrual::OneOff;
    let result = assess(&input);
    assert_eq!(result.penalty, dec!(5.00));
    assert_eq!(result.total_due, dec!(505.00));
}

#[test]
fn test_principal_basis() {
    let mut input = overdue(4);
    input.policy.basis = PenaltyBasis::OutstandingPrincipal;
    // 6000 * 1% * 1 day
    assert_eq!(assess(&input).penalty, dec!(60.00));
}

// ===========================================================================
// Cap and validation
// ===========================================================================

#[test]
fn test_cap_applies_with_warning() {
    let mut input = overdue(100);
    input.policy.max_penalty = Some(dec!(75.00));
    let out = assess_penalty(&input).unwrap();
    assert_eq!(out.result.penalty, dec!(75.00));
    assert_eq!(out.result.total_due, dec!(575.00));
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_zero_rate_policy_is_noop() {
    let mut input = overdue(30);
    input.policy.penalty_rate_percent = Decimal::ZERO;
    assert_eq!(assess(&input).penalty, Decimal::ZERO);
}

#[test]
fn test_invalid_policy_rejected() {
    let mut input = overdue(10);
    input.policy.penalty_rate_percent = dec!(-0.5);
    assert!(matches!(
        assess_penalty(&input).unwrap_err(),
        LendingError::InvalidInput { ref field, .. } if field == "penalty_rate_percent"
    ));

    let mut capped = overdue(10);
    capped.policy.max_penalty = Some(dec!(-1));
    assert!(assess_penalty(&capped).is_err());
}

#[test]
fn test_negative_amounts_rejected() {
    let mut input = overdue(10);
    input.installment_due = dec!(-500);
    assert!(assess_penalty(&input).is_err());
}
