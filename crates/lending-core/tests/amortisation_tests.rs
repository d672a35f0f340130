use chrono::NaiveDate;
use lending_core::amortisation::{
    build_schedule, InterestMethod, LoanTerms, RepaymentCycle,
};
use lending_core::LendingError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn terms(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_periods: u32,
    interest_method: InterestMethod,
    repayment_cycle: RepaymentCycle,
) -> LoanTerms {
    LoanTerms {
        principal,
        annual_rate_percent,
        term_periods,
        interest_method,
        repayment_cycle,
    }
}

const ALL_METHODS: [InterestMethod; 5] = [
    InterestMethod::Flat,
    InterestMethod::ReducingBalanceEqualInstallment,
    InterestMethod::ReducingBalanceEqualPrincipal,
    InterestMethod::InterestOnly,
    InterestMethod::Compound,
];

const ALL_CYCLES: [RepaymentCycle; 6] = [
    RepaymentCycle::Daily,
    RepaymentCycle::Weekly,
    RepaymentCycle::Biweekly,
    RepaymentCycle::Monthly,
    RepaymentCycle::Quarterly,
    RepaymentCycle::Annually,
];

// ===========================================================================
// Schedule invariants across every method and cycle
// ===========================================================================

#[test]
fn test_principal_conservation_and_balance_termination() {
    for method in ALL_METHODS {
        for cycle in ALL_CYCLES {
            let t = terms(dec!(7350.50), dec!(18.5), 13, method, cycle);
            let sched = build_schedule(&t, start()).unwrap().result;

            let principal_sum: Decimal = sched
                .entries
                .iter()
                .map(|e| e.principal_component)
                .sum();
            assert_eq!(
                principal_sum, t.principal,
                "principal not conserved for {method:?}/{cycle:?}"
            );
            assert_eq!(
                sched.entries.last().unwrap().remaining_balance,
                Decimal::ZERO,
                "balance not terminated for {method:?}/{cycle:?}"
            );
        }
    }
}

#[test]
fn test_components_never_negative() {
    for method in ALL_METHODS {
        let t = terms(dec!(999.99), dec!(36), 7, method, RepaymentCycle::Weekly);
        let sched = build_schedule(&t, start()).unwrap().result;

        for entry in &sched.entries {
            assert!(
                entry.principal_component >= Decimal::ZERO,
                "negative principal in {method:?} period {}",
                entry.period_index
            );
            assert!(
                entry.interest_component >= Decimal::ZERO,
                "negative interest in {method:?} period {}",
                entry.period_index
            );
        }
    }
}

#[test]
fn test_balance_monotonically_non_increasing() {
    for method in ALL_METHODS {
        let t = terms(dec!(25000), dec!(12), 24, method, RepaymentCycle::Monthly);
        let sched = build_schedule(&t, start()).unwrap().result;

        let mut previous = t.principal;
        for entry in &sched.entries {
            assert!(
                entry.remaining_balance <= previous,
                "balance increased in {method:?} period {}",
                entry.period_index
            );
            previous = entry.remaining_balance;
        }
    }
}

#[test]
fn test_equal_installment_invariant() {
    for method in [
        InterestMethod::Flat,
        InterestMethod::ReducingBalanceEqualInstallment,
    ] {
        let t = terms(dec!(25000), dec!(12), 24, method, RepaymentCycle::Monthly);
        let sched = build_schedule(&t, start()).unwrap().result;

        let level = sched.entries[0].total_payment;
        for entry in &sched.entries[..sched.entries.len() - 1] {
            assert_eq!(entry.total_payment, level, "uneven installment in {method:?}");
        }
        // Final installment differs by at most the accumulated rounding
        let last = sched.entries.last().unwrap().total_payment;
        let tolerance = dec!(0.01) * Decimal::from(t.term_periods);
        assert!((last - level).abs() <= tolerance);
    }
}

#[test]
fn test_determinism() {
    let t = terms(
        dec!(12345.67),
        dec!(21.75),
        18,
        InterestMethod::ReducingBalanceEqualInstallment,
        RepaymentCycle::Biweekly,
    );
    let first = build_schedule(&t, start()).unwrap().result;
    let second = build_schedule(&t, start()).unwrap().result;
    assert_eq!(first, second);
}

#[test]
fn test_total_payable_is_principal_plus_interest() {
    for method in ALL_METHODS {
        let t = terms(dec!(5000), dec!(24), 10, method, RepaymentCycle::Monthly);
        let sched = build_schedule(&t, start()).unwrap().result;
        assert_eq!(
            sched.summary.total_payable,
            t.principal + sched.summary.total_interest
        );
    }
}

// ===========================================================================
// Worked examples
// ===========================================================================

#[test]
fn test_reducing_balance_monthly_example() {
    let t = terms(
        dec!(25000),
        dec!(12),
        24,
        InterestMethod::ReducingBalanceEqualInstallment,
        RepaymentCycle::Monthly,
    );
    let sched = build_schedule(&t, start()).unwrap().result;

    assert_eq!(sched.summary.periodic_payment, dec!(1176.84));
    // Total interest on the annuity sits near 24 * 1176.84 - 25000
    assert!((sched.summary.total_interest - dec!(3244.13)).abs() < dec!(1));
}

#[test]
fn test_flat_monthly_example() {
    let t = terms(
        dec!(25000),
        dec!(12),
        24,
        InterestMethod::Flat,
        RepaymentCycle::Monthly,
    );
    let sched = build_schedule(&t, start()).unwrap().result;

    assert_eq!(sched.summary.total_interest, dec!(6000.00));
    assert_eq!(sched.summary.total_payable, dec!(31000.00));
    assert_eq!(sched.summary.periodic_payment, dec!(1291.67));
}

#[test]
fn test_interest_only_monthly_example() {
    let t = terms(
        dec!(25000),
        dec!(12),
        24,
        InterestMethod::InterestOnly,
        RepaymentCycle::Monthly,
    );
    let sched = build_schedule(&t, start()).unwrap().result;

    for entry in &sched.entries[..23] {
        assert_eq!(entry.principal_component, Decimal::ZERO);
        assert_eq!(entry.interest_component, dec!(250.00));
    }
    let balloon = &sched.entries[23];
    assert_eq!(balloon.principal_component, dec!(25000));
    assert_eq!(balloon.interest_component, dec!(250.00));
}

#[test]
fn test_one_cent_single_period() {
    let t = terms(
        dec!(0.01),
        Decimal::ZERO,
        1,
        InterestMethod::ReducingBalanceEqualInstallment,
        RepaymentCycle::Monthly,
    );
    let sched = build_schedule(&t, start()).unwrap().result;

    assert_eq!(sched.entries.len(), 1);
    assert_eq!(sched.entries[0].principal_component, dec!(0.01));
    assert_eq!(sched.entries[0].interest_component, Decimal::ZERO);
    assert_eq!(sched.entries[0].remaining_balance, Decimal::ZERO);
}

#[test]
fn test_quarterly_periodic_rate_scaling() {
    // 12%/year over 8 quarters: periodic rate 3%
    let t = terms(
        dec!(10000),
        dec!(12),
        8,
        InterestMethod::ReducingBalanceEqualPrincipal,
        RepaymentCycle::Quarterly,
    );
    let sched = build_schedule(&t, start()).unwrap().result;

    assert_eq!(sched.entries[0].interest_component, dec!(300.00));
    assert_eq!(sched.entries[0].principal_component, dec!(1250.00));
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_invalid_inputs_rejected_before_computation() {
    let base = terms(
        dec!(1000),
        dec!(12),
        12,
        InterestMethod::Flat,
        RepaymentCycle::Monthly,
    );

    let mut negative_principal = base.clone();
    negative_principal.principal = dec!(-100);
    assert!(matches!(
        build_schedule(&negative_principal, start()).unwrap_err(),
        LendingError::InvalidInput { ref field, .. } if field == "principal"
    ));

    let mut negative_rate = base.clone();
    negative_rate.annual_rate_percent = dec!(-3);
    assert!(matches!(
        build_schedule(&negative_rate, start()).unwrap_err(),
        LendingError::InvalidInput { ref field, .. } if field == "annual_rate_percent"
    ));

    let mut zero_term = base;
    zero_term.term_periods = 0;
    assert!(matches!(
        build_schedule(&zero_term, start()).unwrap_err(),
        LendingError::InvalidInput { ref field, .. } if field == "term_periods"
    ));
}
