use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LendingError;
use crate::time_value;
use crate::types::{Money, Rate};
use crate::LendingResult;

use super::schedule::ScheduleEntry;

/// Periodic internal rate of return of a schedule against the amount
/// actually disbursed. With no fees this recovers the periodic rate
/// the schedule was built from.
pub fn periodic_irr(net_disbursed: Money, entries: &[ScheduleEntry]) -> LendingResult<Rate> {
    if net_disbursed <= Decimal::ZERO {
        return Err(LendingError::InvalidInput {
            field: "net_disbursed".into(),
            reason: "Disbursed amount must be positive".into(),
        });
    }
    if entries.is_empty() {
        return Err(LendingError::InsufficientData(
            "Cannot derive a rate from an empty schedule".into(),
        ));
    }

    let mut flows = Vec::with_capacity(entries.len() + 1);
    flows.push(-net_disbursed);
    flows.extend(entries.iter().map(|e| e.total_payment));

    time_value::irr(&flows, dec!(0.01))
}

/// Effective annual rate of a schedule's dated cash flows against the
/// amount actually disbursed.
///
/// Upfront fees reduce the disbursement, so this is the figure that
/// makes fee-loaded products comparable. Day counts are Act/365.25 via
/// XIRR, which annualises directly.
pub fn effective_annual_rate(
    net_disbursed: Money,
    start_date: NaiveDate,
    entries: &[ScheduleEntry],
) -> LendingResult<Rate> {
    if net_disbursed <= Decimal::ZERO {
        return Err(LendingError::InvalidInput {
            field: "net_disbursed".into(),
            reason: "Disbursed amount must be positive".into(),
        });
    }
    if entries.is_empty() {
        return Err(LendingError::InsufficientData(
            "Cannot derive a rate from an empty schedule".into(),
        ));
    }

    let mut flows = Vec::with_capacity(entries.len() + 1);
    flows.push((start_date, -net_disbursed));
    flows.extend(entries.iter().map(|e| (e.due_date, e.total_payment)));

    time_value::xirr(&flows, dec!(0.1))
}
