use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lending_core::amortisation::{
    build_schedule, InterestMethod, LoanTerms, RepaymentCycle, ScheduleRequest,
};

use crate::input;

/// Arguments for building a repayment schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a percentage (12 means 12%/year)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Number of repayment periods
    #[arg(long, alias = "term")]
    pub term_periods: Option<u32>,

    /// Interest method (flat, reducing-balance-equal-installment,
    /// reducing-balance-equal-principal, interest-only, compound)
    #[arg(long, alias = "method")]
    pub interest_method: Option<InterestMethod>,

    /// Repayment cycle (daily, weekly, biweekly, monthly, quarterly, annually)
    #[arg(long, alias = "cycle")]
    pub repayment_cycle: Option<RepaymentCycle>,

    /// Disbursement date the due dates are stepped from (defaults to today)
    #[arg(long, alias = "start")]
    pub start_date: Option<NaiveDate>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ScheduleRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let terms = LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            term_periods: args
                .term_periods
                .ok_or("--term-periods is required (or provide --input)")?,
            interest_method: args
                .interest_method
                .ok_or("--interest-method is required (or provide --input)")?,
            repayment_cycle: args
                .repayment_cycle
                .ok_or("--repayment-cycle is required (or provide --input)")?,
        };
        ScheduleRequest {
            terms,
            start_date: args
                .start_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        }
    };

    let result = build_schedule(&request.terms, request.start_date)?;
    Ok(serde_json::to_value(result)?)
}
