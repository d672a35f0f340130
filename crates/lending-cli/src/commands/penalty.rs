use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lending_core::penalties::{
    assess_penalty, PenaltyAccrual, PenaltyBasis, PenaltyInput, PenaltyPolicy,
};

use crate::input;

/// Arguments for assessing a late-repayment penalty
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PenaltyArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Overdue installment amount
    #[arg(long)]
    pub installment_due: Option<Decimal>,

    /// Outstanding principal at the time of default
    #[arg(long)]
    pub outstanding_principal: Option<Decimal>,

    /// Days the installment is overdue
    #[arg(long)]
    pub days_overdue: Option<u32>,

    /// Penalty rate as a percentage of the basis amount
    #[arg(long, alias = "rate")]
    pub penalty_rate_percent: Option<Decimal>,

    /// Penalty basis (overdue-installment, outstanding-principal)
    #[arg(long)]
    pub basis: Option<PenaltyBasis>,

    /// Penalty accrual (one-off, per-day-overdue)
    #[arg(long)]
    pub accrual: Option<PenaltyAccrual>,

    /// Days overdue before any penalty is charged
    #[arg(long, default_value_t = 0)]
    pub grace_days: u32,

    /// Optional ceiling on the accrued penalty
    #[arg(long)]
    pub max_penalty: Option<Decimal>,
}

pub fn run_penalty(args: PenaltyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let penalty_input: PenaltyInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PenaltyInput {
            policy: PenaltyPolicy {
                penalty_rate_percent: args
                    .penalty_rate_percent
                    .ok_or("--penalty-rate-percent is required (or provide --input)")?,
                basis: args
                    .basis
                    .ok_or("--basis is required (or provide --input)")?,
                accrual: args
                    .accrual
                    .ok_or("--accrual is required (or provide --input)")?,
                grace_days: args.grace_days,
                max_penalty: args.max_penalty,
            },
            installment_due: args
                .installment_due
                .ok_or("--installment-due is required (or provide --input)")?,
            outstanding_principal: args
                .outstanding_principal
                .ok_or("--outstanding-principal is required (or provide --input)")?,
            days_overdue: args
                .days_overdue
                .ok_or("--days-overdue is required (or provide --input)")?,
        }
    };

    let result = assess_penalty(&penalty_input)?;
    Ok(serde_json::to_value(result)?)
}
