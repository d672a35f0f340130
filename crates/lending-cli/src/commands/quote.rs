use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lending_core::products::{build_quote, LoanProduct, QuoteInput, QuoteRequest};

use crate::input;

/// Arguments for pricing a loan against a product
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QuoteArgs {
    /// Path to combined JSON input file ({"product": ..., "request": ...})
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a product configuration JSON file
    #[arg(long)]
    pub product: Option<String>,

    /// Requested principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Requested term in repayment periods
    #[arg(long, alias = "term")]
    pub term_periods: Option<u32>,

    /// Negotiated rate override, percentage per year
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Disbursement date (defaults to today)
    #[arg(long, alias = "start")]
    pub start_date: Option<NaiveDate>,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input: QuoteInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let product: LoanProduct = input::file::read_json(
            args.product
                .as_deref()
                .ok_or("--product file is required (or provide --input)")?,
        )?;
        let request = QuoteRequest {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            term_periods: args
                .term_periods
                .ok_or("--term-periods is required (or provide --input)")?,
            start_date: args
                .start_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            annual_rate_percent: args.annual_rate_percent,
        };
        QuoteInput { product, request }
    };

    let result = build_quote(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}
