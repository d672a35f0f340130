mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::penalty::PenaltyArgs;
use commands::quote::QuoteArgs;
use commands::schedule::ScheduleArgs;

/// Loan amortisation and lending product calculations
#[derive(Parser)]
#[command(
    name = "loanc",
    version,
    about = "Loan amortisation and lending product calculations",
    long_about = "A CLI for microfinance lending calculations with decimal precision. \
                  Builds repayment schedules across flat, reducing-balance, interest-only \
                  and compound interest methods, prices requests against product \
                  configurations, and assesses late-repayment penalties."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a full repayment schedule for a loan
    Schedule(ScheduleArgs),
    /// Price a loan request against a product configuration
    Quote(QuoteArgs),
    /// Assess a late-repayment penalty
    Penalty(PenaltyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Quote(args) => commands::quote::run_quote(args),
        Commands::Penalty(args) => commands::penalty::run_penalty(args),
        Commands::Version => {
            println!("loanc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
