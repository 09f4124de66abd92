mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{EmiArgs, PrepaymentArgs, ScheduleArgs};
use commands::costs::{DownPaymentArgs, UpfrontCostsArgs};
use commands::eligibility::EligibilityArgs;

/// UAE mortgage calculations
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "UAE mortgage calculations",
    long_about = "A CLI for UAE mortgage calculations with decimal precision. \
                  Supports EMI and schedule expansion, prepayment simulation, \
                  minimum down-payment policy, per-emirate upfront purchase \
                  costs, and applicant eligibility."
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
    /// Calculate the fixed monthly installment (EMI) and loan totals
    Emi(EmiArgs),
    /// Expand the month-by-month amortisation schedule
    Schedule(ScheduleArgs),
    /// Simulate a lump-sum and/or recurring prepayment
    Prepayment(PrepaymentArgs),
    /// Minimum and effective down payment for a buyer profile
    DownPayment(DownPaymentArgs),
    /// One-time purchase costs for an emirate and readiness state
    UpfrontCosts(UpfrontCostsArgs),
    /// Debt-burden, LTV and eligible loan ceiling for an applicant
    Eligibility(EligibilityArgs),
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
        Commands::Emi(args) => commands::amortization::run_emi(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Prepayment(args) => commands::amortization::run_prepayment(args),
        Commands::DownPayment(args) => commands::costs::run_down_payment(args),
        Commands::UpfrontCosts(args) => commands::costs::run_upfront_costs(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
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
