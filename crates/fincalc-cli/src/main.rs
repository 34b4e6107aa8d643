mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use fincalc_core::currency::CurrencyCode;

use commands::deposits::{FdArgs, RdArgs, SipArgs};
use commands::format::FormatArgs;
use commands::limits::LimitsArgs;
use commands::loans::{EligibilityArgs, EmiArgs, PrepaymentArgs};

/// Loan, deposit and investment calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan, deposit and investment calculators",
    long_about = "Personal-finance calculators with decimal precision: EMI, loan \
                  eligibility, prepayment savings, SIP, fixed and recurring deposits. \
                  Inputs come from flags, a JSON/YAML file (--input) or piped JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency for `format` and for money in table output
    #[arg(long, default_value = "INR", global = true)]
    currency: CurrencyCode,

    /// Log computation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly installment for a reducing-balance loan
    Emi(EmiArgs),
    /// Largest loan an income can service at 50% FOIR
    Eligibility(EligibilityArgs),
    /// Interest and tenure saved by a part-prepayment
    Prepayment(PrepaymentArgs),
    /// Future value of a monthly SIP
    Sip(SipArgs),
    /// Fixed deposit maturity
    Fd(FdArgs),
    /// Recurring deposit maturity
    Rd(RdArgs),
    /// Format or parse a currency amount
    Format(FormatArgs),
    /// List supported currencies
    Currencies,
    /// Show input ranges and defaults for the calculators
    Limits(LimitsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "fincalc=debug,fincalc_core=debug"
    } else {
        "fincalc=warn,fincalc_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // stdout carries the result; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Eligibility(args) => commands::loans::run_eligibility(args),
        Commands::Prepayment(args) => commands::loans::run_prepayment(args),
        Commands::Sip(args) => commands::deposits::run_sip(args),
        Commands::Fd(args) => commands::deposits::run_fd(args),
        Commands::Rd(args) => commands::deposits::run_rd(args),
        Commands::Format(args) => commands::format::run_format(args, cli.currency),
        Commands::Currencies => commands::format::run_currencies(),
        Commands::Limits(args) => commands::limits::run_limits(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, cli.currency);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
