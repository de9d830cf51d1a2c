mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::evaluate::{BatchArgs, EvaluateArgs, VolatilityArgs};
use commands::structural::{BlackScholesArgs, DefaultProbArgs};
use commands::zscore::ZScoreArgs;

/// Corporate default risk scoring from public financial data
#[derive(Parser)]
#[command(
    name = "crisk",
    version,
    about = "Corporate default risk scoring: Altman Z-Score and Merton structural model",
    long_about = "Scores corporate bankruptcy/default risk with decimal precision using two \
                  independent models: the Altman Z-Score over accounting ratios and the \
                  Merton structural model over market inputs, combined into a binary \
                  credit decision."
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
    /// Calculate the Altman Z-Score and its five component ratios
    Zscore(ZScoreArgs),
    /// Estimate the Merton default probability N(-d2)
    DefaultProb(DefaultProbArgs),
    /// Price a European call via Black-Scholes
    BlackScholes(BlackScholesArgs),
    /// Run both models over one company and apply the credit decision
    Evaluate(EvaluateArgs),
    /// Evaluate a batch of tickers against a JSON data file
    Batch(BatchArgs),
    /// Annualised volatility from historical daily closes
    Volatility(VolatilityArgs),
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
        Commands::Zscore(args) => commands::zscore::run_zscore(args),
        Commands::DefaultProb(args) => commands::structural::run_default_prob(args),
        Commands::BlackScholes(args) => commands::structural::run_black_scholes(args),
        Commands::Evaluate(args) => commands::evaluate::run_evaluate(args),
        Commands::Batch(args) => commands::evaluate::run_batch(args),
        Commands::Volatility(args) => commands::evaluate::run_volatility(args),
        Commands::Version => {
            println!("crisk {}", env!("CARGO_PKG_VERSION"));
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
