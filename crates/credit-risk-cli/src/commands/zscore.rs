use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_risk_core::ratios;
use credit_risk_core::FinancialSnapshot;

use crate::input;

/// Arguments for the Altman Z-Score calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ZScoreArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Working capital (may be negative)
    #[arg(long)]
    pub working_capital: Option<Decimal>,

    /// Total assets (must be positive)
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Retained earnings (may be negative)
    #[arg(long)]
    pub retained_earnings: Option<Decimal>,

    /// EBIT (may be negative)
    #[arg(long)]
    pub ebit: Option<Decimal>,

    /// Total liabilities (must be positive)
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Net sales
    #[arg(long)]
    pub sales: Option<Decimal>,

    /// Market value of equity
    #[arg(long, alias = "mve")]
    pub market_value_of_equity: Option<Decimal>,
}

pub fn run_zscore(args: ZScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot: FinancialSnapshot = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FinancialSnapshot {
            working_capital: args
                .working_capital
                .ok_or("--working-capital is required (or provide --input)")?,
            total_assets: args
                .total_assets
                .ok_or("--total-assets is required (or provide --input)")?,
            retained_earnings: args
                .retained_earnings
                .ok_or("--retained-earnings is required (or provide --input)")?,
            ebit: args.ebit.ok_or("--ebit is required (or provide --input)")?,
            total_liabilities: args
                .total_liabilities
                .ok_or("--total-liabilities is required (or provide --input)")?,
            sales: args.sales.ok_or("--sales is required (or provide --input)")?,
            market_value_of_equity: args
                .market_value_of_equity
                .ok_or("--market-value-of-equity is required (or provide --input)")?,
            period_end: None,
        }
    };

    let result = ratios::compute_zscore(&snapshot)?;
    Ok(serde_json::to_value(result)?)
}
