use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;

use credit_risk_core::analyzer;
use credit_risk_core::provider::{CompanyData, MarketDataProvider};
use credit_risk_core::volatility;
use credit_risk_core::{
    CreditRiskError, CreditRiskResult, FinancialSnapshot, MarketInputs, PriceBar,
};

use crate::input;

/// Arguments for a single-company evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON input file: {"snapshot": {...}, "market": {...}}
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a batch run over a ticker data file
#[derive(Args)]
pub struct BatchArgs {
    /// Path to JSON data file: map of ticker to company data
    #[arg(long)]
    pub input: Option<String>,

    /// Tickers to evaluate (defaults to every ticker in the data file)
    #[arg(long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Time horizon in years
    #[arg(long, default_value = "1")]
    pub horizon_years: Decimal,

    /// Risk-free rate (decimal)
    #[arg(long, default_value = "0")]
    pub risk_free_rate: Decimal,
}

/// Arguments for volatility estimation
#[derive(Args)]
pub struct VolatilityArgs {
    /// Path to JSON input file: array of {"date": "YYYY-MM-DD", "close": "..."}
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(serde::Deserialize)]
struct EvaluateInput {
    snapshot: FinancialSnapshot,
    market: MarketInputs,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let eval_input: EvaluateInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required (or pipe JSON on stdin)".into());
    };

    let result = analyzer::evaluate(&eval_input.snapshot, &eval_input.market)?;
    Ok(serde_json::to_value(result)?)
}

/// Provider backed by a parsed JSON data file. Tickers missing from the file
/// surface as upstream errors, marking only their own batch row as failed.
struct FileProvider {
    companies: HashMap<String, CompanyData>,
}

impl MarketDataProvider for FileProvider {
    fn company_data(&self, ticker: &str) -> CreditRiskResult<CompanyData> {
        self.companies
            .get(ticker)
            .cloned()
            .ok_or_else(|| CreditRiskError::UpstreamData(format!("Unknown ticker: {ticker}")))
    }
}

pub fn run_batch(args: BatchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let companies: HashMap<String, CompanyData> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input data file is required (or pipe JSON on stdin)".into());
    };

    let tickers: Vec<String> = if args.tickers.is_empty() {
        let mut all: Vec<String> = companies.keys().cloned().collect();
        all.sort();
        all
    } else {
        args.tickers
    };

    let provider = FileProvider { companies };
    let rows = analyzer::evaluate_batch(&provider, &tickers, args.horizon_years, args.risk_free_rate);
    Ok(serde_json::to_value(rows)?)
}

pub fn run_volatility(args: VolatilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history: Vec<PriceBar> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required (or pipe JSON on stdin)".into());
    };

    let sigma = volatility::annualized_volatility(&history)?;
    Ok(serde_json::json!({
        "annualized_volatility": sigma,
        "observations": history.len(),
        "trading_days_per_year": volatility::TRADING_DAYS_PER_YEAR,
    }))
}
