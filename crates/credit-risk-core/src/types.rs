use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// One reporting period of balance-sheet and income-statement figures.
///
/// Retained earnings and EBIT may be negative. Total assets and total
/// liabilities are used as divisors and must be strictly positive; this is
/// enforced at computation time, never coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub working_capital: Money,
    pub total_assets: Money,
    pub retained_earnings: Money,
    pub ebit: Money,
    pub total_liabilities: Money,
    pub sales: Money,
    pub market_value_of_equity: Money,
    /// End of the reporting period the figures describe, when known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub period_end: Option<NaiveDate>,
}

/// Market-side inputs to the structural model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInputs {
    /// Current market capitalisation (>= 0).
    pub market_cap: Money,
    /// Annualised equity volatility (decimal, e.g. 0.30 = 30%). Must be > 0.
    pub equity_vol: Rate,
    /// Time horizon T in years, typically 1. Must be > 0.
    pub horizon_years: Years,
    /// Risk-free rate. Defaults to zero when the source omits it.
    #[serde(default)]
    pub risk_free_rate: Rate,
}

/// A single historical daily close, input to volatility estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
