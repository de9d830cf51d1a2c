use napi::Result as NapiResult;
use napi_derive::napi;

use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Altman Z-Score
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_zscore(input_json: String) -> NapiResult<String> {
    let snapshot: credit_risk_core::FinancialSnapshot =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_risk_core::ratios::compute_zscore(&snapshot).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Merton structural model
// ---------------------------------------------------------------------------

#[napi]
pub fn default_probability(input_json: String) -> NapiResult<String> {
    let input: credit_risk_core::structural::StructuralInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credit_risk_core::structural::default_probability(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct CallInput {
    asset_value: rust_decimal::Decimal,
    debt_face: rust_decimal::Decimal,
    volatility: rust_decimal::Decimal,
    maturity: rust_decimal::Decimal,
    #[serde(default)]
    risk_free_rate: rust_decimal::Decimal,
}

#[napi]
pub fn black_scholes_call(input_json: String) -> NapiResult<String> {
    let input: CallInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let price = credit_risk_core::structural::black_scholes_call(
        input.asset_value,
        input.debt_face,
        input.volatility,
        input.maturity,
        input.risk_free_rate,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&price).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Combined assessment
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EvaluateInput {
    snapshot: credit_risk_core::FinancialSnapshot,
    market: credit_risk_core::MarketInputs,
}

#[napi]
pub fn evaluate_credit(input_json: String) -> NapiResult<String> {
    let input: EvaluateInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credit_risk_core::analyzer::evaluate(&input.snapshot, &input.market)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Volatility estimation
// ---------------------------------------------------------------------------

#[napi]
pub fn annualized_volatility(input_json: String) -> NapiResult<String> {
    let history: Vec<credit_risk_core::PriceBar> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let sigma =
        credit_risk_core::volatility::annualized_volatility(&history).map_err(to_napi_error)?;
    serde_json::to_string(&sigma).map_err(to_napi_error)
}
