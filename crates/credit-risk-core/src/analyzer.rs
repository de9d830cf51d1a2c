//! Combined risk assessment and decision policy.
//!
//! Both models must clear their gate for approval: the Z-Score guards
//! against weak accounting fundamentals, the structural model against high
//! market-implied default risk. Either alone can give a false sense of
//! safety, so the rule is a conjunction rather than a weighted blend.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::provider::MarketDataProvider;
use crate::ratios::{self, ZScoreBreakdown};
use crate::structural::{self, StructuralInput, StructuralOutput};
use crate::volatility;
use crate::{types::*, CreditRiskResult};

// ---------------------------------------------------------------------------
// Decision policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditDecision {
    Approved,
    Denied,
}

impl std::fmt::Display for CreditDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "Approved"),
            Self::Denied => write!(f, "Denied"),
        }
    }
}

/// Z-Score at or above this clears the accounting gate.
pub const APPROVAL_MIN_ZSCORE: Decimal = dec!(3.0);
/// Default probability strictly below this clears the market gate.
pub const APPROVAL_MAX_PD: Decimal = dec!(0.05);

/// The decision rule: Approved iff Z >= 3.0 AND PD < 0.05.
///
/// Z exactly at 3.0 passes (inclusive); PD exactly at 0.05 fails (strict).
pub fn decide(z_score: Decimal, default_probability: Decimal) -> CreditDecision {
    if z_score >= APPROVAL_MIN_ZSCORE && default_probability < APPROVAL_MAX_PD {
        CreditDecision::Approved
    } else {
        CreditDecision::Denied
    }
}

// ---------------------------------------------------------------------------
// Combined assessment
// ---------------------------------------------------------------------------

/// Everything the result consumer gets per company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub zscore: ZScoreBreakdown,
    pub structural: StructuralOutput,
    pub decision: CreditDecision,
}

/// Run both models over one company and apply the decision policy.
///
/// Pure composition over immutable inputs; nothing is retained across calls.
pub fn evaluate(
    snapshot: &FinancialSnapshot,
    market: &MarketInputs,
) -> CreditRiskResult<ComputationOutput<RiskReport>> {
    let start = Instant::now();

    let zscore_out = ratios::compute_zscore(snapshot)?;
    let structural_out = structural::default_probability(&StructuralInput {
        market_cap: market.market_cap,
        total_liabilities: snapshot.total_liabilities,
        equity_vol: market.equity_vol,
        horizon_years: market.horizon_years,
        risk_free_rate: market.risk_free_rate,
    })?;

    let mut warnings = zscore_out.warnings;
    warnings.extend(structural_out.warnings);

    let zscore = zscore_out.result;
    let structural = structural_out.result;
    let decision = decide(zscore.z_score, structural.default_probability);

    let report = RiskReport {
        zscore,
        structural,
        decision,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "methodology": "Altman Z-Score and Merton structural model, conjunctive approval gates",
        "approval_rule": "Approved iff Z >= 3.0 AND default_probability < 0.05",
        "z_gate": "inclusive at 3.0",
        "pd_gate": "strict at 0.05",
    });

    Ok(with_metadata(
        "Combined credit risk assessment",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Batch driver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    Analyzed,
    Failed,
}

/// One row of batch output. A failed ticker carries its error message
/// instead of silently mixing NaN or zero scores into the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerRow {
    pub ticker: String,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RiskReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Evaluate a batch of tickers against a provider. Per-ticker errors are
/// captured in the row; one ticker's failure never aborts the rest.
pub fn evaluate_batch(
    provider: &dyn MarketDataProvider,
    tickers: &[String],
    horizon_years: Years,
    risk_free_rate: Rate,
) -> Vec<TickerRow> {
    tickers
        .iter()
        .map(|ticker| match evaluate_ticker(provider, ticker, horizon_years, risk_free_rate) {
            Ok(report) => TickerRow {
                ticker: ticker.clone(),
                status: RowStatus::Analyzed,
                report: Some(report),
                error: None,
            },
            Err(e) => TickerRow {
                ticker: ticker.clone(),
                status: RowStatus::Failed,
                report: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

fn evaluate_ticker(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    horizon_years: Years,
    risk_free_rate: Rate,
) -> CreditRiskResult<RiskReport> {
    let data = provider.company_data(ticker)?;
    let equity_vol = volatility::annualized_volatility(&data.close_history)?;
    let market = MarketInputs {
        market_cap: data.market_cap,
        equity_vol,
        horizon_years,
        risk_free_rate,
    };
    Ok(evaluate(&data.snapshot, &market)?.result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
