//! Altman Z-Score: the five accounting ratios and their weighted composite.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Informational risk tier from the Z-Score bands.
///
/// The credit decision only consults the Low boundary (3.0); the full
/// classification is exposed for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High bankruptcy risk"),
            Self::Medium => write!(f, "Medium bankruptcy risk"),
            Self::Low => write!(f, "Low bankruptcy risk"),
        }
    }
}

/// The five component ratios plus the weighted composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZScoreBreakdown {
    /// X1: Working Capital / Total Assets
    pub working_capital_ratio: Decimal,
    /// X2: Retained Earnings / Total Assets
    pub retained_earnings_ratio: Decimal,
    /// X3: EBIT / Total Assets
    pub ebit_ratio: Decimal,
    /// X4: Market Value of Equity / Total Liabilities
    pub equity_to_liabilities_ratio: Decimal,
    /// X5: Sales / Total Assets
    pub sales_ratio: Decimal,
    /// Z = 1.2*X1 + 1.4*X2 + 3.3*X3 + 0.6*X4 + 1.0*X5
    pub z_score: Decimal,
    pub tier: RiskTier,
}

// ---------------------------------------------------------------------------
// Coefficients and thresholds
// ---------------------------------------------------------------------------

// Original Altman Z-Score (public companies)
const Z_COEFF_X1: Decimal = dec!(1.2);
const Z_COEFF_X2: Decimal = dec!(1.4);
const Z_COEFF_X3: Decimal = dec!(3.3);
const Z_COEFF_X4: Decimal = dec!(0.6);
const Z_COEFF_X5: Decimal = dec!(1.0);

/// Z below this is the High tier.
pub const TIER_HIGH_BELOW: Decimal = dec!(1.8);
/// Z at or above this is the Low tier.
pub const TIER_LOW_FROM: Decimal = dec!(3.0);

/// Denominators below this pass validation but produce ratios large enough
/// to distort the composite; flagged as a warning, not an error.
const DEGENERATE_DENOMINATOR: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the Altman Z-Score and its component ratios for one snapshot.
///
/// Total assets and total liabilities must be strictly positive; missing or
/// zero figures are rejected rather than coerced, since zero-coercion would
/// silently distort the score.
pub fn compute_zscore(
    snapshot: &FinancialSnapshot,
) -> CreditRiskResult<ComputationOutput<ZScoreBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_snapshot(snapshot)?;

    if snapshot.total_assets < DEGENERATE_DENOMINATOR {
        warnings.push(format!(
            "total_assets ({}) is near zero; ratios may be numerically degenerate.",
            snapshot.total_assets
        ));
    }
    if snapshot.total_liabilities < DEGENERATE_DENOMINATOR {
        warnings.push(format!(
            "total_liabilities ({}) is near zero; X4 may be numerically degenerate.",
            snapshot.total_liabilities
        ));
    }

    let x1 = safe_divide(
        snapshot.working_capital,
        snapshot.total_assets,
        "X1: Working Capital / Total Assets",
    )?;
    let x2 = safe_divide(
        snapshot.retained_earnings,
        snapshot.total_assets,
        "X2: Retained Earnings / Total Assets",
    )?;
    let x3 = safe_divide(snapshot.ebit, snapshot.total_assets, "X3: EBIT / Total Assets")?;
    let x4 = safe_divide(
        snapshot.market_value_of_equity,
        snapshot.total_liabilities,
        "X4: Market Value of Equity / Total Liabilities",
    )?;
    let x5 = safe_divide(snapshot.sales, snapshot.total_assets, "X5: Sales / Total Assets")?;

    let z = Z_COEFF_X1 * x1 + Z_COEFF_X2 * x2 + Z_COEFF_X3 * x3 + Z_COEFF_X4 * x4 + Z_COEFF_X5 * x5;

    let breakdown = ZScoreBreakdown {
        working_capital_ratio: x1,
        retained_earnings_ratio: x2,
        ebit_ratio: x3,
        equity_to_liabilities_ratio: x4,
        sales_ratio: x5,
        z_score: z,
        tier: classify_tier(z),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "methodology": "Altman Z-Score bankruptcy prediction (original public-company coefficients)",
        "formula": "Z = 1.2*X1 + 1.4*X2 + 3.3*X3 + 0.6*X4 + 1.0*X5",
        "tiers": "High < 1.8 <= Medium < 3.0 <= Low",
    });

    Ok(with_metadata(
        "Altman Z-Score",
        &assumptions,
        warnings,
        elapsed,
        breakdown,
    ))
}

/// Classify a Z value into the three informational tiers.
pub fn classify_tier(z: Decimal) -> RiskTier {
    if z < TIER_HIGH_BELOW {
        RiskTier::High
    } else if z >= TIER_LOW_FROM {
        RiskTier::Low
    } else {
        RiskTier::Medium
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_snapshot(snapshot: &FinancialSnapshot) -> CreditRiskResult<()> {
    if snapshot.total_assets <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "total_assets".into(),
            reason: "Total assets must be positive.".into(),
        });
    }
    if snapshot.total_liabilities <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "total_liabilities".into(),
            reason: "Total liabilities must be positive.".into(),
        });
    }
    if snapshot.market_value_of_equity < Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "market_value_of_equity".into(),
            reason: "Market value of equity cannot be negative.".into(),
        });
    }
    if snapshot.sales < Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "sales".into(),
            reason: "Sales cannot be negative.".into(),
        });
    }
    Ok(())
}

fn safe_divide(numerator: Decimal, denominator: Decimal, context: &str) -> CreditRiskResult<Decimal> {
    if denominator.is_zero() {
        return Err(CreditRiskError::DivisionByZero {
            context: context.to_string(),
        });
    }
    Ok(numerator / denominator)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
