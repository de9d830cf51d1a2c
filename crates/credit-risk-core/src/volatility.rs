//! Annualised equity volatility from historical daily closes.
//!
//! The engine itself accepts sigma as a precomputed input; this helper sits
//! upstream of it, turning a provider's close-price history into the
//! annualised figure the structural model expects.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::math;
use crate::{types::*, CreditRiskError, CreditRiskResult};

/// Annualisation factor for daily observations.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Annualised volatility: sample standard deviation of daily simple returns
/// scaled by sqrt(252).
///
/// Requires at least three positive closes (two returns); fewer is
/// `InsufficientData`, a non-positive close is `InvalidInput`.
pub fn annualized_volatility(history: &[PriceBar]) -> CreditRiskResult<Rate> {
    if history.len() < 3 {
        return Err(CreditRiskError::InsufficientData(format!(
            "Volatility estimation needs at least 3 closes, got {}.",
            history.len()
        )));
    }
    for bar in history {
        if bar.close <= Decimal::ZERO {
            return Err(CreditRiskError::InvalidInput {
                field: "close".into(),
                reason: format!("Close on {} must be positive.", bar.date),
            });
        }
    }

    let returns: Vec<Decimal> = history
        .windows(2)
        .map(|w| w[1].close / w[0].close - Decimal::ONE)
        .collect();

    let n = Decimal::from(returns.len());
    let mean = returns.iter().sum::<Decimal>() / n;
    let sum_sq: Decimal = returns.iter().map(|r| (*r - mean) * (*r - mean)).sum();
    // Sample variance (n - 1 denominator)
    let variance = sum_sq / (n - Decimal::ONE);
    let daily = math::sqrt(variance);

    Ok(daily * math::sqrt(Decimal::from(TRADING_DAYS_PER_YEAR)))
}
