//! Merton structural credit model.
//!
//! Equity is treated as a call option on firm assets with the face value of
//! debt as strike. Asset value is proxied as market cap + total liabilities
//! rather than solved jointly with asset volatility; this is a documented
//! simplification of full structural estimation, carried through from the
//! model definition.
//!
//! Key formulas:
//!   d1 = (ln(V/D) + (r + sigma^2/2) * T) / (sigma * sqrt(T))
//!   d2 = d1 - sigma * sqrt(T)
//!   Call price: C = V*N(d1) - D*exp(-r*T)*N(d2)
//!   Default probability: PD = N(-d2)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::math;
use crate::{types::*, CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for the structural default-probability estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralInput {
    /// Current market capitalisation (>= 0).
    pub market_cap: Money,
    /// Face value of debt; acts as the option strike. Must be > 0.
    pub total_liabilities: Money,
    /// Annualised equity volatility (decimal). Must be > 0.
    pub equity_vol: Rate,
    /// Time horizon in years. Must be > 0.
    pub horizon_years: Years,
    /// Risk-free rate. Defaults to zero when the source omits it.
    #[serde(default)]
    pub risk_free_rate: Rate,
}

/// Informational default-risk band from the Merton probability.
///
/// The credit decision only consults the Low boundary (0.05); the full
/// classification is exposed for reporting, mirroring the Z-Score tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultRiskTier {
    High,
    Moderate,
    Low,
}

impl std::fmt::Display for DefaultRiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High default risk"),
            Self::Moderate => write!(f, "Moderate default risk"),
            Self::Low => write!(f, "Low default risk"),
        }
    }
}

/// Output of the structural model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralOutput {
    /// Asset value proxy V = market cap + total liabilities.
    pub asset_value: Money,
    /// Default barrier D (total liabilities).
    pub debt_face: Money,
    pub d1: Decimal,
    /// d2 = d1 - sigma * sqrt(T).
    pub d2: Decimal,
    /// Risk-neutral probability that assets fall below the barrier: N(-d2).
    pub default_probability: Decimal,
    pub default_risk: DefaultRiskTier,
    /// Implied equity value as a call on assets (optional reporting).
    pub call_value: Money,
}

/// PD strictly above this is the High band.
pub const DEFAULT_RISK_HIGH_ABOVE: Decimal = dec!(0.10);
/// PD strictly below this is the Low band.
pub const DEFAULT_RISK_LOW_BELOW: Decimal = dec!(0.05);

/// Classify a default probability into the three informational bands.
pub fn classify_default_risk(pd: Decimal) -> DefaultRiskTier {
    if pd > DEFAULT_RISK_HIGH_ABOVE {
        DefaultRiskTier::High
    } else if pd < DEFAULT_RISK_LOW_BELOW {
        DefaultRiskTier::Low
    } else {
        DefaultRiskTier::Moderate
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Black-Scholes European call price.
///
/// `v` is the underlying value, `d` the strike, `sigma` the annualised
/// volatility, `t` the maturity in years, `r` the risk-free rate.
pub fn black_scholes_call(
    v: Money,
    d: Money,
    sigma: Rate,
    t: Years,
    r: Rate,
) -> CreditRiskResult<Money> {
    validate_terms(v, d, sigma, t)?;
    let (d1, d2) = distances(v, d, sigma, t, r);
    let discount = math::exp(-r * t);
    Ok(v * math::norm_cdf(d1) - d * discount * math::norm_cdf(d2))
}

/// Estimate the default probability N(-d2) for one company.
pub fn default_probability(
    input: &StructuralInput,
) -> CreditRiskResult<ComputationOutput<StructuralOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.market_cap < Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "market_cap".into(),
            reason: "Market capitalisation cannot be negative.".into(),
        });
    }

    let v = input.market_cap + input.total_liabilities;
    let d = input.total_liabilities;
    let sigma = input.equity_vol;
    let t = input.horizon_years;
    let r = input.risk_free_rate;

    validate_terms(v, d, sigma, t)?;

    if sigma > dec!(5.0) {
        warnings.push(format!(
            "equity_vol ({}) exceeds 500%; input is likely mis-scaled.",
            sigma
        ));
    }

    let (d1, d2) = distances(v, d, sigma, t, r);
    let discount = math::exp(-r * t);
    let call_value = v * math::norm_cdf(d1) - d * discount * math::norm_cdf(d2);
    let pd = math::norm_cdf(-d2);

    let output = StructuralOutput {
        asset_value: v,
        debt_face: d,
        d1,
        d2,
        default_probability: pd,
        default_risk: classify_default_risk(pd),
        call_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "methodology": "Merton structural model, Black-Scholes call on firm assets",
        "asset_value_proxy": "V = market_cap + total_liabilities (not solved jointly with asset vol)",
        "default_probability": "PD = N(-d2), risk-neutral measure",
        "default_risk_bands": "Low < 0.05 <= Moderate <= 0.10 < High",
        "normal_cdf": "Abramowitz & Stegun rational approximation",
    });

    Ok(with_metadata(
        "Merton default probability",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// d1 and d2 for underlying v, strike d. Caller validates v, d, sigma, t > 0.
fn distances(v: Money, d: Money, sigma: Rate, t: Years, r: Rate) -> (Decimal, Decimal) {
    let sqrt_t = math::sqrt(t);
    let d1 = (math::ln(v / d) + (r + sigma * sigma / dec!(2)) * t) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;
    (d1, d2)
}

fn validate_terms(v: Money, d: Money, sigma: Rate, t: Years) -> CreditRiskResult<()> {
    if d <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "total_liabilities".into(),
            reason: "Debt face value must be positive (strike of the implicit option).".into(),
        });
    }
    if v <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "asset_value".into(),
            reason: "Asset value must be positive for ln(V/D) to be defined.".into(),
        });
    }
    if sigma <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "equity_vol".into(),
            reason: "Volatility must be positive.".into(),
        });
    }
    if t <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidInput {
            field: "horizon_years".into(),
            reason: "Time horizon must be positive.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    fn base_input() -> StructuralInput {
        StructuralInput {
            market_cap: dec!(10000),
            total_liabilities: dec!(5000),
            equity_vol: dec!(0.3),
            horizon_years: dec!(1),
            risk_free_rate: Decimal::ZERO,
        }
    }

    #[test]
    fn test_asset_value_proxy() {
        let out = default_probability(&base_input()).unwrap();
        assert_eq!(out.result.asset_value, dec!(15000));
        assert_eq!(out.result.debt_face, dec!(5000));
    }

    #[test]
    fn test_distances_for_worked_example() {
        // V = 15000, D = 5000, sigma = 0.3, T = 1, r = 0:
        // d1 = (ln(3) + 0.045) / 0.3 = 1.1436122.../0.3 = 3.81204...
        // d2 = d1 - 0.3 = 3.51204...
        let out = default_probability(&base_input()).unwrap();
        assert!(approx_eq(out.result.d1, dec!(3.81204), dec!(0.0001)));
        assert!(approx_eq(out.result.d2, dec!(3.51204), dec!(0.0001)));
        // PD = N(-3.512) ~ 0.000222
        assert!(out.result.default_probability < dec!(0.001));
        assert!(out.result.default_probability > Decimal::ZERO);
    }

    #[test]
    fn test_d2_equals_d1_minus_sigma_sqrt_t() {
        let input = StructuralInput {
            horizon_years: dec!(4),
            ..base_input()
        };
        let out = default_probability(&input).unwrap().result;
        // sqrt(4) = 2, so d2 = d1 - 0.6
        assert!(approx_eq(out.d2, out.d1 - dec!(0.6), dec!(0.0000001)));
    }

    #[test]
    fn test_pd_in_unit_interval() {
        let inputs = [
            base_input(),
            StructuralInput {
                market_cap: dec!(1),
                total_liabilities: dec!(100000),
                ..base_input()
            },
            StructuralInput {
                equity_vol: dec!(2.5),
                ..base_input()
            },
        ];
        for input in inputs {
            let pd = default_probability(&input).unwrap().result.default_probability;
            assert!(pd >= Decimal::ZERO && pd <= Decimal::ONE, "PD {} out of range", pd);
        }
    }

    #[test]
    fn test_pd_monotone_in_volatility() {
        let mut prev = dec!(-1);
        for sigma in [dec!(0.3), dec!(0.6), dec!(1.0), dec!(1.5)] {
            let input = StructuralInput {
                equity_vol: sigma,
                ..base_input()
            };
            let pd = default_probability(&input).unwrap().result.default_probability;
            assert!(pd > prev, "PD should rise with sigma: {} vs {}", pd, prev);
            prev = pd;
        }
    }

    #[test]
    fn test_pd_rises_as_assets_approach_debt() {
        let mut prev = Decimal::ZERO;
        for market_cap in [dec!(20000), dec!(5000), dec!(1000), dec!(100)] {
            let input = StructuralInput {
                market_cap,
                ..base_input()
            };
            let pd = default_probability(&input).unwrap().result.default_probability;
            assert!(
                pd > prev,
                "PD should rise as V falls toward D: {} vs {}",
                pd,
                prev
            );
            prev = pd;
        }
    }

    #[test]
    fn test_call_price_known_value() {
        // V=100, K=80, sigma=0.2, T=1, r=0.05 => C ~ 24.589 (standard BS tables)
        let c = black_scholes_call(dec!(100), dec!(80), dec!(0.2), dec!(1), dec!(0.05)).unwrap();
        assert!(approx_eq(c, dec!(24.589), dec!(0.05)), "C = {}", c);
    }

    #[test]
    fn test_call_price_within_arbitrage_bounds() {
        let v = dec!(15000);
        let d = dec!(5000);
        let r = dec!(0.02);
        let t = dec!(1);
        let c = black_scholes_call(v, d, dec!(0.3), t, r).unwrap();
        let intrinsic = v - d * math::exp(-r * t);
        assert!(c >= intrinsic);
        assert!(c <= v);
    }

    #[test]
    fn test_call_approaches_intrinsic_for_tiny_vol() {
        let v = dec!(15000);
        let d = dec!(5000);
        let c = black_scholes_call(v, d, dec!(0.001), dec!(1), Decimal::ZERO).unwrap();
        assert!(approx_eq(c, v - d, dec!(0.01)), "C = {}", c);
    }

    #[test]
    fn test_zero_market_cap_accepted() {
        // V = D is still > 0, so the model prices; PD is near 50% plus drift
        let input = StructuralInput {
            market_cap: Decimal::ZERO,
            ..base_input()
        };
        let out = default_probability(&input).unwrap().result;
        assert!(out.default_probability > dec!(0.4));
    }

    #[test]
    fn test_negative_market_cap_rejected() {
        let input = StructuralInput {
            market_cap: dec!(-1),
            ..base_input()
        };
        assert!(default_probability(&input).is_err());
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let input = StructuralInput {
            equity_vol: Decimal::ZERO,
            ..base_input()
        };
        let err = default_probability(&input).unwrap_err();
        match err {
            CreditRiskError::InvalidInput { field, .. } => assert_eq!(field, "equity_vol"),
            other => panic!("Expected InvalidInput for equity_vol, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let input = StructuralInput {
            horizon_years: Decimal::ZERO,
            ..base_input()
        };
        assert!(default_probability(&input).is_err());
    }

    #[test]
    fn test_zero_liabilities_rejected() {
        let input = StructuralInput {
            total_liabilities: Decimal::ZERO,
            ..base_input()
        };
        let err = default_probability(&input).unwrap_err();
        match err {
            CreditRiskError::InvalidInput { field, .. } => {
                assert_eq!(field, "total_liabilities")
            }
            other => panic!("Expected InvalidInput for total_liabilities, got {other:?}"),
        }
    }

    #[test]
    fn test_default_risk_band_boundaries() {
        // Low below 0.05, High above 0.10, both boundaries land in Moderate
        assert_eq!(classify_default_risk(Decimal::ZERO), DefaultRiskTier::Low);
        assert_eq!(classify_default_risk(dec!(0.049)), DefaultRiskTier::Low);
        assert_eq!(classify_default_risk(dec!(0.05)), DefaultRiskTier::Moderate);
        assert_eq!(classify_default_risk(dec!(0.10)), DefaultRiskTier::Moderate);
        assert_eq!(classify_default_risk(dec!(0.101)), DefaultRiskTier::High);
        assert_eq!(classify_default_risk(dec!(0.9)), DefaultRiskTier::High);
    }

    #[test]
    fn test_output_carries_default_risk_band() {
        let out = default_probability(&base_input()).unwrap();
        assert_eq!(out.result.default_risk, DefaultRiskTier::Low);

        // Thin equity cushion pushes the PD past the High boundary
        let stressed = StructuralInput {
            market_cap: dec!(100),
            ..base_input()
        };
        let out = default_probability(&stressed).unwrap();
        assert!(out.result.default_probability > dec!(0.10));
        assert_eq!(out.result.default_risk, DefaultRiskTier::High);
    }

    #[test]
    fn test_excessive_vol_warns_but_computes() {
        let input = StructuralInput {
            equity_vol: dec!(6.0),
            ..base_input()
        };
        let out = default_probability(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("500%")));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let out = default_probability(&base_input()).unwrap();
        let json = serde_json::to_string(&out.result).unwrap();
        let _: StructuralOutput = serde_json::from_str(&json).unwrap();
    }

    #[test]
    fn test_risk_free_rate_serde_default() {
        let input: StructuralInput = serde_json::from_str(
            r#"{"market_cap":"10000","total_liabilities":"5000","equity_vol":"0.3","horizon_years":"1"}"#,
        )
        .unwrap();
        assert_eq!(input.risk_free_rate, Decimal::ZERO);
    }
}
