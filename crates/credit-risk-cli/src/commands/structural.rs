use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_risk_core::structural::{self, StructuralInput};

use crate::input;

/// Arguments for the Merton default-probability estimate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DefaultProbArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current market capitalisation
    #[arg(long)]
    pub market_cap: Option<Decimal>,

    /// Total liabilities (face value of debt)
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Annualised equity volatility (decimal, e.g. 0.3)
    #[arg(long, alias = "sigma")]
    pub equity_vol: Option<Decimal>,

    /// Time horizon in years
    #[arg(long, default_value = "1")]
    pub horizon_years: Decimal,

    /// Risk-free rate (decimal)
    #[arg(long, default_value = "0")]
    pub risk_free_rate: Decimal,
}

/// Arguments for a standalone Black-Scholes call price
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BlackScholesArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Underlying value (firm asset value proxy)
    #[arg(long, alias = "v")]
    pub asset_value: Option<Decimal>,

    /// Strike (face value of debt)
    #[arg(long, alias = "d")]
    pub debt_face: Option<Decimal>,

    /// Annualised volatility (decimal)
    #[arg(long, alias = "sigma")]
    pub volatility: Option<Decimal>,

    /// Maturity in years
    #[arg(long, default_value = "1")]
    pub maturity: Decimal,

    /// Risk-free rate (decimal)
    #[arg(long, default_value = "0")]
    pub risk_free_rate: Decimal,
}

/// JSON shape of a standalone call-pricing request.
#[derive(serde::Deserialize)]
struct CallTerms {
    asset_value: Decimal,
    debt_face: Decimal,
    volatility: Decimal,
    #[serde(default = "default_maturity")]
    maturity: Decimal,
    #[serde(default)]
    risk_free_rate: Decimal,
}

fn default_maturity() -> Decimal {
    Decimal::ONE
}

pub fn run_default_prob(args: DefaultProbArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let structural_input: StructuralInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        StructuralInput {
            market_cap: args
                .market_cap
                .ok_or("--market-cap is required (or provide --input)")?,
            total_liabilities: args
                .total_liabilities
                .ok_or("--total-liabilities is required (or provide --input)")?,
            equity_vol: args
                .equity_vol
                .ok_or("--equity-vol is required (or provide --input)")?,
            horizon_years: args.horizon_years,
            risk_free_rate: args.risk_free_rate,
        }
    };

    let result = structural::default_probability(&structural_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_black_scholes(args: BlackScholesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: CallTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CallTerms {
            asset_value: args
                .asset_value
                .ok_or("--asset-value is required (or provide --input)")?,
            debt_face: args
                .debt_face
                .ok_or("--debt-face is required (or provide --input)")?,
            volatility: args
                .volatility
                .ok_or("--volatility is required (or provide --input)")?,
            maturity: args.maturity,
            risk_free_rate: args.risk_free_rate,
        }
    };

    let price = structural::black_scholes_call(
        terms.asset_value,
        terms.debt_face,
        terms.volatility,
        terms.maturity,
        terms.risk_free_rate,
    )?;

    Ok(serde_json::json!({
        "call_value": price,
        "asset_value": terms.asset_value,
        "debt_face": terms.debt_face,
        "volatility": terms.volatility,
        "maturity": terms.maturity,
        "risk_free_rate": terms.risk_free_rate,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_call_terms_defaults() {
        let terms: CallTerms = serde_json::from_str(
            r#"{"asset_value":"100","debt_face":"80","volatility":"0.2"}"#,
        )
        .unwrap();
        assert_eq!(terms.maturity, dec!(1));
        assert_eq!(terms.risk_free_rate, Decimal::ZERO);
    }

    #[test]
    fn test_black_scholes_from_json_file() {
        let path = std::env::temp_dir().join("crisk_call_terms.json");
        std::fs::write(
            &path,
            r#"{"asset_value":"100","debt_face":"80","volatility":"0.2","maturity":"1","risk_free_rate":"0.05"}"#,
        )
        .unwrap();

        let args = BlackScholesArgs {
            input: Some(path.to_string_lossy().into_owned()),
            asset_value: None,
            debt_face: None,
            volatility: None,
            maturity: dec!(1),
            risk_free_rate: Decimal::ZERO,
        };
        let value = run_black_scholes(args).unwrap();
        let call: Decimal = value["call_value"].as_str().unwrap().parse().unwrap();
        assert!((call - dec!(24.589)).abs() < dec!(0.05), "C = {}", call);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_flags_point_at_input_option() {
        let args = BlackScholesArgs {
            input: None,
            asset_value: None,
            debt_face: None,
            volatility: None,
            maturity: dec!(1),
            risk_free_rate: Decimal::ZERO,
        };
        let err = run_black_scholes(args).unwrap_err();
        assert!(err.to_string().contains("--asset-value"));
    }
}
