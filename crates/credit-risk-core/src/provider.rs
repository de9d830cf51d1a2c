//! Market-data collaborator contract.
//!
//! The engine consumes statement data, market capitalisation and price
//! history keyed by ticker; where that data comes from is out of scope here.
//! Provider failures must surface as `UpstreamData` errors, never degrade to
//! zeroed figures.

use serde::{Deserialize, Serialize};

use crate::{types::*, CreditRiskResult};

/// Everything the provider must supply for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyData {
    /// Most recent reporting period's statement figures.
    pub snapshot: FinancialSnapshot,
    /// Current market capitalisation.
    pub market_cap: Money,
    /// Historical daily closes for volatility estimation.
    pub close_history: Vec<PriceBar>,
}

/// Source of per-ticker financial and market data.
///
/// Implementations do their own retries and caching; the engine treats every
/// failure as final for the ticker in question.
pub trait MarketDataProvider {
    fn company_data(&self, ticker: &str) -> CreditRiskResult<CompanyData>;
}
