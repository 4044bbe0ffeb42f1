use serde::{Deserialize, Serialize};

use super::chart::AllocationSlice;
use super::holding::Holding;

/// Summary of the whole portfolio, recomputed from the current holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Currency used for all monetary values
    pub currency: String,

    /// Number of holdings in the portfolio
    pub holding_count: usize,

    /// Sum of every holding's value
    pub total_value: f64,

    /// Value-weighted average of the holdings' change percentages
    pub weighted_change_pct: f64,

    /// Breakdown by asset class, in `AssetClass::ALL` order
    pub allocation: Vec<AllocationSlice>,

    /// Holding with the largest change percentage, if any
    pub top_gainer: Option<Holding>,

    /// Holding with the smallest change percentage, if any
    pub top_loser: Option<Holding>,
}
