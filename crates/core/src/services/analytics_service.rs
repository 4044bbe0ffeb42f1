use std::cmp::Ordering;

use crate::models::analytics::PortfolioSummary;
use crate::models::asset::AssetClass;
use crate::models::chart::AllocationSlice;
use crate::models::holding::Holding;
use crate::services::portfolio_service::PortfolioService;

/// Computes allocation percentages and the portfolio summary.
///
/// Everything is recomputed from the holdings passed in; nothing is cached.
pub struct AnalyticsService {
    portfolio_service: PortfolioService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            portfolio_service: PortfolioService::new(),
        }
    }

    /// `value / total × 100`, or `0.0` when the total is not positive.
    pub fn percent_of_total(&self, value: f64, total: f64) -> f64 {
        if total > 0.0 {
            (value / total) * 100.0
        } else {
            0.0
        }
    }

    /// Share of the portfolio held in each asset class.
    ///
    /// Only classes that have at least one holding appear, in `AssetClass::ALL` order.
    pub fn allocation_by_class(&self, holdings: &[Holding]) -> Vec<AllocationSlice> {
        let total = self.portfolio_service.total_value(holdings);

        AssetClass::ALL
            .into_iter()
            .filter_map(|class| {
                let mut in_class = holdings.iter().filter(|h| h.asset_class == class).peekable();
                in_class.peek()?;
                let class_value: f64 = in_class.map(|h| h.value).sum();
                Some(AllocationSlice::new(class, self.percent_of_total(class_value, total)))
            })
            .collect()
    }

    /// Generate a summary of the given holdings.
    ///
    /// Computes:
    /// - Total value and holding count
    /// - Allocation by asset class
    /// - Value-weighted change percentage
    /// - Top gainer / loser by change percentage
    pub fn get_portfolio_summary(&self, holdings: &[Holding], currency: &str) -> PortfolioSummary {
        let total_value = self.portfolio_service.total_value(holdings);

        let weighted_change_pct = if total_value > 0.0 {
            holdings
                .iter()
                .map(|h| h.value * h.change_percent)
                .sum::<f64>()
                / total_value
        } else {
            0.0
        };

        let by_change = |a: &&Holding, b: &&Holding| {
            a.change_percent
                .partial_cmp(&b.change_percent)
                .unwrap_or(Ordering::Equal)
        };
        let top_gainer = holdings.iter().max_by(by_change).cloned();
        let top_loser = holdings.iter().min_by(by_change).cloned();

        PortfolioSummary {
            currency: currency.to_string(),
            holding_count: holdings.len(),
            total_value,
            weighted_change_pct,
            allocation: self.allocation_by_class(holdings),
            top_gainer,
            top_loser,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
