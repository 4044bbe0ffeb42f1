use log::{debug, info};

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingDraft};
use crate::models::portfolio::Portfolio;

/// Manages the holding list: add, remove, search, total.
///
/// Pure business logic: no I/O, no timers.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Holdings whose name or ticker contains `query` (case-insensitive),
    /// in their original order. An empty query returns every holding.
    pub fn filter<'a>(&self, holdings: &'a [Holding], query: &str) -> Vec<&'a Holding> {
        if query.is_empty() {
            return holdings.iter().collect();
        }
        let needle = query.to_lowercase();
        holdings.iter().filter(|h| h.matches_lowercase(&needle)).collect()
    }

    /// Sum of every holding's recorded value. `0.0` for an empty list.
    pub fn total_value(&self, holdings: &[Holding]) -> f64 {
        holdings.iter().map(|h| h.value).sum()
    }

    /// Validate a draft, turn it into a holding and append it to the portfolio.
    ///
    /// Rules:
    /// - name, ticker, quantity and price must be non-empty (whitespace counts as empty)
    /// - quantity and price must parse as finite numbers greater than zero
    ///
    /// Nothing is appended and no id is consumed when validation fails.
    pub fn add_holding(
        &self,
        portfolio: &mut Portfolio,
        draft: &HoldingDraft,
    ) -> Result<u64, CoreError> {
        Self::require("name", &draft.name)?;
        Self::require("ticker", &draft.ticker)?;
        Self::require("quantity", &draft.quantity)?;
        Self::require("price", &draft.price)?;

        let quantity = Self::parse_positive("quantity", &draft.quantity)?;
        let price = Self::parse_positive("price", &draft.price)?;

        let id = portfolio.allocate_holding_id();
        let holding = Holding::new(
            id,
            draft.name.trim(),
            draft.ticker.trim(),
            draft.asset_class,
            quantity,
            price,
        );
        info!(
            "Added holding #{id} {} ({}) worth {:.2}",
            holding.ticker, holding.asset_class, holding.value
        );
        portfolio.holdings.push(holding);
        Ok(id)
    }

    /// Remove the holding with `id`. Returns it, or `None` if no such holding exists.
    pub fn remove_holding(&self, portfolio: &mut Portfolio, id: u64) -> Option<Holding> {
        let idx = portfolio.holdings.iter().position(|h| h.id == id)?;
        let removed = portfolio.holdings.remove(idx);
        info!("Removed holding #{id} {}", removed.ticker);
        Some(removed)
    }

    /// Look up a holding by id.
    pub fn get_holding<'a>(&self, portfolio: &'a Portfolio, id: u64) -> Option<&'a Holding> {
        portfolio.holdings.iter().find(|h| h.id == id)
    }

    fn require(field: &'static str, value: &str) -> Result<(), CoreError> {
        if value.trim().is_empty() {
            debug!("Rejected holding draft: '{field}' is empty");
            return Err(CoreError::MissingField(field));
        }
        Ok(())
    }

    /// Parse user-entered numeric text. Accepts a comma as decimal separator.
    fn parse_positive(field: &'static str, text: &str) -> Result<f64, CoreError> {
        let normalized = text.trim().replace(',', ".");
        let invalid = |reason: String| CoreError::InvalidNumber {
            field,
            value: text.to_string(),
            reason,
        };

        let number: f64 = normalized.parse().map_err(|e| invalid(format!("{e}")))?;
        if !number.is_finite() {
            return Err(invalid("must be a finite number".into()));
        }
        if number <= 0.0 {
            return Err(invalid("must be greater than zero".into()));
        }
        Ok(number)
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
