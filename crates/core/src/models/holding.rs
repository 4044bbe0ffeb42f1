use serde::{Deserialize, Serialize};

use super::asset::AssetClass;

/// One row of the portfolio: a quantity of a named instrument at a recorded price.
///
/// `value` is fixed at creation (`quantity × price`) and is never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Session-unique identifier, never reused after deletion
    pub id: u64,

    /// Display name (e.g., "Акции Сбербанк")
    pub name: String,

    /// Exchange ticker or ISIN (e.g., "SBER", "SU26220RMFS9")
    pub ticker: String,

    /// Allocation category
    pub asset_class: AssetClass,

    /// Number of units held (> 0)
    pub quantity: f64,

    /// Unit price at the time the holding was recorded (> 0)
    pub price: f64,

    /// Market value at creation: `quantity × price`
    pub value: f64,

    /// Informational daily change, in percent
    #[serde(default)]
    pub change_percent: f64,
}

impl Holding {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        ticker: impl Into<String>,
        asset_class: AssetClass,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            ticker: ticker.into(),
            asset_class,
            quantity,
            price,
            value: quantity * price,
            change_percent: 0.0,
        }
    }

    /// Attach an informational change percentage.
    #[must_use]
    pub fn with_change(mut self, change_percent: f64) -> Self {
        self.change_percent = change_percent;
        self
    }

    /// Case-insensitive substring match against name and ticker.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.ticker.to_lowercase().contains(needle)
    }
}

/// Raw contents of the add-asset form, exactly as typed.
///
/// Nothing here is validated; `PortfolioService::add_holding` does that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingDraft {
    pub name: String,
    pub ticker: String,
    pub asset_class: AssetClass,
    pub quantity: String,
    pub price: String,
}

impl HoldingDraft {
    pub fn new(
        name: impl Into<String>,
        ticker: impl Into<String>,
        asset_class: AssetClass,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            asset_class,
            quantity: quantity.into(),
            price: price.into(),
        }
    }
}
