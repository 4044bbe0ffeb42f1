use serde::{Deserialize, Serialize};

use super::asset::AssetClass;

// The core supplies these series; the frontend charting layer only renders them.

/// One month of the stacked area chart on the overview tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationHistoryPoint {
    /// Short month label ("Янв", "Фев", ...)
    pub month: String,
    pub equity: f64,
    pub bond: f64,
    pub currency: f64,
    pub other: f64,
}

impl AllocationHistoryPoint {
    #[must_use]
    pub fn value_for(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::Bond => self.bond,
            AssetClass::Currency => self.currency,
            AssetClass::Other => self.other,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.equity + self.bond + self.currency + self.other
    }
}

/// Risk score and expected return of one asset class (bar chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub asset_class: AssetClass,
    pub risk: f64,
    pub return_pct: f64,
}

/// Portfolio return of one month (line chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    pub month: String,
    pub return_pct: f64,
}

/// Portfolio vs benchmark performance of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub month: String,
    pub portfolio: f64,
    pub benchmark: f64,
    pub risk: f64,
}

/// One bubble of the risk/return scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturnPoint {
    pub name: String,
    pub risk: f64,
    pub return_pct: f64,
    /// Bubble size
    pub size: f64,
}

/// A reference index, used only as a display label in comparison charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    pub code: String,
    pub label: String,
}

/// One slice of an allocation pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub asset_class: AssetClass,
    /// Share of the total, in percent
    pub percent: f64,
    /// Fill colour (hex)
    pub color: String,
}

impl AllocationSlice {
    pub fn new(asset_class: AssetClass, percent: f64) -> Self {
        Self {
            asset_class,
            percent,
            color: asset_class.color().to_string(),
        }
    }
}
