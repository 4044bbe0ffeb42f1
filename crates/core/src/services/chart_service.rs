use crate::models::asset::AssetClass;
use crate::models::chart::{
    AllocationHistoryPoint, AllocationSlice, Benchmark, MonthlyReturn, PerformancePoint,
    RiskPoint, RiskReturnPoint,
};

/// Time intervals offered by the analysis tab.
pub const TIME_INTERVALS: [&str; 7] = ["1M", "3M", "6M", "1Г", "3Г", "5Г", "MAX"];

/// Supplies the chart series shown on the dashboard.
///
/// These are fixed demonstration series: nothing here is derived from the
/// holdings. Allocation computed from real holdings lives in `AnalyticsService`.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Six months of value per asset class (overview area chart).
    pub fn allocation_history(&self) -> Vec<AllocationHistoryPoint> {
        [
            ("Янв", 4000.0, 2400.0, 1000.0, 500.0),
            ("Фев", 4200.0, 2600.0, 900.0, 400.0),
            ("Мар", 3800.0, 2800.0, 950.0, 450.0),
            ("Апр", 4300.0, 2700.0, 1200.0, 600.0),
            ("Май", 4500.0, 2500.0, 1100.0, 550.0),
            ("Июн", 4800.0, 2300.0, 1000.0, 500.0),
        ]
        .into_iter()
        .map(|(month, equity, bond, currency, other)| AllocationHistoryPoint {
            month: month.to_string(),
            equity,
            bond,
            currency,
            other,
        })
        .collect()
    }

    /// Risk score and return per asset class.
    pub fn risk_by_class(&self) -> Vec<RiskPoint> {
        [
            (AssetClass::Equity, 85.0, 12.0),
            (AssetClass::Bond, 40.0, 5.0),
            (AssetClass::Currency, 60.0, 7.0),
            (AssetClass::Other, 70.0, 9.0),
        ]
        .into_iter()
        .map(|(asset_class, risk, return_pct)| RiskPoint {
            asset_class,
            risk,
            return_pct,
        })
        .collect()
    }

    pub fn monthly_returns(&self) -> Vec<MonthlyReturn> {
        [("Янв", 2.8), ("Фев", 3.2), ("Мар", -1.5), ("Апр", 4.1), ("Май", 3.8), ("Июн", 5.2)]
            .into_iter()
            .map(|(month, return_pct)| MonthlyReturn {
                month: month.to_string(),
                return_pct,
            })
            .collect()
    }

    /// Twelve months of portfolio vs benchmark returns with risk.
    pub fn performance_history(&self) -> Vec<PerformancePoint> {
        [
            ("Янв", 5.2, 4.8, 8.3),
            ("Фев", 3.8, 2.1, 9.2),
            ("Мар", -2.3, -3.5, 15.7),
            ("Апр", 4.7, 4.1, 10.2),
            ("Май", 2.9, 2.4, 7.5),
            ("Июн", 6.1, 5.3, 9.1),
            ("Июл", 1.8, 2.2, 6.8),
            ("Авг", 3.5, 3.3, 8.0),
            ("Сен", -1.2, -0.8, 12.3),
            ("Окт", 4.2, 3.9, 10.8),
            ("Ноя", 5.3, 4.7, 9.4),
            ("Дек", 3.7, 3.2, 7.9),
        ]
        .into_iter()
        .map(|(month, portfolio, benchmark, risk)| PerformancePoint {
            month: month.to_string(),
            portfolio,
            benchmark,
            risk,
        })
        .collect()
    }

    /// Portfolio and reference instruments on the risk/return plane.
    pub fn risk_return_points(&self) -> Vec<RiskReturnPoint> {
        [
            ("Портфель", 12.7, 8.4, 100.0),
            ("S&P 500", 15.2, 9.8, 80.0),
            ("РТС", 20.5, 10.2, 80.0),
            ("Облигации РФ", 5.8, 5.1, 80.0),
            ("Золото", 18.3, 7.2, 80.0),
            ("Биткойн", 65.2, 28.7, 80.0),
        ]
        .into_iter()
        .map(|(name, risk, return_pct, size)| RiskReturnPoint {
            name: name.to_string(),
            risk,
            return_pct,
            size,
        })
        .collect()
    }

    /// Target allocation pie shown on the analysis tab.
    pub fn allocation_pie(&self) -> Vec<AllocationSlice> {
        [
            (AssetClass::Equity, 52.0),
            (AssetClass::Bond, 32.0),
            (AssetClass::Currency, 10.0),
            (AssetClass::Other, 6.0),
        ]
        .into_iter()
        .map(|(class, percent)| AllocationSlice::new(class, percent))
        .collect()
    }

    pub fn benchmarks(&self) -> Vec<Benchmark> {
        [
            ("RTS", "Индекс РТС"),
            ("MOEX", "Индекс ММВБ"),
            ("SP500", "S&P 500"),
            ("NASDAQ", "NASDAQ"),
            ("EUROSTOXX", "EURO STOXX 50"),
        ]
        .into_iter()
        .map(|(code, label)| Benchmark {
            code: code.to_string(),
            label: label.to_string(),
        })
        .collect()
    }

    /// Find a benchmark by code (case-insensitive).
    pub fn benchmark(&self, code: &str) -> Option<Benchmark> {
        self.benchmarks()
            .into_iter()
            .find(|b| b.code.eq_ignore_ascii_case(code))
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
