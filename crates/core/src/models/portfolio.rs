use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::AssetClass;
use super::holding::Holding;
use super::report::{ReportDescriptor, ReportFormat, ReportKind};
use super::settings::Settings;

/// The session state. Owned by the dashboard facade and passed by
/// reference to services; there is no process-wide copy.
///
/// Contains: holdings (display order), report history (newest first),
/// the id counters for both, and settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// All holdings, in insertion (= display) order
    pub holdings: Vec<Holding>,

    /// Next id handed out to a new holding. Only ever grows.
    pub next_holding_id: u64,

    /// Generated reports, most recent first
    pub reports: Vec<ReportDescriptor>,

    /// Next id handed out to a new report. Only ever grows.
    pub next_report_id: u64,

    /// Session settings (currency, report simulation)
    pub settings: Settings,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            holdings: Vec::new(),
            next_holding_id: 1,
            reports: Vec::new(),
            next_report_id: 1,
            settings: Settings::default(),
        }
    }
}

impl Portfolio {
    /// Build a portfolio from existing records, starting both counters past
    /// the highest id already present.
    pub fn from_parts(
        holdings: Vec<Holding>,
        reports: Vec<ReportDescriptor>,
        settings: Settings,
    ) -> Self {
        let mut portfolio = Self {
            holdings,
            reports,
            settings,
            ..Self::default()
        };
        portfolio.reconcile_ids();
        portfolio
    }

    /// Raise both id counters past every id already in use.
    pub(crate) fn reconcile_ids(&mut self) {
        let max_holding = self.holdings.iter().map(|h| h.id).max().unwrap_or(0);
        let max_report = self.reports.iter().map(|r| r.id).max().unwrap_or(0);
        self.next_holding_id = self.next_holding_id.max(max_holding + 1);
        self.next_report_id = self.next_report_id.max(max_report + 1);
    }

    /// The demo portfolio shown when the dashboard first opens.
    pub fn demo() -> Self {
        Self::from_parts(demo_holdings(), demo_reports(), Settings::default())
    }

    /// Hand out the next holding id.
    pub(crate) fn allocate_holding_id(&mut self) -> u64 {
        let id = self.next_holding_id;
        self.next_holding_id += 1;
        id
    }

    /// Hand out the next report id.
    pub(crate) fn allocate_report_id(&mut self) -> u64 {
        let id = self.next_report_id;
        self.next_report_id += 1;
        id
    }
}

fn demo_holdings() -> Vec<Holding> {
    use AssetClass::*;
    vec![
        Holding::new(1, "Акции Сбербанк", "SBER", Equity, 150.0, 315.45).with_change(2.35),
        Holding::new(2, "Акции Газпром", "GAZP", Equity, 200.0, 172.37).with_change(-1.18),
        Holding::new(3, "ОФЗ 26220", "SU26220RMFS9", Bond, 15.0, 1012.55).with_change(0.35),
        Holding::new(4, "Доллар США", "USD", Currency, 1000.0, 91.45).with_change(0.75),
        Holding::new(5, "Акции Яндекс", "YNDX", Equity, 30.0, 2850.00).with_change(3.42),
        Holding::new(6, "Евро", "EUR", Currency, 500.0, 100.15).with_change(-0.22),
        Holding::new(7, "ВТБ Корпоративный", "RU000A101RT5", Bond, 10.0, 1067.30).with_change(0.12),
    ]
}

fn demo_reports() -> Vec<ReportDescriptor> {
    let report = |id, name: &str, (y, m, d), kind, format, size: &str| ReportDescriptor {
        id,
        name: name.to_string(),
        created_on: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        kind,
        format,
        size: size.to_string(),
    };
    vec![
        report(1, "Ежемесячный отчет - Апрель 2025", (2025, 5, 1), ReportKind::Summary, ReportFormat::Pdf, "1.2 МБ"),
        report(2, "Квартальный отчет - Q1 2025", (2025, 4, 5), ReportKind::Extended, ReportFormat::Xlsx, "3.5 МБ"),
        report(3, "Годовой отчет - 2024", (2025, 1, 15), ReportKind::Full, ReportFormat::Pdf, "5.8 МБ"),
    ]
}
