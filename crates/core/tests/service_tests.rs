// ═══════════════════════════════════════════════════════════════════
// Service Tests: PortfolioService, AnalyticsService, ReportService,
// ChartService, SimulatedReportBackend
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::time::Duration;

use portfolio_dashboard_core::backends::simulated::SimulatedReportBackend;
use portfolio_dashboard_core::backends::traits::ReportBackend;
use portfolio_dashboard_core::errors::CoreError;
use portfolio_dashboard_core::models::asset::AssetClass;
use portfolio_dashboard_core::models::holding::{Holding, HoldingDraft};
use portfolio_dashboard_core::models::portfolio::Portfolio;
use portfolio_dashboard_core::models::report::{ReportFormat, ReportKind, ReportRequest};
use portfolio_dashboard_core::models::settings::Settings;
use portfolio_dashboard_core::services::analytics_service::AnalyticsService;
use portfolio_dashboard_core::services::chart_service::{ChartService, TIME_INTERVALS};
use portfolio_dashboard_core::services::portfolio_service::PortfolioService;
use portfolio_dashboard_core::services::report_service::ReportService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn ids(holdings: &[&Holding]) -> Vec<u64> {
    holdings.iter().map(|h| h.id).collect()
}

fn draft(name: &str, ticker: &str, quantity: &str, price: &str) -> HoldingDraft {
    HoldingDraft::new(name, ticker, AssetClass::Equity, quantity, price)
}

fn parse_size_mb(label: &str) -> f64 {
    label.strip_suffix(" МБ").unwrap().parse().unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioService: filter
// ═══════════════════════════════════════════════════════════════════

mod filter {
    use super::*;

    #[test]
    fn empty_query_returns_everything_in_order() {
        let p = Portfolio::demo();
        let result = PortfolioService::new().filter(&p.holdings, "");
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn matches_cyrillic_name_case_insensitively() {
        let p = Portfolio::demo();
        let result = PortfolioService::new().filter(&p.holdings, "СБЕР");
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn matches_ticker_case_insensitively() {
        let p = Portfolio::demo();
        let result = PortfolioService::new().filter(&p.holdings, "usd");
        assert_eq!(ids(&result), vec![4]);
    }

    #[test]
    fn preserves_relative_order() {
        let p = Portfolio::demo();
        let result = PortfolioService::new().filter(&p.holdings, "акции");
        assert_eq!(ids(&result), vec![1, 2, 5]);
    }

    #[test]
    fn name_or_ticker_either_matches() {
        let p = Portfolio::demo();
        // "sber" ticker, "eur" ticker; Cyrillic names never contain Latin 'e'
        let result = PortfolioService::new().filter(&p.holdings, "e");
        assert_eq!(ids(&result), vec![1, 6]);
    }

    #[test]
    fn no_match_returns_empty() {
        let p = Portfolio::demo();
        assert!(PortfolioService::new().filter(&p.holdings, "zzz").is_empty());
    }

    #[test]
    fn included_and_excluded_partition_by_match() {
        let p = Portfolio::demo();
        let service = PortfolioService::new();
        for query in ["а", "RU", "26", "ОФЗ", "x", "Евро"] {
            let result = service.filter(&p.holdings, query);
            let q = query.to_lowercase();
            let matches = |h: &Holding| {
                h.name.to_lowercase().contains(&q) || h.ticker.to_lowercase().contains(&q)
            };
            for h in &p.holdings {
                let included = result.iter().any(|r| r.id == h.id);
                assert_eq!(included, matches(h), "query {query:?}, holding {}", h.ticker);
            }
            let mut sorted = ids(&result);
            sorted.sort_unstable();
            assert_eq!(ids(&result), sorted, "order preserved for {query:?}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioService: total
// ═══════════════════════════════════════════════════════════════════

mod total {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(PortfolioService::new().total_value(&[]), 0.0);
    }

    #[test]
    fn two_holdings_example() {
        let holdings = vec![
            Holding::new(1, "A", "A", AssetClass::Equity, 150.0, 315.45),
            Holding::new(2, "B", "B", AssetClass::Equity, 200.0, 172.37),
        ];
        assert!(approx(PortfolioService::new().total_value(&holdings), 81791.5));
    }

    #[test]
    fn demo_total() {
        let p = Portfolio::demo();
        assert!(approx(PortfolioService::new().total_value(&p.holdings), 334677.75));
    }

    #[test]
    fn uses_recorded_value_not_current_price() {
        let mut h = Holding::new(1, "A", "A", AssetClass::Equity, 10.0, 5.0);
        h.price = 1000.0;
        assert!(approx(PortfolioService::new().total_value(&[h]), 50.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioService: add / remove
// ═══════════════════════════════════════════════════════════════════

mod mutation {
    use super::*;

    #[test]
    fn add_valid_holding_appends_with_next_id() {
        let mut p = Portfolio::demo();
        let id = PortfolioService::new()
            .add_holding(&mut p, &draft("X", "X", "10", "5"))
            .unwrap();
        assert_eq!(id, 8);
        assert_eq!(p.holdings.len(), 8);
        let last = p.holdings.last().unwrap();
        assert_eq!(last.id, 8);
        assert!(approx(last.value, 50.0));
        assert_eq!(last.change_percent, 0.0);
    }

    #[test]
    fn add_to_empty_portfolio_starts_at_one() {
        let mut p = Portfolio::default();
        let id = PortfolioService::new()
            .add_holding(&mut p, &draft("X", "X", "1", "1"))
            .unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn add_trims_text_fields() {
        let mut p = Portfolio::default();
        PortfolioService::new()
            .add_holding(&mut p, &draft("  Лукойл ", " LKOH ", " 3 ", "7000"))
            .unwrap();
        assert_eq!(p.holdings[0].name, "Лукойл");
        assert_eq!(p.holdings[0].ticker, "LKOH");
        assert!(approx(p.holdings[0].value, 21000.0));
    }

    #[test]
    fn add_accepts_decimal_comma() {
        let mut p = Portfolio::default();
        PortfolioService::new()
            .add_holding(&mut p, &draft("A", "A", "2,5", "4"))
            .unwrap();
        assert!(approx(p.holdings[0].quantity, 2.5));
        assert!(approx(p.holdings[0].value, 10.0));
    }

    #[test]
    fn empty_ticker_is_rejected_and_store_unchanged() {
        let mut p = Portfolio::demo();
        let err = PortfolioService::new()
            .add_holding(&mut p, &draft("X", "", "10", "5"))
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingField("ticker")));
        assert_eq!(p.holdings.len(), 7);
        assert_eq!(p.next_holding_id, 8);
    }

    #[test]
    fn each_required_field_is_checked() {
        let service = PortfolioService::new();
        let mut p = Portfolio::default();
        let cases = [
            (draft("", "X", "1", "1"), "name"),
            (draft("X", "X", "", "1"), "quantity"),
            (draft("X", "X", "1", "   "), "price"),
        ];
        for (input, field) in cases {
            match service.add_holding(&mut p, &input) {
                Err(CoreError::MissingField(f)) => assert_eq!(f, field),
                other => panic!("expected MissingField({field}), got {other:?}"),
            }
        }
        assert!(p.holdings.is_empty());
    }

    #[test]
    fn malformed_number_is_rejected_not_nan() {
        let mut p = Portfolio::default();
        let err = PortfolioService::new()
            .add_holding(&mut p, &draft("X", "X", "abc", "5"))
            .unwrap_err();
        match err {
            CoreError::InvalidNumber { field, value, .. } => {
                assert_eq!(field, "quantity");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
        assert!(p.holdings.is_empty());
    }

    #[test]
    fn non_finite_and_non_positive_numbers_are_rejected() {
        let service = PortfolioService::new();
        let mut p = Portfolio::default();
        for bad in ["NaN", "inf", "0", "-3"] {
            let err = service.add_holding(&mut p, &draft("X", "X", "1", bad)).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidNumber { field: "price", .. }),
                "{bad}: {err:?}"
            );
        }
        assert!(p.holdings.is_empty());
        assert_eq!(p.next_holding_id, 1);
    }

    #[test]
    fn remove_existing_returns_it() {
        let mut p = Portfolio::demo();
        let removed = PortfolioService::new().remove_holding(&mut p, 3).unwrap();
        assert_eq!(removed.ticker, "SU26220RMFS9");
        assert_eq!(p.holdings.len(), 6);
        assert!(p.holdings.iter().all(|h| h.id != 3));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut p = Portfolio::demo();
        assert!(PortfolioService::new().remove_holding(&mut p, 99).is_none());
        assert_eq!(p.holdings.len(), 7);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let service = PortfolioService::new();
        let mut p = Portfolio::demo();
        service.remove_holding(&mut p, 2);
        let id = service.add_holding(&mut p, &draft("X", "X", "1", "1")).unwrap();
        assert_eq!(id, 8);
        service.remove_holding(&mut p, 8);
        let id = service.add_holding(&mut p, &draft("Y", "Y", "1", "1")).unwrap();
        assert_eq!(id, 9);

        let mut all: Vec<u64> = p.holdings.iter().map(|h| h.id).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), p.holdings.len());
    }

    #[test]
    fn get_holding_by_id() {
        let p = Portfolio::demo();
        let service = PortfolioService::new();
        assert_eq!(service.get_holding(&p, 5).unwrap().ticker, "YNDX");
        assert!(service.get_holding(&p, 0).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService
// ═══════════════════════════════════════════════════════════════════

mod analytics {
    use super::*;

    #[test]
    fn percent_of_total() {
        let a = AnalyticsService::new();
        assert!(approx(a.percent_of_total(25.0, 200.0), 12.5));
        assert_eq!(a.percent_of_total(10.0, 0.0), 0.0);
    }

    #[test]
    fn allocation_by_class_on_demo() {
        let p = Portfolio::demo();
        let slices = AnalyticsService::new().allocation_by_class(&p.holdings);
        let classes: Vec<AssetClass> = slices.iter().map(|s| s.asset_class).collect();
        assert_eq!(
            classes,
            vec![AssetClass::Equity, AssetClass::Bond, AssetClass::Currency]
        );
        let total = 334677.75;
        assert!(approx(slices[0].percent, 167291.5 / total * 100.0));
        assert!(approx(slices[1].percent, 25861.25 / total * 100.0));
        assert!(approx(slices[2].percent, 141525.0 / total * 100.0));
        let sum: f64 = slices.iter().map(|s| s.percent).sum();
        assert!(approx(sum, 100.0));
    }

    #[test]
    fn allocation_of_empty_is_empty() {
        assert!(AnalyticsService::new().allocation_by_class(&[]).is_empty());
    }

    #[test]
    fn summary_on_demo() {
        let p = Portfolio::demo();
        let s = AnalyticsService::new().get_portfolio_summary(&p.holdings, "RUB");
        assert_eq!(s.currency, "RUB");
        assert_eq!(s.holding_count, 7);
        assert!(approx(s.total_value, 334677.75));
        assert_eq!(s.top_gainer.unwrap().ticker, "YNDX");
        assert_eq!(s.top_loser.unwrap().ticker, "GAZP");
        assert_eq!(s.allocation.len(), 3);
    }

    #[test]
    fn summary_weighted_change() {
        let holdings = vec![
            Holding::new(1, "A", "A", AssetClass::Equity, 1.0, 300.0).with_change(2.0),
            Holding::new(2, "B", "B", AssetClass::Bond, 1.0, 100.0).with_change(-2.0),
        ];
        let s = AnalyticsService::new().get_portfolio_summary(&holdings, "RUB");
        // (300*2 + 100*-2) / 400
        assert!(approx(s.weighted_change_pct, 1.0));
    }

    #[test]
    fn summary_of_empty() {
        let s = AnalyticsService::new().get_portfolio_summary(&[], "USD");
        assert_eq!(s.holding_count, 0);
        assert_eq!(s.total_value, 0.0);
        assert_eq!(s.weighted_change_pct, 0.0);
        assert!(s.top_gainer.is_none());
        assert!(s.top_loser.is_none());
        assert!(s.allocation.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// ReportService
// ═══════════════════════════════════════════════════════════════════

mod reports {
    use super::*;

    #[test]
    fn report_name_uses_kind_and_ru_date() {
        let service = ReportService::new();
        assert_eq!(
            service.report_name(ReportKind::Extended, d(2026, 10, 17)),
            "Расширенный отчет - 17.10.2026"
        );
    }

    #[test]
    fn build_descriptor_copies_request() {
        let request = ReportRequest::new(ReportKind::Full, ReportFormat::Csv, d(2025, 1, 1), d(2025, 2, 1));
        let r = ReportService::new().build_descriptor(4, &request, d(2025, 2, 2), "1.0 МБ");
        assert_eq!(r.id, 4);
        assert_eq!(r.name, "Полный отчет - 02.02.2025");
        assert_eq!(r.kind, ReportKind::Full);
        assert_eq!(r.format, ReportFormat::Csv);
        assert_eq!(r.size, "1.0 МБ");
    }

    #[test]
    fn prepend_inserts_at_index_zero_and_keeps_order() {
        let mut p = Portfolio::demo();
        let before: Vec<u64> = p.reports.iter().map(|r| r.id).collect();
        let service = ReportService::new();
        let request = ReportRequest::last_month(d(2025, 6, 1));
        let r = service.build_descriptor(4, &request, d(2025, 6, 1), "2.0 МБ");
        service.prepend(&mut p, r);

        assert_eq!(p.reports.len(), 4);
        assert_eq!(p.reports[0].id, 4);
        let after: Vec<u64> = p.reports[1..].iter().map(|r| r.id).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn delete_report() {
        let mut p = Portfolio::demo();
        let service = ReportService::new();
        assert_eq!(service.delete(&mut p, 2).unwrap().format, ReportFormat::Xlsx);
        assert!(service.delete(&mut p, 2).is_none());
        let remaining: Vec<u64> = p.reports.iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![1, 3]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod charts {
    use super::*;

    #[test]
    fn allocation_history_has_six_months() {
        let series = ChartService::new().allocation_history();
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, "Янв");
        assert_eq!(series[5].equity, 4800.0);
    }

    #[test]
    fn performance_history_covers_a_year() {
        let series = ChartService::new().performance_history();
        assert_eq!(series.len(), 12);
        assert_eq!(series[2].portfolio, -2.3);
        assert_eq!(series[11].month, "Дек");
    }

    #[test]
    fn allocation_pie_sums_to_hundred() {
        let sum: f64 = ChartService::new().allocation_pie().iter().map(|s| s.percent).sum();
        assert_eq!(sum, 100.0);
    }

    #[test]
    fn risk_series() {
        let charts = ChartService::new();
        assert_eq!(charts.risk_by_class().len(), 4);
        assert_eq!(charts.monthly_returns()[2].return_pct, -1.5);
        let scatter = charts.risk_return_points();
        assert_eq!(scatter[0].name, "Портфель");
        assert_eq!(scatter[0].size, 100.0);
    }

    #[test]
    fn benchmarks_lookup() {
        let charts = ChartService::new();
        assert_eq!(charts.benchmarks().len(), 5);
        assert_eq!(charts.benchmark("moex").unwrap().label, "Индекс ММВБ");
        assert!(charts.benchmark("DAX").is_none());
        assert_eq!(TIME_INTERVALS.len(), 7);
    }
}

// ═══════════════════════════════════════════════════════════════════
// SimulatedReportBackend
// ═══════════════════════════════════════════════════════════════════

mod simulated_backend {
    use super::*;

    #[test]
    fn from_settings() {
        let settings = Settings {
            report_delay_ms: 250,
            ..Settings::default()
        };
        let backend = SimulatedReportBackend::from_settings(&settings);
        assert_eq!(backend.delay(), Duration::from_millis(250));
        assert_eq!(backend.name(), "Simulated");
    }

    #[test]
    fn size_label_within_bounds() {
        let backend = SimulatedReportBackend::default();
        for _ in 0..200 {
            let label = backend.size_label().unwrap();
            let mb = parse_size_mb(&label);
            assert!((0.5..=5.5).contains(&mb), "{label}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn render_waits_for_delay() {
        let backend = SimulatedReportBackend::new(Duration::from_secs(2), 1.0, 2.0);
        let request = ReportRequest::last_month(d(2025, 6, 1));
        let start = tokio::time::Instant::now();
        let rendered = backend.render(&request, d(2025, 6, 1)).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
        let mb = parse_size_mb(&rendered.size);
        assert!((1.0..=2.0).contains(&mb));
    }
}
