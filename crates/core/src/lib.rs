pub mod backends;
pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Deserialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

use backends::simulated::SimulatedReportBackend;
use backends::traits::{RenderedReport, ReportBackend};
use errors::CoreError;
use models::{
    analytics::PortfolioSummary,
    asset::AssetClass,
    chart::AllocationSlice,
    holding::{Holding, HoldingDraft},
    portfolio::Portfolio,
    report::{ReportDescriptor, ReportRequest},
    settings::Settings,
};
use services::{
    analytics_service::AnalyticsService, chart_service::ChartService,
    portfolio_service::PortfolioService, report_service::ReportService,
};

/// Main entry point for the Portfolio Dashboard core library.
/// Holds the session state and all services needed to operate on it.
#[must_use]
pub struct PortfolioDashboard {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    analytics_service: AnalyticsService,
    report_service: ReportService,
    chart_service: ChartService,
    backend: Arc<dyn ReportBackend>,
    /// At most one report renders at a time.
    pending: Option<PendingReport>,
}

/// A report render running on the tokio runtime.
///
/// Dropping it aborts the task, so a dashboard torn down mid-render never
/// receives a late completion.
struct PendingReport {
    id: u64,
    request: ReportRequest,
    handle: JoinHandle<Result<RenderedReport, CoreError>>,
}

impl Drop for PendingReport {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("Aborting pending report #{}", self.id);
        }
        self.handle.abort();
    }
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("holdings", &self.portfolio.holdings.len())
            .field("reports", &self.portfolio.reports.len())
            .field("settings", &self.portfolio.settings)
            .field("backend", &self.backend.name())
            .field("generating", &self.is_generating())
            .finish()
    }
}

impl PortfolioDashboard {
    /// Create an empty dashboard with default settings.
    pub fn create_new() -> Self {
        Self::build(Portfolio::default())
    }

    /// Create a dashboard pre-filled with the demo holdings and report history.
    pub fn with_demo_data() -> Self {
        Self::build(Portfolio::demo())
    }

    /// Create a dashboard around an existing portfolio.
    /// The portfolio's settings are validated first.
    /// Id counters are raised past every existing id.
    pub fn from_portfolio(mut portfolio: Portfolio) -> Result<Self, CoreError> {
        portfolio.settings.validate()?;
        portfolio.reconcile_ids();
        Ok(Self::build(portfolio))
    }

    /// Create an empty dashboard with custom (validated) settings.
    pub fn with_settings(settings: Settings) -> Result<Self, CoreError> {
        Self::from_portfolio(Portfolio {
            settings,
            ..Portfolio::default()
        })
    }

    /// Replace the report backend (e.g., with a real renderer).
    pub fn with_backend(mut self, backend: Arc<dyn ReportBackend>) -> Self {
        self.backend = backend;
        self
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// All holdings in display order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    /// Holdings whose name or ticker contains `query` (case-insensitive).
    /// Empty query returns everything.
    #[must_use]
    pub fn search_holdings(&self, query: &str) -> Vec<&Holding> {
        self.portfolio_service.filter(&self.portfolio.holdings, query)
    }

    /// Total market value of the portfolio.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.portfolio_service.total_value(&self.portfolio.holdings)
    }

    #[must_use]
    pub fn get_holding(&self, id: u64) -> Option<&Holding> {
        self.portfolio_service.get_holding(&self.portfolio, id)
    }

    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.portfolio.holdings.len()
    }

    /// Validate the add-asset form and append the new holding.
    /// Returns the id assigned to it.
    pub fn add_holding(&mut self, draft: &HoldingDraft) -> Result<u64, CoreError> {
        self.portfolio_service.add_holding(&mut self.portfolio, draft)
    }

    /// Remove a holding. No-op (returns `None`) if the id is unknown.
    pub fn remove_holding(&mut self, id: u64) -> Option<Holding> {
        self.portfolio_service.remove_holding(&mut self.portfolio, id)
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Share of the portfolio held in one holding, in percent.
    #[must_use]
    pub fn holding_share_pct(&self, id: u64) -> Option<f64> {
        let holding = self.get_holding(id)?;
        Some(self.analytics_service.percent_of_total(holding.value, self.total_value()))
    }

    /// Allocation of the current holdings by asset class.
    #[must_use]
    pub fn allocation_by_class(&self) -> Vec<AllocationSlice> {
        self.analytics_service.allocation_by_class(&self.portfolio.holdings)
    }

    #[must_use]
    pub fn portfolio_summary(&self) -> PortfolioSummary {
        self.analytics_service
            .get_portfolio_summary(&self.portfolio.holdings, &self.portfolio.settings.currency)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Demonstration chart series for the overview and analysis tabs.
    pub fn charts(&self) -> &ChartService {
        &self.chart_service
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Report history, most recent first.
    #[must_use]
    pub fn reports(&self) -> &[ReportDescriptor] {
        &self.portfolio.reports
    }

    /// Default form values for a new report (summary PDF, last month).
    #[must_use]
    pub fn default_report_request(&self) -> ReportRequest {
        ReportRequest::last_month(Self::today())
    }

    /// `true` while a report is rendering (the generate button is disabled).
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Start rendering a report in the background. Returns the id reserved for it.
    ///
    /// Must be called from within a tokio runtime. Fails if another report
    /// is still pending.
    pub fn start_report(&mut self, request: ReportRequest) -> Result<u64, CoreError> {
        if self.pending.is_some() {
            return Err(CoreError::ReportInProgress);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| CoreError::NoRuntime)?;

        let id = self.portfolio.allocate_report_id();
        let requested_on = Self::today();
        let backend = Arc::clone(&self.backend);
        let task_request = request.clone();
        let handle =
            runtime.spawn(async move { backend.render(&task_request, requested_on).await });

        info!(
            "Started report #{id} ({} {}) on backend '{}'",
            request.kind,
            request.format,
            self.backend.name()
        );
        self.pending = Some(PendingReport {
            id,
            request,
            handle,
        });
        Ok(id)
    }

    /// Wait for the pending report and add it to the top of the history.
    /// The entry is dated on completion, not on start.
    ///
    /// Returns `Ok(None)` if nothing is pending. If this future is dropped
    /// before completion the render is aborted.
    pub async fn finish_report(&mut self) -> Result<Option<ReportDescriptor>, CoreError> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(None);
        };

        let rendered = match (&mut pending.handle).await {
            Ok(Ok(rendered)) => rendered,
            Ok(Err(e)) => {
                warn!("Report #{} failed: {e}", pending.id);
                return Err(e);
            }
            Err(e) => {
                let e = CoreError::from(e);
                warn!("Report #{} did not complete: {e}", pending.id);
                return Err(e);
            }
        };

        let descriptor = self.report_service.build_descriptor(
            pending.id,
            &pending.request,
            Self::today(),
            rendered.size,
        );
        self.report_service.prepend(&mut self.portfolio, descriptor.clone());
        Ok(Some(descriptor))
    }

    /// Collect the pending report only if it has already finished.
    pub async fn poll_report(&mut self) -> Result<Option<ReportDescriptor>, CoreError> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.handle.is_finished());
        if ready {
            self.finish_report().await
        } else {
            Ok(None)
        }
    }

    /// Start a report and wait for it (start + finish).
    pub async fn generate_report(
        &mut self,
        request: ReportRequest,
    ) -> Result<ReportDescriptor, CoreError> {
        self.start_report(request)?;
        self.finish_report()
            .await?
            .ok_or(CoreError::ReportCancelled)
    }

    /// Abort the pending report, if any. Returns `true` if one was cancelled.
    pub fn cancel_report(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                info!("Cancelled report #{}", pending.id);
                true
            }
            None => false,
        }
    }

    /// Delete a report from the history.
    pub fn delete_report(&mut self, id: u64) -> Option<ReportDescriptor> {
        self.report_service.delete(&mut self.portfolio, id)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.portfolio.settings
    }

    /// Set the display currency (e.g., "RUB", "USD").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let mut settings = self.portfolio.settings.clone();
        settings.currency = currency.trim().to_uppercase();
        settings.validate()?;
        self.portfolio.settings = settings;
        Ok(())
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all holdings as a JSON string.
    pub fn export_holdings_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.portfolio.holdings)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize holdings to JSON: {e}")))
    }

    /// Export all holdings as a CSV string.
    /// Columns: id, name, ticker, asset_class, quantity, price, value, change_percent
    #[must_use]
    pub fn export_holdings_to_csv(&self) -> String {
        let mut csv = String::from("id,name,ticker,asset_class,quantity,price,value,change_percent\n");
        for h in &self.portfolio.holdings {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                h.id,
                csv_field(&h.name),
                csv_field(&h.ticker),
                h.asset_class,
                h.quantity,
                h.price,
                h.value,
                h.change_percent,
            ));
        }
        csv
    }

    /// Import holdings from a JSON array. Every record is validated first;
    /// if any is invalid, none are added (all-or-nothing).
    /// Imported holdings receive fresh ids and a recomputed value.
    /// Returns the number of holdings imported.
    pub fn import_holdings_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let records: Vec<ImportedHolding> = serde_json::from_str(json)?;

        for (i, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() || record.ticker.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "Holding #{} in import has an empty name or ticker",
                    i + 1
                )));
            }
            let positive = |x: f64| x.is_finite() && x > 0.0;
            if !positive(record.quantity) || !positive(record.price) {
                return Err(CoreError::ValidationError(format!(
                    "Holding #{} ({}) in import must have positive quantity and price",
                    i + 1,
                    record.ticker.trim()
                )));
            }
        }

        let count = records.len();
        for record in records {
            let id = self.portfolio.allocate_holding_id();
            let holding = Holding::new(
                id,
                record.name.trim(),
                record.ticker.trim(),
                record.asset_class,
                record.quantity,
                record.price,
            )
            .with_change(record.change_percent);
            self.portfolio.holdings.push(holding);
        }
        info!("Imported {count} holdings");
        Ok(count)
    }

    /// Export the whole session state as JSON (snapshot for debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    fn build(portfolio: Portfolio) -> Self {
        let backend: Arc<dyn ReportBackend> =
            Arc::new(SimulatedReportBackend::from_settings(&portfolio.settings));

        Self {
            portfolio,
            portfolio_service: PortfolioService::new(),
            analytics_service: AnalyticsService::new(),
            report_service: ReportService::new(),
            chart_service: ChartService::new(),
            backend,
            pending: None,
        }
    }
}

/// One holding as accepted by `import_holdings_from_json`.
/// `id` and `value` may be present (e.g. from an export) but are ignored.
#[derive(Debug, Deserialize)]
struct ImportedHolding {
    name: String,
    ticker: String,
    #[serde(default)]
    asset_class: AssetClass,
    quantity: f64,
    price: f64,
    #[serde(default)]
    change_percent: f64,
}

/// Quote a CSV field if it contains commas, quotes, or line breaks.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
