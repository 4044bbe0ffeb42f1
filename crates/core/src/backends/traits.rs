use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::report::ReportRequest;

/// What a backend hands back once a report file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Human-readable file size, e.g. "2.4 МБ"
    pub size: String,
}

/// Trait abstraction for report rendering backends.
///
/// The dashboard only knows this seam: it spawns `render` on the runtime,
/// and turns the result into a history entry. Swapping the simulated
/// backend for a real renderer touches nothing else.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Produce the report file for `request`, requested on `requested_on`.
    async fn render(
        &self,
        request: &ReportRequest,
        requested_on: NaiveDate,
    ) -> Result<RenderedReport, CoreError>;
}
