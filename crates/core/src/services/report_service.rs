use chrono::NaiveDate;
use log::info;

use crate::models::portfolio::Portfolio;
use crate::models::report::{format_ru_date, ReportDescriptor, ReportKind, ReportRequest};

/// Builds report descriptors and maintains the report history.
///
/// History is ordered most recent first; a new report always lands at index 0.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Display name of a report generated on `date`, e.g. "Полный отчет - 17.10.2026".
    pub fn report_name(&self, kind: ReportKind, date: NaiveDate) -> String {
        format!("{} - {}", kind.title(), format_ru_date(date))
    }

    /// Assemble the descriptor for a finished render.
    pub fn build_descriptor(
        &self,
        id: u64,
        request: &ReportRequest,
        created_on: NaiveDate,
        size: impl Into<String>,
    ) -> ReportDescriptor {
        ReportDescriptor {
            id,
            name: self.report_name(request.kind, created_on),
            created_on,
            kind: request.kind,
            format: request.format,
            size: size.into(),
        }
    }

    /// Put a freshly generated report at the top of the history.
    pub fn prepend(&self, portfolio: &mut Portfolio, report: ReportDescriptor) {
        info!("Report #{} '{}' ({}) added to history", report.id, report.name, report.size);
        portfolio.reports.insert(0, report);
    }

    /// Delete a report from the history. Returns it, or `None` if absent.
    pub fn delete(&self, portfolio: &mut Portfolio, id: u64) -> Option<ReportDescriptor> {
        let idx = portfolio.reports.iter().position(|r| r.id == id)?;
        let removed = portfolio.reports.remove(idx);
        info!("Report #{id} deleted from history");
        Some(removed)
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
