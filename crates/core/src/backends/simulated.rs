use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::report::ReportRequest;
use crate::models::settings::Settings;
use super::traits::{RenderedReport, ReportBackend};

/// Stand-in for a real report renderer.
///
/// Waits a fixed delay, then reports a random size in `[min_mb, max_mb)`.
/// No file is produced and the portfolio contents are not consulted.
#[derive(Debug, Clone)]
pub struct SimulatedReportBackend {
    delay: Duration,
    min_mb: f64,
    max_mb: f64,
}

impl SimulatedReportBackend {
    pub fn new(delay: Duration, min_mb: f64, max_mb: f64) -> Self {
        Self { delay, min_mb, max_mb }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.report_delay(),
            settings.report_size_min_mb,
            settings.report_size_max_mb,
        )
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fabricate a size label such as "3.1 МБ".
    pub fn size_label(&self) -> Result<String, CoreError> {
        let megabytes = self.min_mb + random_unit()? * (self.max_mb - self.min_mb);
        Ok(format!("{megabytes:.1} МБ"))
    }
}

impl Default for SimulatedReportBackend {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[async_trait]
impl ReportBackend for SimulatedReportBackend {
    fn name(&self) -> &str {
        "Simulated"
    }

    async fn render(
        &self,
        request: &ReportRequest,
        requested_on: NaiveDate,
    ) -> Result<RenderedReport, CoreError> {
        debug!(
            "Simulating {} {} report for {requested_on} ({:?})",
            request.kind, request.format, self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(RenderedReport {
            size: self.size_label()?,
        })
    }
}

/// Uniform random number in `[0, 1)` from 53 bits of OS entropy.
fn random_unit() -> Result<f64, CoreError> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| CoreError::ReportFailed(format!("Failed to generate random size: {e}")))?;
    let bits = u64::from_le_bytes(bytes) >> 11;
    Ok(bits as f64 / (1u64 << 53) as f64)
}
