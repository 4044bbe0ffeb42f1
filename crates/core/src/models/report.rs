use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Depth of a generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Summary,
    Extended,
    /// Full report including analytics
    Full,
}

impl ReportKind {
    /// Title used when naming a freshly generated report.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Summary => "Краткий отчет",
            ReportKind::Extended => "Расширенный отчет",
            ReportKind::Full => "Полный отчет",
        }
    }

    /// Short badge label for the report history table.
    #[must_use]
    pub fn badge(&self) -> &'static str {
        match self {
            ReportKind::Summary => "Краткий",
            ReportKind::Extended => "Расширенный",
            ReportKind::Full => "Полный",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Summary => write!(f, "summary"),
            ReportKind::Extended => write!(f, "extended"),
            ReportKind::Full => write!(f, "full"),
        }
    }
}

/// Output file format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Xlsx,
    Csv,
}

impl ReportFormat {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "PDF",
            ReportFormat::Xlsx => "Excel (XLSX)",
            ReportFormat::Csv => "CSV",
        }
    }

    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A section that can be included in or left out of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportSection {
    Overview,
    Performance,
    Assets,
    Risks,
    Recommendations,
    Forecast,
    TaxAnalysis,
}

/// Which sections the user ticked in the report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSections {
    pub overview: bool,
    pub performance: bool,
    pub assets: bool,
    pub risks: bool,
    pub recommendations: bool,
    pub forecast: bool,
    pub tax_analysis: bool,
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            overview: true,
            performance: true,
            assets: true,
            risks: true,
            recommendations: true,
            forecast: false,
            tax_analysis: false,
        }
    }
}

impl ReportSections {
    fn slot(&mut self, section: ReportSection) -> &mut bool {
        match section {
            ReportSection::Overview => &mut self.overview,
            ReportSection::Performance => &mut self.performance,
            ReportSection::Assets => &mut self.assets,
            ReportSection::Risks => &mut self.risks,
            ReportSection::Recommendations => &mut self.recommendations,
            ReportSection::Forecast => &mut self.forecast,
            ReportSection::TaxAnalysis => &mut self.tax_analysis,
        }
    }

    /// Flip one section on or off. Returns the new state.
    pub fn toggle(&mut self, section: ReportSection) -> bool {
        let slot = self.slot(section);
        *slot = !*slot;
        *slot
    }

    #[must_use]
    pub fn is_included(&self, section: ReportSection) -> bool {
        match section {
            ReportSection::Overview => self.overview,
            ReportSection::Performance => self.performance,
            ReportSection::Assets => self.assets,
            ReportSection::Risks => self.risks,
            ReportSection::Recommendations => self.recommendations,
            ReportSection::Forecast => self.forecast,
            ReportSection::TaxAnalysis => self.tax_analysis,
        }
    }
}

/// Everything the report form submits.
///
/// The date range is carried along for a future renderer; the simulated
/// backend does not use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub format: ReportFormat,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    pub sections: ReportSections,
}

impl ReportRequest {
    pub fn new(kind: ReportKind, format: ReportFormat, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            kind,
            format,
            from,
            to,
            sections: ReportSections::default(),
        }
    }

    /// Form defaults: summary PDF covering the month up to `today`.
    pub fn last_month(today: NaiveDate) -> Self {
        let from = today.checked_sub_months(Months::new(1)).unwrap_or(today);
        Self::new(ReportKind::default(), ReportFormat::default(), from, today)
    }
}

/// A previously generated export artifact, as listed in the report history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDescriptor {
    pub id: u64,

    /// Display name, e.g. "Краткий отчет - 17.10.2026"
    pub name: String,

    pub created_on: NaiveDate,

    pub kind: ReportKind,

    pub format: ReportFormat,

    /// Free-text size, e.g. "1.2 МБ"
    pub size: String,
}

impl ReportDescriptor {
    /// Creation date in the Russian short form (`dd.mm.yyyy`).
    #[must_use]
    pub fn date_label(&self) -> String {
        format_ru_date(self.created_on)
    }
}

/// Format a date the way the ru-RU locale prints short dates.
#[must_use]
pub fn format_ru_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
