//! Everything the HTML template needs, in one serializable value.

use serde::Serialize;

use crate::assemble::{assemble_with, products_text, AssembleOptions, ReportSource};
use crate::chart::delta_t_data_uri;
use crate::error::ChartError;
use crate::model::Report;

/// File-name stem used when the farm name is blank.
pub const DEFAULT_FARM_CODE: &str = "relatorio";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContext {
    pub report: Report,
    /// Delta-T chart as a PNG data URI.
    pub chart_data_uri: String,
    /// Farm name with spaces replaced by `-`, used for the PDF file name.
    pub farm_code: String,
    /// Raw start value of the application.
    pub today_date: String,
    pub pdf_service_url: String,
    /// Products text as typed, before parsing.
    pub products_raw: String,
}

impl ReportContext {
    /// Wraps an assembled report, rendering its Delta-T chart.
    pub fn new(
        report: Report,
        products_raw: String,
        pdf_service_url: impl Into<String>,
    ) -> Result<Self, ChartError> {
        let chart_data_uri =
            delta_t_data_uri(report.climate.temperature, report.climate.humidity)?;
        Ok(ReportContext {
            farm_code: farm_code(&report.general.farm),
            today_date: report.general.start.clone(),
            chart_data_uri,
            pdf_service_url: pdf_service_url.into(),
            products_raw,
            report,
        })
    }

    /// Assembles the report from `source` and wraps it.
    pub fn from_source(
        source: &ReportSource<'_>,
        options: &AssembleOptions,
        pdf_service_url: impl Into<String>,
    ) -> Result<Self, ChartError> {
        let report = assemble_with(source, options);
        ReportContext::new(report, products_text(source), pdf_service_url)
    }
}

/// `"Fazenda Boa Vista"` → `"Fazenda-Boa-Vista"`; blank → `"relatorio"`.
pub fn farm_code(farm: &str) -> String {
    let farm = farm.trim();
    if farm.is_empty() {
        DEFAULT_FARM_CODE.to_string()
    } else {
        farm.replace(' ', "-")
    }
}
