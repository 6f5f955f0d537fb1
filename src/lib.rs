//! Workspace umbrella crate for drone spray reports.
//!
//! Stitches property simplification (`ingest`) and report assembly
//! (`report`) together so callers can go from a Notion page to a render
//! context with a single entry point.
//!
//! ```
//! use dronereport::{build_report_context, AssembleOptions};
//! use serde_json::json;
//!
//! let page = json!({
//!     "Nome da Fazenda": {"type": "title", "title": [{"plain_text": "Boa Vista"}]},
//!     "Temperatura": {"type": "number", "number": 25},
//!     "Umidade": {"type": "number", "number": 60}
//! });
//! let ctx = build_report_context(page.as_object().unwrap(), &AssembleOptions::default(), "/pdf")
//!     .unwrap();
//! assert_eq!(ctx.farm_code, "Boa-Vista");
//! ```

pub use canonical::{collapse_whitespace, normalize, to_identifier, NormalizeMode};
pub use ingest::{
    find_property, find_simplified, page_properties, simplify, simplify_map, simplify_value,
    Property, SimpleValue, SimplifiedMap,
};
pub use report::{
    assemble, assemble_with, products_text, render_delta_t_png, AssembleOptions, ChartError,
    Report, ReportContext, ReportSource,
};

use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur while turning a page into a render context.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("page has no properties object")]
    MissingProperties,

    #[error("delta-t chart rendering failed: {0}")]
    Chart(#[from] ChartError),
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_simplify(&self, latency: Duration, properties: usize);
    fn record_assemble(&self, latency: Duration);
    fn record_render_context(&self, latency: Duration, result: Result<(), &PipelineError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_simplify(self, properties: usize) {
        self.recorder
            .record_simplify(self.start.elapsed(), properties);
    }

    fn record_assemble(self) {
        self.recorder.record_assemble(self.start.elapsed());
    }

    fn record_render_context(self, result: Result<(), &PipelineError>) {
        self.recorder
            .record_render_context(self.start.elapsed(), result);
    }
}

/// Simplifies `properties`, assembles the report and renders its chart.
pub fn build_report_context(
    properties: &Map<String, Value>,
    options: &AssembleOptions,
    pdf_service_url: &str,
) -> Result<ReportContext, PipelineError> {
    let simplify_metrics = MetricsSpan::start();
    let simplified = simplify_map(properties);
    if let Some(span) = simplify_metrics {
        span.record_simplify(simplified.len());
    }
    let source = ReportSource::from_parts(properties, simplified);

    let assemble_metrics = MetricsSpan::start();
    let assembled = assemble_with(&source, options);
    if let Some(span) = assemble_metrics {
        span.record_assemble();
    }

    let context_metrics = MetricsSpan::start();
    let result = ReportContext::new(assembled, products_text(&source), pdf_service_url)
        .map_err(PipelineError::from);
    if let Some(span) = context_metrics {
        span.record_render_context(result.as_ref().map(|_| ()));
    }
    result
}

/// Same as [`build_report_context`] for a whole page object.
pub fn build_page_context(
    page: &Value,
    options: &AssembleOptions,
    pdf_service_url: &str,
) -> Result<ReportContext, PipelineError> {
    let properties = page_properties(page).ok_or(PipelineError::MissingProperties)?;
    build_report_context(properties, options, pdf_service_url)
}

/// Assembles the report for a whole page object without rendering the chart.
pub fn assemble_page(page: &Value, options: &AssembleOptions) -> Result<Report, PipelineError> {
    let properties = page_properties(page).ok_or(PipelineError::MissingProperties)?;
    Ok(assemble_with(&ReportSource::new(properties), options))
}
