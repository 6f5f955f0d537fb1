use crate::error::ServerResult;
use crate::notion::normalize_page_id;
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::response::Html;
use report::AssembleOptions;
use std::sync::Arc;
use std::time::Instant;

/// Renders the spray report for a Notion page (GET /drone/{page_id}).
pub async fn drone_report(
    State(state): State<Arc<ServerState>>,
    Path(page_id): Path<String>,
) -> ServerResult<Html<String>> {
    let start = Instant::now();
    let page_id = normalize_page_id(&page_id)?;

    let properties = state.source.fetch_properties(&page_id).await?;

    let options = AssembleOptions {
        logo: state.config.logo(),
        ..AssembleOptions::default()
    };
    let pdf_service_url = state.config.pdf_service_url.clone();
    // Chart rasterization is CPU bound; keep it off the async workers.
    let context = tokio::task::spawn_blocking(move || {
        dronereport::build_report_context(&properties, &options, &pdf_service_url)
    })
    .await??;
    let html = state.renderer.render(&context)?;

    tracing::info!(
        page_id = %page_id,
        farm = %context.report.general.farm,
        bytes = html.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "report_rendered"
    );
    Ok(Html(html))
}
