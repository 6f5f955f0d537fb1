//! Offline companion to the report server: simplifies a saved Notion page
//! and prints the result as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dronereport::{assemble_page, page_properties, render_delta_t_png, simplify_map, AssembleOptions};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dronereport", version, about = "Simplify a Notion page JSON dump")]
struct Cli {
    /// Page JSON file (`-` reads stdin). Either a full page object or a bare
    /// properties map.
    page: PathBuf,

    /// Print the assembled report instead of the simplified property map.
    #[arg(long)]
    report: bool,

    /// Also write the Delta-T chart PNG to this path.
    #[arg(long, value_name = "PATH")]
    chart: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let page = read_page(&cli.page)?;
    let properties = page_properties(&page).context("page has no properties object")?;

    let output = if cli.report || cli.chart.is_some() {
        let report = assemble_page(&page, &AssembleOptions::default())?;
        if let Some(path) = &cli.chart {
            let png = render_delta_t_png(report.climate.temperature, report.climate.humidity)?;
            fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "chart written");
        }
        if cli.report {
            serde_json::to_value(&report)?
        } else {
            simplify_map(properties).to_json()
        }
    } else {
        simplify_map(properties).to_json()
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn read_page(path: &PathBuf) -> Result<Value> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&text).context("page is not valid JSON")
}
