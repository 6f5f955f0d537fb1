//! Drone spray report model.
//!
//! Takes the simplified property map produced by `ingest` and binds it into
//! a typed [`Report`], then wraps the report with its Delta-T chart in a
//! [`ReportContext`] ready for the HTML template.
//!
//! ## Pieces
//!
//! - [`keys`]: fixed table from report field to canonical property key
//! - [`assemble`] / [`assemble_with`]: the binding itself, total over any input
//! - [`format_br_date`]: `dd/mm/YYYY[ HH:MM:SS]` rendering of date fields
//! - [`split_drone_model`]: `"Agras T40 - PS 07"` → model and fleet prefix
//! - [`parse_products`]: one product and dosage per line of free text
//! - [`render_delta_t_png`]: the spray-condition chart
//!
//! ## Example
//!
//! ```
//! use report::{assemble, ReportSource};
//! use serde_json::json;
//!
//! let page = json!({
//!     "Nome da Fazenda": {"type": "title", "title": [{"plain_text": "Boa Vista"}]},
//!     "Drone": {"type": "select", "select": {"name": "Agras T40 - PS 07"}}
//! });
//! let report = assemble(&ReportSource::new(page.as_object().unwrap()));
//!
//! assert_eq!(report.general.farm, "Boa Vista");
//! assert_eq!(report.team.drone.prefix.as_deref(), Some("07"));
//! ```

mod assemble;
pub mod chart;
mod context;
mod date;
mod drone;
mod error;
pub mod keys;
mod model;
mod products;

pub use crate::assemble::{assemble, assemble_with, products_text, AssembleOptions, ReportSource};
pub use crate::chart::{delta_t, delta_t_data_uri, render_delta_t_png, wet_bulb};
pub use crate::context::{farm_code, ReportContext, DEFAULT_FARM_CODE};
pub use crate::date::{format_br_date, DateInput};
pub use crate::drone::split_drone_model;
pub use crate::error::ChartError;
pub use crate::model::{
    Climate, Company, Drone, GeneralInfo, Geography, Logo, Media, Product, Report, Team,
    DEFAULT_FOOTER,
};
pub use crate::products::{parse_products, UNSPECIFIED_DOSAGE};
