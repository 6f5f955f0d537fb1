//! Error types produced by the report crate.
//!
//! Assembly itself never fails: missing or malformed fields surface as empty
//! values. Only chart encoding can.

use thiserror::Error;

/// Failure while producing the Delta-T chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to encode chart PNG: {0}")]
    Encode(#[from] image::ImageError),
}
