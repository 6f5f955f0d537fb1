//! Report domain model.
//!
//! Built once per request by [`assemble`](crate::assemble) and never mutated
//! afterwards. Everything serializes, so the HTML renderer can consume the
//! model directly; derived display strings are stored as fields for the same
//! reason.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default footer line of the rendered report.
pub const DEFAULT_FOOTER: &str = "GetOffice - Gestão em drones agrícolas";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub company: Company,
    pub general: GeneralInfo,
    pub geography: Geography,
    pub team: Team,
    pub media: Media,
    pub products: Vec<Product>,
    pub climate: Climate,
}

/// Logos shown in the page header and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub header_logo_url: String,
    pub footer_logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub name: String,
    pub cnpj: String,
    pub logo: Option<Logo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralInfo {
    /// Raw start value as stored in Notion.
    pub start: String,
    /// Raw end value as stored in Notion.
    pub end: String,
    /// `dd/mm/YYYY[ HH:MM:SS]` rendering of `start`.
    pub start_display: String,
    /// `dd/mm/YYYY[ HH:MM:SS]` rendering of `end`.
    pub end_display: String,
    pub issued: NaiveDate,
    /// `dd/mm/YYYY` rendering of `issued`.
    pub issued_display: String,
    pub city: String,
    pub client: String,
    pub farm: String,
    pub crops: Vec<String>,
    pub hectares: f64,
    /// First crop and hectares, e.g. `"Soja - 120.5"`.
    pub crop_hectares: String,
    pub doc_number: String,
    pub footer_msg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geography {
    pub coordinate: String,
    pub hectares: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drone {
    /// Combined value as typed in Notion (`"DJI Agras T40 - PS 07"`).
    pub raw: String,
    pub model: String,
    pub prefix: Option<String>,
    pub nozzle: Option<String>,
    pub droplet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub pilot: String,
    pub caar: String,
    pub assistant: Option<String>,
    pub flight_height: String,
    pub drone: Drone,
}

/// Image URLs per report section. Only `http`/`https` URLs survive assembly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Media {
    /// Application map.
    pub map: Vec<String>,
    /// Water-sensitive paper.
    pub target: Vec<String>,
    /// Tank mix / product labels.
    pub product: Vec<String>,
    /// Anemometer and thermo-hygrometer readings.
    pub climate: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: String,
    pub dosage: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Climate {
    /// Air temperature in °C.
    pub temperature: Option<f64>,
    /// Relative humidity in %.
    pub humidity: Option<f64>,
    /// Wind speed in km/h.
    pub wind: Option<f64>,
}

impl Climate {
    /// Delta-T for the recorded reading, when both inputs exist.
    pub fn delta_t(&self) -> Option<f64> {
        match (self.temperature, self.humidity) {
            (Some(t), Some(rh)) => Some(crate::chart::delta_t(t, rh)),
            _ => None,
        }
    }
}
