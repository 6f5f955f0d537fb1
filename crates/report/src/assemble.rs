//! Binds a simplified property map into the typed [`Report`].

use std::borrow::Cow;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use ingest::{find_simplified, simplify_map, SimpleValue, SimplifiedMap};
use serde_json::{Map, Value};
use tracing::{debug, Level};
use url::Url;

use crate::date::{format_br_date, DateInput};
use crate::drone::split_drone_model;
use crate::keys::{self, Binding};
use crate::model::{
    Climate, Company, Drone, GeneralInfo, Geography, Logo, Media, Report, Team, DEFAULT_FOOTER,
};
use crate::products::parse_products;

/// A page's raw property map together with its simplified form.
///
/// The raw map is kept for fallback lookups on bindings whose canonical key
/// is missing.
#[derive(Debug, Clone)]
pub struct ReportSource<'a> {
    raw: &'a Map<String, Value>,
    simplified: SimplifiedMap,
}

impl<'a> ReportSource<'a> {
    /// Simplifies `raw` and keeps both forms.
    pub fn new(raw: &'a Map<String, Value>) -> Self {
        ReportSource {
            raw,
            simplified: simplify_map(raw),
        }
    }

    pub fn from_parts(raw: &'a Map<String, Value>, simplified: SimplifiedMap) -> Self {
        ReportSource { raw, simplified }
    }

    pub fn raw(&self) -> &Map<String, Value> {
        self.raw
    }

    pub fn simplified(&self) -> &SimplifiedMap {
        &self.simplified
    }

    /// Value for a binding: the canonical key, else the fallback pattern
    /// when the key reads as empty.
    pub fn value(&self, binding: Binding) -> Cow<'_, SimpleValue> {
        let direct = self.simplified.get(binding.key);
        if !is_missing(direct) {
            return Cow::Borrowed(direct);
        }
        let Some(pattern) = binding.fallback else {
            return Cow::Borrowed(direct);
        };
        let found = find_simplified(self.raw, pattern);
        if is_missing(&found) {
            return Cow::Borrowed(direct);
        }
        debug!(key = binding.key, pattern, "binding resolved through fallback pattern");
        Cow::Owned(found)
    }

    /// Text rendering, lists joined with `", "`. Blank reads as `None`.
    pub fn text(&self, binding: Binding) -> Option<String> {
        self.value(binding)
            .display_text()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn number(&self, binding: Binding) -> Option<f64> {
        ingest::number_of(&self.value(binding))
    }

    pub fn list(&self, binding: Binding) -> Vec<String> {
        match self.value(binding).as_ref() {
            SimpleValue::List(items) => items.iter().filter_map(SimpleValue::display_text).collect(),
            other => other.display_text().into_iter().collect(),
        }
    }
}

fn is_missing(value: &SimpleValue) -> bool {
    match value {
        SimpleValue::List(items) => items.iter().all(SimpleValue::is_blank),
        other => other.is_blank(),
    }
}

/// Inputs to assembly that do not come from the page.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembleOptions {
    /// Report issue date.
    pub issued: NaiveDate,
    pub logo: Option<Logo>,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        AssembleOptions {
            issued: Local::now().date_naive(),
            logo: None,
        }
    }
}

/// Builds the report, issued today, without logos.
pub fn assemble(source: &ReportSource<'_>) -> Report {
    assemble_with(source, &AssembleOptions::default())
}

/// Builds the report with explicit options. Never fails: missing fields
/// become empty strings, empty lists, `None` or `0.0`.
pub fn assemble_with(source: &ReportSource<'_>, options: &AssembleOptions) -> Report {
    let start_time = Instant::now();
    let span = tracing::span!(Level::DEBUG, "report.assemble", properties = source.simplified.len());
    let _guard = span.enter();

    let text = |binding| source.text(binding).unwrap_or_default();

    let company = Company {
        name: text(keys::COMPANY_NAME),
        cnpj: text(keys::COMPANY_CNPJ),
        logo: options.logo.clone(),
    };

    let start = text(keys::START);
    let end = text(keys::END);
    let crops = source.list(keys::CROPS);
    let hectares = source.number(keys::HECTARES).unwrap_or(0.0);
    let crop_hectares = match crops.first() {
        Some(crop) => format!("{crop} - {hectares}"),
        None => hectares.to_string(),
    };
    let general = GeneralInfo {
        start_display: format_br_date(DateInput::Text(&start)),
        end_display: format_br_date(DateInput::Text(&end)),
        start,
        end,
        issued: options.issued,
        issued_display: format_br_date(DateInput::Date(options.issued)),
        city: text(keys::CITY),
        client: text(keys::CLIENT),
        farm: text(keys::FARM),
        crops,
        hectares,
        crop_hectares,
        doc_number: text(keys::DOC_NUMBER),
        footer_msg: DEFAULT_FOOTER.to_string(),
    };

    let geography = Geography {
        coordinate: text(keys::COORDINATE),
        hectares,
    };

    let team = Team {
        pilot: text(keys::PILOT),
        caar: text(keys::CAAR),
        assistant: source.text(keys::ASSISTANT),
        flight_height: text(keys::FLIGHT_HEIGHT),
        drone: assemble_drone(source),
    };

    let media = Media {
        map: image_urls(source.list(keys::MEDIA_MAP)),
        target: image_urls(source.list(keys::MEDIA_TARGET)),
        product: image_urls(source.list(keys::MEDIA_PRODUCT)),
        climate: image_urls(source.list(keys::MEDIA_CLIMATE)),
    };

    let products = parse_products(&products_text(source));

    let climate = Climate {
        temperature: source.number(keys::TEMPERATURE),
        humidity: source.number(keys::HUMIDITY),
        wind: source.number(keys::WIND),
    };

    let elapsed_micros = start_time.elapsed().as_micros();
    debug!(
        farm = %general.farm,
        products = products.len(),
        images = media.map.len() + media.target.len() + media.product.len() + media.climate.len(),
        elapsed_micros,
        "report_assembled"
    );

    Report {
        company,
        general,
        geography,
        team,
        media,
        products,
        climate,
    }
}

/// Raw products text as typed in Notion, newlines preserved.
pub fn products_text(source: &ReportSource<'_>) -> String {
    source
        .value(keys::PRODUCTS)
        .display_text()
        .unwrap_or_default()
}

fn assemble_drone(source: &ReportSource<'_>) -> Drone {
    let raw = source.text(keys::DRONE).unwrap_or_default();
    let (model, prefix) = if raw.trim().is_empty() {
        (String::new(), None)
    } else {
        split_drone_model(&raw)
    };
    Drone {
        model,
        prefix,
        nozzle: source.text(keys::NOZZLE),
        droplet: source
            .list(keys::DROPLET)
            .into_iter()
            .find(|s| !s.trim().is_empty()),
        raw,
    }
}

/// Keeps entries that parse as absolute `http`/`https` URLs.
fn image_urls(candidates: Vec<String>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| match Url::parse(candidate.trim()) {
            Ok(url) => matches!(url.scheme(), "http" | "https"),
            Err(err) => {
                debug!(value = %candidate, error = %err, "dropping invalid media URL");
                false
            }
        })
        .map(|candidate| candidate.trim().to_string())
        .collect()
}
