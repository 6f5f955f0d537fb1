//! Parser for the free-text "products used" field.
//!
//! Operators type one product per line in whatever shape is at hand:
//! `"Galopeiro 5 LTS"`, `"Dominum..2.5l"`, `"Break thru....100 ml"`,
//! `"Padron 01"`. Each line becomes a [`Product`] with a name and a dosage.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Product;

/// Dosage used when a line has no recognizable amount.
pub const UNSPECIFIED_DOSAGE: &str = "Não especificado";

const HEADER_LINES: &[&str] = &["dose por ha", "produtos", "calda"];

static LEADER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.—-]{2,}").expect("static regex"));
static LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.+?)\s*(\d+(?:[.,]\d+)?)\s*(ml|l|lt|lts|grs?|gr|kg|g)?")
        .expect("static regex")
});
static NAME_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.—\s]+$").expect("static regex"));

/// Parses one product per non-empty line, skipping header lines.
pub fn parse_products(text: &str) -> Vec<Product> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_header(line))
        .map(parse_line)
        .collect()
}

fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_LINES.contains(&lower.as_str())
}

fn parse_line(line: &str) -> Product {
    let cleaned = LEADER_RUN.replace_all(line, " ");
    let Some(caps) = LINE.captures(&cleaned) else {
        return Product {
            name: line.to_string(),
            dosage: UNSPECIFIED_DOSAGE.to_string(),
        };
    };

    let name = caps.get(1).map_or("", |m| m.as_str()).trim();
    let name = NAME_TAIL.replace(name, "");
    let amount = caps.get(2).map_or("", |m| m.as_str()).replace(',', ".");
    let unit = caps.get(3).map_or("", |m| m.as_str());

    Product {
        name: name.trim().to_string(),
        dosage: format!("{amount} {unit}").trim().to_string(),
    }
}
