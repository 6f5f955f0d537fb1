//! Binding table: report field → canonical property key.
//!
//! Hand-maintained against the spray-report Notion database. A [`Binding`]
//! may carry a fallback pattern for columns whose name drifted between
//! schema revisions; the assembler only consults it when the canonical key
//! reads as empty.

/// Where a report field comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Canonical identifier (`snake_case`) in the simplified map.
    pub key: &'static str,
    /// Case-insensitive pattern for the property locator.
    pub fallback: Option<&'static str>,
}

impl Binding {
    pub const fn exact(key: &'static str) -> Self {
        Binding { key, fallback: None }
    }

    pub const fn with_fallback(key: &'static str, pattern: &'static str) -> Self {
        Binding {
            key,
            fallback: Some(pattern),
        }
    }
}

// Company
pub const COMPANY_NAME: Binding = Binding::exact("empresa");
pub const COMPANY_CNPJ: Binding = Binding::exact("cnpj");

// General
pub const START: Binding = Binding::with_fallback(
    "data_e_horario_de_inicio_das_aplicacoes",
    r"^data.*inicio",
);
pub const END: Binding = Binding::with_fallback(
    "data_e_horario_de_encerramento_das_aplicacoes",
    r"^data.*encerramento",
);
pub const CITY: Binding = Binding::exact("cidade_e_estado");
pub const CLIENT: Binding = Binding::with_fallback("nome_do_produtor_completo", r"produtor");
pub const FARM: Binding = Binding::with_fallback("nome_da_fazenda", r"fazenda");
pub const CROPS: Binding = Binding::exact("cultura");
pub const HECTARES: Binding = Binding::with_fallback("hectares_pulverizados", r"hectares");
pub const DOC_NUMBER: Binding = Binding::exact("id_interno");

// Geography
pub const COORDINATE: Binding = Binding::with_fallback("coordenada_geografica", r"coordenada");

// Team
pub const PILOT: Binding = Binding::exact("piloto");
pub const CAAR: Binding = Binding::exact("caar");
pub const ASSISTANT: Binding = Binding::exact("assistente");
pub const FLIGHT_HEIGHT: Binding = Binding::with_fallback("altura_de_voo", r"altura");

// Drone
pub const DRONE: Binding = Binding::exact("drone");
pub const NOZZLE: Binding = Binding::with_fallback("drone_bico", r"bico");
pub const DROPLET: Binding = Binding::with_fallback("rpm_tipo_de_gota", r"gota");

// Media
pub const MEDIA_MAP: Binding = Binding::with_fallback("mapa_aplicacao", r"^mapa");
pub const MEDIA_TARGET: Binding = Binding::with_fallback("papel_hidronssensivel", r"papel.*hidro");
pub const MEDIA_PRODUCT: Binding = Binding::with_fallback("foto_dos_produtos", r"foto.*produto");
pub const MEDIA_CLIMATE: Binding = Binding::with_fallback(
    "fotos_clima_anemometro_e_termo_higrometro",
    r"foto.*clima",
);

// Products
pub const PRODUCTS: Binding = Binding::with_fallback("produtos_utilizados", r"^produtos");

// Climate
pub const TEMPERATURE: Binding = Binding::with_fallback("temperatura", r"^temperatura");
pub const HUMIDITY: Binding = Binding::with_fallback("umidade", r"^umidade");
pub const WIND: Binding = Binding::with_fallback("velocidade_vento", r"vento");

/// Every binding, for schema checks and diagnostics.
pub const ALL: &[Binding] = &[
    COMPANY_NAME,
    COMPANY_CNPJ,
    START,
    END,
    CITY,
    CLIENT,
    FARM,
    CROPS,
    HECTARES,
    DOC_NUMBER,
    COORDINATE,
    PILOT,
    CAAR,
    ASSISTANT,
    FLIGHT_HEIGHT,
    DRONE,
    NOZZLE,
    DROPLET,
    MEDIA_MAP,
    MEDIA_TARGET,
    MEDIA_PRODUCT,
    MEDIA_CLIMATE,
    PRODUCTS,
    TEMPERATURE,
    HUMIDITY,
    WIND,
];

#[cfg(test)]
mod tests {
    use regex::RegexBuilder;

    use super::*;

    fn is_identifier(key: &str) -> bool {
        !key.is_empty()
            && !key.starts_with('_')
            && !key.ends_with('_')
            && !key.contains("__")
            && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn keys_are_canonical_identifiers() {
        for binding in ALL {
            assert!(is_identifier(binding.key), "not canonical: {}", binding.key);
        }
    }

    #[test]
    fn fallback_patterns_compile() {
        for binding in ALL {
            if let Some(pattern) = binding.fallback {
                assert!(
                    RegexBuilder::new(pattern).case_insensitive(true).build().is_ok(),
                    "bad pattern for {}",
                    binding.key
                );
            }
        }
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = ALL.iter().map(|b| b.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ALL.len());
    }
}
