use ingest::{find_property, page_properties, simplify_map, Property, SimpleValue};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const PAGE: &str = include_str!("../../../tests/fixtures/drone_page.json");

fn page() -> Value {
    serde_json::from_str(PAGE).expect("fixture parses")
}

#[test]
fn full_page_simplifies_to_canonical_keys() {
    let page = page();
    let props = page_properties(&page).expect("properties object");
    let map = simplify_map(props);

    assert_eq!(map.len(), props.len());
    assert_eq!(map.text("nome_da_fazenda").as_deref(), Some("Fazenda Boa Vista"));
    assert_eq!(map.text("empresa").as_deref(), Some("AgroDrone Serviços"));
    assert_eq!(map.number("hectares_pulverizados"), Some(120.5));
    assert_eq!(map.text("id_interno").as_deref(), Some("REL-42"));
    assert_eq!(map.list("piloto"), vec!["Ana Souza"]);
    assert_eq!(map.list("rpm_tipo_de_gota"), vec!["Média", "Fina"]);
    assert_eq!(map.number("velocidade_vento"), Some(8.5));
    assert_eq!(
        map.get("data_e_horario_de_inicio_das_aplicacoes"),
        &SimpleValue::text("2024-05-01T14:30:00.000-03:00")
    );
    assert_eq!(
        map.list("papel_hidrossensivel_foto"),
        vec![
            "https://files.example.com/papel1.jpg",
            "https://files.example.com/papel2.jpg"
        ]
    );
    assert_eq!(map.text("status").as_deref(), Some("Concluído"));
    assert_eq!(map.text("responsavel").as_deref(), Some("u-9"));
    assert_eq!(map.text("verificacao").as_deref(), Some("unverified"));
    assert_eq!(map.get("botao"), &SimpleValue::Empty);
}

#[test]
fn multi_segment_rich_text_is_concatenated() {
    let page = page();
    let map = simplify_map(page_properties(&page).expect("properties"));
    let text = map.text("produtos_utilizados").expect("products text");
    assert!(text.starts_with("Dose por ha\nGalopeiro 5 LTS"));
    assert!(text.ends_with("\nBreak thru....100 ml\nPadron 01"));
}

#[test]
fn every_property_decodes_to_a_known_or_unknown_variant() {
    let page = page();
    for (key, raw) in page_properties(&page).expect("properties") {
        let prop = Property::from_value(raw);
        let tag = raw.get("type").and_then(Value::as_str);
        assert_eq!(prop.tag(), tag, "tag mismatch for {key}");
    }
}

#[test]
fn locator_reaches_legacy_column() {
    let page = page();
    let props = page_properties(&page).expect("properties");
    let raw = find_property(props, r"papel.*hidro").expect("legacy column");
    assert_eq!(raw["type"], "files");
}

#[test]
fn simplification_is_total_over_hostile_input() {
    let hostile = json!({
        "A": null,
        "B": 42,
        "C": "text",
        "D": [1, 2, 3],
        "E": {"type": 7},
        "F": {"type": "title", "title": "not a list"},
        "G": {"type": "people", "people": [null, 1, {"id": "ok"}]},
        "H": {"type": "files", "files": [{"type": "file"}, {"type": "external", "external": null}]},
        "I": {"type": "formula", "formula": "nope"},
        "J": {"type": "rollup", "rollup": {"type": "array", "array": [null, {"type": "number", "number": 1}]}},
        "K": {"type": "date", "date": {"start": 5}},
        "L": {"type": "unique_id", "unique_id": {"number": "x"}}
    });
    let map = simplify_map(hostile.as_object().expect("object"));

    assert_eq!(map.len(), 12);
    assert_eq!(map.get("a"), &SimpleValue::Empty);
    assert_eq!(map.get("b"), &SimpleValue::Empty);
    assert_eq!(map.get("e"), &SimpleValue::Empty);
    assert_eq!(map.get("f"), &SimpleValue::text(""));
    assert_eq!(map.list("g"), vec!["ok"]);
    assert_eq!(map.get("h"), &SimpleValue::List(vec![]));
    assert_eq!(map.get("i"), &SimpleValue::Empty);
    assert_eq!(map.number("j"), Some(1.0));
    assert_eq!(map.get("k"), &SimpleValue::Empty);
    assert_eq!(map.get("l"), &SimpleValue::Empty);
}
