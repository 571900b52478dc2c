//! Integration tests for pcforge

use pcforge::config::Config;
use pcforge::form::{BuildForm, FieldBinding};
use pcforge::parsers::build::BuildParser;
use pcforge::parsers::{ComponentEntry, ParseMismatch};
use pcforge::reports::{OutputFormat, render_report};
use pcforge::slots::ComponentSlot;

/// A reply in the shape the build service is prompted to produce
const SERVICE_REPLY: &str = "Processor (CPU)
- AMD Ryzen 5 9600X - £229
  Six quick cores, ideal for 1440p gaming.

Graphics Card (GPU)
- AMD Radeon RX 9070 - £529
  Strong raster performance for the price.

Motherboard
- Gigabyte B650 Aorus Elite AX - £179
  Reliable board with WiFi built in.

Memory (RAM)
- Kingston Fury Beast 32GB DDR5-6000 - £99
  Enough memory for games and browsers.

Storage
- Crucial T500 2TB - £129
  Fast Gen4 drive with plenty of room.

Power Supply (PSU)
- be quiet! Pure Power 12 M 750W - £99
  Efficient and quiet power delivery.

Case
- Phanteks XT Pro - £69
  Roomy case with good airflow.

Cooling
- Thermalright Peerless Assassin 120 - £35
  Cheap air cooler that performs well.
";

/// Parse a realistic reply and fill the default form
#[test]
fn test_parse_realistic_reply_into_form() {
    let parser = BuildParser::new();
    let build = parser.parse(SERVICE_REPLY);

    assert!(build.is_complete());
    assert_eq!(build.filled(), 8);

    let mut form = BuildForm::default();
    form.apply(&build);

    assert_eq!(form.value("model-cpu"), Some("AMD Ryzen 5 9600X"));
    assert_eq!(form.value("price-cpu"), Some("£229"));
    assert_eq!(form.value("model-psu"), Some("be quiet! Pure Power 12 M 750W"));
    assert_eq!(form.value("price-psu"), Some("£99"));
    assert_eq!(
        form.value("model-cooling"),
        Some("Thermalright Peerless Assassin 120")
    );
    assert_eq!(form.value("price-cooling"), Some("£35"));

    // Justification lines are reported but never touch an entry
    assert_eq!(build.mismatches().len(), 8);
}

/// The documented mixed example
#[test]
fn test_dash_in_model_example() {
    let build = BuildParser::new().parse(
        "Processor (CPU)\n- AMD Ryzen 5 7600 - £250\nGraphics Card (GPU)\n- Some text with - dash - £1,200",
    );

    assert_eq!(
        build.entry(ComponentSlot::Cpu),
        Some(&ComponentEntry::new("AMD Ryzen 5 7600", "£250"))
    );
    assert_eq!(
        build.entry(ComponentSlot::Gpu),
        Some(&ComponentEntry::new("Some text with - dash", "£1,200"))
    );
    assert_eq!(build.filled(), 2);
    assert_eq!(build.len(), 8);
}

/// A detail line with no header in front of it
#[test]
fn test_orphan_detail_line() {
    let build = BuildParser::new().parse("- Foo - £10");

    assert_eq!(build.filled(), 0);
    assert_eq!(build.len(), 8);
    assert_eq!(build.mismatches().len(), 1);
    assert!(matches!(
        build.mismatches()[0],
        ParseMismatch::OrphanLine { line_number: 1, .. }
    ));
}

/// A second parse replaces the first wholesale
#[test]
fn test_reparse_resets_form() {
    let parser = BuildParser::new();
    let mut form = BuildForm::default();

    form.apply(&parser.parse(SERVICE_REPLY));
    form.apply(&parser.parse("Case\n- Fractal Pop Air - £75"));

    assert_eq!(form.value("model-case"), Some("Fractal Pop Air"));
    assert_eq!(form.value("model-cpu"), Some(""));
    assert_eq!(form.value("price-gpu"), Some(""));

    form.apply(&parser.parse(""));
    assert!(form.rows().iter().all(|row| row.model.is_empty() && row.price.is_empty()));
}

/// Unknown or blank lines between a header and its detail line
#[test]
fn test_noise_lines() {
    let parser = BuildParser::new();

    // Blank and whitespace-only lines keep the slot pending
    let build = parser.parse("Storage\n\n   \n- Samsung 990 EVO 1TB - £79");
    assert_eq!(
        build.entry(ComponentSlot::Storage),
        Some(&ComponentEntry::new("Samsung 990 EVO 1TB", "£79"))
    );

    // Unknown lines with nothing pending are reported and change nothing
    let build = parser.parse("Here's your build!\nPC Build:\nCase\n- NZXT H5 - £80");
    assert_eq!(build.filled(), 1);
    assert_eq!(build.mismatches().len(), 2);
}

/// Config-driven field bindings flow through parser and form
#[test]
fn test_config_bindings() {
    let config = Config::from_toml_str(
        r#"
[[fields]]
slot = "Graphics Card (GPU)"
model_field = "gpu"
price_field = "gpu-price"

[[fields]]
slot = "Case"
model_field = "case"
price_field = "case-price"
"#,
    )
    .unwrap();

    let parser = BuildParser::with_slots(config.fields.0.iter().map(|b| b.slot));
    let mut form = BuildForm::new(config.fields.0.clone());
    form.apply(&parser.parse(SERVICE_REPLY));

    assert_eq!(form.value("gpu"), Some("AMD Radeon RX 9070"));
    assert_eq!(form.value("case-price"), Some("£69"));
    assert_eq!(form.value("model-cpu"), None);
    assert_eq!(
        form.bindings()[1],
        FieldBinding::new(ComponentSlot::Case, "case", "case-price")
    );
}

/// Reports render every slot
#[test]
fn test_reports_from_reply() {
    let build = BuildParser::new().parse(SERVICE_REPLY);

    let summary = render_report(&build, OutputFormat::Summary, "reply").unwrap();
    assert!(summary.contains("Memory (RAM): Kingston Fury Beast 32GB DDR5-6000 (£99)"));
    assert!(summary.contains("8/8 components found"));

    let markdown = render_report(&build, OutputFormat::Markdown, "reply").unwrap();
    assert!(markdown.contains("| Storage | Crucial T500 2TB | £129 |"));

    let json = render_report(&build, OutputFormat::Json, "reply").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["filled"], 8);
    assert_eq!(value["components"][7]["slot"], "Cooling");
}
