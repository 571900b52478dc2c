//! Build report generation
//!
//! Renders a parsed build as a plain summary, a markdown table or JSON.

use clap::ValueEnum;
use serde::Serialize;

use crate::form::BuildForm;
use crate::parsers::ParsedBuild;
use crate::slots::ComponentSlot;

/// Placeholder for a slot with no entry
const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
    Markdown,
}

#[derive(Debug, Serialize)]
struct ComponentReport<'a> {
    slot: ComponentSlot,
    model: &'a str,
    price: &'a str,
}

#[derive(Debug, Serialize)]
struct MismatchReport {
    line: usize,
    message: String,
}

#[derive(Debug, Serialize)]
struct BuildReport<'a> {
    source: &'a str,
    filled: usize,
    total: usize,
    components: Vec<ComponentReport<'a>>,
    mismatches: Vec<MismatchReport>,
}

pub fn render_report(
    build: &ParsedBuild,
    format: OutputFormat,
    source: &str,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Summary => Ok(generate_summary_report(build)),
        OutputFormat::Markdown => Ok(generate_markdown_report(build, source)),
        OutputFormat::Json => generate_json_report(build, source),
    }
}

pub fn generate_summary_report(build: &ParsedBuild) -> String {
    let mut lines: Vec<String> = build
        .entries()
        .map(|(slot, entry)| {
            if entry.is_empty() {
                format!("{slot}: {MISSING}")
            } else {
                format!("{slot}: {} ({})", entry.model, entry.price)
            }
        })
        .collect();

    lines.push(String::new());
    lines.push(format!("{}/{} components found", build.filled(), build.len()));
    if !build.mismatches().is_empty() {
        lines.push(format!("{} unparsed line(s)", build.mismatches().len()));
    }

    lines.join("\n")
}

/// Field id and value of every bound form field, in binding order
pub fn generate_form_report(form: &BuildForm) -> String {
    let value = |v: &str| if v.is_empty() { MISSING.to_string() } else { v.to_string() };

    let mut lines = vec!["Form fields:".to_string()];
    for row in form.rows() {
        lines.push(format!("{}: {}", row.model_field, value(row.model)));
        lines.push(format!("{}: {}", row.price_field, value(row.price)));
    }

    lines.join("\n")
}

pub fn generate_markdown_report(build: &ParsedBuild, source: &str) -> String {
    let mut lines = vec![
        "# PC Build".to_string(),
        String::new(),
        format!("**Source**: {source}"),
        format!("**Date**: {}", chrono::Local::now().format("%Y-%m-%d")),
        String::new(),
        "| Component | Model | Price |".to_string(),
        "|-----------|-------|-------|".to_string(),
    ];

    for (slot, entry) in build.entries() {
        let (model, price) = if entry.is_empty() {
            (MISSING.to_string(), MISSING.to_string())
        } else {
            (escape_cell(&entry.model), escape_cell(&entry.price))
        };
        lines.push(format!("| {slot} | {model} | {price} |"));
    }

    lines.push(String::new());
    lines.push(format!(
        "**Found**: {}/{} components",
        build.filled(),
        build.len()
    ));

    if !build.mismatches().is_empty() {
        lines.push(String::new());
        lines.push("## Unparsed lines".to_string());
        lines.push(String::new());
        for mismatch in build.mismatches() {
            lines.push(format!("- {mismatch}"));
        }
    }

    lines.join("\n")
}

pub fn generate_json_report(build: &ParsedBuild, source: &str) -> Result<String, serde_json::Error> {
    let report = BuildReport {
        source,
        filled: build.filled(),
        total: build.len(),
        components: build
            .entries()
            .map(|(slot, entry)| ComponentReport {
                slot,
                model: &entry.model,
                price: &entry.price,
            })
            .collect(),
        mismatches: build
            .mismatches()
            .iter()
            .map(|m| MismatchReport {
                line: m.line_number(),
                message: m.to_string(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
