//! Pack analysis command handler

use anyhow::{Context, Result};
use mcc::DetectionReport;
use std::fmt::Write;
use std::path::Path;

/// Handle the analyze command
pub fn handle(input: &Path, json: bool) -> Result<()> {
    if !input.is_dir() {
        anyhow::bail!("Input is not a directory: {}", input.display());
    }

    let report = mcc::analyze(input);

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", out);
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}

fn join<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    let joined: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined.join(", ")
    }
}

fn mark(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "no"
    }
}

/// Render a report as plain text
pub fn format_report(report: &DetectionReport) -> String {
    let mut out = String::new();

    let content = report.content_types.iter().map(|c| {
        serde_json::to_value(c)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    });

    let _ = writeln!(out, "Formats:       {}", join(&report.formats));
    let _ = writeln!(out, "Content:       {}", join(content));
    let _ = writeln!(out, "Targets:       {}", join(report.available_targets()));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Items config:      {}",
        mark(report.completeness.items_config)
    );
    let _ = writeln!(
        out,
        "Categories config: {}",
        mark(report.completeness.categories_config)
    );
    let _ = writeln!(
        out,
        "Resource files:    {}",
        mark(report.completeness.resource_files)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} items, {} textures, {} models",
        report.details.item_count, report.details.texture_count, report.details.model_count
    );

    for warning in report.warnings() {
        let _ = writeln!(out, "Warning: {}", warning);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcc::{ContentType, Format};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_empty_report() {
        let out = format_report(&DetectionReport::default());
        assert!(out.contains("Formats:       none"));
        assert!(out.contains("Targets:       none"));
        assert!(out.contains("0 items, 0 textures, 0 models"));
        assert!(!out.contains("Warning"));
    }

    #[test]
    fn test_format_itemsadder_report() {
        let mut report = DetectionReport::default();
        report.formats.insert(Format::ItemsAdder);
        report.content_types.insert(ContentType::Texture);
        report.content_types.insert(ContentType::Model);
        report.completeness.items_config = true;
        report.details.item_count = 3;

        let out = format_report(&report);
        assert!(out.contains("Formats:       ItemsAdder"));
        assert!(out.contains("Content:       texture, model"));
        assert!(out.contains("Targets:       CraftEngine"));
        assert!(out.contains("Items config:      yes"));
        assert!(out.contains("Resource files:    no"));
        assert!(out.contains("Warning: No resource pack found"));
    }

    #[test]
    fn test_handle_rejects_missing_input() {
        let tmp = TempDir::new().unwrap();
        assert!(handle(&tmp.path().join("missing"), false).is_err());
    }

    #[test]
    fn test_handle_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("items.yml"),
            "info: { namespace: pack }\nitems: { gem: {} }\n",
        )
        .unwrap();
        assert!(handle(tmp.path(), true).is_ok());
    }
}
