//! Conversion command handler

use crate::cli::Target;
use crate::config::Config;
use anyhow::{bail, Context, Result};
use mcc::{ConversionRequest, ConversionSummary, Format};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of the convert command
pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub namespace: Option<String>,
    pub target: Target,
    pub force: bool,
    pub json: bool,
}

/// Handle the convert command
pub fn handle(args: ConvertArgs) -> Result<()> {
    let config = Config::load()?;
    let summary = convert(&args, &config)?;

    if args.json {
        let out =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", out);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// Check the input and output, then run the conversion
pub fn convert(args: &ConvertArgs, config: &Config) -> Result<ConversionSummary> {
    if !args.input.is_dir() {
        bail!("Input is not a directory: {}", args.input.display());
    }

    let report = mcc::analyze(&args.input);
    let target = match args.target {
        Target::Craftengine => Format::CraftEngine,
    };
    if !report.available_targets().contains(&target) && !args.force {
        bail!(
            "No ItemsAdder content detected in {} (use --force to convert anyway)",
            args.input.display()
        );
    }
    for warning in report.warnings() {
        eprintln!("Warning: {}", warning);
    }

    if !args.force && !is_empty_dir(&args.output)? {
        bail!(
            "Output directory is not empty: {} (use --force to write into it)",
            args.output.display()
        );
    }

    let mut request = ConversionRequest::new(&args.input, &args.output)
        .with_options(config.convert_options())
        .with_migrate_options(config.migrate_options());
    if let Some(ns) = args.namespace.as_ref().or(config.namespace.as_ref()) {
        request = request.with_namespace(ns.clone());
    }

    mcc::run(&request).with_context(|| format!("Failed to convert {}", args.input.display()))
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read output directory {}", path.display()))?;
    Ok(entries.next().is_none())
}

fn print_summary(summary: &ConversionSummary) {
    println!("Namespace: {}", summary.namespace);
    println!(
        "Converted {} items, {} armor pieces, {} templates, {} equipments, {} categories",
        summary.item_count,
        summary.armor_count,
        summary.template_count,
        summary.equipment_count,
        summary.category_count
    );
    for doc in &summary.documents {
        println!("  wrote {}", doc.display());
    }

    if let Some(migration) = &summary.migration {
        println!(
            "Resources: {} textures copied, {} models migrated, {} models generated",
            migration.textures_copied, migration.models_migrated, migration.models_generated
        );
    } else {
        println!("Resources: none migrated");
    }

    for entry in &summary.skipped_entries {
        eprintln!(
            "Warning: skipped {}.{}: {}",
            entry.section, entry.key, entry.reason
        );
    }
    let skipped_assets = summary
        .skipped_documents
        .iter()
        .chain(summary.migration.iter().flat_map(|m| m.skipped.iter()));
    for asset in skipped_assets {
        eprintln!("Warning: skipped {}: {}", asset.path.display(), asset.reason);
    }
}
