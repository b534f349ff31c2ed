//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up mcc CLI defaults.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use mcc::Namespace;

/// Settings given on the command line
#[derive(Debug, Default)]
pub struct ConfigureArgs {
    pub namespace: Option<String>,
    pub seat_offset: Option<f64>,
    pub layer_marker: Option<String>,
    pub accents: Vec<String>,
}

impl ConfigureArgs {
    fn is_empty(&self) -> bool {
        self.namespace.is_none()
            && self.seat_offset.is_none()
            && self.layer_marker.is_none()
            && self.accents.is_empty()
    }
}

/// Handle the configure command
pub fn handle(args: ConfigureArgs, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if args.is_empty() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, args)?;
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Validate and store the given settings
fn apply(config: &mut Config, args: ConfigureArgs) -> Result<()> {
    if let Some(ns) = args.namespace {
        Namespace::parse(&ns)?;
        config.namespace = Some(ns);
    }

    if let Some(offset) = args.seat_offset {
        if !offset.is_finite() {
            bail!("Seat offset must be a finite number");
        }
        config.seat_height_offset = Some(offset);
    }

    if let Some(marker) = args.layer_marker {
        if marker.is_empty() {
            bail!("Layer marker must not be empty");
        }
        config.layer_marker = Some(marker);
    }

    for accent in &args.accents {
        let (pattern, color) = parse_accent(accent)?;
        config.set_accent(pattern, color);
    }

    Ok(())
}

/// Parse `PATTERN=COLOR`
pub fn parse_accent(s: &str) -> Result<(String, String)> {
    let (pattern, color) = s
        .split_once('=')
        .with_context(|| format!("Invalid accent {:?}, expected PATTERN=COLOR", s))?;
    let (pattern, color) = (pattern.trim(), color.trim());
    if pattern.is_empty() || color.is_empty() {
        bail!("Invalid accent {:?}, expected PATTERN=COLOR", s);
    }
    Ok((pattern.to_string(), color.to_string()))
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.namespace {
        Some(ns) => println!("Namespace: {}", ns),
        None => println!("Namespace: (from pack, or {})", mcc::DEFAULT_NAMESPACE),
    }
    println!(
        "Seat height offset: {}",
        config
            .seat_height_offset
            .unwrap_or(mcc::DEFAULT_SEAT_HEIGHT_OFFSET)
    );
    println!(
        "Layer marker: {}",
        config
            .layer_marker
            .as_deref()
            .unwrap_or(mcc::DEFAULT_LAYER_MARKER)
    );
    for accent in &config.accents {
        println!("Accent: {} = {}", accent.pattern, accent.color);
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: mcc configure --namespace NAME");
    println!("   or: mcc configure --seat-offset 0.85 --layer-marker layer_");
    println!("   or: mcc configure --accent elite=<#FFCF20>");
    println!("   or: mcc configure --show");
}
