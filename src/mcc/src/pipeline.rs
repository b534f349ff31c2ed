//! End-to-end conversion of an extracted bundle
//!
//! Output layout:
//!
//! ```text
//! <output>/
//!   configuration/items/<namespace>/{items,armor,categories}.yml
//!   resourcepack/assets/<namespace>/{textures,models}/...
//! ```
//!
//! Locating the configuration and resolving the namespace happen before
//! anything is written, so a structural failure leaves `<output>` untouched.

use crate::bundle;
use crate::convert::{ConvertOptions, Converter, SkippedEntry};
use crate::migrate::{MigrateOptions, MigrationReport, Migrator, SkippedAsset};
use crate::namespace::Namespace;
use crate::output;
use crate::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Overrides the namespace declared by the pack
    pub namespace: Option<String>,
    pub options: ConvertOptions,
    pub migrate: MigrateOptions,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        ConversionRequest {
            source: source.into(),
            output: output.into(),
            namespace: None,
            options: ConvertOptions::default(),
            migrate: MigrateOptions::default(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_migrate_options(mut self, migrate: MigrateOptions) -> Self {
        self.migrate = migrate;
        self
    }
}

/// What a conversion produced and what it left out
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub namespace: Namespace,
    pub documents: Vec<PathBuf>,
    pub item_count: usize,
    pub armor_count: usize,
    pub template_count: usize,
    pub equipment_count: usize,
    pub category_count: usize,
    pub skipped_entries: Vec<SkippedEntry>,
    pub skipped_documents: Vec<SkippedAsset>,
    pub migration: Option<MigrationReport>,
}

impl ConversionSummary {
    /// True if any entry, document or asset was left out
    pub fn has_skips(&self) -> bool {
        !self.skipped_entries.is_empty()
            || !self.skipped_documents.is_empty()
            || self
                .migration
                .as_ref()
                .is_some_and(|m| !m.skipped.is_empty())
    }
}

/// Convert the bundle at `request.source` into `request.output`
pub fn run(request: &ConversionRequest) -> Result<ConversionSummary> {
    let bundle = bundle::locate(&request.source)?;
    let converted = Converter::new(request.options.clone())
        .convert(&bundle.config, request.namespace.as_deref())?;
    let namespace = converted.namespace.clone();

    let config_dir = output::config_dir(&request.output, namespace.as_str());
    let documents = output::write_documents(&converted, &config_dir)?;

    let source_ns = bundle.config.namespace.as_deref();
    let migration = match bundle.resources.asset_dir(source_ns, &namespace) {
        Some(asset_dir) => {
            let mut migrator = Migrator::new(
                asset_dir,
                request.output.join("resourcepack"),
                namespace.clone(),
            )
            .with_options(request.migrate.clone());
            if let Some(source_ns) = source_ns.filter(|ns| *ns != namespace.as_str()) {
                migrator = migrator.with_source_namespace(source_ns);
            }
            Some(migrator.migrate(&converted.generated_models)?)
        }
        None => {
            warn!(
                root = %bundle.resources.root().display(),
                "No asset folder for namespace, skipping resource migration"
            );
            None
        }
    };

    let summary = ConversionSummary {
        namespace,
        documents,
        item_count: converted.items.len(),
        armor_count: converted.armor.len(),
        template_count: converted.templates.len(),
        equipment_count: converted.equipments.len(),
        category_count: converted.categories.len(),
        skipped_entries: converted.skipped,
        skipped_documents: bundle.skipped,
        migration,
    };

    info!(
        namespace = %summary.namespace,
        items = summary.item_count + summary.armor_count,
        categories = summary.category_count,
        "Conversion complete"
    );
    Ok(summary)
}
