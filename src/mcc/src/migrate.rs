//! Resource tree migration
//!
//! Copies an ItemsAdder asset folder (`textures/`, `models/`) into a
//! CraftEngine resource pack at `assets/<namespace>/`:
//!
//! - Item textures move under `textures/item/`; armor layer textures keep
//!   their path
//! - Models move under `models/item/` and their in-namespace texture and
//!   override references are rewritten to match
//! - Models registered by the converter are written, then every item texture
//!   without a model gets a minimal generated one
//!
//! The source tree is only read. Existing destination models are never
//! overwritten, so running a migration twice is harmless.

use crate::fs_utils::{collect_files_with_extension, copy_file, relative_slash_path, write_file};
use crate::model::{GeneratedModels, ModelDescriptor};
use crate::namespace::Namespace;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name fragment marking armor layer textures
pub const DEFAULT_LAYER_MARKER: &str = "layer_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateOptions {
    pub layer_marker: String,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        MigrateOptions {
            layer_marker: DEFAULT_LAYER_MARKER.to_string(),
        }
    }
}

/// A file left out of the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAsset {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub textures_copied: usize,
    pub models_migrated: usize,
    pub models_generated: usize,
    pub skipped: Vec<SkippedAsset>,
}

pub struct Migrator {
    source: PathBuf,
    dest: PathBuf,
    namespace: Namespace,
    source_namespace: Option<String>,
    options: MigrateOptions,
}

impl Migrator {
    /// `source` holds `textures/` and `models/`; `dest_root` is the resource
    /// pack root that receives `assets/<namespace>/`
    pub fn new(source: impl Into<PathBuf>, dest_root: impl AsRef<Path>, namespace: Namespace) -> Self {
        let dest = dest_root.as_ref().join("assets").join(namespace.as_str());
        Migrator {
            source: source.into(),
            dest,
            namespace,
            source_namespace: None,
            options: MigrateOptions::default(),
        }
    }

    /// Namespace the source models were authored under, if it differs
    pub fn with_source_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.source_namespace = Some(namespace.into());
        self
    }

    pub fn with_options(mut self, options: MigrateOptions) -> Self {
        self.options = options;
        self
    }

    /// Destination `assets/<namespace>` directory
    pub fn dest_dir(&self) -> &Path {
        &self.dest
    }

    pub fn migrate(&self, generated: &GeneratedModels) -> Result<MigrationReport> {
        info!(
            source = %self.source.display(),
            dest = %self.dest.display(),
            "Migrating resources"
        );

        let mut report = MigrationReport::default();
        self.migrate_textures(&mut report)?;
        self.migrate_models(&mut report)?;
        self.migrate_sounds();
        report.models_generated += self.write_generated(generated)?;
        report.models_generated += generate_missing_models(&self.dest, &self.namespace)?;

        info!(
            textures = report.textures_copied,
            models = report.models_migrated,
            generated = report.models_generated,
            skipped = report.skipped.len(),
            "Migration complete"
        );
        Ok(report)
    }

    fn is_layer(&self, name: &str) -> bool {
        !self.options.layer_marker.is_empty() && name.contains(&self.options.layer_marker)
    }

    fn migrate_textures(&self, report: &mut MigrationReport) -> Result<()> {
        let src_dir = self.source.join("textures");
        if !src_dir.is_dir() {
            warn!(path = %src_dir.display(), "No textures found");
            return Ok(());
        }

        for file in collect_files_with_extension(&src_dir, &["png", "mcmeta"]) {
            let Some(rel) = relative_slash_path(&file, &src_dir) else {
                continue;
            };
            let name = file.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let dest_rel = if self.is_layer(name) {
                rel
            } else {
                format!("item/{}", rel)
            };

            copy_file(&file, &self.dest.join("textures").join(&dest_rel))?;
            debug!(texture = %dest_rel, "Copied texture");
            report.textures_copied += 1;
        }
        Ok(())
    }

    fn migrate_models(&self, report: &mut MigrationReport) -> Result<()> {
        let src_dir = self.source.join("models");
        if !src_dir.is_dir() {
            return Ok(());
        }

        for file in collect_files_with_extension(&src_dir, &["json"]) {
            let Some(rel) = relative_slash_path(&file, &src_dir) else {
                continue;
            };
            let bytes = fs::read(&file).map_err(Error::io(&file))?;

            let mut model: Value = match serde_json::from_slice(&bytes) {
                Ok(v) => v,
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "Skipping unparsable model");
                    report.skipped.push(SkippedAsset {
                        path: file.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            self.rewrite_model(&mut model);
            let dest = self.dest.join("models").join("item").join(&rel);
            write_file(&dest, serde_json::to_string_pretty(&model)?)?;
            debug!(model = %rel, "Migrated model");
            report.models_migrated += 1;
        }
        Ok(())
    }

    /// Sounds are not migrated yet
    fn migrate_sounds(&self) {
        debug!("Sound migration not supported, skipping");
    }

    fn write_generated(&self, generated: &GeneratedModels) -> Result<usize> {
        let mut written = 0;
        for model in generated {
            let path = self.dest.join("models").join(&model.path);
            if path.exists() {
                debug!(model = %model.path, "Model exists, not generating");
                continue;
            }
            write_file(&path, serde_json::to_string_pretty(&model.descriptor)?)?;
            written += 1;
        }
        Ok(written)
    }

    /// Path of `reference` if it points into the pack being migrated
    fn local_path<'a>(&self, reference: &'a str) -> Option<&'a str> {
        self.namespace.strip(reference).or_else(|| {
            let ns = self.source_namespace.as_deref()?;
            reference.strip_prefix(ns)?.strip_prefix(':')
        })
    }

    /// Layer texture refs become `<ns>:<path>`, matching where
    /// `migrate_textures` puts them; other local refs `<ns>:item/<path>`
    fn rewrite_model(&self, model: &mut Value) {
        if let Some(textures) = model.get_mut("textures").and_then(Value::as_object_mut) {
            for value in textures.values_mut() {
                let Some(path) = value.as_str().and_then(|r| self.local_path(r)) else {
                    continue;
                };
                let file_name = path.rsplit('/').next().unwrap_or(path);
                let rewritten = if self.is_layer(file_name) {
                    self.namespace.id(path)
                } else {
                    self.namespace.item_path(path)
                };
                *value = Value::String(rewritten);
            }
        }

        if let Some(overrides) = model.get_mut("overrides").and_then(Value::as_array_mut) {
            for entry in overrides {
                let Some(target) = entry.get_mut("model") else {
                    continue;
                };
                let Some(path) = target.as_str().and_then(|r| self.local_path(r)) else {
                    continue;
                };
                let rewritten = self.namespace.item_path(path);
                *target = Value::String(rewritten);
            }
        }
    }
}

/// Create a generated model for every `textures/item/**.png` lacking one
///
/// `ns_dir` is an `assets/<namespace>` directory. Existing models are left
/// untouched; returns the number of models written.
pub fn generate_missing_models(ns_dir: &Path, namespace: &Namespace) -> Result<usize> {
    let textures = ns_dir.join("textures").join("item");
    let models = ns_dir.join("models").join("item");

    let mut created = 0;
    for texture in collect_files_with_extension(&textures, &["png"]) {
        let Some(rel) = relative_slash_path(&texture, &textures) else {
            continue;
        };
        let Some(stem) = rel.strip_suffix(".png") else {
            continue;
        };

        let model_path = models.join(format!("{}.json", stem));
        if model_path.exists() {
            continue;
        }

        let descriptor = ModelDescriptor::generated(namespace.item_path(stem));
        write_file(&model_path, serde_json::to_string_pretty(&descriptor)?)?;
        debug!(model = %stem, "Generated missing model");
        created += 1;
    }
    Ok(created)
}
