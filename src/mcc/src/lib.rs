//! # mcc
//!
//! ItemsAdder → CraftEngine pack conversion library.
//!
//! This library provides functionality to:
//! - Detect which plugin schemas and content kinds an extracted pack contains
//! - Locate and merge the ItemsAdder item/category documents of a pack
//! - Translate items, equipment skins, templates and categories to CraftEngine
//! - Generate furniture placement and hitbox geometry
//! - Relocate textures and models into the CraftEngine resource-pack layout
//!
//! ## Example
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = mcc::analyze("extracted".as_ref());
//! println!("Formats: {:?}", report.formats);
//!
//! let request = mcc::ConversionRequest::new(
//!     PathBuf::from("extracted"),
//!     PathBuf::from("out"),
//! )
//! .with_namespace("mypack");
//!
//! let summary = mcc::run(&request)?;
//! println!("Converted {} items", summary.item_count);
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod convert;
pub mod detect;
mod fs_utils;
pub mod migrate;
pub mod model;
pub mod namespace;
pub mod output;
pub mod pipeline;
pub mod placement;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Input is not a readable directory: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("No item configuration (items/equipments/armors_rendering) found in {}", .0.display())]
    NoItemConfig(PathBuf),

    #[error(
        "Invalid namespace {0:?}: only lowercase letters, digits, '_', '-' and '.' are allowed"
    )]
    InvalidNamespace(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach a path to an IO error
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// Re-export commonly used items
#[doc(inline)]
pub use bundle::{locate, Bundle, ResourceLayout};
#[doc(inline)]
pub use convert::{
    ConvertOptions, ConvertedConfig, ConvertedItem, Converter, ItemKind, NameStyle, SkippedEntry,
    SourceConfig,
};
#[doc(inline)]
pub use detect::{analyze, ContentType, DetectionReport, Format};
#[doc(inline)]
pub use migrate::{
    generate_missing_models, MigrateOptions, MigrationReport, Migrator, SkippedAsset,
    DEFAULT_LAYER_MARKER,
};
#[doc(inline)]
pub use model::{GeneratedModel, GeneratedModels, ModelDescriptor};
#[doc(inline)]
pub use namespace::{Namespace, DEFAULT_NAMESPACE};
#[doc(inline)]
pub use pipeline::{run, ConversionRequest, ConversionSummary};
#[doc(inline)]
pub use placement::{
    build_placement, GeometryOptions, HitboxPrimitive, PlacementBlock, Surface,
    DEFAULT_SEAT_HEIGHT_OFFSET,
};
