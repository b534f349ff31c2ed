//! Locating ItemsAdder content inside an extracted bundle
//!
//! Bundles come in many shapes: a full `plugins/ItemsAdder` tree, a single
//! `contents/<pack>` folder, or loose `configs` plus `models`/`textures`.
//! [`locate`] finds the item documents and the resource-pack root and merges
//! the documents into one [`SourceConfig`].

use crate::convert::source::{is_item_document, SourceConfig};
use crate::fs_utils::has_extension;
use crate::migrate::SkippedAsset;
use crate::namespace::Namespace;
use crate::{Error, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Shape of the resource-pack root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLayout {
    /// `<root>/assets/<namespace>/{textures,models}`
    Standard(PathBuf),
    /// `<root>/{textures,models}` with no `assets` level
    Flat(PathBuf),
}

impl ResourceLayout {
    fn detect(root: PathBuf) -> Self {
        if root.join("assets").is_dir() {
            ResourceLayout::Standard(root)
        } else {
            ResourceLayout::Flat(root)
        }
    }

    pub fn root(&self) -> &Path {
        match self {
            ResourceLayout::Standard(root) | ResourceLayout::Flat(root) => root,
        }
    }

    /// Directory holding `textures`/`models` for the pack
    ///
    /// Standard layouts are looked up as `assets/<source_ns>` first (the
    /// folder keeps the pack's original name), then `assets/<target>`, then
    /// the only folder under `assets/` if there is exactly one. Flat layouts
    /// are read in place.
    pub fn asset_dir(&self, source_ns: Option<&str>, target: &Namespace) -> Option<PathBuf> {
        match self {
            ResourceLayout::Flat(root) => Some(root.clone()),
            ResourceLayout::Standard(root) => {
                let assets = root.join("assets");
                source_ns
                    .into_iter()
                    .chain(std::iter::once(target.as_str()))
                    .map(|ns| assets.join(ns))
                    .find(|dir| dir.is_dir())
                    .or_else(|| single_subdir(&assets))
            }
        }
    }
}

/// ItemsAdder content found in a bundle
#[derive(Debug, Clone)]
pub struct Bundle {
    pub root: PathBuf,
    /// The `ItemsAdder` folder, or `root` when there is none
    pub scan_root: PathBuf,
    pub config: SourceConfig,
    pub item_documents: Vec<PathBuf>,
    pub category_documents: Vec<PathBuf>,
    pub resources: ResourceLayout,
    /// YAML files that could not be read or parsed
    pub skipped: Vec<SkippedAsset>,
}

/// Find and merge the ItemsAdder configuration of an extracted bundle
///
/// Fails with [`Error::InvalidInput`] if `root` is not a directory and with
/// [`Error::NoItemConfig`] if no document declares items, equipments or
/// armor renderings.
pub fn locate(root: &Path) -> Result<Bundle> {
    if !root.is_dir() {
        return Err(Error::InvalidInput(root.to_path_buf()));
    }

    let scan_root = find_scan_root(root);
    if scan_root != root {
        info!(path = %scan_root.display(), "Found ItemsAdder folder");
    }

    let mut item_docs = Vec::new();
    let mut category_docs = Vec::new();
    let mut skipped = Vec::new();
    let mut resource_root = None;

    for entry in WalkDir::new(&scan_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if entry.file_type().is_dir() {
            if resource_root.is_none() {
                resource_root = resource_candidate(path);
            }
            continue;
        }
        if !has_extension(path, &["yml", "yaml"]) {
            continue;
        }

        match read_document(path) {
            Ok(Value::Mapping(map)) if !map.is_empty() => {
                let doc = Value::Mapping(map);
                if is_item_document(&doc) {
                    item_docs.push((path.to_path_buf(), doc));
                } else if doc.get("categories").is_some() {
                    category_docs.push((path.to_path_buf(), doc));
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                skipped.push(SkippedAsset {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if item_docs.is_empty() {
        return Err(Error::NoItemConfig(root.to_path_buf()));
    }

    let mut config = SourceConfig::default();
    for (path, doc) in item_docs.iter().chain(category_docs.iter()) {
        debug!(path = %path.display(), "Merging document");
        config.merge_document(doc);
    }

    let resources = ResourceLayout::detect(resource_root.unwrap_or_else(|| root.to_path_buf()));

    info!(
        items = config.items.len(),
        categories = config.categories.len(),
        documents = item_docs.len() + category_docs.len(),
        resources = %resources.root().display(),
        "Located bundle"
    );

    Ok(Bundle {
        root: root.to_path_buf(),
        scan_root,
        config,
        item_documents: item_docs.into_iter().map(|(p, _)| p).collect(),
        category_documents: category_docs.into_iter().map(|(p, _)| p).collect(),
        resources,
        skipped,
    })
}

/// First directory named `itemsadder` (any case), or `root`
fn find_scan_root(root: &Path) -> PathBuf {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| {
            e.file_type().is_dir()
                && e.file_name()
                    .to_str()
                    .is_some_and(|n| n.eq_ignore_ascii_case("itemsadder"))
        })
        .map(|e| e.into_path())
        .unwrap_or_else(|| root.to_path_buf())
}

/// Resource-pack root suggested by one directory, by priority:
/// a `resourcepack` child, an `assets` child, then `models` + `textures`
fn resource_candidate(dir: &Path) -> Option<PathBuf> {
    let resourcepack = dir.join("resourcepack");
    if resourcepack.is_dir() {
        return Some(resourcepack);
    }
    if dir.join("assets").is_dir() {
        return Some(dir.to_path_buf());
    }
    if dir.join("models").is_dir() && dir.join("textures").is_dir() {
        return Some(dir.to_path_buf());
    }
    None
}

fn single_subdir(dir: &Path) -> Option<PathBuf> {
    let mut dirs = fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir());
    let only = dirs.next()?;
    dirs.next().is_none().then_some(only)
}

fn read_document(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(Error::io(path))?;
    Ok(serde_yaml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_standard_bundle() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(
            root,
            "plugins/ItemsAdder/contents/pack/configs/items.yml",
            "info: { namespace: pack }\nitems:\n  ruby: { resource: { material: EMERALD } }\n",
        );
        write(
            root,
            "plugins/ItemsAdder/contents/pack/configs/categories.yml",
            "categories:\n  gems: { items: [ruby] }\n",
        );
        write(
            root,
            "plugins/ItemsAdder/contents/pack/resourcepack/assets/pack/textures/ruby.png",
            "",
        );
        write(root, "plugins/Other/config.yml", "settings: { debug: true }");

        let bundle = locate(root).unwrap();

        assert_eq!(bundle.scan_root, root.join("plugins/ItemsAdder"));
        assert_eq!(bundle.config.namespace.as_deref(), Some("pack"));
        assert_eq!(bundle.config.items.len(), 1);
        assert_eq!(bundle.config.categories.len(), 1);
        assert_eq!(bundle.item_documents.len(), 1);
        assert_eq!(bundle.category_documents.len(), 1);

        let rp = root.join("plugins/ItemsAdder/contents/pack/resourcepack");
        assert_eq!(bundle.resources, ResourceLayout::Standard(rp.clone()));

        let ns = Namespace::parse("renamed").unwrap();
        assert_eq!(
            bundle.resources.asset_dir(Some("pack"), &ns),
            Some(rp.join("assets/pack"))
        );
        // Only one pack folder: used whatever its name
        assert_eq!(
            bundle.resources.asset_dir(None, &ns),
            Some(rp.join("assets/pack"))
        );
    }

    #[test]
    fn test_ambiguous_assets_folder() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("assets/one")).unwrap();
        fs::create_dir_all(root.join("assets/two")).unwrap();

        let layout = ResourceLayout::detect(root.to_path_buf());
        let ns = Namespace::parse("three").unwrap();
        assert_eq!(layout.asset_dir(None, &ns), None);
        assert_eq!(
            layout.asset_dir(Some("two"), &ns),
            Some(root.join("assets/two"))
        );
    }

    #[test]
    fn test_flat_bundle() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "pack/items.yml", "items:\n  gem: { resource: { generate: true } }\n");
        write(root, "pack/textures/gem.png", "");
        write(root, "pack/models/gem.json", "{}");

        let bundle = locate(root).unwrap();
        assert_eq!(bundle.scan_root, root);
        assert_eq!(bundle.resources, ResourceLayout::Flat(root.join("pack")));

        let ns = Namespace::parse("pack").unwrap();
        assert_eq!(
            bundle.resources.asset_dir(None, &ns),
            Some(root.join("pack"))
        );
    }

    #[test]
    fn test_unparsable_documents_recorded() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.yml", "items:\n  gem: {}\n");
        write(tmp.path(), "b.yml", "items: [unclosed");

        let bundle = locate(tmp.path()).unwrap();
        assert_eq!(bundle.skipped.len(), 1);
        assert!(bundle.skipped[0].path.ends_with("b.yml"));
        assert_eq!(bundle.resources, ResourceLayout::Flat(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_no_item_config() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "categories.yml", "categories: { gems: {} }");

        assert!(matches!(locate(tmp.path()), Err(Error::NoItemConfig(_))));
    }

    #[test]
    fn test_invalid_input() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bundle.zip");
        fs::write(&file, "").unwrap();

        assert!(matches!(locate(&file), Err(Error::InvalidInput(_))));
        assert!(matches!(
            locate(&tmp.path().join("missing")),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_later_documents_override() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.yml",
            "info: { namespace: first }\nitems:\n  gem: { display_name: Old }\n",
        );
        write(
            tmp.path(),
            "b.yml",
            "info: { namespace: second }\nitems:\n  gem: { display_name: New }\n",
        );

        let bundle = locate(tmp.path()).unwrap();
        assert_eq!(bundle.config.namespace.as_deref(), Some("first"));
        let gem = bundle.config.items.get("gem").unwrap();
        assert_eq!(gem.get("display_name").and_then(Value::as_str), Some("New"));
    }
}
