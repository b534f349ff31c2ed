//! Pack format and content detection
//!
//! A single walk over an extracted bundle collects format tags (which plugin
//! schemas are present), content tags, completeness flags and counts. Tags
//! are additive: a bundle holding both ItemsAdder and CraftEngine content
//! reports both.
//!
//! Document-level format tagging is a rule table of `(Format, predicate)`
//! pairs evaluated over a [`DocumentView`]; adding a format means adding a
//! row.

use crate::fs_utils::has_extension;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Format {
    ItemsAdder,
    CraftEngine,
    Nexo,
}

impl Format {
    /// Plugin folder name (lowercase)
    pub fn dir_name(self) -> &'static str {
        match self {
            Format::ItemsAdder => "itemsadder",
            Format::CraftEngine => "craftengine",
            Format::Nexo => "nexo",
        }
    }

    fn from_dir_name(name: &str) -> Option<Self> {
        [Format::ItemsAdder, Format::CraftEngine, Format::Nexo]
            .into_iter()
            .find(|f| name.eq_ignore_ascii_case(f.dir_name()))
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::ItemsAdder => "ItemsAdder",
            Format::CraftEngine => "CraftEngine",
            Format::Nexo => "Nexo",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Texture,
    Model,
    Decoration,
    Equipment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Completeness {
    pub items_config: bool,
    pub categories_config: bool,
    pub resource_files: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Details {
    pub item_count: usize,
    pub texture_count: usize,
    pub model_count: usize,
}

/// Result of [`analyze`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub formats: BTreeSet<Format>,
    pub content_types: BTreeSet<ContentType>,
    pub completeness: Completeness,
    pub details: Details,
}

impl DetectionReport {
    pub fn has(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }

    /// Conversion targets offered for this bundle
    pub fn available_targets(&self) -> Vec<Format> {
        if self.has(Format::ItemsAdder) {
            vec![Format::CraftEngine]
        } else {
            Vec::new()
        }
    }

    /// Human-readable notes about the bundle
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.has(Format::CraftEngine) {
            warnings.push(
                "Bundle already contains CraftEngine content; converted files may conflict with it"
                    .to_string(),
            );
        }
        if self.has(Format::ItemsAdder) && !self.completeness.resource_files {
            warnings.push("No resource pack found; only configuration will be converted".to_string());
        }
        warnings
    }
}

// ============================================================================
// Document rules
// ============================================================================

/// A parsed document plus its re-serialized text
pub struct DocumentView<'a> {
    pub value: &'a Value,
    pub text: String,
}

impl<'a> DocumentView<'a> {
    pub fn new(value: &'a Value) -> Self {
        let text = serde_yaml::to_string(value).unwrap_or_default();
        DocumentView { value, text }
    }

    /// Values of the `items` mapping, if it is one
    fn item_entries(&self) -> impl Iterator<Item = &'a Value> {
        self.value
            .get("items")
            .and_then(Value::as_mapping)
            .into_iter()
            .flat_map(|m| m.values())
    }
}

pub struct Rule {
    pub format: Format,
    pub matches: fn(&DocumentView) -> bool,
}

/// Document rules, evaluated independently
pub const RULES: &[Rule] = &[
    Rule {
        format: Format::ItemsAdder,
        matches: is_itemsadder,
    },
    Rule {
        format: Format::CraftEngine,
        matches: is_craftengine,
    },
    Rule {
        format: Format::Nexo,
        matches: is_nexo,
    },
];

fn is_itemsadder(doc: &DocumentView) -> bool {
    if doc
        .value
        .get("info")
        .and_then(|i| i.get("namespace"))
        .is_some()
    {
        return true;
    }
    doc.item_entries()
        .any(|item| item.get("resource").is_some() || item.get("behaviours").is_some())
}

fn is_craftengine(doc: &DocumentView) -> bool {
    doc.item_entries().any(|item| {
        let furniture = item
            .get("behavior")
            .and_then(|b| b.get("type"))
            .and_then(Value::as_str)
            == Some("furniture_item");
        furniture || item.get("model").is_some()
    })
}

fn is_nexo(doc: &DocumentView) -> bool {
    if doc.text.contains("item_id") {
        return true;
    }
    doc.value
        .as_mapping()
        .into_iter()
        .flat_map(|m| m.values())
        .any(|v| {
            v.get("Mechanics").is_some()
                || v.get("Pack").and_then(|p| p.get("generate")).is_some()
        })
}

/// Formats matched by one document
pub fn classify_document(value: &Value) -> BTreeSet<Format> {
    let view = DocumentView::new(value);
    RULES
        .iter()
        .filter(|rule| (rule.matches)(&view))
        .map(|rule| rule.format)
        .collect()
}

// ============================================================================
// Walk
// ============================================================================

/// Scan an extracted bundle
///
/// Unreadable or unparsable files are skipped; a missing root yields an
/// empty report.
pub fn analyze(root: &Path) -> DetectionReport {
    let mut report = DetectionReport::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };

        if entry.file_type().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                scan_dir_name(&mut report, name);
            }
            continue;
        }

        let under = |component: &str| {
            rel.parent()
                .is_some_and(|p| p.components().any(|c| c.as_os_str() == component))
        };

        if under("textures") && has_extension(path, &["png"]) {
            report.details.texture_count += 1;
        }
        if under("models") && has_extension(path, &["json"]) {
            report.details.model_count += 1;
        }
        if has_extension(path, &["yml", "yaml"]) {
            scan_document(&mut report, path);
        }
    }

    debug!(
        formats = ?report.formats,
        items = report.details.item_count,
        textures = report.details.texture_count,
        models = report.details.model_count,
        "Analyzed bundle"
    );

    report
}

fn scan_dir_name(report: &mut DetectionReport, name: &str) {
    if let Some(format) = Format::from_dir_name(name) {
        report.formats.insert(format);
    }
    match name {
        "textures" => {
            report.content_types.insert(ContentType::Texture);
        }
        "models" => {
            report.content_types.insert(ContentType::Model);
        }
        "resourcepack" | "assets" => report.completeness.resource_files = true,
        _ => {}
    }
}

fn scan_document(report: &mut DetectionReport, path: &Path) {
    let parsed = fs::read_to_string(path)
        .map_err(crate::Error::io(path))
        .and_then(|text| serde_yaml::from_str::<Value>(&text).map_err(crate::Error::from));
    let value = match parsed {
        Ok(v) => v,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping unreadable document");
            return;
        }
    };

    let formats = classify_document(&value);
    if formats.contains(&Format::ItemsAdder) {
        if let Some(items) = value.get("items") {
            report.completeness.items_config = true;
            report.content_types.insert(ContentType::Equipment);

            if let Some(items) = items.as_mapping() {
                report.details.item_count += items.len();
                let has_furniture = items
                    .values()
                    .any(|i| i.get("behaviours").and_then(|b| b.get("furniture")).is_some());
                if has_furniture {
                    report.content_types.insert(ContentType::Decoration);
                }
            }
        }
        if value.get("categories").is_some() {
            report.completeness.categories_config = true;
        }
    }
    report.formats.extend(formats);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_itemsadder_rules() {
        let formats = classify_document(&doc("info: { namespace: pack }"));
        assert!(formats.contains(&Format::ItemsAdder));

        let formats = classify_document(&doc("items: { sword: { resource: { material: STONE } } }"));
        assert!(formats.contains(&Format::ItemsAdder));

        // Categories alone are shared with CraftEngine configs
        let formats = classify_document(&doc("categories: { weapons: {} }"));
        assert!(formats.is_empty());
    }

    #[test]
    fn test_craftengine_rules() {
        let ce = doc(
            r#"
items:
  pack:chair:
    behavior: { type: furniture_item }
"#,
        );
        assert_eq!(
            classify_document(&ce),
            BTreeSet::from([Format::CraftEngine])
        );

        let model = doc("items: { 'pack:gem': { model: { type: 'minecraft:model' } } }");
        assert!(classify_document(&model).contains(&Format::CraftEngine));
    }

    #[test]
    fn test_nexo_rules() {
        assert!(classify_document(&doc("ruby: { item_id: PAPER }")).contains(&Format::Nexo));
        assert!(classify_document(&doc("ruby: { Mechanics: {} }")).contains(&Format::Nexo));
        assert!(
            classify_document(&doc("ruby: { Pack: { generate: true } }")).contains(&Format::Nexo)
        );
        assert!(!classify_document(&doc("ruby: { Pack: {} }")).contains(&Format::Nexo));
    }

    #[test]
    fn test_tags_are_additive() {
        let both = doc(
            r#"
info: { namespace: pack }
items:
  sword: { resource: { material: STONE }, model: x }
"#,
        );
        let formats = classify_document(&both);
        assert!(formats.contains(&Format::ItemsAdder));
        assert!(formats.contains(&Format::CraftEngine));
    }

    #[test]
    fn test_analyze_bundle() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(
            root,
            "ItemsAdder/contents/pack/configs/items.yml",
            r#"
info: { namespace: pack }
items:
  ruby: { resource: { material: EMERALD } }
  chair: { behaviours: { furniture: {} } }
categories:
  gems: { items: [ruby] }
"#,
        );
        write(root, "ItemsAdder/contents/pack/configs/broken.yml", "items: [unclosed");
        write(
            root,
            "ItemsAdder/contents/pack/resourcepack/assets/pack/textures/ruby.png",
            "",
        );
        write(
            root,
            "ItemsAdder/contents/pack/resourcepack/assets/pack/textures/sub/chair.png",
            "",
        );
        write(
            root,
            "ItemsAdder/contents/pack/resourcepack/assets/pack/models/chair.json",
            "{}",
        );

        let report = analyze(root);

        assert_eq!(report.formats, BTreeSet::from([Format::ItemsAdder]));
        assert!(report.completeness.items_config);
        assert!(report.completeness.categories_config);
        assert!(report.completeness.resource_files);
        assert_eq!(report.details.item_count, 2);
        assert_eq!(report.details.texture_count, 2);
        assert_eq!(report.details.model_count, 1);
        for tag in [
            ContentType::Texture,
            ContentType::Model,
            ContentType::Decoration,
            ContentType::Equipment,
        ] {
            assert!(report.content_types.contains(&tag), "{:?}", tag);
        }
        assert_eq!(report.available_targets(), vec![Format::CraftEngine]);
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_directory_names_tag_formats() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("plugins/CraftEngine")).unwrap();
        fs::create_dir_all(tmp.path().join("plugins/Nexo")).unwrap();

        let report = analyze(tmp.path());
        assert!(report.has(Format::CraftEngine));
        assert!(report.has(Format::Nexo));
        assert!(!report.has(Format::ItemsAdder));
        assert!(report.available_targets().is_empty());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn test_report_json() {
        let mut report = DetectionReport::default();
        report.formats.insert(Format::ItemsAdder);
        report.content_types.insert(ContentType::Texture);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["formats"][0], "ItemsAdder");
        assert_eq!(json["content_types"][0], "texture");
        assert_eq!(json["completeness"]["items_config"], false);
    }

    #[test]
    fn test_missing_root() {
        let report = analyze(Path::new("/nonexistent/mcc/bundle"));
        assert_eq!(report, DetectionReport::default());
    }
}
