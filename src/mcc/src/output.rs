//! CraftEngine configuration documents
//!
//! A converted configuration is split into up to three files under
//! `configuration/items/<namespace>/`:
//!
//! | File             | Sections                 |
//! |------------------|--------------------------|
//! | `items.yml`      | `templates`, `items`     |
//! | `armor.yml`      | `items`, `equipments`    |
//! | `categories.yml` | `categories`             |
//!
//! Empty documents are not written.

use crate::convert::ConvertedConfig;
use crate::fs_utils::write_file;
use crate::Result;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::info;

/// Attribution appended to every document
pub const FOOTER: &str = "\n# Generated by mcc (ItemsAdder to CraftEngine converter)\n# Source: ItemsAdder configuration, converted automatically\n";

pub const ITEMS_FILE: &str = "items.yml";
pub const ARMOR_FILE: &str = "armor.yml";
pub const CATEGORIES_FILE: &str = "categories.yml";

/// Configuration directory for a namespace under an output root
pub fn config_dir(output: &Path, namespace: &str) -> PathBuf {
    output
        .join("configuration")
        .join("items")
        .join(namespace)
}

/// Build the documents for a converted configuration, skipping empty ones
pub fn build_documents(config: &ConvertedConfig) -> Result<Vec<(&'static str, Mapping)>> {
    let mut docs = Vec::new();

    let mut items = Mapping::new();
    add_section(&mut items, "templates", &config.templates)?;
    add_section(&mut items, "items", &config.items)?;
    docs.push((ITEMS_FILE, items));

    let mut armor = Mapping::new();
    add_section(&mut armor, "items", &config.armor)?;
    add_section(&mut armor, "equipments", &config.equipments)?;
    docs.push((ARMOR_FILE, armor));

    let mut categories = Mapping::new();
    add_section(&mut categories, "categories", &config.categories)?;
    docs.push((CATEGORIES_FILE, categories));

    docs.retain(|(_, doc)| !doc.is_empty());
    Ok(docs)
}

fn add_section<T: Serialize>(doc: &mut Mapping, name: &str, entries: &[(String, T)]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let mut section = Mapping::new();
    for (id, entry) in entries {
        section.insert(Value::String(id.clone()), serde_yaml::to_value(entry)?);
    }
    doc.insert(Value::String(name.to_string()), Value::Mapping(section));
    Ok(())
}

/// Serialize a document and append the footer
pub fn render_document(doc: &Mapping) -> Result<String> {
    let mut text = serde_yaml::to_string(doc)?;
    text.push_str(FOOTER);
    Ok(text)
}

/// Write all non-empty documents into `dir`; returns the written paths
pub fn write_documents(config: &ConvertedConfig, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (name, doc) in build_documents(config)? {
        let path = dir.join(name);
        write_file(&path, render_document(&doc)?)?;
        written.push(path);
    }

    info!(dir = %dir.display(), documents = written.len(), "Wrote configuration");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{convert_document, ConvertOptions};
    use std::fs;
    use tempfile::TempDir;

    fn convert(yaml: &str) -> ConvertedConfig {
        convert_document(yaml, None, ConvertOptions::default()).unwrap()
    }

    #[test]
    fn test_documents_split() {
        let config = convert(
            r#"
info: { namespace: pack }
items:
  bow: { resource: { material: BOW, model_path: bow } }
  helmet: { resource: { material: IRON_HELMET } }
equipments:
  ruby: { layer_1: armor/ruby_layer_1 }
"#,
        );
        let docs = build_documents(&config).unwrap();
        let names: Vec<_> = docs.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![ITEMS_FILE, ARMOR_FILE]);

        let items = &docs[0].1;
        let keys: Vec<_> = items.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["templates", "items"]);
        assert!(items
            .get("items")
            .and_then(|i| i.get("pack:bow"))
            .is_some());

        let armor = &docs[1].1;
        assert!(armor.get("items").and_then(|i| i.get("pack:helmet")).is_some());
        assert!(armor
            .get("equipments")
            .and_then(|e| e.get("pack:ruby"))
            .is_some());
    }

    #[test]
    fn test_write_documents_with_footer() {
        let tmp = TempDir::new().unwrap();
        let config = convert(
            r#"
info: { namespace: pack }
items:
  gem: { display_name: Gem }
categories:
  gems: { items: [gem] }
"#,
        );

        let dir = config_dir(tmp.path(), config.namespace.as_str());
        let written = write_documents(&config, &dir).unwrap();

        assert_eq!(written, vec![dir.join(ITEMS_FILE), dir.join(CATEGORIES_FILE)]);
        assert!(!dir.join(ARMOR_FILE).exists());

        let text = fs::read_to_string(dir.join(CATEGORIES_FILE)).unwrap();
        assert!(text.ends_with(FOOTER));
        assert_eq!(FOOTER.lines().filter(|l| l.starts_with('#')).count(), 2);

        let parsed: Value = serde_yaml::from_str(&text).unwrap();
        let list = parsed["categories"]["pack:gems"]["list"].as_sequence().unwrap();
        assert_eq!(list[0].as_str(), Some("pack:gem"));
    }

    #[test]
    fn test_empty_config_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = convert("info: { namespace: pack }");
        let written = write_documents(&config, tmp.path()).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_config_dir() {
        assert_eq!(
            config_dir(Path::new("out"), "pack"),
            PathBuf::from("out/configuration/items/pack")
        );
    }
}
