//! Typed views over ItemsAdder configuration
//!
//! Documents are merged as raw YAML mappings; individual entries are
//! deserialized into the structs below when they are converted, so one
//! malformed entry does not poison the rest of its document.

use crate::placement::{FurnitureData, SeatData};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// Material used when an item declares none
pub const PLACEHOLDER_MATERIAL: &str = "STONE";

/// Sections that mark a document as an item configuration
pub const ITEM_SECTIONS: [&str; 3] = ["items", "equipments", "armors_rendering"];

/// Merged ItemsAdder configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceConfig {
    /// `info.namespace` of the first document declaring one
    pub namespace: Option<String>,
    pub items: Mapping,
    pub equipments: Mapping,
    pub armors_rendering: Mapping,
    pub categories: Mapping,
}

impl SourceConfig {
    /// Parse a single document
    pub fn from_yaml(text: &str) -> crate::Result<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        let mut config = SourceConfig::default();
        config.merge_document(&value);
        Ok(config)
    }

    /// Merge one document; later entries replace earlier ones with the same key
    pub fn merge_document(&mut self, doc: &Value) {
        if self.namespace.is_none() {
            self.namespace = doc
                .get("info")
                .and_then(|i| i.get("namespace"))
                .and_then(|n| n.as_str())
                .map(str::to_string);
        }

        merge_section(&mut self.items, doc.get("items"));
        merge_section(&mut self.equipments, doc.get("equipments"));
        merge_section(&mut self.armors_rendering, doc.get("armors_rendering"));
        merge_section(&mut self.categories, doc.get("categories"));
    }

    /// True if any item, equipment or armor-rendering entry is present
    pub fn has_item_sections(&self) -> bool {
        !self.items.is_empty() || !self.equipments.is_empty() || !self.armors_rendering.is_empty()
    }
}

/// Check whether a document declares any item section
pub fn is_item_document(doc: &Value) -> bool {
    ITEM_SECTIONS.iter().any(|k| doc.get(*k).is_some())
}

fn merge_section(target: &mut Mapping, section: Option<&Value>) {
    if let Some(map) = section.and_then(Value::as_mapping) {
        for (key, value) in map {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Render a mapping key as a string (YAML allows numeric and boolean keys)
pub fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One entry of `items`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceItem {
    pub display_name: Option<String>,
    pub resource: Resource,
    pub behaviours: Behaviours,
    /// Legacy `equipment: { id }` block
    pub equipment: Option<LegacyEquipment>,
    pub specific_properties: SpecificProperties,
}

impl SourceItem {
    /// Declared material, or [`PLACEHOLDER_MATERIAL`]
    pub fn material(&self) -> &str {
        self.resource
            .material
            .as_deref()
            .unwrap_or(PLACEHOLDER_MATERIAL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub material: Option<String>,
    pub model_path: Option<String>,
    pub generate: bool,
    pub textures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Behaviours {
    pub furniture: Option<FurnitureData>,
    pub furniture_sit: Option<SeatData>,
    pub hat: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyEquipment {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpecificProperties {
    pub armor: Option<ArmorProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArmorProperties {
    pub custom_armor: Option<String>,
    pub slot: Option<String>,
}

/// One entry of `equipments` or `armors_rendering`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerPair {
    pub layer_1: Option<String>,
    pub layer_2: Option<String>,
}

/// One entry of `categories`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceCategory {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub items: Vec<String>,
    pub enabled: bool,
}

impl Default for SourceCategory {
    fn default() -> Self {
        SourceCategory {
            name: None,
            icon: None,
            items: Vec::new(),
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_documents() {
        let first: Value = serde_yaml::from_str(
            r#"
info:
  namespace: first
items:
  sword: { display_name: Old }
  axe: {}
"#,
        )
        .unwrap();
        let second: Value = serde_yaml::from_str(
            r#"
info:
  namespace: second
items:
  sword: { display_name: New }
categories:
  weapons: { items: [sword] }
"#,
        )
        .unwrap();

        let mut config = SourceConfig::default();
        config.merge_document(&first);
        config.merge_document(&second);

        assert_eq!(config.namespace.as_deref(), Some("first"));
        assert_eq!(config.items.len(), 2);
        let sword = config.items.get("sword").unwrap();
        assert_eq!(
            sword.get("display_name").and_then(Value::as_str),
            Some("New")
        );
        assert_eq!(config.categories.len(), 1);
        assert!(config.has_item_sections());
    }

    #[test]
    fn test_item_document_detection() {
        let doc: Value = serde_yaml::from_str("armors_rendering: {}").unwrap();
        assert!(is_item_document(&doc));
        let doc: Value = serde_yaml::from_str("categories: {}").unwrap();
        assert!(!is_item_document(&doc));
    }

    #[test]
    fn test_source_item_defaults() {
        let item: SourceItem = serde_yaml::from_str(
            r#"
display_name: Ruby
resource:
  generate: true
  textures: [gems/ruby.png]
behaviours:
  hat: true
"#,
        )
        .unwrap();

        assert_eq!(item.display_name.as_deref(), Some("Ruby"));
        assert!(item.resource.generate);
        assert_eq!(item.resource.material, None);
        assert!(item.behaviours.hat);
        assert!(item.behaviours.furniture.is_none());
        assert!(item.equipment.is_none());
    }

    #[test]
    fn test_category_enabled_default() {
        let cat: SourceCategory = serde_yaml::from_str("name: Gems").unwrap();
        assert!(cat.enabled);
        assert!(cat.items.is_empty());
    }

    #[test]
    fn test_key_string() {
        assert_eq!(key_string(&Value::String("sword".into())).as_deref(), Some("sword"));
        assert_eq!(key_string(&Value::Number(42u64.into())).as_deref(), Some("42"));
        assert_eq!(key_string(&Value::Null), None);
    }
}
