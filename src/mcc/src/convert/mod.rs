//! ItemsAdder → CraftEngine schema conversion
//!
//! [`Converter::convert`] resolves the namespace, then walks the merged
//! source sections. Items are classified into an [`ItemKind`] and handed to
//! the matching transform in [`item`]; equipments and categories are mapped
//! entry by entry. Entries that fail to deserialize are recorded in
//! [`ConvertedConfig::skipped`] and the rest of the section continues.

pub mod category;
pub mod display;
pub mod equipment;
pub mod item;
pub mod kind;
pub mod source;
pub mod template;

pub use category::Category;
pub use display::NameStyle;
pub use equipment::Equipment;
pub use item::{ConvertedItem, ModelRef};
pub use kind::{ArmorSlot, ChargedKind, ItemKind};
pub use source::SourceConfig;
pub use template::ModelNode;

use crate::model::GeneratedModels;
use crate::namespace::Namespace;
use crate::placement::GeometryOptions;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Mapping;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Tunables for a conversion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    pub geometry: GeometryOptions,
    pub name_style: NameStyle,
}

/// A source entry left out of the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub section: String,
    pub key: String,
    pub reason: String,
}

/// Everything produced from one [`SourceConfig`]
///
/// Collections keep the source order and are keyed by their full
/// `namespace:key` (or template) id.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedConfig {
    pub namespace: Namespace,
    pub items: Vec<(String, ConvertedItem)>,
    pub armor: Vec<(String, ConvertedItem)>,
    pub templates: Vec<(String, ModelNode)>,
    pub equipments: Vec<(String, Equipment)>,
    pub categories: Vec<(String, Category)>,
    pub generated_models: GeneratedModels,
    pub skipped: Vec<SkippedEntry>,
}

impl ConvertedConfig {
    fn new(namespace: Namespace) -> Self {
        ConvertedConfig {
            namespace,
            items: Vec::new(),
            armor: Vec::new(),
            templates: Vec::new(),
            equipments: Vec::new(),
            categories: Vec::new(),
            generated_models: GeneratedModels::new(),
            skipped: Vec::new(),
        }
    }

    /// Items across both the item and armor documents
    pub fn item_count(&self) -> usize {
        self.items.len() + self.armor.len()
    }

    /// Look up a converted item by id in either collection
    pub fn item(&self, id: &str) -> Option<&ConvertedItem> {
        self.items
            .iter()
            .chain(self.armor.iter())
            .find(|(k, _)| k == id)
            .map(|(_, item)| item)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, c)| c)
    }

    pub fn equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipments
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, e)| e)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a merged source configuration
    ///
    /// Fails with [`crate::Error::InvalidNamespace`] before any entry is
    /// processed if the resolved namespace is not valid.
    pub fn convert(
        &self,
        source: &SourceConfig,
        namespace_override: Option<&str>,
    ) -> crate::Result<ConvertedConfig> {
        let namespace = Namespace::resolve(namespace_override, source.namespace.as_deref())?;
        let mut out = ConvertedConfig::new(namespace);

        self.convert_items(&source.items, &mut out);
        let layer_sections = [
            ("equipments", &source.equipments),
            ("armors_rendering", &source.armors_rendering),
        ];
        for (section, entries) in layer_sections {
            for (key, entry) in typed_entries(section, entries, &mut out.skipped) {
                let eq = equipment::convert_equipment(&out.namespace, &entry);
                upsert(&mut out.equipments, out.namespace.id(&key), eq);
            }
        }
        for (key, entry) in typed_entries("categories", &source.categories, &mut out.skipped) {
            let cat = category::convert_category(&out.namespace, &key, &entry);
            upsert(&mut out.categories, out.namespace.id(&key), cat);
        }

        info!(
            namespace = %out.namespace,
            items = out.items.len(),
            armor = out.armor.len(),
            templates = out.templates.len(),
            equipments = out.equipments.len(),
            categories = out.categories.len(),
            skipped = out.skipped.len(),
            "Converted configuration"
        );

        Ok(out)
    }

    fn convert_items(&self, items: &Mapping, out: &mut ConvertedConfig) {
        for (key, source) in typed_entries::<source::SourceItem>("items", items, &mut out.skipped) {
            let converted = item::convert_item(
                &out.namespace,
                &self.options.geometry,
                &self.options.name_style,
                &key,
                &source,
            );
            debug!(item = %key, kind = ?converted.kind, "Converted item");

            if let Some(template) = converted.template {
                upsert(&mut out.templates, template.id, template.node);
            }
            if let Some(model) = converted.generated_model {
                if !out.generated_models.insert(model) {
                    debug!(item = %key, "Generated model already registered");
                }
            }

            let id = out.namespace.id(&key);
            let target = if converted.kind == ItemKind::Armor {
                &mut out.armor
            } else {
                &mut out.items
            };
            upsert(target, id, converted.item);
        }
    }
}

/// Deserialize each entry of a section, recording failures as skipped
///
/// Keys that render to the same string (`1` and `"1"`) keep the first entry.
fn typed_entries<T>(
    section: &str,
    entries: &Mapping,
    skipped: &mut Vec<SkippedEntry>,
) -> Vec<(String, T)>
where
    T: DeserializeOwned + Default,
{
    let mut typed = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();

    for (key, value) in entries {
        let Some(key) = source::key_string(key) else {
            warn!(section, "Skipping entry with non-scalar key");
            skipped.push(SkippedEntry {
                section: section.to_string(),
                key: format!("{:?}", key),
                reason: "key is not a scalar".to_string(),
            });
            continue;
        };

        if !seen.insert(key.clone()) {
            warn!(section, key = %key, "Skipping entry with duplicate key");
            skipped.push(SkippedEntry {
                section: section.to_string(),
                key,
                reason: "duplicate key".to_string(),
            });
            continue;
        }

        if value.is_null() {
            typed.push((key, T::default()));
            continue;
        }

        match serde_yaml::from_value::<T>(value.clone()) {
            Ok(entry) => typed.push((key, entry)),
            Err(e) => {
                warn!(section, key = %key, error = %e, "Skipping malformed entry");
                skipped.push(SkippedEntry {
                    section: section.to_string(),
                    key,
                    reason: e.to_string(),
                });
            }
        }
    }

    typed
}

fn upsert<T>(entries: &mut Vec<(String, T)>, id: String, value: T) {
    match entries.iter_mut().find(|(k, _)| *k == id) {
        Some((_, existing)) => *existing = value,
        None => entries.push((id, value)),
    }
}

/// Parse and convert a single YAML document
pub fn convert_document(
    text: &str,
    namespace_override: Option<&str>,
    options: ConvertOptions,
) -> crate::Result<ConvertedConfig> {
    let source = SourceConfig::from_yaml(text)?;
    Converter::new(options).convert(&source, namespace_override)
}
