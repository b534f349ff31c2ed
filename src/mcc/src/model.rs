//! Minimal item model descriptors
//!
//! The converter registers a model for every item that asks for one to be
//! generated from a texture. The registry is handed to the migrator as a plain
//! value, which materializes each entry under `models/`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parent model for flat generated items
pub const GENERATED_PARENT: &str = "minecraft:item/generated";

/// A model file with a parent and a texture map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub parent: String,
    pub textures: BTreeMap<String, String>,
}

impl ModelDescriptor {
    /// Single-layer generated item model
    pub fn generated(texture_ref: impl Into<String>) -> Self {
        let mut textures = BTreeMap::new();
        textures.insert("layer0".to_string(), texture_ref.into());
        ModelDescriptor {
            parent: GENERATED_PARENT.to_string(),
            textures,
        }
    }
}

/// A model to synthesize, keyed by its path relative to `models/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModel {
    /// e.g. `item/weapons/ruby_sword.json`
    pub path: String,
    pub descriptor: ModelDescriptor,
}

/// Ordered, path-unique list of models to synthesize
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedModels(Vec<GeneratedModel>);

impl GeneratedModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model; returns false (and keeps the first entry) if the path is taken
    pub fn insert(&mut self, model: GeneratedModel) -> bool {
        if self.get(&model.path).is_some() {
            return false;
        }
        self.0.push(model);
        true
    }

    pub fn get(&self, path: &str) -> Option<&GeneratedModel> {
        self.0.iter().find(|m| m.path == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeneratedModel> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a GeneratedModels {
    type Item = &'a GeneratedModel;
    type IntoIter = std::slice::Iter<'a, GeneratedModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_descriptor_json() {
        let model = ModelDescriptor::generated("pack:item/ruby");
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["parent"], "minecraft:item/generated");
        assert_eq!(json["textures"]["layer0"], "pack:item/ruby");
    }

    #[test]
    fn test_registry_keeps_first_path() {
        let mut models = GeneratedModels::new();
        assert!(models.insert(GeneratedModel {
            path: "item/ruby.json".into(),
            descriptor: ModelDescriptor::generated("pack:item/ruby"),
        }));
        assert!(!models.insert(GeneratedModel {
            path: "item/ruby.json".into(),
            descriptor: ModelDescriptor::generated("pack:item/other"),
        }));

        assert_eq!(models.len(), 1);
        let kept = models.get("item/ruby.json").unwrap();
        assert_eq!(kept.descriptor.textures["layer0"], "pack:item/ruby");
    }
}
