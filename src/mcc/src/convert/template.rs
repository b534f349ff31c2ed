//! Model templates for state-dependent items
//!
//! Bows, crossbows, shields and fishing rods swap models while in use. They
//! are converted to a shared template (a model dispatch tree with `${name}`
//! placeholders) plus per-item arguments resolving each placeholder.

use super::kind::ChargedKind;
use crate::namespace::Namespace;
use serde::Serialize;
use std::collections::BTreeMap;

/// Item model definition node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ModelNode {
    #[serde(rename = "minecraft:model")]
    Model { path: String },

    #[serde(rename = "minecraft:condition")]
    Condition {
        property: String,
        #[serde(rename = "on-false")]
        on_false: Box<ModelNode>,
        #[serde(rename = "on-true")]
        on_true: Box<ModelNode>,
    },

    #[serde(rename = "minecraft:range_dispatch")]
    RangeDispatch {
        property: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
        entries: Vec<RangeEntry>,
        fallback: Box<ModelNode>,
    },

    #[serde(rename = "minecraft:select")]
    Select {
        property: String,
        cases: Vec<SelectCase>,
        fallback: Box<ModelNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEntry {
    pub threshold: f64,
    pub model: ModelNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectCase {
    pub when: String,
    pub model: ModelNode,
}

impl ModelNode {
    pub fn model(path: impl Into<String>) -> Self {
        ModelNode::Model { path: path.into() }
    }

    /// `minecraft:model` pointing at a `${name}` placeholder
    fn placeholder(name: &str) -> Self {
        Self::model(format!("${{{}}}", name))
    }

    fn condition(property: &str, on_false: ModelNode, on_true: ModelNode) -> Self {
        ModelNode::Condition {
            property: property.to_string(),
            on_false: Box::new(on_false),
            on_true: Box::new(on_true),
        }
    }

    fn range(property: &str, scale: Option<f64>, stages: &[(f64, &str)], fallback: &str) -> Self {
        ModelNode::RangeDispatch {
            property: property.to_string(),
            scale,
            entries: stages
                .iter()
                .map(|(threshold, name)| RangeEntry {
                    threshold: *threshold,
                    model: Self::placeholder(name),
                })
                .collect(),
            fallback: Box::new(Self::placeholder(fallback)),
        }
    }

    /// Placeholder names referenced anywhere in this tree
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_placeholders(&mut names);
        names
    }

    fn collect_placeholders(&self, names: &mut Vec<String>) {
        match self {
            ModelNode::Model { path } => {
                if let Some(name) = path.strip_prefix("${").and_then(|p| p.strip_suffix('}')) {
                    names.push(name.to_string());
                }
            }
            ModelNode::Condition {
                on_false, on_true, ..
            } => {
                on_false.collect_placeholders(names);
                on_true.collect_placeholders(names);
            }
            ModelNode::RangeDispatch {
                entries, fallback, ..
            } => {
                entries
                    .iter()
                    .for_each(|e| e.model.collect_placeholders(names));
                fallback.collect_placeholders(names);
            }
            ModelNode::Select {
                cases, fallback, ..
            } => {
                cases
                    .iter()
                    .for_each(|c| c.model.collect_placeholders(names));
                fallback.collect_placeholders(names);
            }
        }
    }
}

/// A registered template and the arguments one item passes to it
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    pub node: ModelNode,
    pub arguments: BTreeMap<String, String>,
}

impl ChargedKind {
    /// Dispatch tree for this kind
    pub fn model_tree(self) -> ModelNode {
        match self {
            ChargedKind::Bow => ModelNode::condition(
                "minecraft:using_item",
                ModelNode::placeholder("bow_model"),
                ModelNode::range(
                    "minecraft:use_duration",
                    Some(0.05),
                    &[(0.65, "bow_pulling_1_model"), (0.9, "bow_pulling_2_model")],
                    "bow_pulling_0_model",
                ),
            ),
            ChargedKind::Crossbow => ModelNode::condition(
                "minecraft:using_item",
                ModelNode::Select {
                    property: "minecraft:charge_type".to_string(),
                    cases: vec![
                        SelectCase {
                            when: "arrow".to_string(),
                            model: ModelNode::placeholder("arrow_model"),
                        },
                        SelectCase {
                            when: "rocket".to_string(),
                            model: ModelNode::placeholder("firework_model"),
                        },
                    ],
                    fallback: Box::new(ModelNode::placeholder("model")),
                },
                ModelNode::range(
                    "minecraft:crossbow/pull",
                    None,
                    &[(0.58, "pulling_1_model"), (1.0, "pulling_2_model")],
                    "pulling_0_model",
                ),
            ),
            ChargedKind::Shield => ModelNode::condition(
                "minecraft:using_item",
                ModelNode::placeholder("shield_model"),
                ModelNode::placeholder("shield_blocking_model"),
            ),
            ChargedKind::FishingRod => ModelNode::condition(
                "minecraft:fishing_rod/cast",
                ModelNode::placeholder("path"),
                ModelNode::placeholder("cast_path"),
            ),
        }
    }

    /// Placeholder name → suffix appended to the item's base model path
    pub fn argument_suffixes(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ChargedKind::Bow => &[
                ("bow_model", ""),
                ("bow_pulling_0_model", "_0"),
                ("bow_pulling_1_model", "_1"),
                ("bow_pulling_2_model", "_2"),
            ],
            ChargedKind::Crossbow => &[
                ("model", ""),
                ("arrow_model", "_charged"),
                ("firework_model", "_firework"),
                ("pulling_0_model", "_0"),
                ("pulling_1_model", "_1"),
                ("pulling_2_model", "_2"),
            ],
            ChargedKind::Shield => &[("shield_model", ""), ("shield_blocking_model", "_blocking")],
            ChargedKind::FishingRod => &[("path", ""), ("cast_path", "_cast")],
        }
    }
}

/// Build the template for one charged item
pub fn charged_template(
    kind: ChargedKind,
    namespace: &Namespace,
    key: &str,
    base_path: &str,
) -> Template {
    let arguments = kind
        .argument_suffixes()
        .iter()
        .map(|(name, suffix)| {
            (
                name.to_string(),
                namespace.item_path(&format!("{}{}", base_path, suffix)),
            )
        })
        .collect();

    Template {
        id: format!("models:{}_{}_model", namespace, key),
        node: kind.model_tree(),
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns() -> Namespace {
        Namespace::parse("pack").unwrap()
    }

    #[test]
    fn test_bow_template_arguments() {
        let template = charged_template(ChargedKind::Bow, &ns(), "longbow", "custom_bow");

        assert_eq!(template.id, "models:pack_longbow_model");
        assert_eq!(template.arguments.len(), 4);
        assert_eq!(template.arguments["bow_model"], "pack:item/custom_bow");
        assert_eq!(
            template.arguments["bow_pulling_0_model"],
            "pack:item/custom_bow_0"
        );
        assert_eq!(
            template.arguments["bow_pulling_2_model"],
            "pack:item/custom_bow_2"
        );
        assert!(template
            .arguments
            .values()
            .all(|v| v.starts_with("pack:item/custom_bow")));
    }

    #[test]
    fn test_placeholders_match_arguments() {
        for kind in [
            ChargedKind::Bow,
            ChargedKind::Crossbow,
            ChargedKind::Shield,
            ChargedKind::FishingRod,
        ] {
            let template = charged_template(kind, &ns(), "x", "x");
            let mut placeholders = template.node.placeholders();
            placeholders.sort();
            let arguments: Vec<_> = template.arguments.keys().cloned().collect();
            assert_eq!(placeholders, arguments, "{:?}", kind);
        }
    }

    #[test]
    fn test_model_tree_yaml() {
        let yaml = serde_yaml::to_string(&ChargedKind::Shield.model_tree()).unwrap();
        assert!(yaml.starts_with("type: minecraft:condition"));
        assert!(yaml.contains("on-false:"));
        assert!(yaml.contains("path: ${shield_blocking_model}"));
    }

    #[test]
    fn test_bow_range_dispatch_scale() {
        let value = serde_yaml::to_value(ChargedKind::Bow.model_tree()).unwrap();
        let on_true = value.get("on-true").unwrap();
        assert_eq!(
            on_true.get("type").and_then(|v| v.as_str()),
            Some("minecraft:range_dispatch")
        );
        assert_eq!(on_true.get("scale").and_then(|v| v.as_f64()), Some(0.05));

        let crossbow = serde_yaml::to_value(ChargedKind::Crossbow.model_tree()).unwrap();
        assert!(crossbow.get("on-true").unwrap().get("scale").is_none());
    }
}
