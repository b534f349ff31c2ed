//! Per-kind item transforms
//!
//! Each function here is pure: it takes one classified source item and
//! returns the converted item together with whatever it contributes to the
//! shared collections (a template, a generated model).

use super::display::NameStyle;
use super::kind::{ArmorSlot, ItemKind};
use super::source::{Resource, SourceItem, PLACEHOLDER_MATERIAL};
use super::template::{charged_template, ModelNode, Template};
use crate::model::{GeneratedModel, ModelDescriptor};
use crate::namespace::Namespace;
use crate::placement::{build_placement, GeometryOptions, PlacementBlock, Surface};
use serde::Serialize;
use std::collections::BTreeMap;

const BREAK_SOUND: &str = "minecraft:block.stone.break";
const PLACE_SOUND: &str = "minecraft:block.stone.place";
const FURNITURE_LOOT_TEMPLATE: &str = "default:loot_table/furniture";

/// One CraftEngine item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedItem {
    pub material: String,
    pub data: ItemData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ItemSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<FurnitureBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ItemData {
    pub item_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equippable: Option<Equippable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equippable {
    pub slot: ArmorSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSettings {
    pub equipment: EquipmentSetting,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EquipmentSetting {
    pub asset_id: String,
    pub slot: ArmorSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FurnitureBehavior {
    #[serde(rename = "type")]
    pub kind: String,
    pub furniture: Furniture,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Furniture {
    pub settings: FurnitureSettings,
    pub loot: Loot,
    pub placement: BTreeMap<Surface, PlacementBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FurnitureSettings {
    pub item: String,
    pub sounds: Sounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sounds {
    #[serde(rename = "break")]
    pub break_sound: String,
    #[serde(rename = "place")]
    pub place_sound: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loot {
    pub template: String,
    pub arguments: BTreeMap<String, String>,
}

/// Model reference: inline node or template invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelRef {
    Node(ModelNode),
    Template {
        template: String,
        arguments: BTreeMap<String, String>,
    },
}

/// Result of converting one item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutput {
    pub kind: ItemKind,
    pub item: ConvertedItem,
    pub template: Option<Template>,
    pub generated_model: Option<GeneratedModel>,
}

/// Convert one source item under `namespace`
pub fn convert_item(
    namespace: &Namespace,
    geometry: &GeometryOptions,
    style: &NameStyle,
    key: &str,
    source: &SourceItem,
) -> ItemOutput {
    let kind = ItemKind::classify(source);
    let id = namespace.id(key);
    let display_name = source.display_name.as_deref().unwrap_or(key);

    let mut item = ConvertedItem {
        material: source.material().to_string(),
        data: ItemData {
            item_name: style.format(display_name, namespace),
            equippable: None,
        },
        settings: None,
        behavior: None,
        model: None,
    };
    let mut template = None;
    let mut generated_model = None;

    match kind {
        ItemKind::Armor => {
            apply_armor(namespace, source, &mut item);
        }
        ItemKind::Furniture => {
            item.behavior = Some(furniture_behavior(&id, source, geometry));
        }
        ItemKind::Charged(charged) => {
            let t = charged_template(charged, namespace, key, &charged_base_path(key, source));
            item.model = Some(ModelRef::Template {
                template: t.id.clone(),
                arguments: t.arguments.clone(),
            });
            template = Some(t);
        }
        ItemKind::Hat => {
            item.data.equippable = Some(Equippable {
                slot: ArmorSlot::Head,
            });
        }
        ItemKind::Generic => {}
    }

    if !matches!(kind, ItemKind::Charged(_)) {
        let (model, generated) = resolve_model(namespace, &source.resource);
        item.model = model;
        generated_model = generated;
    }

    ItemOutput {
        kind,
        item,
        template,
        generated_model,
    }
}

/// Slot, skin id and wearable material for an armor item
fn apply_armor(namespace: &Namespace, source: &SourceItem, item: &mut ConvertedItem) {
    let props = source.specific_properties.armor.as_ref();
    let skin_id = source
        .equipment
        .as_ref()
        .and_then(|e| e.id.as_deref())
        .or_else(|| props.and_then(|p| p.custom_armor.as_deref()));

    let explicit_slot = props
        .and_then(|p| p.slot.as_deref())
        .and_then(ArmorSlot::parse)
        .filter(|_| skin_id.is_some());

    let slot = explicit_slot
        .or_else(|| ArmorSlot::from_material(&item.material))
        .unwrap_or(ArmorSlot::Head);

    if item.material == PLACEHOLDER_MATERIAL {
        item.material = slot.leather_material().to_string();
    }

    if let Some(skin_id) = skin_id {
        item.settings = Some(ItemSettings {
            equipment: EquipmentSetting {
                asset_id: namespace.qualify(skin_id),
                slot,
            },
        });
    }
}

fn furniture_behavior(
    id: &str,
    source: &SourceItem,
    geometry: &GeometryOptions,
) -> FurnitureBehavior {
    let behaviours = &source.behaviours;
    let furniture = behaviours.furniture.clone().unwrap_or_default();
    let seat = behaviours.furniture_sit.as_ref();

    let placement = Surface::enabled(furniture.placeable_on.as_ref())
        .into_iter()
        .map(|surface| {
            (
                surface,
                build_placement(id, &furniture, seat, surface, geometry),
            )
        })
        .collect();

    let mut loot_arguments = BTreeMap::new();
    loot_arguments.insert("item".to_string(), id.to_string());

    FurnitureBehavior {
        kind: "furniture_item".to_string(),
        furniture: Furniture {
            settings: FurnitureSettings {
                item: id.to_string(),
                sounds: Sounds {
                    break_sound: BREAK_SOUND.to_string(),
                    place_sound: PLACE_SOUND.to_string(),
                },
            },
            loot: Loot {
                template: FURNITURE_LOOT_TEMPLATE.to_string(),
                arguments: loot_arguments,
            },
            placement,
        },
    }
}

/// Base model path for a charged item: model path, first texture, or key
fn charged_base_path(key: &str, source: &SourceItem) -> String {
    let resource = &source.resource;
    resource
        .model_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .or_else(|| resource.textures.first().map(|t| strip_png(t).to_string()))
        .unwrap_or_else(|| key.to_string())
}

/// Generic model resolution
///
/// An explicit model path wins; otherwise a generation request with at least
/// one texture yields a model path plus a descriptor to synthesize.
pub fn resolve_model(
    namespace: &Namespace,
    resource: &Resource,
) -> (Option<ModelRef>, Option<GeneratedModel>) {
    if let Some(model_path) = resource.model_path.as_deref().filter(|p| !p.is_empty()) {
        let node = ModelNode::model(namespace.item_path(model_path));
        return (Some(ModelRef::Node(node)), None);
    }

    let texture = match resource.textures.first() {
        Some(texture) if resource.generate => strip_png(texture),
        _ => return (None, None),
    };

    let reference = namespace.item_path(texture);
    let generated = GeneratedModel {
        path: format!("item/{}.json", texture),
        descriptor: ModelDescriptor::generated(reference.clone()),
    };
    (Some(ModelRef::Node(ModelNode::model(reference))), Some(generated))
}

pub(crate) fn strip_png(path: &str) -> &str {
    path.strip_suffix(".png").unwrap_or(path)
}
