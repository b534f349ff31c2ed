//! Item classification
//!
//! Every source item is assigned exactly one [`ItemKind`] up front; the
//! converter then runs the transform for that kind only.

use super::source::SourceItem;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorSlot {
    Head,
    Chest,
    Legs,
    Feet,
}

impl ArmorSlot {
    const SUFFIXES: [(&'static str, ArmorSlot); 4] = [
        ("_HELMET", ArmorSlot::Head),
        ("_CHESTPLATE", ArmorSlot::Chest),
        ("_LEGGINGS", ArmorSlot::Legs),
        ("_BOOTS", ArmorSlot::Feet),
    ];

    /// Slot implied by a vanilla armor material name (`DIAMOND_CHESTPLATE` → chest)
    pub fn from_material(material: &str) -> Option<Self> {
        let upper = material.to_ascii_uppercase();
        Self::SUFFIXES
            .iter()
            .find(|(suffix, _)| upper.ends_with(suffix))
            .map(|(_, slot)| *slot)
    }

    /// Parse an explicit slot property
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "head" | "helmet" => Some(ArmorSlot::Head),
            "chest" | "chestplate" => Some(ArmorSlot::Chest),
            "legs" | "leggings" => Some(ArmorSlot::Legs),
            "feet" | "boots" => Some(ArmorSlot::Feet),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArmorSlot::Head => "head",
            ArmorSlot::Chest => "chest",
            ArmorSlot::Legs => "legs",
            ArmorSlot::Feet => "feet",
        }
    }

    /// Wearable vanilla material for this slot
    pub fn leather_material(self) -> &'static str {
        match self {
            ArmorSlot::Head => "LEATHER_HELMET",
            ArmorSlot::Chest => "LEATHER_CHESTPLATE",
            ArmorSlot::Legs => "LEATHER_LEGGINGS",
            ArmorSlot::Feet => "LEATHER_BOOTS",
        }
    }
}

/// Items whose model depends on use/charge state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargedKind {
    Bow,
    Crossbow,
    FishingRod,
    Shield,
}

impl ChargedKind {
    pub fn from_material(material: &str) -> Option<Self> {
        match material.to_ascii_uppercase().as_str() {
            "BOW" => Some(ChargedKind::Bow),
            "CROSSBOW" => Some(ChargedKind::Crossbow),
            "FISHING_ROD" => Some(ChargedKind::FishingRod),
            "SHIELD" => Some(ChargedKind::Shield),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Armor,
    Furniture,
    Charged(ChargedKind),
    Hat,
    Generic,
}

impl ItemKind {
    /// Classify a source item; the first matching rule wins
    pub fn classify(item: &SourceItem) -> Self {
        let material = item.material();

        if ArmorSlot::from_material(material).is_some()
            || item.specific_properties.armor.is_some()
            || item.equipment.is_some()
        {
            return ItemKind::Armor;
        }

        if item.behaviours.furniture.is_some() {
            return ItemKind::Furniture;
        }

        if let Some(charged) = ChargedKind::from_material(material) {
            return ItemKind::Charged(charged);
        }

        if item.behaviours.hat {
            return ItemKind::Hat;
        }

        ItemKind::Generic
    }
}
