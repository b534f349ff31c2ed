use super::display::NO_ITALIC;
use super::source::SourceCategory;
use crate::namespace::Namespace;
use serde::Serialize;

pub const DEFAULT_ICON: &str = "minecraft:stone";

/// Lore attached to every converted category
pub const CATEGORY_LORE: [&str; 2] = [
    "<!i><gray>Converted by <#FFFF00>mcc</#FFFF00>",
    "<!i><dark_gray>ItemsAdder → CraftEngine</dark_gray>",
];

/// A CraftEngine category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub lore: Vec<String>,
    pub priority: u32,
    pub icon: String,
    pub list: Vec<String>,
    pub hidden: bool,
}

pub fn convert_category(namespace: &Namespace, key: &str, source: &SourceCategory) -> Category {
    Category {
        name: format!("{}{}", NO_ITALIC, source.name.as_deref().unwrap_or(key)),
        lore: CATEGORY_LORE.iter().map(|l| l.to_string()).collect(),
        priority: 1,
        icon: namespace.qualify(source.icon.as_deref().unwrap_or(DEFAULT_ICON)),
        list: source.items.iter().map(|i| namespace.qualify(i)).collect(),
        hidden: !source.enabled,
    }
}
