use super::item::strip_png;
use super::source::LayerPair;
use crate::namespace::Namespace;
use serde::Serialize;

/// A component-typed CraftEngine equipment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Equipment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humanoid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humanoid_leggings: Option<String>,
}

/// Convert a legacy `equipments` or `armors_rendering` entry
pub fn convert_equipment(namespace: &Namespace, source: &LayerPair) -> Equipment {
    let layer = |path: &Option<String>| {
        path.as_deref()
            .map(|p| namespace.qualify(strip_png(p)))
    };

    Equipment {
        kind: "component".to_string(),
        humanoid: layer(&source.layer_1),
        humanoid_leggings: layer(&source.layer_2),
    }
}
