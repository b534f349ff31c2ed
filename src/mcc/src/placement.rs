//! Furniture placement and hitbox geometry
//!
//! Turns an ItemsAdder furniture bounding box into CraftEngine placement
//! blocks. Solid furniture is decomposed into a grid of unit shulker cells,
//! seats and non-solid furniture get a single interaction box.
//!
//! Axis mapping: width → x, height → y, length → z. Horizontal axes are
//! centered on the origin, the vertical axis stacks upward from 0.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Subtracted from the declared sit height to get the seat offset.
///
/// Calibrated against hand-converted packs (0.8 → -0.05); not derived from
/// either plugin's documentation.
pub const DEFAULT_SEAT_HEIGHT_OFFSET: f64 = 0.85;

const LOOT_SPAWN_OFFSET: &str = "0,0.4,0";
const SHADOW_RADIUS: f64 = 0.4;
const SHADOW_STRENGTH: f64 = 0.5;

/// Solid boxes needing more shulker cells than this get one interaction box
pub const MAX_HITBOX_CELLS: usize = 1024;

// ============================================================================
// Source data (ItemsAdder `behaviours.furniture` / `furniture_sit`)
// ============================================================================

/// Declared bounding box and offsets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hitbox {
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub width_offset: f64,
    pub height_offset: f64,
    pub length_offset: f64,
}

impl Default for Hitbox {
    fn default() -> Self {
        Hitbox {
            width: 1.0,
            height: 1.0,
            length: 1.0,
            width_offset: 0.0,
            height_offset: 0.0,
            length_offset: 0.0,
        }
    }
}

impl Hitbox {
    /// Non-finite or non-positive sizes become 1, non-finite offsets 0
    pub fn normalized(&self) -> Hitbox {
        let size = |v: f64| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        let offset = |v: f64| if v.is_finite() { v } else { 0.0 };
        Hitbox {
            width: size(self.width),
            height: size(self.height),
            length: size(self.length),
            width_offset: offset(self.width_offset),
            height_offset: offset(self.height_offset),
            length_offset: offset(self.length_offset),
        }
    }
}

/// Surfaces a furniture item may be placed on
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaceableOn {
    pub floor: bool,
    pub walls: bool,
    pub ceiling: bool,
}

impl PlaceableOn {
    fn is_empty(&self) -> bool {
        !self.floor && !self.walls && !self.ceiling
    }
}

/// `behaviours.furniture`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FurnitureData {
    pub hitbox: Hitbox,
    pub solid: bool,
    pub placeable_on: Option<PlaceableOn>,
}

impl Default for FurnitureData {
    fn default() -> Self {
        FurnitureData {
            hitbox: Hitbox::default(),
            solid: true,
            placeable_on: None,
        }
    }
}

/// `behaviours.furniture_sit`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeatData {
    pub sit_height: f64,
}

impl Default for SeatData {
    fn default() -> Self {
        SeatData { sit_height: 0.5 }
    }
}

// ============================================================================
// Output (CraftEngine placement blocks)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Ground,
    Wall,
    Ceiling,
}

impl Surface {
    /// Surfaces enabled by a `placeable_on` block; ground when none is declared
    pub fn enabled(placeable_on: Option<&PlaceableOn>) -> Vec<Surface> {
        let Some(on) = placeable_on.filter(|p| !p.is_empty()) else {
            return vec![Surface::Ground];
        };

        let mut surfaces = Vec::new();
        if on.floor {
            surfaces.push(Surface::Ground);
        }
        if on.walls {
            surfaces.push(Surface::Wall);
        }
        if on.ceiling {
            surfaces.push(Surface::Ceiling);
        }
        surfaces
    }
}

/// Tunables for geometry generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryOptions {
    pub seat_height_offset: f64,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        GeometryOptions {
            seat_height_offset: DEFAULT_SEAT_HEIGHT_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementRules {
    pub rotation: String,
    pub alignment: String,
}

impl Default for PlacementRules {
    fn default() -> Self {
        PlacementRules {
            rotation: "ANY".to_string(),
            alignment: "ANY".to_string(),
        }
    }
}

/// Item display entity rendered for the furniture
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DisplayElement {
    pub item: String,
    pub display_transform: String,
    pub shadow_radius: f64,
    pub shadow_strength: f64,
    pub billboard: String,
    pub translation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitboxKind {
    /// Solid unit cell
    Shulker,
    /// Non-colliding click/seat zone
    Interaction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HitboxPrimitive {
    pub position: String,
    #[serde(rename = "type")]
    pub kind: HitboxKind,
    pub blocks_building: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub interactive: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seats: Vec<String>,
}

/// Placement of a furniture item on one surface
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlacementBlock {
    pub loot_spawn_offset: String,
    pub rules: PlacementRules,
    pub elements: Vec<DisplayElement>,
    pub hitboxes: Vec<HitboxPrimitive>,
}

/// Build the placement block for one surface
pub fn build_placement(
    item_id: &str,
    furniture: &FurnitureData,
    seat: Option<&SeatData>,
    surface: Surface,
    options: &GeometryOptions,
) -> PlacementBlock {
    let hitbox = &furniture.hitbox.normalized();

    let hitboxes = match seat {
        Some(seat) => vec![seat_hitbox(hitbox, seat, furniture.solid, options)],
        None if furniture.solid => decompose(hitbox),
        None => vec![interaction_hitbox(hitbox, false)],
    };

    debug!(
        item = item_id,
        surface = ?surface,
        hitboxes = hitboxes.len(),
        "Built placement"
    );

    PlacementBlock {
        loot_spawn_offset: LOOT_SPAWN_OFFSET.to_string(),
        rules: PlacementRules::default(),
        elements: vec![DisplayElement {
            item: item_id.to_string(),
            display_transform: "NONE".to_string(),
            shadow_radius: SHADOW_RADIUS,
            shadow_strength: SHADOW_STRENGTH,
            billboard: "FIXED".to_string(),
            translation: format_vec3(0.0, hitbox.height / 2.0, 0.0),
        }],
        hitboxes,
    }
}

/// Split a bounding box into unit shulker cells
///
/// Each dimension is rounded to the nearest integer with a minimum of one
/// cell, so sub-unit boxes still collide. Boxes over [`MAX_HITBOX_CELLS`]
/// cells become a single building-blocking interaction box.
pub fn decompose(hitbox: &Hitbox) -> Vec<HitboxPrimitive> {
    let hitbox = &hitbox.normalized();
    let w = cell_count(hitbox.width);
    let h = cell_count(hitbox.height);
    let l = cell_count(hitbox.length);

    let total = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(l))
        .filter(|&n| n <= MAX_HITBOX_CELLS);
    let Some(total) = total else {
        warn!(
            width = hitbox.width,
            height = hitbox.height,
            length = hitbox.length,
            "Hitbox too large for shulker cells, using an interaction box"
        );
        return vec![interaction_hitbox(hitbox, true)];
    };

    let mut cells = Vec::with_capacity(total);
    for y in 0..h {
        for x in 0..w {
            for z in 0..l {
                let px = centered(x, w) + hitbox.width_offset;
                let py = y as f64 + hitbox.height_offset;
                let pz = centered(z, l) + hitbox.length_offset;

                cells.push(HitboxPrimitive {
                    position: format_vec3(px, py, pz),
                    kind: HitboxKind::Shulker,
                    blocks_building: true,
                    width: None,
                    height: None,
                    interactive: true,
                    seats: Vec::new(),
                });
            }
        }
    }
    cells
}

fn seat_hitbox(
    hitbox: &Hitbox,
    seat: &SeatData,
    solid: bool,
    options: &GeometryOptions,
) -> HitboxPrimitive {
    let sit_height = if seat.sit_height.is_finite() {
        seat.sit_height
    } else {
        SeatData::default().sit_height
    };
    let seat_y = sit_height - options.seat_height_offset;
    HitboxPrimitive {
        seats: vec![format_vec3(0.0, seat_y, 0.0)],
        ..interaction_hitbox(hitbox, solid)
    }
}

fn interaction_hitbox(hitbox: &Hitbox, blocks_building: bool) -> HitboxPrimitive {
    HitboxPrimitive {
        position: format_vec3(0.0, 0.0, 0.0),
        kind: HitboxKind::Interaction,
        blocks_building,
        width: Some(hitbox.width),
        height: Some(hitbox.height),
        interactive: true,
        seats: Vec::new(),
    }
}

fn cell_count(dimension: f64) -> usize {
    // Ties round to even (2.5 → 2)
    let rounded = dimension.round_ties_even();
    if !rounded.is_finite() || rounded < 1.0 {
        1
    } else {
        rounded as usize
    }
}

fn centered(index: usize, count: usize) -> f64 {
    index as f64 - (count as f64 - 1.0) / 2.0
}

/// Format a number with six significant digits and no trailing zeros
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).clamp(0, 15);
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;

    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn format_vec3(x: f64, y: f64, z: f64) -> String {
    format!(
        "{},{},{}",
        format_number(x),
        format_number(y),
        format_number(z)
    )
}
