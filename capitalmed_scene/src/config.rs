// Scene configuration: colours, lighting and the static site layout.
//
// Everything the renderer draws that does not come from the building catalog
// lives here: the material palette, the daylight lighting rig, and the
// positions of terrain patches, side roads, parking areas and trees. All
// fields have defaults that reproduce the standard campus look;
// `SceneConfig::from_json_str()` accepts partial overrides (missing fields
// fall back to the defaults).
//
// Colours are linear RGB triples in `[0, 1]`, built from sRGB hex literals
// with `rgb()` for readability.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::primitive::Material;

pub type Rgb = [f32; 3];

/// Convert a `0xRRGGBB` literal to an RGB triple.
pub fn rgb(hex: u32) -> Rgb {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Base colour per material.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Palette {
    pub concrete: Rgb,
    pub stone: Rgb,
    pub glass: Rgb,
    pub dark: Rgb,
    pub canopy: Rgb,
    pub roof_equipment: Rgb,
    pub window_pane: Rgb,
    pub mullion: Rgb,
    pub ground: Rgb,
    pub terrain: Rgb,
    pub asphalt: Rgb,
    pub marking: Rgb,
    pub curb: Rgb,
    pub parking: Rgb,
    pub parking_line: Rgb,
    pub tree_trunk: Rgb,
    pub leaf: Rgb,
    /// Ring under a building the visitor is navigating to.
    pub target_ring: Rgb,
    /// Ring under the building whose info card is open.
    pub selected_ring: Rgb,
    pub path_dot: Rgb,
    pub avatar_pulse: Rgb,
    pub avatar_dot: Rgb,
    pub avatar_border: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            concrete: rgb(0xc8c0b8),
            stone: rgb(0xd4cdc4),
            glass: rgb(0x88aabb),
            dark: rgb(0x6b7280),
            canopy: rgb(0xe8e4de),
            roof_equipment: rgb(0x8a8a8a),
            window_pane: rgb(0x6899aa),
            mullion: rgb(0x9a9590),
            ground: rgb(0xc4b494),
            terrain: rgb(0xbaa882),
            asphalt: rgb(0x555555),
            marking: rgb(0xdddddd),
            curb: rgb(0x999999),
            parking: rgb(0x606060),
            parking_line: rgb(0xaaaaaa),
            tree_trunk: rgb(0x6b5b45),
            leaf: rgb(0x5a7a3a),
            target_ring: rgb(0x00b4e5),
            selected_ring: rgb(0x0088cc),
            path_dot: rgb(0x00b4e5),
            avatar_pulse: rgb(0x0078c8),
            avatar_dot: rgb(0x0088dd),
            avatar_border: rgb(0xffffff),
        }
    }
}

impl Palette {
    pub fn color(&self, material: Material) -> Rgb {
        match material {
            Material::Concrete => self.concrete,
            Material::Stone => self.stone,
            Material::Glass => self.glass,
            Material::Dark => self.dark,
            Material::Canopy => self.canopy,
            Material::RoofEquipment => self.roof_equipment,
            Material::WindowPane => self.window_pane,
            Material::Mullion => self.mullion,
            Material::Ground => self.ground,
            Material::Terrain => self.terrain,
            Material::Asphalt => self.asphalt,
            Material::Marking => self.marking,
            Material::Curb => self.curb,
            Material::Parking => self.parking,
            Material::ParkingLine => self.parking_line,
            Material::TreeTrunk => self.tree_trunk,
            Material::Leaf => self.leaf,
            Material::TargetRing | Material::ArrivalPulse => self.target_ring,
            Material::SelectedRing => self.selected_ring,
            Material::PathDot => self.path_dot,
            Material::AvatarPulse => self.avatar_pulse,
            Material::AvatarDot => self.avatar_dot,
            Material::AvatarBorder => self.avatar_border,
        }
    }
}

// ---------------------------------------------------------------------------
// Lighting
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectionalLight {
    pub position: [f32; 3],
    pub color: Rgb,
    pub intensity: f32,
    pub casts_shadow: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HemisphereLight {
    pub sky: Rgb,
    pub ground: Rgb,
    pub intensity: f32,
}

/// Linear distance fog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

/// Daylight rig: soft ambient, a warm shadow-casting key light from the
/// south-east, a cool fill from the north-west, sky/ground hemisphere and
/// haze.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LightingRig {
    pub ambient: AmbientLight,
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
    pub hemisphere: HemisphereLight,
    pub fog: Fog,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: rgb(0xf0e8d8),
                intensity: 0.5,
            },
            key: DirectionalLight {
                position: [40.0, 60.0, 30.0],
                color: rgb(0xfff5e0),
                intensity: 2.0,
                casts_shadow: true,
            },
            fill: DirectionalLight {
                position: [-20.0, 30.0, -20.0],
                color: rgb(0xa8c4e0),
                intensity: 0.3,
                casts_shadow: false,
            },
            hemisphere: HemisphereLight {
                sky: rgb(0xb8d0e8),
                ground: rgb(0xc4b494),
                intensity: 0.5,
            },
            fog: Fog {
                color: rgb(0xd8cfc0),
                near: 100.0,
                far: 220.0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Site layout
// ---------------------------------------------------------------------------

/// A circular patch of lighter ground.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainPatch {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

/// A rectangular parking area with evenly spaced stall lines.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParkingLot {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
}

/// Static ground-level layout around the buildings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SiteLayout {
    /// Side length of the square ground plane.
    pub ground_size: f32,
    pub terrain_patches: Vec<TerrainPatch>,
    /// Width of the north-south trunk road.
    pub main_road_width: f32,
    pub main_road_length: f32,
    /// Number of centre-line dashes on the main road.
    pub centre_dashes: u32,
    /// Z of each westward side road.
    pub west_roads: Vec<f32>,
    /// Centre X and length of the west side roads.
    pub west_road_center_x: f32,
    pub west_road_length: f32,
    /// Z of each eastward side road.
    pub east_roads: Vec<f32>,
    pub east_road_center_x: f32,
    pub east_road_length: f32,
    pub side_road_width: f32,
    pub parking: Vec<ParkingLot>,
    /// Stall lines per parking lot.
    pub parking_lines: u32,
    /// Ground positions `[x, z]` of the trees.
    pub trees: Vec<[f32; 2]>,
    /// Tree scale jitter range.
    pub tree_scale_min: f32,
    pub tree_scale_max: f32,
    /// Seed for the tree scale hash, so the jitter is stable between runs.
    pub vegetation_seed: u32,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            ground_size: 200.0,
            terrain_patches: vec![
                TerrainPatch { x: -30.0, z: -25.0, radius: 25.0 },
                TerrainPatch { x: 40.0, z: 15.0, radius: 20.0 },
                TerrainPatch { x: -20.0, z: 30.0, radius: 18.0 },
                TerrainPatch { x: 55.0, z: -20.0, radius: 22.0 },
            ],
            main_road_width: 6.0,
            main_road_length: 90.0,
            centre_dashes: 25,
            west_roads: vec![-14.0, -4.0, 10.0, 24.0],
            west_road_center_x: -22.0,
            west_road_length: 40.0,
            east_roads: vec![-22.0, -8.0, 4.0, 12.0],
            east_road_center_x: 38.0,
            east_road_length: 50.0,
            side_road_width: 4.0,
            parking: vec![
                ParkingLot { x: -48.0, z: -14.0, width: 8.0, depth: 18.0 },
                ParkingLot { x: 68.0, z: -24.0, width: 6.0, depth: 22.0 },
            ],
            parking_lines: 6,
            trees: vec![
                [-50.0, -30.0], [-48.0, -5.0], [-52.0, 15.0], [-45.0, 35.0],
                [-8.0, -38.0], [5.0, -40.0], [8.0, 38.0], [-5.0, 35.0],
                [70.0, -10.0], [72.0, 5.0], [68.0, 20.0], [74.0, -30.0],
                [-55.0, 0.0], [-52.0, 25.0], [10.0, 25.0], [28.0, 18.0],
                [48.0, 18.0], [65.0, 12.0], [-35.0, 38.0], [-15.0, 35.0],
            ],
            tree_scale_min: 0.7,
            tree_scale_max: 1.2,
            vegetation_seed: 0x5eed,
        }
    }
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

/// Everything the scene renderer needs besides the campus state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SceneConfig {
    pub palette: Palette,
    pub lighting: LightingRig,
    pub site: SiteLayout,
}

#[cfg(feature = "serde")]
impl SceneConfig {
    /// Parse a (possibly partial) JSON scene config.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
