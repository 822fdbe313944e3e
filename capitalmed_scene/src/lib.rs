// capitalmed_scene: procedural scene description for the campus map.
//
// Turns `capitalmed_sim` state into renderer-agnostic primitives (boxes,
// cylinders, spheres, flat planes and rings with a material and opacity).
// The crate does no drawing itself; an embedding renderer maps each
// `Primitive` onto its own meshes and materials.
//
// Module overview:
// - `frame.rs`:     SceneRenderer and the per-frame SceneFrame arena.
// - `building.rs`:  Building geometry: volumes, windows, canopy, HVAC, rings.
// - `volumes.rs`:   Footprint shape → sub-volume massing.
// - `site.rs`:      Static ground, roads, parking and vegetation layer.
// - `overlay.rs`:   Breadcrumb dots and the avatar marker.
// - `pulse.rs`:     PulseRing animation state.
// - `primitive.rs`: Primitive, PrimitiveShape, Material.
// - `config.rs`:    SceneConfig: palette, lighting rig, site layout.
//
// Serialization of config and frames is behind the default `serde` feature.

pub mod building;
pub mod config;
pub mod frame;
pub mod overlay;
pub mod primitive;
pub mod pulse;
pub mod site;
pub mod volumes;
