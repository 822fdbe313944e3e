// Procedural building geometry.
//
// `render_building()` is a pure function from a catalog record plus its
// highlight flags to a list of primitives. The building's local origin is the
// footprint centre at ground level; everything is emitted in world space by
// adding that centre.
//
// Per sub-volume (see `volumes.rs` for the massing):
//   - the volume box itself, in its finish material
//   - non-glass volumes only:
//       front window pane      0.9vw × 0.85vh, just proud of the +Z face
//       horizontal mullions    one per full storey, 0.92vw × 0.08
//       vertical mullions      max(2, ⌊vw/3⌋), evenly spaced, 0.06 × 0.88vh
//       side window pane       0.85vd × 0.8vh on the +X face
//   - a dark parapet slab on the roof, 0.3 wider than the volume each way
//
// Per building:
//   - entrance canopy (0.35w × 0.15 × 2.5) at height 1.8, in front of +Z
//   - two canopy pillars at ±0.12w
//   - two rooftop HVAC boxes when the building has 4 or more floors
//   - a floating label anchored 2 units above the roof
//
// Highlight decorations are appended after the geometry and never change
// it: a ring for the selected or targeted building, plus the arrival pulse
// ring once the visitor has arrived.

use std::f32::consts::FRAC_PI_2;

use capitalmed_sim::campus::BuildingHighlight;
use capitalmed_sim::catalog::Building;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::primitive::{Material, Primitive, PrimitiveShape, cuboid, ring};
use crate::pulse::PulseRing;
use crate::volumes::{Finish, SubVolume, decompose};

/// Gap between a facade and the window geometry laid over it.
const PANE_OFFSET: f32 = 0.02;
const MULLION_OFFSET: f32 = 0.03;

/// Floating name tag above a building.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Label {
    pub anchor: [f32; 3],
    pub title: String,
    pub subtitle: String,
}

/// Everything drawn for one building in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildingPrimitives {
    pub primitives: Vec<Primitive>,
    pub label: Label,
}

impl BuildingPrimitives {
    /// Primitives that make up the building itself, without highlight rings.
    pub fn geometry(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| !p.material.is_decoration())
    }
}

fn finish_material(finish: Finish) -> Material {
    match finish {
        Finish::Concrete => Material::Concrete,
        Finish::Stone => Material::Stone,
        Finish::Glass => Material::Glass,
    }
}

/// Append `building`'s primitives to `out` and return its label.
pub fn render_building(
    building: &Building,
    flags: BuildingHighlight,
    floor_height: f32,
    arrival_pulse: &PulseRing,
    out: &mut Vec<Primitive>,
) -> Label {
    let c = building.center();
    let (w, d) = (building.width, building.depth);
    let h = building.floors as f32 * floor_height;
    let at = |x: f32, y: f32, z: f32| [c.x + x, y, c.z + z];

    for v in decompose(building.shape, w, d, h) {
        emit_volume(&v, floor_height, c.x, c.z, out);
    }

    // Entrance canopy and pillars.
    out.push(cuboid(
        [w * 0.35, 0.15, 2.5],
        at(0.0, 1.8, d * 0.5 + 1.0),
        Material::Canopy,
    ));
    for px in [-w * 0.12, w * 0.12] {
        out.push(Primitive::new(
            PrimitiveShape::Cylinder {
                radius_top: 0.12,
                radius_bottom: 0.12,
                height: 1.8,
            },
            at(px, 0.9, d * 0.5 + 2.0),
            Material::Dark,
        ));
    }

    if building.floors >= 4 {
        out.push(cuboid(
            [2.5, 1.0, 2.0],
            at(w * 0.2, h + 0.5, -d * 0.15),
            Material::RoofEquipment,
        ));
        out.push(cuboid(
            [1.5, 0.6, 1.5],
            at(-w * 0.15, h + 0.3, d * 0.1),
            Material::RoofEquipment,
        ));
    }

    let extent = w.max(d);
    if flags.selected || flags.navigation_target {
        let material = if flags.navigation_target {
            Material::TargetRing
        } else {
            Material::SelectedRing
        };
        out.push(ring(extent * 0.55, extent * 0.6, at(0.0, 0.05, 0.0), material).with_opacity(0.5));
    }
    if flags.arrived && flags.navigation_target {
        out.push(
            ring(extent * 0.5, extent * 0.55, at(0.0, 0.06, 0.0), Material::ArrivalPulse)
                .with_scale(arrival_pulse.scale())
                .with_opacity(arrival_pulse.opacity()),
        );
    }

    Label {
        anchor: at(0.0, h + 2.0, 0.0),
        title: building.short_name.clone(),
        subtitle: building.id.to_string(),
    }
}

/// One sub-volume with its window grid and parapet.
fn emit_volume(v: &SubVolume, floor_height: f32, cx: f32, cz: f32, out: &mut Vec<Primitive>) {
    // Volume-local origin: centre of the box.
    let (ox, oy, oz) = (cx + v.px, v.height / 2.0, cz + v.pz);
    let at = |x: f32, y: f32, z: f32| [ox + x, oy + y, oz + z];
    let (vw, vd, vh) = (v.width, v.depth, v.height);

    out.push(cuboid([vw, vh, vd], at(0.0, 0.0, 0.0), finish_material(v.finish)));

    if v.has_windows() {
        let front = vd / 2.0;
        out.push(
            Primitive::new(
                PrimitiveShape::Plane {
                    width: vw * 0.9,
                    height: vh * 0.85,
                },
                at(0.0, 0.0, front + PANE_OFFSET),
                Material::WindowPane,
            )
            .with_opacity(0.3),
        );

        let storeys = if floor_height > 0.0 {
            (vh / floor_height).floor() as u32
        } else {
            0
        };
        for fi in 0..storeys {
            out.push(Primitive::new(
                PrimitiveShape::Plane {
                    width: vw * 0.92,
                    height: 0.08,
                },
                at(0.0, -vh / 2.0 + (fi + 1) as f32 * floor_height, front + MULLION_OFFSET),
                Material::Mullion,
            ));
        }

        let columns = ((vw / 3.0).floor() as u32).max(2);
        let spacing = vw * 0.9 / (columns + 1) as f32;
        for vi in 0..columns {
            out.push(Primitive::new(
                PrimitiveShape::Plane {
                    width: 0.06,
                    height: vh * 0.88,
                },
                at(-vw * 0.45 + spacing * (vi + 1) as f32, 0.0, front + MULLION_OFFSET),
                Material::Mullion,
            ));
        }

        out.push(
            Primitive::new(
                PrimitiveShape::Plane {
                    width: vd * 0.85,
                    height: vh * 0.8,
                },
                at(vw / 2.0 + PANE_OFFSET, 0.0, 0.0),
                Material::WindowPane,
            )
            .with_rotation(FRAC_PI_2)
            .with_opacity(0.25),
        );
    }

    out.push(cuboid(
        [vw + 0.3, 0.3, vd + 0.3],
        at(0.0, vh / 2.0, 0.0),
        Material::Dark,
    ));
}
