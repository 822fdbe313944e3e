// Static site layer: ground, roads, parking and trees.
//
// None of this depends on session state, so `SceneRenderer` builds it once
// per config and reuses it every frame. Heights are staggered by a few
// centimetres (ground below terrain below parking below asphalt below
// markings) so coplanar layers never z-fight.
//
// Tree sizes vary between `tree_scale_min` and `tree_scale_max`. The jitter
// comes from a small integer hash of the tree index and the layout seed, so
// the campus looks the same on every run.

use capitalmed_sim::config::CampusConfig;

use crate::config::SiteLayout;
use crate::primitive::{Material, Primitive, PrimitiveShape, cuboid, ground_plane, sphere};

const GROUND_Y: f32 = -0.05;
const TERRAIN_Y: f32 = -0.03;
const PARKING_Y: f32 = 0.015;
const ROAD_Y: f32 = 0.02;
const PARKING_LINE_Y: f32 = 0.025;
const MARKING_Y: f32 = 0.04;

/// Spacing between main-road centre dashes.
const DASH_PITCH: f32 = 3.5;

/// Build every static primitive for `site`.
pub fn build_site(site: &SiteLayout, campus: &CampusConfig) -> Vec<Primitive> {
    let mut out = Vec::new();
    emit_ground(site, &mut out);
    emit_roads(site, campus, &mut out);
    emit_parking(site, &mut out);
    emit_vegetation(site, &mut out);
    log::debug!("site layer: {} primitives", out.len());
    out
}

fn emit_ground(site: &SiteLayout, out: &mut Vec<Primitive>) {
    out.push(ground_plane(
        site.ground_size,
        site.ground_size,
        [0.0, GROUND_Y, 0.0],
        Material::Ground,
    ));
    for p in &site.terrain_patches {
        out.push(
            Primitive::new(
                PrimitiveShape::Disc { radius: p.radius },
                [p.x, TERRAIN_Y, p.z],
                Material::Terrain,
            )
            .with_opacity(0.3),
        );
    }
}

fn emit_roads(site: &SiteLayout, campus: &CampusConfig, out: &mut Vec<Primitive>) {
    // The main road runs along the trunk road's axis.
    let road_x = campus.trunk_road.first().map_or(0.0, |p| p.x);
    let len = site.main_road_length;
    out.push(ground_plane(
        site.main_road_width,
        len,
        [road_x, ROAD_Y, 0.0],
        Material::Asphalt,
    ));

    let first_dash = -(site.centre_dashes as f32 - 1.0) * DASH_PITCH / 2.0;
    for i in 0..site.centre_dashes {
        out.push(ground_plane(
            0.15,
            1.5,
            [road_x, MARKING_Y, first_dash + i as f32 * DASH_PITCH],
            Material::Marking,
        ));
    }
    let curb_x = site.main_road_width / 2.0 + 0.1;
    for side in [-curb_x, curb_x] {
        out.push(cuboid([0.25, 0.25, len], [road_x + side, 0.12, 0.0], Material::Curb));
    }

    let half_west = site.west_road_length / 2.0 - 2.0;
    for &z in &site.west_roads {
        out.push(ground_plane(
            site.west_road_length,
            site.side_road_width,
            [site.west_road_center_x, ROAD_Y, z],
            Material::Asphalt,
        ));
        for side in [-half_west, half_west] {
            out.push(cuboid(
                [0.2, 0.2, site.side_road_width + 0.2],
                [site.west_road_center_x + side, 0.1, z],
                Material::Curb,
            ));
        }
    }
    for &z in &site.east_roads {
        out.push(ground_plane(
            site.east_road_length,
            site.side_road_width,
            [site.east_road_center_x, ROAD_Y, z],
            Material::Asphalt,
        ));
    }
}

fn emit_parking(site: &SiteLayout, out: &mut Vec<Primitive>) {
    for lot in &site.parking {
        out.push(ground_plane(
            lot.width,
            lot.depth,
            [lot.x, PARKING_Y, lot.z],
            Material::Parking,
        ));
        let pitch = lot.width / (site.parking_lines + 1) as f32;
        for li in 0..site.parking_lines {
            out.push(ground_plane(
                0.08,
                lot.depth * 0.9,
                [lot.x - lot.width / 2.0 + (li + 1) as f32 * pitch, PARKING_LINE_Y, lot.z],
                Material::ParkingLine,
            ));
        }
    }
}

fn emit_vegetation(site: &SiteLayout, out: &mut Vec<Primitive>) {
    for (i, &[x, z]) in site.trees.iter().enumerate() {
        let s = tree_scale(site, i as u32);
        out.push(Primitive::new(
            PrimitiveShape::Cylinder {
                radius_top: 0.15 * s,
                radius_bottom: 0.2 * s,
                height: 2.4 * s,
            },
            [x, 1.2 * s, z],
            Material::TreeTrunk,
        ));
        out.push(sphere(1.4 * s, [x, 3.0 * s, z], Material::Leaf));
        out.push(sphere(0.9 * s, [x + 0.5 * s, 2.5 * s, z + 0.3 * s], Material::Leaf));
    }
}

/// Scale of tree `index`, in `[tree_scale_min, tree_scale_max)`.
pub fn tree_scale(site: &SiteLayout, index: u32) -> f32 {
    // Top 24 bits map exactly onto [0, 1) in f32.
    let unit = (hash_u32(index ^ site.vegetation_seed) >> 8) as f32 / (1u32 << 24) as f32;
    site.tree_scale_min + unit * (site.tree_scale_max - site.tree_scale_min)
}

/// Simple integer hash for stable pseudo-random jitter.
fn hash_u32(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}
