// Navigation overlays: breadcrumb dots and the avatar marker.
//
// Breadcrumbs show how much of the route has been walked. Waypoint `i` of an
// `n`-point path is drawn once `i / (n - 1)` is at or below the overall walk
// progress, so the dots fill in behind the avatar as it walks. Paths with
// fewer than two points draw nothing.
//
// The avatar marker is a solid dot with a white border ring and an expanding
// pulse ring underneath, all anchored 0.3 above the ground at the walk
// position.

use capitalmed_sim::types::Point2;

use crate::primitive::{Material, Primitive, ring, sphere};
use crate::pulse::PulseRing;

const DOT_RADIUS: f32 = 0.3;
const DOT_Y: f32 = 0.15;
const MARKER_Y: f32 = 0.3;

/// Append a breadcrumb dot for each waypoint reached by `total_progress`.
pub fn emit_path_dots(path: &[Point2], total_progress: f32, out: &mut Vec<Primitive>) {
    if path.len() < 2 {
        return;
    }
    let last = (path.len() - 1) as f32;
    for (i, p) in path.iter().enumerate() {
        if i as f32 / last > total_progress {
            // Later waypoints only have larger fractions.
            break;
        }
        out.push(sphere(DOT_RADIUS, [p.x, DOT_Y, p.z], Material::PathDot).with_opacity(0.6));
    }
}

/// Append the avatar marker at `position`.
pub fn emit_avatar(position: Point2, pulse: &PulseRing, out: &mut Vec<Primitive>) {
    let (x, z) = (position.x, position.z);
    out.push(
        ring(1.0, 1.3, [x, MARKER_Y - 0.1, z], Material::AvatarPulse)
            .with_scale(pulse.scale())
            .with_opacity(pulse.opacity()),
    );
    out.push(sphere(0.6, [x, MARKER_Y, z], Material::AvatarDot));
    out.push(ring(0.65, 0.85, [x, MARKER_Y + 0.01, z], Material::AvatarBorder).with_opacity(0.9));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Point2> {
        (0..n).map(|i| Point2::new(0.0, i as f32)).collect()
    }

    fn dots(path: &[Point2], progress: f32) -> usize {
        let mut out = Vec::new();
        emit_path_dots(path, progress, &mut out);
        out.len()
    }

    #[test]
    fn dots_follow_progress() {
        let path = line(5);
        assert_eq!(dots(&path, 0.0), 1);
        assert_eq!(dots(&path, 0.49), 2);
        assert_eq!(dots(&path, 0.5), 3);
        assert_eq!(dots(&path, 1.0), 5);
    }

    #[test]
    fn short_paths_draw_nothing() {
        assert_eq!(dots(&[], 1.0), 0);
        assert_eq!(dots(&line(1), 1.0), 0);
    }

    #[test]
    fn avatar_marker_layers() {
        let mut out = Vec::new();
        let mut pulse = PulseRing::avatar();
        pulse.tick(200.0);
        emit_avatar(Point2::new(3.0, -4.0), &pulse, &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].material, Material::AvatarPulse);
        assert!((out[0].scale - 1.3).abs() < 1e-5);
        assert!(out.iter().all(|p| p.position[0] == 3.0 && p.position[2] == -4.0));
        assert_eq!(out[1].position[1], MARKER_Y);
    }
}
