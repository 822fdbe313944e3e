// Orbit camera controller.
//
// The camera orbits a look-at target on the ground plane. Its pose is held in
// spherical coordinates around the target: `distance`, `polar` (angle from
// straight up) and `azimuth` (angle around Y, 0 = looking north from the
// south). User input accumulates as pending rotation/zoom; each `tick` applies
// a `damping` fraction of what is pending and keeps the rest, which gives the
// inertial glide of a damped orbit control. Distance and polar angle are
// clamped to the configured bounds after every change, so the camera can
// neither dive underground nor go top-down.
//
// While the avatar is walking, `tick` also eases the target toward the
// avatar with exponential smoothing:
//
//   target += (avatar - target) × follow_smoothing
//
// which follows without snapping. When navigation resets the target stays
// where it is.

use crate::config::CameraParams;
use crate::types::Point2;
use serde::{Deserialize, Serialize};

/// Below this, pending input is considered fully applied.
const SETTLE_EPSILON: f32 = 1e-5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    target: Point2,
    distance: f32,
    polar: f32,
    azimuth: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
}

/// World-space camera pose for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: [f32; 3],
    pub look_at: [f32; 3],
    pub fov_degrees: f32,
}

impl OrbitCamera {
    /// Camera at `params.initial_eye` looking at the campus origin.
    pub fn new(params: &CameraParams) -> Self {
        let [x, y, z] = params.initial_eye;
        let distance = (x * x + y * y + z * z).sqrt().max(f32::EPSILON);
        let mut cam = Self {
            target: Point2::default(),
            distance,
            polar: (y / distance).clamp(-1.0, 1.0).acos(),
            azimuth: x.atan2(z),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 0.0,
        };
        cam.clamp(params);
        cam
    }

    pub fn target(&self) -> Point2 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Queue an orbit drag, in radians.
    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        self.pending_azimuth += d_azimuth;
        self.pending_polar += d_polar;
    }

    /// Queue a zoom. Positive values move the camera away.
    pub fn zoom(&mut self, d_distance: f32) {
        self.pending_zoom += d_distance;
    }

    /// Pan the target across the ground plane. `right`/`forward` are in
    /// view-relative units and scaled by `pan_speed`.
    pub fn pan(&mut self, right: f32, forward: f32, params: &CameraParams) {
        let (sin, cos) = self.azimuth.sin_cos();
        let dx = right * cos - forward * sin;
        let dz = -right * sin - forward * cos;
        self.target.x += dx * params.pan_speed;
        self.target.z += dz * params.pan_speed;
    }

    /// Apply one frame of damped input, then follow `avatar` if given.
    pub fn tick(&mut self, params: &CameraParams, avatar: Option<Point2>) {
        let k = params.damping;
        self.azimuth += self.pending_azimuth * k;
        self.polar += self.pending_polar * k;
        self.distance += self.pending_zoom * k;
        self.pending_azimuth = settle(self.pending_azimuth * (1.0 - k));
        self.pending_polar = settle(self.pending_polar * (1.0 - k));
        self.pending_zoom = settle(self.pending_zoom * (1.0 - k));
        self.clamp(params);

        if let Some(p) = avatar {
            self.follow(p, params.follow_smoothing);
        }
    }

    /// One step of exponential smoothing toward `point`.
    pub fn follow(&mut self, point: Point2, smoothing: f32) {
        self.target.x += (point.x - self.target.x) * smoothing;
        self.target.z += (point.z - self.target.z) * smoothing;
    }

    /// True while queued input is still being applied.
    pub fn is_moving(&self) -> bool {
        self.pending_azimuth != 0.0 || self.pending_polar != 0.0 || self.pending_zoom != 0.0
    }

    pub fn pose(&self, params: &CameraParams) -> CameraPose {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        let r = self.distance;
        CameraPose {
            eye: [
                self.target.x + r * sin_p * sin_a,
                r * cos_p,
                self.target.z + r * sin_p * cos_a,
            ],
            look_at: [self.target.x, 0.0, self.target.z],
            fov_degrees: params.fov_degrees,
        }
    }

    fn clamp(&mut self, params: &CameraParams) {
        self.distance = within(self.distance, params.min_distance, params.max_distance);
        self.polar = within(self.polar, params.min_polar, params.max_polar);
    }
}

/// Clamp `v` into the range spanned by `a` and `b`, in either order. Unlike
/// `f32::clamp` this never panics on inverted or NaN bounds.
fn within(v: f32, a: f32, b: f32) -> f32 {
    v.max(a.min(b)).min(a.max(b))
}

fn settle(v: f32) -> f32 {
    if v.abs() < SETTLE_EPSILON { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_pose_matches_configured_eye() {
        let params = CameraParams::default();
        let cam = OrbitCamera::new(&params);
        assert!((cam.distance() - 100.0).abs() < 1e-4);
        let pose = cam.pose(&params);
        assert!((pose.eye[0] - 0.0).abs() < 1e-3);
        assert!((pose.eye[1] - 60.0).abs() < 1e-3);
        assert!((pose.eye[2] - 80.0).abs() < 1e-3);
        assert_eq!(pose.look_at, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn inverted_bounds_clamp_without_panicking() {
        let params = CameraParams {
            min_distance: 200.0,
            max_distance: 120.0,
            min_polar: 1.2,
            max_polar: 0.4,
            ..CameraParams::default()
        };
        let mut cam = OrbitCamera::new(&params);
        assert_eq!(cam.distance(), 120.0);
        cam.zoom(-10_000.0);
        cam.rotate(0.0, -50.0);
        for _ in 0..200 {
            cam.tick(&params, None);
        }
        assert_eq!(cam.distance(), 120.0);
        assert_eq!(cam.polar(), 0.4);
    }

    #[test]
    fn zoom_is_clamped() {
        let params = CameraParams::default();
        let mut cam = OrbitCamera::new(&params);
        cam.zoom(-10_000.0);
        for _ in 0..200 {
            cam.tick(&params, None);
        }
        assert_eq!(cam.distance(), params.min_distance);
        cam.zoom(10_000.0);
        for _ in 0..200 {
            cam.tick(&params, None);
        }
        assert_eq!(cam.distance(), params.max_distance);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let params = CameraParams::default();
        let mut cam = OrbitCamera::new(&params);
        cam.rotate(0.0, 50.0);
        for _ in 0..200 {
            cam.tick(&params, None);
        }
        assert_eq!(cam.polar(), params.max_polar);
        cam.rotate(0.0, -100.0);
        for _ in 0..200 {
            cam.tick(&params, None);
        }
        assert_eq!(cam.polar(), params.min_polar);
        // Never below the ground plane.
        assert!(cam.pose(&params).eye[1] > 0.0);
    }

    #[test]
    fn damping_spreads_input_over_frames() {
        let params = CameraParams::default();
        let mut cam = OrbitCamera::new(&params);
        let start = cam.azimuth();
        cam.rotate(1.0, 0.0);
        cam.tick(&params, None);
        let after_one = cam.azimuth() - start;
        assert!((after_one - params.damping).abs() < 1e-6);
        assert!(cam.is_moving());
        for _ in 0..1000 {
            cam.tick(&params, None);
        }
        assert!(!cam.is_moving());
        assert!((cam.azimuth() - start - 1.0).abs() < 1e-3);
    }

    #[test]
    fn follow_eases_without_snapping() {
        let params = CameraParams::default();
        let mut cam = OrbitCamera::new(&params);
        let avatar = Point2::new(100.0, 0.0);
        cam.tick(&params, Some(avatar));
        assert!((cam.target().x - 3.0).abs() < 1e-5);
        for _ in 0..1000 {
            cam.tick(&params, Some(avatar));
        }
        assert!((cam.target().x - 100.0).abs() < 0.01);
    }

    #[test]
    fn no_avatar_leaves_target_in_place() {
        let params = CameraParams::default();
        let mut cam = OrbitCamera::new(&params);
        cam.follow(Point2::new(10.0, 10.0), 1.0);
        cam.tick(&params, None);
        assert_eq!(cam.target(), Point2::new(10.0, 10.0));
    }

    #[test]
    fn pan_moves_target_on_ground_plane() {
        let params = CameraParams::default();
        let mut cam = OrbitCamera::new(&params);
        // Azimuth 0: camera south of the target looking north, so "forward"
        // is -Z and "right" is +X.
        cam.pan(1.0, 0.0, &params);
        assert!((cam.target().x - 0.8).abs() < 1e-5);
        cam.pan(0.0, 1.0, &params);
        assert!((cam.target().z + 0.8).abs() < 1e-5);
    }
}
