// Per-frame scene assembly.
//
// `SceneRenderer` owns everything the scene needs across frames: the scene
// config, the cached static site layer, the two pulse animations, and a
// reusable `SceneFrame` arena. Each frame it:
//
//   1. Ticks the avatar pulse, and the arrival pulse while the visitor has
//      arrived (restarting it otherwise, so every arrival starts fresh).
//   2. Re-renders every building into its slot in the arena, keyed by
//      building id. Slots keep their allocations between frames.
//   3. Rebuilds the overlay: breadcrumb dots, then the avatar marker.
//
// The static site layer is built once in `new()` and never touched again;
// the embedding renderer draws it alongside each frame.
//
// See also: `building.rs`, `site.rs`, `overlay.rs` for the emitters,
// `capitalmed_sim::campus` for the state being drawn.

use capitalmed_sim::camera::CameraPose;
use capitalmed_sim::campus::CampusState;
use capitalmed_sim::config::CampusConfig;
use capitalmed_sim::types::BuildingId;
use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::building::{BuildingPrimitives, render_building};
use crate::config::SceneConfig;
use crate::overlay::{emit_avatar, emit_path_dots};
use crate::primitive::Primitive;
use crate::pulse::PulseRing;
use crate::site::build_site;

/// Everything dynamic drawn in one frame.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SceneFrame {
    /// Campus frame number this was rendered from.
    pub frame: u64,
    pub camera: Option<CameraPose>,
    pub buildings: FxHashMap<BuildingId, BuildingPrimitives>,
    /// Breadcrumbs and the avatar marker.
    pub overlay: Vec<Primitive>,
}

/// Primitive counts of a frame, for logging and the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FrameSummary {
    pub buildings: usize,
    pub building_primitives: usize,
    pub overlay_primitives: usize,
}

impl SceneFrame {
    pub fn building(&self, id: BuildingId) -> Option<&BuildingPrimitives> {
        self.buildings.get(&id)
    }

    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            buildings: self.buildings.len(),
            building_primitives: self.buildings.values().map(|b| b.primitives.len()).sum(),
            overlay_primitives: self.overlay.len(),
        }
    }
}

pub struct SceneRenderer {
    config: SceneConfig,
    site: Vec<Primitive>,
    avatar_pulse: PulseRing,
    arrival_pulse: PulseRing,
    frame: SceneFrame,
}

impl SceneRenderer {
    /// Build the renderer and its static site layer.
    pub fn new(config: SceneConfig, campus: &CampusConfig) -> Self {
        let site = build_site(&config.site, campus);
        Self {
            config,
            site,
            avatar_pulse: PulseRing::avatar(),
            arrival_pulse: PulseRing::arrival(),
            frame: SceneFrame::default(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Ground, roads, parking and trees. Constant for the renderer's life.
    pub fn site_layer(&self) -> &[Primitive] {
        &self.site
    }

    /// The most recently rendered frame.
    pub fn last_frame(&self) -> &SceneFrame {
        &self.frame
    }

    /// Advance cosmetic animation by `delta_ms`.
    pub fn tick(&mut self, state: &CampusState, delta_ms: f32) {
        self.avatar_pulse.tick(delta_ms);
        if state.walk().has_arrived() && state.target().is_some() {
            self.arrival_pulse.tick(delta_ms);
        } else {
            self.arrival_pulse.restart();
        }
    }

    /// Rebuild the frame arena from `state`.
    pub fn render(&mut self, state: &CampusState) -> &SceneFrame {
        let floor_height = state.config().floor_height;
        let frame = &mut self.frame;
        frame.frame = state.frame();
        frame.camera = Some(state.camera_pose());

        for building in state.catalog().list_buildings() {
            let slot = frame.buildings.entry(building.id).or_default();
            slot.primitives.clear();
            slot.label = render_building(
                building,
                state.highlight(building.id),
                floor_height,
                &self.arrival_pulse,
                &mut slot.primitives,
            );
        }

        frame.overlay.clear();
        let walk = state.walk();
        emit_path_dots(walk.path(), walk.total_progress(), &mut frame.overlay);
        emit_avatar(walk.position(), &self.avatar_pulse, &mut frame.overlay);

        &self.frame
    }

    /// `tick` then `render`.
    pub fn advance(&mut self, state: &CampusState, delta_ms: f32) -> &SceneFrame {
        self.tick(state, delta_ms);
        self.render(state)
    }
}
