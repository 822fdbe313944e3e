// Campus session state and frame loop.
//
// `CampusState` is the single source of truth for one visitor's map session.
// It owns the immutable catalog and config plus every per-frame state holder:
// the walk simulator, the selection, the orbit camera and the redraw
// scheduler. The frame loop is a pure-ish function:
// `(state, actions, delta_ms) -> (new_state, events, redraw?)`.
//
// ## Step
//
// `step()` first applies the frame's actions in order, then advances one
// frame via `tick()`:
//
//   1. Walk simulator advances by `delta_ms` and reports segment/arrival
//      transitions, which become events.
//   2. Camera applies damped input; while walking it eases toward the avatar.
//   3. Any visible change sets the redraw flag, and the flag is taken once.
//
// ## Navigation rules
//
// - `NavigateTo` replaces any active navigation: the walk resets to the
//   gate, the selection closes, and a fresh route starts at the first trunk
//   waypoint. Unknown building ids are ignored.
// - `ResetNavigation` clears the target and returns the avatar to the
//   configured start. It is idempotent; only a real change emits an event.
// - The camera target is left where it is on reset.
//
// See also: `command.rs` / `event.rs` for the action and event enums,
// `walk.rs` for the walk state machine, `camera.rs` for the orbit camera.

use crate::camera::{CameraPose, OrbitCamera};
use crate::catalog::{Building, Catalog};
use crate::command::CampusAction;
use crate::config::CampusConfig;
use crate::event::{CampusEvent, CampusEventKind};
use crate::path::TrunkRoad;
use crate::schedule::FrameScheduler;
use crate::selection::Selection;
use crate::types::{BuildingId, Point2};
use crate::walk::{WalkPhase, WalkSimulator, WalkStep};
use serde::{Deserialize, Serialize};

/// The result of applying actions and advancing one frame.
pub struct StepResult {
    /// Events emitted during this step, in order.
    pub events: Vec<CampusEvent>,
    /// Whether the renderer should draw this frame.
    pub redraw: bool,
}

/// Per-building highlight state, read by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingHighlight {
    pub selected: bool,
    pub navigation_target: bool,
    pub arrived: bool,
}

/// A read-only snapshot of navigation for overlays and the CLI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub target: Option<BuildingId>,
    pub phase: WalkPhase,
    pub paused: bool,
    pub position: Point2,
    pub segment: usize,
    pub segment_count: usize,
    pub progress: f32,
    pub total_progress: f32,
}

pub struct CampusState {
    frame: u64,
    config: CampusConfig,
    catalog: Catalog,
    walk: WalkSimulator,
    selection: Selection,
    camera: OrbitCamera,
    target: Option<BuildingId>,
    scheduler: FrameScheduler,
}

impl CampusState {
    /// A session over the built-in CapitalMed catalog and default config.
    pub fn new() -> Self {
        Self::with_config(CampusConfig::default(), Catalog::capitalmed())
    }

    /// A session over `catalog`. An invalid `config` is used as given and
    /// logged; loaders should reject it earlier via `CampusConfig::validate`.
    pub fn with_config(config: CampusConfig, catalog: Catalog) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("campus session built with an {e}");
        }
        let walk = WalkSimulator::new(config.start_position);
        let camera = OrbitCamera::new(&config.camera);
        Self {
            frame: 0,
            config,
            catalog,
            walk,
            selection: Selection::new(),
            camera,
            target: None,
            scheduler: FrameScheduler::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &CampusConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn walk(&self) -> &WalkSimulator {
        &self.walk
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose(&self.config.camera)
    }

    /// The building being navigated to, kept after arrival until reset.
    pub fn target(&self) -> Option<BuildingId> {
        self.target
    }

    pub fn target_building(&self) -> Option<&Building> {
        self.target.and_then(|id| self.catalog.find_building(id))
    }

    pub fn selected_building(&self) -> Option<&Building> {
        self.selection
            .selected()
            .and_then(|id| self.catalog.find_building(id))
    }

    pub fn highlight(&self, id: BuildingId) -> BuildingHighlight {
        let navigation_target = self.target == Some(id);
        BuildingHighlight {
            selected: self.selection.is_selected(id),
            navigation_target,
            arrived: navigation_target && self.walk.has_arrived(),
        }
    }

    pub fn navigation(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            target: self.target,
            phase: self.walk.phase(),
            paused: self.walk.is_paused(),
            position: self.walk.position(),
            segment: self.walk.segment(),
            segment_count: self.walk.segment_count(),
            progress: self.walk.progress(),
            total_progress: self.walk.total_progress(),
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.scheduler.needs_redraw()
    }

    // -----------------------------------------------------------------------
    // Frame loop
    // -----------------------------------------------------------------------

    /// Apply `actions` in order, then advance one frame of `delta_ms`.
    pub fn step(&mut self, actions: &[CampusAction], delta_ms: f32) -> StepResult {
        let mut events = Vec::new();
        for action in actions {
            self.apply_action(action, &mut events);
        }
        self.tick(delta_ms, &mut events);
        let redraw = self.scheduler.take_redraw();
        self.frame += 1;
        StepResult { events, redraw }
    }

    /// Apply a single action. Unknown ids and inapplicable requests are
    /// silent no-ops.
    pub fn apply_action(&mut self, action: &CampusAction, events: &mut Vec<CampusEvent>) {
        match action {
            CampusAction::NavigateTo { building } => {
                self.navigate_to(*building, events);
            }
            CampusAction::ResetNavigation => {
                self.reset_navigation(events);
            }
            CampusAction::TogglePause => {
                if let Some(paused) = self.walk.toggle_pause() {
                    log::debug!("walk {}", if paused { "paused" } else { "resumed" });
                    self.emit(events, CampusEventKind::PauseToggled { paused });
                }
            }
            CampusAction::ClickBuilding { building } => {
                if self.selection.click(*building, &self.catalog) {
                    let selected = self.selection.selected();
                    self.emit(events, CampusEventKind::SelectionChanged { selected });
                }
            }
            CampusAction::CloseSelection => {
                self.close_selection(events);
            }
            CampusAction::Orbit { d_azimuth, d_polar } => {
                self.camera.rotate(*d_azimuth, *d_polar);
                self.scheduler.request_redraw();
            }
            CampusAction::Zoom { delta } => {
                self.camera.zoom(*delta);
                self.scheduler.request_redraw();
            }
            CampusAction::Pan { right, forward } => {
                self.camera.pan(*right, *forward, &self.config.camera);
                self.scheduler.request_redraw();
            }
        }
    }

    /// Advance the walk and camera by one frame.
    fn tick(&mut self, delta_ms: f32, events: &mut Vec<CampusEvent>) {
        let step = self.walk.tick(delta_ms, &self.config.walk);
        match (step, self.target) {
            (WalkStep::Stationary, _) => {}
            (WalkStep::Advanced, _) => self.scheduler.request_redraw(),
            (WalkStep::SegmentReached { next_segment }, Some(building)) => {
                log::debug!(
                    "{building}: segment {next_segment}/{} at {}",
                    self.walk.segment_count(),
                    self.walk.position()
                );
                self.emit(
                    events,
                    CampusEventKind::SegmentReached {
                        building,
                        segment: next_segment,
                    },
                );
            }
            (WalkStep::Arrived, Some(building)) => {
                log::info!("arrived at {building} after {} frames", self.frame);
                self.emit(events, CampusEventKind::Arrived { building });
            }
            // A walk without a target cannot happen through actions.
            (WalkStep::SegmentReached { .. } | WalkStep::Arrived, None) => {
                self.scheduler.request_redraw();
            }
        }

        let follow = self.walk.is_walking().then(|| self.walk.position());
        let before = (self.camera.target(), self.camera.is_moving());
        self.camera.tick(&self.config.camera, follow);
        if before.1 || before.0 != self.camera.target() {
            self.scheduler.request_redraw();
        }
    }

    fn navigate_to(&mut self, id: BuildingId, events: &mut Vec<CampusEvent>) {
        let Some(building) = self.catalog.find_building(id) else {
            log::debug!("navigate_to: unknown {id}, ignoring");
            return;
        };
        let Some(road) = TrunkRoad::new(&self.config.trunk_road) else {
            return;
        };

        self.walk.reset(self.config.start_position);
        self.walk.navigate_to(building, &road);
        self.target = Some(id);
        let waypoints = self.walk.path().len();
        log::debug!(
            "navigating to {} ({}) over {waypoints} waypoints",
            building.name,
            building.id
        );

        self.close_selection(events);
        self.emit(
            events,
            CampusEventKind::NavigationStarted {
                building: id,
                waypoints,
            },
        );
        if self.walk.has_arrived() {
            self.emit(events, CampusEventKind::Arrived { building: id });
        }
    }

    fn reset_navigation(&mut self, events: &mut Vec<CampusEvent>) {
        let start = self.config.start_position;
        let idle = self.target.is_none()
            && self.walk.phase() == WalkPhase::Idle
            && self.walk.position() == start;
        if idle {
            return;
        }
        self.walk.reset(start);
        self.target = None;
        log::debug!("navigation reset");
        self.emit(events, CampusEventKind::NavigationReset);
    }

    fn close_selection(&mut self, events: &mut Vec<CampusEvent>) {
        if self.selection.close() {
            self.emit(events, CampusEventKind::SelectionChanged { selected: None });
        }
    }

    /// Record an event. Every event is a visible change.
    fn emit(&mut self, events: &mut Vec<CampusEvent>, kind: CampusEventKind) {
        self.scheduler.request_redraw();
        events.push(CampusEvent {
            frame: self.frame,
            kind,
        });
    }
}

impl Default for CampusState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(result: &StepResult) -> Vec<CampusEventKind> {
        result.events.iter().map(|e| e.kind.clone()).collect()
    }

    /// Step with no actions until arrival or `max` frames.
    fn walk_until_arrived(state: &mut CampusState, max: usize) -> usize {
        for i in 0..max {
            state.step(&[], 16.0);
            if state.walk().has_arrived() {
                return i + 1;
            }
        }
        panic!("did not arrive within {max} frames");
    }

    #[test]
    fn inverted_camera_bounds_do_not_panic() {
        let mut config = CampusConfig::default();
        config.camera.min_distance = 200.0;
        let mut state = CampusState::with_config(config, Catalog::capitalmed());
        state.step(
            &[
                CampusAction::Zoom { delta: -50.0 },
                CampusAction::NavigateTo {
                    building: BuildingId(3),
                },
            ],
            16.0,
        );
        assert_eq!(state.camera().distance(), 120.0);
        assert!(state.walk().is_walking());
    }

    #[test]
    fn first_frame_is_drawn() {
        let mut state = CampusState::new();
        assert!(state.step(&[], 16.0).redraw);
        assert!(!state.step(&[], 16.0).redraw);
    }

    #[test]
    fn navigate_starts_walk_and_clears_selection() {
        let mut state = CampusState::new();
        state.step(
            &[CampusAction::ClickBuilding {
                building: BuildingId(9),
            }],
            16.0,
        );
        assert_eq!(state.selection().selected(), Some(BuildingId(9)));

        let result = state.step(
            &[CampusAction::NavigateTo {
                building: BuildingId(2),
            }],
            16.0,
        );
        assert_eq!(
            kinds(&result),
            vec![
                CampusEventKind::SelectionChanged { selected: None },
                CampusEventKind::NavigationStarted {
                    building: BuildingId(2),
                    waypoints: 7,
                },
            ]
        );
        assert!(result.redraw);
        assert!(state.walk().is_walking());
        assert_eq!(state.target(), Some(BuildingId(2)));
        assert_eq!(state.selection().selected(), None);
    }

    #[test]
    fn unknown_building_is_ignored() {
        let mut state = CampusState::new();
        state.step(&[], 16.0);
        let result = state.step(
            &[CampusAction::NavigateTo {
                building: BuildingId(999),
            }],
            16.0,
        );
        assert!(result.events.is_empty());
        assert!(!result.redraw);
        assert_eq!(state.target(), None);
        assert_eq!(state.walk().phase(), WalkPhase::Idle);
    }

    #[test]
    fn walk_reports_segments_then_arrival() {
        let mut state = CampusState::new();
        state.step(
            &[CampusAction::NavigateTo {
                building: BuildingId(4),
            }],
            16.0,
        );
        let mut segments = Vec::new();
        let mut arrived = false;
        for _ in 0..100_000 {
            let result = state.step(&[], 16.0);
            for kind in kinds(&result) {
                match kind {
                    CampusEventKind::SegmentReached { segment, .. } => segments.push(segment),
                    CampusEventKind::Arrived { building } => {
                        assert_eq!(building, BuildingId(4));
                        arrived = true;
                    }
                    other => panic!("unexpected event {other:?}"),
                }
            }
            if arrived {
                break;
            }
        }
        assert!(arrived);
        let count = state.walk().segment_count();
        assert_eq!(segments, (1..count).collect::<Vec<_>>());
        let last = *state.walk().path().last().unwrap();
        assert_eq!(state.walk().position(), last);
        let h = state.highlight(BuildingId(4));
        assert!(h.navigation_target && h.arrived && !h.selected);
    }

    #[test]
    fn pause_freezes_position() {
        let mut state = CampusState::new();
        state.step(
            &[CampusAction::NavigateTo {
                building: BuildingId(12),
            }],
            16.0,
        );
        state.step(&[], 16.0);
        let result = state.step(&[CampusAction::TogglePause], 16.0);
        assert_eq!(
            kinds(&result),
            vec![CampusEventKind::PauseToggled { paused: true }]
        );
        let frozen = state.walk().position();
        for _ in 0..50 {
            state.step(&[], 16.0);
        }
        assert_eq!(state.walk().position(), frozen);
        state.step(&[CampusAction::TogglePause], 16.0);
        assert_ne!(state.walk().position(), frozen);
    }

    #[test]
    fn pause_is_ignored_when_idle() {
        let mut state = CampusState::new();
        let result = state.step(&[CampusAction::TogglePause], 16.0);
        assert!(result.events.is_empty());
        assert!(!state.walk().is_paused());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut state = CampusState::new();
        state.step(
            &[CampusAction::NavigateTo {
                building: BuildingId(7),
            }],
            16.0,
        );
        walk_until_arrived(&mut state, 100_000);

        let result = state.step(&[CampusAction::ResetNavigation], 16.0);
        assert_eq!(kinds(&result), vec![CampusEventKind::NavigationReset]);
        assert_eq!(state.target(), None);
        assert_eq!(state.walk().phase(), WalkPhase::Idle);
        assert_eq!(state.walk().position(), state.config().start_position);

        let again = state.step(&[CampusAction::ResetNavigation], 16.0);
        assert!(again.events.is_empty());
        assert_eq!(state.navigation(), {
            let fresh = CampusState::new();
            fresh.navigation()
        });
    }

    #[test]
    fn camera_follows_only_while_walking() {
        let mut state = CampusState::new();
        state.step(
            &[CampusAction::NavigateTo {
                building: BuildingId(15),
            }],
            16.0,
        );
        for _ in 0..200 {
            state.step(&[], 16.0);
        }
        let followed = state.camera().target();
        assert_ne!(followed, Point2::default());

        state.step(&[CampusAction::ResetNavigation], 16.0);
        let after_reset = state.camera().target();
        for _ in 0..20 {
            state.step(&[], 16.0);
        }
        assert_eq!(state.camera().target(), after_reset);
    }

    #[test]
    fn camera_input_requests_redraw() {
        let mut state = CampusState::new();
        state.step(&[], 16.0);
        let result = state.step(
            &[CampusAction::Orbit {
                d_azimuth: 0.3,
                d_polar: 0.0,
            }],
            16.0,
        );
        assert!(result.redraw);
        // Damping keeps the frame loop drawing while the orbit glides.
        assert!(state.step(&[], 16.0).redraw);
    }

    #[test]
    fn selection_toggles_through_actions() {
        let mut state = CampusState::new();
        let click = CampusAction::ClickBuilding {
            building: BuildingId(3),
        };
        state.step(std::slice::from_ref(&click), 16.0);
        assert_eq!(
            state.selected_building().map(|b| b.id),
            Some(BuildingId(3))
        );
        let result = state.step(&[click], 16.0);
        assert_eq!(
            kinds(&result),
            vec![CampusEventKind::SelectionChanged { selected: None }]
        );
        let close = state.step(&[CampusAction::CloseSelection], 16.0);
        assert!(close.events.is_empty());
    }
}
