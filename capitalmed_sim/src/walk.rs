// Walk simulator. Moves the visitor avatar along a planned waypoint path.
//
// A three-state machine with an orthogonal pause flag:
//
//   Idle ──navigate──▶ Walking ──last segment done──▶ Arrived
//     ▲                   │                              │
//     └──────reset────────┴────────reset / navigate──────┘
//
// Pausing does not change the phase; a paused `Walking` simulator simply
// ignores ticks. Pause requests are ignored outside `Walking`.
//
// ## Tick
//
// Each tick advances the per-segment progress fraction by
//
//   speed × (delta_ms / reference_frame_ms)
//         × (reference_segment_length / max(segment_length, min_segment_length))
//
// so world-space speed is constant regardless of segment length. The
// position is the linear interpolation between the segment endpoints at
// `min(progress, 1)`. When progress reaches 1 the position snaps exactly to
// the segment's end waypoint; the segment index advances and progress resets
// to 0, or the simulator arrives if that was the final segment. At most one
// segment boundary is crossed per tick. Zero-length segments (duplicate
// waypoints) complete on the tick that reaches them.
//
// Position is therefore always a waypoint or a point between two consecutive
// waypoints; the only discontinuity is the jump to the first waypoint when
// navigation starts.
//
// See also: `path.rs` for how paths are produced, `campus.rs` which owns a
// `WalkSimulator` and forwards its step results as events.

use crate::catalog::Building;
use crate::config::WalkParams;
use crate::path::{TrunkRoad, find_path_to};
use crate::types::Point2;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkPhase {
    #[default]
    Idle,
    Walking,
    Arrived,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStep {
    /// Nothing to do: idle, arrived, or paused.
    Stationary,
    /// Moved within the current segment.
    Advanced,
    /// Finished a segment and started segment `next_segment`.
    SegmentReached { next_segment: usize },
    /// Finished the final segment.
    Arrived,
}

/// Mutable walk state for the single visitor avatar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalkSimulator {
    phase: WalkPhase,
    paused: bool,
    position: Point2,
    path: Vec<Point2>,
    segment: usize,
    progress: f32,
}

impl WalkSimulator {
    /// An idle simulator standing at `start`.
    pub fn new(start: Point2) -> Self {
        Self {
            phase: WalkPhase::Idle,
            paused: false,
            position: start,
            path: Vec::new(),
            segment: 0,
            progress: 0.0,
        }
    }

    pub fn phase(&self) -> WalkPhase {
        self.phase
    }

    pub fn is_walking(&self) -> bool {
        self.phase == WalkPhase::Walking
    }

    pub fn has_arrived(&self) -> bool {
        self.phase == WalkPhase::Arrived
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn position(&self) -> Point2 {
        self.position
    }

    pub fn path(&self) -> &[Point2] {
        &self.path
    }

    /// Index of the segment being walked (`path[segment] → path[segment + 1]`).
    /// Equals the segment count once arrived.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Progress fraction within the current segment, in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn segment_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Overall completion in `[0, 1]`, for the progress bar.
    pub fn total_progress(&self) -> f32 {
        let segments = self.segment_count();
        if segments == 0 {
            return 0.0;
        }
        ((self.segment as f32 + self.progress) / segments as f32).min(1.0)
    }

    /// Start walking `path` from its first waypoint. An empty path is
    /// ignored; a single-point path arrives immediately.
    pub fn navigate_along(&mut self, path: Vec<Point2>) {
        let Some(&first) = path.first() else {
            return;
        };
        self.position = first;
        self.segment = 0;
        self.progress = 0.0;
        self.paused = false;
        self.phase = if path.len() < 2 {
            WalkPhase::Arrived
        } else {
            WalkPhase::Walking
        };
        self.path = path;
    }

    /// Plan a route to `building` over `road` and start walking it.
    pub fn navigate_to(&mut self, building: &Building, road: &TrunkRoad<'_>) {
        self.navigate_along(find_path_to(building, road));
    }

    /// Return to idle at `start`. Idempotent.
    pub fn reset(&mut self, start: Point2) {
        *self = Self::new(start);
    }

    /// Toggle pause. Returns the new pause state, or `None` if the request
    /// was ignored because the simulator is not walking.
    pub fn toggle_pause(&mut self) -> Option<bool> {
        if self.phase != WalkPhase::Walking {
            return None;
        }
        self.paused = !self.paused;
        Some(self.paused)
    }

    /// Advance by one animation frame of `delta_ms` milliseconds.
    pub fn tick(&mut self, delta_ms: f32, params: &WalkParams) -> WalkStep {
        if self.phase != WalkPhase::Walking || self.paused {
            return WalkStep::Stationary;
        }
        let (Some(&from), Some(&to)) =
            (self.path.get(self.segment), self.path.get(self.segment + 1))
        else {
            return WalkStep::Stationary;
        };

        let segment_length = from.distance(to);
        let next = if segment_length <= f32::EPSILON {
            1.0
        } else {
            let frames = delta_ms.max(0.0) / params.reference_frame_ms;
            let normalization =
                params.reference_segment_length / segment_length.max(params.min_segment_length);
            self.progress + params.speed * frames * normalization
        };

        if next < 1.0 {
            self.progress = next;
            self.position = from.lerp(to, next);
            return WalkStep::Advanced;
        }

        self.position = to;
        self.progress = 0.0;
        self.segment += 1;
        if self.segment >= self.segment_count() {
            self.phase = WalkPhase::Arrived;
            self.paused = false;
            WalkStep::Arrived
        } else {
            WalkStep::SegmentReached {
                next_segment: self.segment,
            }
        }
    }
}
