// Player-visible events emitted by the campus state.
//
// `CampusState::step()` returns the events produced while applying actions
// and advancing one frame. The UI uses them for the one-shot overlays
// (arrival banner, navigation card) and the embedding app can log them.

use crate::types::BuildingId;
use serde::{Deserialize, Serialize};

/// An event stamped with the frame on which it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CampusEvent {
    pub frame: u64,
    pub kind: CampusEventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CampusEventKind {
    /// A route was planned and the avatar started walking it.
    NavigationStarted { building: BuildingId, waypoints: usize },
    /// The avatar finished one segment and began segment `segment`.
    SegmentReached { building: BuildingId, segment: usize },
    /// The avatar reached the building entrance.
    Arrived { building: BuildingId },
    /// Navigation was cleared and the avatar returned to the gate.
    NavigationReset,
    /// The walk was paused or resumed.
    PauseToggled { paused: bool },
    /// The highlighted building changed.
    SelectionChanged { selected: Option<BuildingId> },
}
