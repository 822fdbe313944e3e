// Actions that mutate campus state.
//
// All external changes to `CampusState` go through `CampusAction`. The UI
// layer (search box, directory panel, building clicks, walking controls,
// pointer input on the canvas) constructs actions and hands them to
// `CampusState::step()` together with the frame delta. Actions naming an
// unknown building are silent no-ops.
//
// See also: `campus.rs` for `apply_action()` which dispatches these,
// `event.rs` for what each action reports back.

use crate::types::BuildingId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CampusAction {
    /// Plan a route to a building and start walking. Replaces any active
    /// navigation and clears the selection.
    NavigateTo { building: BuildingId },
    /// Stop navigating and return the avatar to the gate.
    ResetNavigation,
    /// Pause or resume the walk. Ignored unless walking.
    TogglePause,
    /// Toggle the highlight on a building.
    ClickBuilding { building: BuildingId },
    /// Close the building info card.
    CloseSelection,
    /// Orbit drag, in radians.
    Orbit { d_azimuth: f32, d_polar: f32 },
    /// Scroll zoom, in world units (positive = away).
    Zoom { delta: f32 },
    /// Right-drag pan, in view-relative units.
    Pan { right: f32, forward: f32 },
}
