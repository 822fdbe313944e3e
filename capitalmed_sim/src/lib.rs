// capitalmed_sim: campus navigation core for the CapitalMed campus map.
//
// This crate holds all non-visual state of the interactive campus map: the
// building catalog, route planning, the walking avatar, click selection, the
// orbit camera and the per-frame session loop. It has no rendering or
// windowing dependencies and can be tested and run headless (see the
// `walkthrough` binary).
//
// Module overview:
// - `campus.rs`:    Top-level CampusState, frame step, action/event processing.
// - `catalog.rs`:   Building records, lookup, search and directory filters.
// - `path.rs`:      Trunk-road route planner (gate to building entrance).
// - `walk.rs`:      Walk simulator state machine (Idle / Walking / Arrived).
// - `selection.rs`: Click-to-select highlighting.
// - `camera.rs`:    Damped orbit camera with avatar follow.
// - `command.rs`:   CampusAction, all session mutations.
// - `event.rs`:     CampusEvent, what the UI reacts to.
// - `schedule.rs`:  Redraw batching and the deferred timer queue.
// - `config.rs`:    CampusConfig, every tunable, loaded from JSON.
// - `types.rs`:     Point2, BuildingId, building classification enums.
//
// The companion crate `capitalmed_scene` turns this state into render
// primitives; `capitalmed_site` holds the site-level helpers (search,
// local store, chat) that sit around the map.
//
// Time only enters through the `delta_ms` passed to each step, so a given
// action sequence and frame cadence always produce the same walk.

pub mod camera;
pub mod campus;
pub mod catalog;
pub mod command;
pub mod config;
pub mod event;
pub mod path;
pub mod schedule;
pub mod selection;
pub mod types;
pub mod walk;
