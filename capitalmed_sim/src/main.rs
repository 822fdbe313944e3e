// Headless walkthrough of the campus map.
//
// Plans a route from the main gate to one building and steps the walk at a
// fixed frame delta until the avatar arrives, logging each segment
// transition. Useful for checking config overrides and route shapes without
// a renderer. Log verbosity follows `RUST_LOG` (default `info`).
//
// Usage:
//   walkthrough [OPTIONS]
//     --building <ID>     Building to walk to (default: 1)
//     --frame-ms <MS>     Frame delta in milliseconds (default: 16)
//     --config <PATH>     CampusConfig JSON file (default: built-in)
//     --json              Print the final navigation state and events as JSON

use capitalmed_sim::campus::CampusState;
use capitalmed_sim::catalog::Catalog;
use capitalmed_sim::command::CampusAction;
use capitalmed_sim::config::CampusConfig;
use capitalmed_sim::event::CampusEventKind;
use capitalmed_sim::types::BuildingId;
use tracing_subscriber::EnvFilter;

/// Upper bound on frames, so a misconfigured speed cannot spin forever.
const MAX_FRAMES: u64 = 10_000_000;

struct Args {
    building: u32,
    frame_ms: f32,
    config: Option<String>,
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = parse_args();

    let config = match &args.config {
        Some(path) => match CampusConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => CampusConfig::default(),
    };

    let building = BuildingId(args.building);
    let mut state = CampusState::with_config(config, Catalog::capitalmed());
    let Some(name) = state.catalog().find_building(building).map(|b| b.name.clone()) else {
        eprintln!("Unknown building id {}", args.building);
        std::process::exit(1);
    };

    let mut events = state
        .step(&[CampusAction::NavigateTo { building }], args.frame_ms)
        .events;
    while !state.walk().has_arrived() && state.frame() < MAX_FRAMES {
        let result = state.step(&[], args.frame_ms);
        for event in &result.events {
            if let CampusEventKind::SegmentReached { segment, .. } = event.kind {
                log::info!(
                    "frame {}: segment {segment} at {}",
                    event.frame,
                    state.walk().position()
                );
            }
        }
        events.extend(result.events);
    }

    if !state.walk().has_arrived() {
        eprintln!("Gave up after {MAX_FRAMES} frames");
        std::process::exit(2);
    }

    if args.json {
        let out = serde_json::json!({
            "building": building,
            "path": state.walk().path(),
            "navigation": state.navigation(),
            "camera": state.camera_pose(),
            "events": events,
        });
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize result: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "Arrived at {name} ({building}) at {} after {} frames",
            state.walk().position(),
            state.frame()
        );
    }
}

/// Parse command-line arguments with plain `std::env::args()` matching.
fn parse_args() -> Args {
    let mut parsed = Args {
        building: 1,
        frame_ms: 16.0,
        config: None,
        json: false,
    };
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--building" => {
                i += 1;
                parsed.building = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--building requires a numeric building id");
                    std::process::exit(1);
                });
            }
            "--frame-ms" => {
                i += 1;
                parsed.frame_ms = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .filter(|ms: &f32| *ms > 0.0)
                    .unwrap_or_else(|| {
                        eprintln!("--frame-ms requires a positive number");
                        std::process::exit(1);
                    });
            }
            "--config" => {
                i += 1;
                parsed.config = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--config requires a path");
                    std::process::exit(1);
                }));
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => {
                println!("Usage: walkthrough [OPTIONS]");
                println!("  --building <ID>     Building to walk to (default: 1)");
                println!("  --frame-ms <MS>     Frame delta in milliseconds (default: 16)");
                println!("  --config <PATH>     CampusConfig JSON file");
                println!("  --json              Print final state as JSON");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    parsed
}
