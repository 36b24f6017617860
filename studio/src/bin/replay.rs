// Replays a script of surface events against an in-memory surface.
//
//   replay --solutions=solutions.json --events=events.json [--config=studio.json] [--snapshot]
//
// `events.json` is an array of tagged events, e.g.
//   [{"event": "create", "features": [...]}, {"event": "click", "id": "union"}]

use studio::config::StudioConfig;
use studio::source::JsonSource;
use studio::surface::{RecordingSurface, SurfaceEvent};
use studio::Studio;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studio=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    let mut solutions_path: Option<String> = None;
    let mut events_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut snapshot = false;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--solutions=") {
            solutions_path = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--events=") {
            events_path = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--config=") {
            config_path = Some(val.to_string());
        } else if a == "--snapshot" {
            snapshot = true;
        }
    }
    let (Some(solutions_path), Some(events_path)) = (solutions_path, events_path) else {
        eprintln!(
            "usage: replay --solutions=<path> --events=<path> [--config=<path>] [--snapshot]"
        );
        std::process::exit(2);
    };

    if let Err(e) = run(&solutions_path, &events_path, config_path.as_deref(), snapshot) {
        tracing::error!(code = e.code(), "{e}");
        std::process::exit(1);
    }
}

fn run(
    solutions_path: &str,
    events_path: &str,
    config_path: Option<&str>,
    snapshot: bool,
) -> studio::error::Result<()> {
    let mut config = match config_path {
        Some(path) => StudioConfig::from_path(path)?,
        None => StudioConfig::default(),
    };
    // The harness has no map; any credential makes the surface drawable.
    if !config.has_credential() {
        config.access_token = Some("replay".to_string());
    }

    let mut studio: Studio<RecordingSurface> = Studio::new(config);
    studio.load_from(&JsonSource::from_path(solutions_path)?)?;
    studio.attach_surface(RecordingSurface::loaded());

    let events: Vec<SurfaceEvent> = serde_json::from_str(&std::fs::read_to_string(events_path)?)?;
    for (n, event) in events.into_iter().enumerate() {
        let name = event.name();
        match studio.dispatch(event) {
            Ok(outcome) => println!("#{n} {name}: {outcome:?}"),
            // One rejected event does not stop the replay, as in the browser.
            Err(e) => println!("#{n} {name}: rejected ({}): {e}", e.code()),
        }
    }

    let session = studio.session();
    println!(
        "active={} polygons={} dirty={:?} {}",
        session.active(),
        session.active_polygons().len(),
        session.overlay().dirty_solutions().collect::<Vec<_>>(),
        studio.stats()
    );
    if snapshot {
        println!("{}", studio::json::snapshot_json(session)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&studio::json::active_collection(session))?);
    }
    Ok(())
}
