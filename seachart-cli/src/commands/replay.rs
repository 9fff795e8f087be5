//! Replay command - drive the chart engine from a recorded track.
//!
//! Each fix is fed through a [`RenderCoordinator`] on a [`HeadlessMap`] at
//! its recorded offset, with follow requested after the first fix. Camera
//! moves and the UI readouts are printed as they happen.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use seachart::boundary::BoundaryLocator;
use seachart::coord::{CameraState, GeoPoint};
use seachart::follow::GpsFix;
use seachart::render::{
    format_coordinate, ButtonIntent, HeadlessMap, HostOp, MapEvent, RenderCoordinator,
};
use seachart::tile_store::TilePack;
use seachart::time::EventTime;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Initial camera zoom for replays.
const REPLAY_ZOOM: f64 = 14.0;

/// Longest accepted offset into a recording.
const MAX_TRACK_OFFSET: Duration = Duration::from_secs(366 * 24 * 60 * 60);

/// Arguments for the replay command.
pub struct ReplayArgs {
    pub track: PathBuf,
    pub boundary: Option<PathBuf>,
    pub pack: Option<PathBuf>,
}

/// One recorded fix.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Line number in the track file.
    pub line: usize,
    /// Offset from the start of the recording.
    pub offset: Duration,
    pub coordinate: GeoPoint,
    pub speed_knots: Option<f64>,
    pub course_deg: Option<f64>,
    pub accuracy_m: f64,
}

/// Parse `secs,lat,lon,speed_kn,course_deg,accuracy_m` lines.
///
/// Blank lines, `#` comments and a leading `secs,...` header are skipped.
/// Empty speed or course fields mean unavailable.
pub fn parse_track(text: &str) -> Result<Vec<TrackPoint>, CliError> {
    let mut points = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("secs") {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 6 {
            return Err(CliError::Track {
                line: line_no,
                message: format!("expected 6 fields, found {}", fields.len()),
            });
        }

        let number = |i: usize, name: &str| -> Result<f64, CliError> {
            fields[i].parse::<f64>().map_err(|_| CliError::Track {
                line: line_no,
                message: format!("{} '{}' is not a number", name, fields[i]),
            })
        };
        let optional = |i: usize, name: &str| -> Result<Option<f64>, CliError> {
            if fields[i].is_empty() {
                Ok(None)
            } else {
                number(i, name).map(Some)
            }
        };

        let secs = number(0, "secs")?;
        let offset = Duration::try_from_secs_f64(secs)
            .ok()
            .filter(|offset| *offset <= MAX_TRACK_OFFSET)
            .ok_or_else(|| CliError::Track {
                line: line_no,
                message: format!(
                    "secs '{}' must be between 0 and {}",
                    fields[0],
                    MAX_TRACK_OFFSET.as_secs()
                ),
            })?;

        points.push(TrackPoint {
            line: line_no,
            offset,
            coordinate: GeoPoint::new(number(1, "lat")?, number(2, "lon")?),
            speed_knots: optional(3, "speed_kn")?,
            course_deg: optional(4, "course_deg")?,
            accuracy_m: number(5, "accuracy_m")?,
        });
    }

    Ok(points)
}

/// Run the replay command.
pub fn run(args: ReplayArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("replay");

    let text = read_file(&args.track)?;
    let track = parse_track(&text)?;
    let Some(first) = track.first() else {
        println!("Track is empty; nothing to replay.");
        return Ok(());
    };

    let boundary = match &args.boundary {
        Some(path) => BoundaryLocator::load(path)?,
        None => BoundaryLocator::new(Vec::new()),
    };

    let host = HeadlessMap::new(CameraState::new(first.coordinate, REPLAY_ZOOM));
    let mut coordinator =
        RenderCoordinator::new(host, boundary, runner.config().coordinator_config());

    let runtime = runner.runtime()?;
    runtime.block_on(async {
        let start = EventTime::now();

        if let Some(pack) = &args.pack {
            coordinator
                .sync_tile_packs(vec![TilePack::from_path(pack)])
                .await;
            if coordinator.open_packs().is_empty() {
                println!("Tile pack {} could not be opened", pack.display());
            }
        }

        let mut moves = 0usize;
        for (index, point) in track.iter().enumerate() {
            let at = start
                .checked_advanced_by(point.offset)
                .ok_or_else(|| CliError::Track {
                    line: point.line,
                    message: format!("offset {:?} is out of range", point.offset),
                })?;
            let fix = GpsFix {
                coordinate: point.coordinate,
                speed_knots: point.speed_knots,
                course_deg: point.course_deg,
                horizontal_accuracy_m: point.accuracy_m,
                timestamp: at.monotonic,
            };
            coordinator.handle(MapEvent::Fix(fix), at).await;
            if index == 0 {
                coordinator
                    .handle(MapEvent::Intent(ButtonIntent::ToggleFollow), at)
                    .await;
            }
            for _ in 0..coordinator.host_mut().take_region_changes() {
                coordinator.handle(MapEvent::RegionChanged, at).await;
            }

            let moved = coordinator
                .host_mut()
                .take_ops()
                .into_iter()
                .filter_map(|op| match op {
                    HostOp::SetCamera(camera) => Some(camera.center),
                    _ => None,
                })
                .last();
            if moved.is_some() {
                moves += 1;
            }

            let ui = coordinator.ui();
            println!(
                "{:>8.1}s  {:<10} {:<9} {:<6} boundary {:<9} {}",
                point.offset.as_secs_f64(),
                match moved {
                    Some(_) => "camera",
                    None => "held",
                },
                ui.speed,
                ui.course,
                ui.boundary_distance,
                moved
                    .map(format_coordinate)
                    .unwrap_or_else(|| ui.cursor_coordinate.clone()),
            );
        }

        coordinator.close_packs();

        println!();
        println!("Fixes replayed: {}", track.len());
        println!("Camera moves:   {}", moves);
        println!(
            "Follow:         {}",
            if coordinator.ui().follow_enabled {
                "on"
            } else {
                "off"
            }
        );
        info!(fixes = track.len(), moves, "Replay complete");
        Ok::<(), CliError>(())
    })
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::FileRead {
        path: path.display().to_string(),
        error: e,
    })
}
