//! End-to-end survey session against a synthetic tracking session.
//!
//! Simulates a flat wall 1.4 m in front of the camera, feeds a few
//! detector boxes through the engine (including one too small and one
//! duplicate), places a manual station, and persists the result.
//!
//! Usage: `cargo run --example survey_session [output-dir]`

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use defect_survey::core::init_with_level;
use defect_survey::{
    CommitReport, Detection, LengthPreference, Pose, ProposalOutcome, RaycastHit, ScreenPoint,
    ScreenRect, StationRole, SurveyEngine, TrackingSession,
};
use log::{info, warn, LevelFilter};
use nalgebra::Point3;

/// Flat vertical wall at a fixed depth; 1 px maps to 1 mm of wall.
struct WallSession {
    depth: f32,
    camera: Pose,
}

impl TrackingSession for WallSession {
    fn raycast(&self, point: ScreenPoint) -> Option<RaycastHit> {
        let position = Point3::new(point.x * 0.001, point.y * 0.001, self.depth);
        Some(RaycastHit {
            pose: Pose::from_translation(position),
            distance: nalgebra::distance(&self.camera.position(), &position),
        })
    }

    fn camera_pose(&self) -> Pose {
        self.camera
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = LevelFilter::from_str("info").unwrap_or(LevelFilter::Info);
    init_with_level(log_level)?;

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir);

    let tracking = WallSession {
        depth: 1.4,
        camera: Pose::identity(),
    };
    let engine = SurveyEngine::new(tracking);

    let detections = vec![
        Detection {
            label: "concrete crack".into(),
            rect: ScreenRect::new(100.0, 200.0, 240.0, 160.0),
        },
        // Too small for the automatic gate.
        Detection {
            label: "paint bubble".into(),
            rect: ScreenRect::new(500.0, 80.0, 60.0, 40.0),
        },
        // Re-detection of the first defect from a slightly shifted box.
        Detection {
            label: "concrete crack".into(),
            rect: ScreenRect::new(110.0, 205.0, 240.0, 160.0),
        },
        Detection {
            label: "exposed rebar".into(),
            rect: ScreenRect::new(700.0, 500.0, 300.0, 220.0),
        },
    ];

    let mut first_commit = None;
    for outcome in engine.process_detections(detections) {
        match outcome {
            ProposalOutcome::Committed(commit) => {
                let edges: Vec<String> = commit
                    .edges
                    .labeled()
                    .iter()
                    .map(|(side, meters)| format!("{side}: {meters:.2} m"))
                    .collect();
                info!(
                    "frame {} ({}): {}",
                    commit.marker_id,
                    commit.defect_type,
                    edges.join(", ")
                );
                if first_commit.is_none() {
                    first_commit = Some(commit);
                }
            }
            ProposalOutcome::Rejected { label, reason } => {
                info!("rejected {label}: {reason}");
            }
            ProposalOutcome::Skipped { label, reason } => {
                info!("skipped {label}: {reason:?}");
            }
        }
    }

    // Operator taps a reference point on the wall.
    match engine.place_station(ScreenPoint::new(480.0, 360.0)) {
        Some(placement) => info!("manual station {}", placement.surface_id),
        None => warn!("manual tap found no surface"),
    }

    let centers = engine.station_names_with_role(StationRole::Center);
    info!("marked centers: {centers:?}");

    let summary = engine.with_graph(|g| defect_survey::graph::GraphSummary::from(g));
    info!("session summary: {}", serde_json::to_string(&summary)?);

    if let Some(commit) = &first_commit {
        let report_path = out_dir.join(format!("{}_{}_report.json", commit.marker_id, commit.defect_type));
        CommitReport::new(commit, LengthPreference::MetricMeter).write_json(&report_path)?;
        info!("wrote commit report to {}", report_path.display());
    }

    let scan = engine.snapshot(b"mesh payload placeholder".to_vec(), None, None);
    let scan_path = out_dir.join("demo_site.survey");
    defect_survey::store::write_scan(&scan_path, &scan)?;
    info!(
        "saved {} stations / {} lines to {}",
        scan.stations.len(),
        scan.lines.len(),
        scan_path.display()
    );

    Ok(())
}
