//! High-level facade crate for the `defect-survey-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying engine crates
//! - the [`SurveyEngine`], which wires the external detection and
//!   world-tracking collaborators to the survey graph under a
//!   single-writer discipline
//!
//! ## Quickstart
//!
//! ```no_run
//! use defect_survey::{Detection, ScreenRect, SurveyEngine, TrackingSession};
//!
//! fn scan(tracking: impl TrackingSession) {
//!     let engine = SurveyEngine::new(tracking);
//!
//!     // Per processed camera frame, feed in what the detector found.
//!     let outcomes = engine.process_detections([Detection {
//!         label: "concrete crack".into(),
//!         rect: ScreenRect::new(120.0, 340.0, 260.0, 180.0),
//!     }]);
//!     for outcome in &outcomes {
//!         println!("{outcome:?}");
//!     }
//!
//!     // Persist the session when the operator stops scanning.
//!     let scan = engine.snapshot(Vec::new(), None, None);
//!     let _ = defect_survey::store::write_scan("site.survey", &scan);
//! }
//! ```
//!
//! ## API map
//! - `defect_survey::core`: poses, screen geometry, length display.
//! - `defect_survey::graph`: stations, lines, the survey graph, and the
//!   defect-frame constructor.
//! - `defect_survey::store`: the versioned binary persistence layer.

pub use defect_survey_core as core;
pub use defect_survey_graph as graph;
pub use defect_survey_store as store;

pub use defect_survey_core::{Length, LengthPreference, Pose, ScreenPoint, ScreenRect};
pub use defect_survey_graph::{
    CornerSource, EdgeLengths, FrameCommit, FrameParams, GraphError, Line, RaycastHit,
    RejectReason, Station, StationRole, SurveyGraph, TrackingSession,
};
pub use defect_survey_store::ScanFile;

mod engine;
mod report;

pub use engine::{Detection, ManualPlacement, ProposalOutcome, SkipReason, SurveyEngine};
pub use report::{CommitReport, ReportIoError};
