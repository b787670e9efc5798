//! The survey engine: detections in, graph mutations out.
//!
//! The host serializes tracking callbacks and operator taps onto one
//! logical stream of proposals, but nothing stops a misbehaving host from
//! calling in from two threads, so every mutating path goes through one
//! mutex around the graph. Frame identity (the marker counter) and undo
//! both depend on that ordering. Validation runs to completion under the
//! same lock, so a proposal can never observe a half-committed frame.

use std::sync::{Mutex, MutexGuard};

use defect_survey_core::{ScreenPoint, ScreenRect};
use defect_survey_graph::{
    frame, CornerSource, FrameCommit, FrameParams, GraphError, RejectReason, StationRole,
    SurveyGraph, TrackingSession,
};
use defect_survey_store::ScanFile;
use log::{debug, warn};
use uuid::Uuid;

/// One labeled rectangle from the external object detector.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub label: String,
    pub rect: ScreenRect,
}

/// Why a detection was dropped before a frame proposal was even made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The box extends off-screen (negative coordinates).
    OffScreen,
    /// The box is smaller than the minimum detection area.
    BelowMinArea,
}

/// Per-detection outcome of an automatic processing pass.
#[derive(Clone, Debug)]
pub enum ProposalOutcome {
    Committed(FrameCommit),
    Rejected { label: String, reason: RejectReason },
    Skipped { label: String, reason: SkipReason },
}

/// The two stations appended by a manual single-tap placement.
#[derive(Clone, Copy, Debug)]
pub struct ManualPlacement {
    pub surface_id: Uuid,
    pub camera_id: Uuid,
}

/// Owns the survey graph for one scanning session and mediates all access
/// to it.
pub struct SurveyEngine<T: TrackingSession> {
    tracking: T,
    params: FrameParams,
    graph: Mutex<SurveyGraph>,
}

impl<T: TrackingSession> SurveyEngine<T> {
    /// Create an engine around the injected tracking session with default
    /// validation parameters.
    pub fn new(tracking: T) -> Self {
        Self::with_params(tracking, FrameParams::default())
    }

    pub fn with_params(tracking: T, params: FrameParams) -> Self {
        Self {
            tracking,
            params,
            graph: Mutex::new(SurveyGraph::new()),
        }
    }

    #[inline]
    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    fn graph(&self) -> MutexGuard<'_, SurveyGraph> {
        // A panic while holding the lock leaves the graph in a consistent
        // state (mutations are atomic per call), so poisoning is not
        // propagated.
        self.graph.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Automatic mode: run every detector box of one processed frame
    /// through gating and frame proposal.
    pub fn process_detections(
        &self,
        detections: impl IntoIterator<Item = Detection>,
    ) -> Vec<ProposalOutcome> {
        let mut graph = self.graph();
        detections
            .into_iter()
            .map(|detection| self.propose_locked(&mut graph, detection))
            .collect()
    }

    fn propose_locked(&self, graph: &mut SurveyGraph, detection: Detection) -> ProposalOutcome {
        let Detection { label, rect } = detection;

        if rect.x < 0.0 || rect.y < 0.0 {
            debug!("skipping {label}: box extends off-screen");
            return ProposalOutcome::Skipped {
                label,
                reason: SkipReason::OffScreen,
            };
        }
        if rect.area() <= self.params.min_box_area {
            debug!(
                "skipping {label}: box area {:.0} px² below minimum",
                rect.area()
            );
            return ProposalOutcome::Skipped {
                label,
                reason: SkipReason::BelowMinArea,
            };
        }

        let source = CornerSource::Detector { rect };
        match frame::propose_frame(graph, &self.tracking, source, &label, &self.params) {
            Ok(commit) => ProposalOutcome::Committed(commit),
            Err(reason) => {
                debug!("proposal for {label} rejected: {reason}");
                ProposalOutcome::Rejected { label, reason }
            }
        }
    }

    /// Manual mode: propose a frame from an operator-placed template
    /// rectangle. Not subject to the minimum-area gate.
    pub fn mark_template(&self, rect: ScreenRect, label: &str) -> Result<FrameCommit, RejectReason> {
        let mut graph = self.graph();
        frame::propose_frame(
            &mut graph,
            &self.tracking,
            CornerSource::ManualTemplate { rect },
            label,
            &self.params,
        )
    }

    /// Manual single-tap placement: ray-cast the tap point and append the
    /// surface station plus a camera-pose station joined by a
    /// `Screen_touch` line. `None` when no surface is under the tap.
    pub fn place_station(&self, tap: ScreenPoint) -> Option<ManualPlacement> {
        let hit = self.tracking.raycast(tap)?;
        let camera = self.tracking.camera_pose();

        let mut graph = self.graph();
        let surface_id = graph.add_anonymous_station(hit.pose);
        let camera_id = graph.add_anonymous_station(camera);
        if let Err(err) = graph.add_line(surface_id, camera_id, "Screen_touch") {
            // Both stations were appended above, so this cannot happen;
            // surface it loudly rather than silently dropping the line.
            warn!("manual placement line rejected: {err}");
        }

        Some(ManualPlacement {
            surface_id,
            camera_id,
        })
    }

    /// Undo the most recently committed defect frame.
    pub fn remove_last_frame(&self) -> Result<(), GraphError> {
        self.graph().remove_last_frame()
    }

    /// Replace a station's name, e.g. once its defect type is known.
    pub fn rename_station(&self, id: Uuid, new_name: &str) -> Result<(), GraphError> {
        self.graph().rename_station(id, new_name)
    }

    /// Names of all stations carrying the given role, in insertion order.
    pub fn station_names_with_role(&self, role: StationRole) -> Vec<String> {
        self.graph()
            .stations_with_role(role)
            .map(|s| s.name.clone())
            .collect()
    }

    /// Read access to the graph for the rendering collaborator.
    pub fn with_graph<R>(&self, f: impl FnOnce(&SurveyGraph) -> R) -> R {
        f(&self.graph())
    }

    /// Flatten the current graph into a persistable scan, attaching the
    /// opaque mesh and snapshot payloads from the tracking collaborator.
    pub fn snapshot(
        &self,
        mesh: Vec<u8>,
        start_snapshot: Option<Vec<u8>>,
        end_snapshot: Option<Vec<u8>>,
    ) -> ScanFile {
        ScanFile::from_graph(&self.graph(), mesh, start_snapshot, end_snapshot)
    }
}
