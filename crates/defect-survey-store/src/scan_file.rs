//! The flattened, persistable form of a finished scanning session.

use std::time::{SystemTime, UNIX_EPOCH};

use defect_survey_graph::{Line, Station, SurveyGraph};
use nalgebra::{Point3, Vector3};

/// Version written by this build's encoder.
pub const CURRENT_ENCODING_VERSION: u32 = 1;

/// Everything persisted for one survey.
///
/// Stations and lines keep their in-graph insertion order. The mesh and
/// snapshot blobs come from the world-tracking collaborator and pass
/// through this layer opaque and unmodified.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanFile {
    pub encoding_version: u32,
    /// Capture time, seconds since the Unix epoch.
    pub timestamp: f64,
    /// Center of the surveyed region (AABB center of station positions).
    pub center: Point3<f32>,
    /// Size of the surveyed region (AABB extent of station positions).
    pub extent: Vector3<f32>,
    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
    /// Opaque reconstructed-mesh payload.
    pub mesh: Vec<u8>,
    /// Opaque camera snapshot taken at scan start, if any.
    pub start_snapshot: Option<Vec<u8>>,
    /// Opaque camera snapshot taken at scan end, if any.
    pub end_snapshot: Option<Vec<u8>>,
}

impl ScanFile {
    /// Flatten the current graph state into a persistable scan, stamped
    /// with the current time.
    pub fn from_graph(
        graph: &SurveyGraph,
        mesh: Vec<u8>,
        start_snapshot: Option<Vec<u8>>,
        end_snapshot: Option<Vec<u8>>,
    ) -> Self {
        let (center, extent) = graph
            .bounds()
            .unwrap_or((Point3::origin(), Vector3::zeros()));
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        Self {
            encoding_version: CURRENT_ENCODING_VERSION,
            timestamp,
            center,
            extent,
            stations: graph.stations().to_vec(),
            lines: graph.lines().to_vec(),
            mesh,
            start_snapshot,
            end_snapshot,
        }
    }
}
