//! The survey graph: ordered stations, lines, and frame batch records.

use defect_survey_core::Pose;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::line::{Line, CENTER_TO_CAMERA};
use crate::station::{Station, StationRole};

/// Structural misuse of the graph API.
///
/// These indicate a caller bug (violating the fixed-batch invariant or
/// referencing a station that was never added), not an expected runtime
/// condition. They are still returned as values rather than panicking so
/// the host can decide how to surface them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("line endpoint {station} is not present in the graph")]
    DanglingReference { station: Uuid },
    #[error("no defect frame available at the tail of the graph")]
    Underflow,
}

/// Record of one committed defect frame: where its stations and lines start
/// in the flat lists, and the marker id it consumed.
#[derive(Clone, Copy, Debug)]
struct FrameBatch {
    marker_id: u32,
    station_start: usize,
    line_start: usize,
}

/// Stations and lines appended by a single frame commit.
pub(crate) struct CommittedFrame {
    pub marker_id: u32,
    pub station_ids: [Uuid; 6],
}

/// The mutable survey graph for one scanning session.
///
/// Stations keep insertion order; each committed defect frame occupies a
/// contiguous run of six stations and five lines. Frame identity comes from
/// an explicit marker counter rather than list positions, so manual
/// single-tap placements may interleave with frames without disturbing
/// numbering or undo.
#[derive(Clone, Debug, Default)]
pub struct SurveyGraph {
    stations: Vec<Station>,
    lines: Vec<Line>,
    batches: Vec<FrameBatch>,
    committed_frames: u32,
}

impl SurveyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered read-only view of all stations.
    #[inline]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Ordered read-only view of all lines.
    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The marker id the next committed frame will receive.
    #[inline]
    pub fn next_marker_id(&self) -> u32 {
        self.committed_frames + 1
    }

    /// Look up a station by id.
    pub fn station(&self, id: Uuid) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Append a station with an explicit name. Always succeeds.
    pub fn add_station(&mut self, pose: Pose, name: impl Into<String>) -> Uuid {
        let station = Station::new(pose, name);
        let id = station.id;
        self.stations.push(station);
        id
    }

    /// Append a station named after its own id.
    pub fn add_anonymous_station(&mut self, pose: Pose) -> Uuid {
        let station = Station::anonymous(pose);
        let id = station.id;
        self.stations.push(station);
        id
    }

    /// Append a line between two existing stations.
    ///
    /// Fails without mutating anything if either endpoint is absent.
    pub fn add_line(
        &mut self,
        start_id: Uuid,
        end_id: Uuid,
        name: impl Into<String>,
    ) -> Result<(), GraphError> {
        for id in [start_id, end_id] {
            if self.station(id).is_none() {
                return Err(GraphError::DanglingReference { station: id });
            }
        }
        self.lines.push(Line::new(start_id, end_id, name));
        Ok(())
    }

    /// Replace a station's name, preserving its id and pose.
    ///
    /// Used when a station is later identified to carry a defect type.
    pub fn rename_station(
        &mut self,
        id: Uuid,
        new_name: impl Into<String>,
    ) -> Result<(), GraphError> {
        match self.stations.iter_mut().find(|s| s.id == id) {
            Some(station) => {
                station.name = new_name.into();
                Ok(())
            }
            None => Err(GraphError::DanglingReference { station: id }),
        }
    }

    /// Stations whose name encodes the given frame role, in insertion order.
    pub fn stations_with_role(
        &self,
        role: StationRole,
    ) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter().filter(move |s| s.role() == Some(role))
    }

    /// Append one validated defect frame: six stations and five lines in
    /// fixed order, plus the batch record that makes the commit undoable.
    pub(crate) fn commit_frame(
        &mut self,
        defect_type: &str,
        corners: [Pose; 4],
        center: Pose,
        camera: Pose,
    ) -> CommittedFrame {
        let marker_id = self.next_marker_id();
        let batch = FrameBatch {
            marker_id,
            station_start: self.stations.len(),
            line_start: self.lines.len(),
        };

        let roles = [
            StationRole::Pt1,
            StationRole::Pt2,
            StationRole::Pt3,
            StationRole::Pt4,
            StationRole::Center,
            StationRole::Camera,
        ];
        let poses = [
            corners[0], corners[1], corners[2], corners[3], center, camera,
        ];

        let mut station_ids = [Uuid::nil(); 6];
        for (slot, (role, pose)) in station_ids.iter_mut().zip(roles.into_iter().zip(poses)) {
            let name = format!("{marker_id}_{defect_type}_{}", role.label());
            *slot = self.add_station(pose, name);
        }

        let edge_pairs = [
            (0, 1, "pt1_to_pt2"),
            (1, 2, "pt2_to_pt3"),
            (2, 3, "pt3_to_pt4"),
            (3, 0, "pt4_to_pt1"),
            (4, 5, CENTER_TO_CAMERA),
        ];
        for (from, to, pair) in edge_pairs {
            self.lines.push(Line::new(
                station_ids[from],
                station_ids[to],
                format!("{marker_id}_{defect_type}_{pair}"),
            ));
        }

        self.batches.push(batch);
        self.committed_frames += 1;

        CommittedFrame {
            marker_id,
            station_ids,
        }
    }

    /// Remove the most recently committed defect frame (six stations, five
    /// lines), restoring the marker counter.
    ///
    /// Fails with [`GraphError::Underflow`] when no frame has been
    /// committed, or when stations were appended after the last frame so
    /// that it no longer sits at the tail of the lists.
    pub fn remove_last_frame(&mut self) -> Result<(), GraphError> {
        let batch = *self.batches.last().ok_or(GraphError::Underflow)?;
        let at_tail = batch.station_start + 6 == self.stations.len()
            && batch.line_start + 5 == self.lines.len();
        if !at_tail {
            return Err(GraphError::Underflow);
        }

        self.stations.truncate(batch.station_start);
        self.lines.truncate(batch.line_start);
        self.batches.pop();
        self.committed_frames = batch.marker_id - 1;
        log::debug!("removed frame {}", batch.marker_id);
        Ok(())
    }

    /// Axis-aligned bounding box of all station positions, as (center,
    /// size). `None` for an empty graph.
    pub fn bounds(&self) -> Option<(Point3<f32>, Vector3<f32>)> {
        let mut positions = self.stations.iter().map(|s| s.pose.position().coords);
        let first = positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        });
        Some((Point3::from((min + max) * 0.5), max - min))
    }
}

/// Serializable snapshot view of the graph content, used by reports.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphSummary {
    pub station_count: usize,
    pub line_count: usize,
    pub frame_count: u32,
}

impl From<&SurveyGraph> for GraphSummary {
    fn from(graph: &SurveyGraph) -> Self {
        Self {
            station_count: graph.stations.len(),
            line_count: graph.lines.len(),
            frame_count: graph.committed_frames,
        }
    }
}
