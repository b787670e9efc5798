//! Survey lines.
//!
//! A line is a named edge between two stations. It stores only the two
//! station ids and a name; the measured length is computed on demand from
//! the current station poses and formatted in the operator's display unit.

use defect_survey_core::{LengthPreference, LINE_PRECISION};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::SurveyGraph;

/// Name of the edge joining a frame's Center station to its Camera station.
pub(crate) const CENTER_TO_CAMERA: &str = "center_to_cam";

/// A named edge between two stations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start_id: Uuid,
    pub end_id: Uuid,
    pub name: String,
}

impl Line {
    pub fn new(start_id: Uuid, end_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            start_id,
            end_id,
            name: name.into(),
        }
    }

    /// Deterministic identifier derived from the endpoint ids.
    pub fn identifier(&self) -> String {
        format!("{}_{}", self.start_id, self.end_id)
    }

    /// Measured length in meters, or `None` if either endpoint has left the
    /// graph.
    pub fn length_in(&self, graph: &SurveyGraph) -> Option<f32> {
        let start = graph.station(self.start_id)?;
        let end = graph.station(self.end_id)?;
        Some(start.pose.distance_to(&end.pose))
    }

    /// Human-readable caption for rendering next to the line.
    ///
    /// Center-to-camera edges caption with their marker id and defect type
    /// instead of a distance; every other edge shows its measured length at
    /// line precision.
    pub fn caption(&self, graph: &SurveyGraph, pref: LengthPreference) -> Option<String> {
        if self.name.ends_with(CENTER_TO_CAMERA) {
            let mut parts = self.name.split('_');
            let marker = parts.next()?;
            let defect = parts.next()?;
            return Some(format!("{marker} {defect}"));
        }

        let meters = self.length_in(graph)?;
        Some(
            pref.from_metric(meters as f64)
                .rounded_to(LINE_PRECISION)
                .to_string(),
        )
    }
}
