//! Per-commit reports for logging and operator display.

use std::fs;
use std::path::Path;

use defect_survey_core::{LengthPreference, GENERAL_PRECISION};
use defect_survey_graph::FrameCommit;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ReportIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Human-oriented summary of one committed defect frame, mirroring what
/// the operator sees after each mark: the frame header plus the four
/// measured edges.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommitReport {
    /// `"{marker}: {defect type}"`.
    pub summary: String,
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl CommitReport {
    /// Build a report from a commit in the operator's display unit.
    pub fn new(commit: &FrameCommit, pref: LengthPreference) -> Self {
        let fmt = |meters: f32| {
            pref.from_metric(meters as f64)
                .rounded_to(GENERAL_PRECISION)
                .to_string()
        };
        Self {
            summary: format!("{}: {}", commit.marker_id, commit.defect_type),
            top: format!("Top: {}", fmt(commit.edges.top)),
            right: format!("Right: {}", fmt(commit.edges.right)),
            bottom: format!("Bottom: {}", fmt(commit.edges.bottom)),
            left: format!("Left: {}", fmt(commit.edges.left)),
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReportIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
