use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Measured lengths of the four frame edges, in meters.
///
/// `top` is pt1–pt2, `right` pt2–pt3, `bottom` pt3–pt4, `left` pt4–pt1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeLengths {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeLengths {
    /// Edges paired with their display captions, in naming order.
    pub fn labeled(&self) -> [(&'static str, f32); 4] {
        [
            ("Top", self.top),
            ("Right", self.right),
            ("Bottom", self.bottom),
            ("Left", self.left),
        ]
    }
}

/// A successfully committed defect frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameCommit {
    /// 1-based sequential index of the frame.
    pub marker_id: u32,
    /// Detector label the frame was committed under.
    pub defect_type: String,
    /// Ids of the six appended stations, in order
    /// pt1, pt2, pt3, pt4, Center, Camera.
    pub station_ids: [Uuid; 6],
    /// Measured edge lengths for display and logging.
    pub edges: EdgeLengths,
    /// 3D anchor points for on-screen measurement labels: the four edge
    /// midpoints (top, right, bottom, left) followed by the center hit.
    pub label_anchors: [Point3<f32>; 5],
}
