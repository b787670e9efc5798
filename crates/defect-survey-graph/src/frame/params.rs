use serde::{Deserialize, Serialize};

/// Tuning parameters for frame validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameParams {
    /// Maximum camera-to-center distance in meters. Ray-cast accuracy and
    /// detector confidence both degrade with range.
    #[serde(default = "default_max_center_range")]
    pub max_center_range: f32,
    /// Maximum spread (max − min) of the four camera-to-corner distances
    /// in meters. A detection spanning a depth discontinuity, e.g.
    /// straddling an edge of the structure, produces unreliable 3D
    /// geometry and is rejected.
    #[serde(default = "default_max_corner_spread")]
    pub max_corner_spread: f32,
    /// Minimum permitted 3D separation between defect-frame centers, in
    /// meters. Prevents re-marking the same physical defect from a new
    /// viewpoint.
    #[serde(default = "default_allow_dist")]
    pub allow_dist: f32,
    /// Minimum detection box area in square pixels for the automatic
    /// mode. Smaller boxes are skipped before a proposal is made.
    #[serde(default = "default_min_box_area")]
    pub min_box_area: f32,
}

fn default_max_center_range() -> f32 {
    2.0
}

fn default_max_corner_spread() -> f32 {
    0.5
}

fn default_allow_dist() -> f32 {
    0.2
}

fn default_min_box_area() -> f32 {
    6000.0
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            max_center_range: default_max_center_range(),
            max_corner_spread: default_max_corner_spread(),
            allow_dist: default_allow_dist(),
            min_box_area: default_min_box_area(),
        }
    }
}
