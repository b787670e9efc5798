//! The world-tracking capability consumed by frame construction.
//!
//! The host application owns the actual AR session; the engine only needs
//! the ability to ray-cast a screen point onto a reconstructed surface and
//! to read the current camera pose. Keeping this behind a trait lets tests
//! drive the constructor with deterministic fakes.

use defect_survey_core::{Pose, ScreenPoint};

/// A successful ray-cast: the hit surface pose and its distance from the
/// camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub pose: Pose,
    pub distance: f32,
}

/// Read-only queries against the host's world-tracking session.
pub trait TrackingSession {
    /// Map a screen point to a 3D surface hit, or `None` when no surface
    /// is found under the ray. A ray-cast that never completes on the host
    /// side must be surfaced as a miss, not a hang.
    fn raycast(&self, point: ScreenPoint) -> Option<RaycastHit>;

    /// The camera pose at the current frame.
    fn camera_pose(&self) -> Pose;
}
