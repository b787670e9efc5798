/// Reasons a frame proposal is rejected.
///
/// All variants are terminal for the proposal and leave the graph
/// untouched; the caller may simply retry on a later frame.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    #[error("no surface detected under one or more sample points")]
    NoSurfaceDetected,
    #[error("corner depths spread {spread:.3} m, detection straddles a depth discontinuity")]
    InconsistentDepth { spread: f32 },
    #[error("detection center {range:.3} m from camera, beyond reliable ray-cast range")]
    TooFarFromCamera { range: f32 },
    #[error("proposed center {distance:.3} m from an already-marked frame center")]
    TooCloseToExistingFrame { distance: f32 },
}
