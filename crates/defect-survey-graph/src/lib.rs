//! Survey graph and defect-frame construction.
//!
//! The survey produced by a scanning session is a graph of named 3D
//! reference points ([`Station`]) joined by named edges ([`Line`]). Frames
//! of six stations and five lines are appended per accepted defect
//! detection by [`frame::propose_frame`], which validates a proposal
//! against the live [`TrackingSession`] before mutating the graph.
//!
//! The graph owns its stations and lines exclusively; renderers and
//! persistence consume ordered read-only views.

mod graph;
mod line;
mod session;
mod station;

pub mod frame;

pub use graph::{GraphError, GraphSummary, SurveyGraph};
pub use line::Line;
pub use session::{RaycastHit, TrackingSession};
pub use station::{Station, StationRole};

pub use frame::{
    propose_frame, CornerSource, EdgeLengths, FrameCommit, FrameParams, RejectReason,
};
