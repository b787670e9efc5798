//! Defect-frame construction.
//!
//! Turns a labeled screen-space rectangle into a validated six-station/
//! five-line frame anchored in 3D. A proposal is a stateless
//! request/response: every geometric check runs against the tracking
//! session and the current graph, and only a fully valid proposal mutates
//! the graph. There is no partial commit.
//!
//! ## Pipeline
//!
//! ```text
//! CornerSource → derive center + edge midpoints
//!             → ray-cast 9 points        (miss  → NoSurfaceDetected)
//!             → corner depth spread      (≥ max → InconsistentDepth)
//!             → camera-to-center range   (> max → TooFarFromCamera)
//!             → center-to-center dedup   (< min → TooCloseToExistingFrame)
//!             → commit 6 stations / 5 lines, return marker id + edges
//! ```
//!
//! Automatic (detector) and manual (template) modes both route through
//! [`propose_frame`]; they differ only in where the rectangle comes from.

mod error;
mod params;
mod pipeline;
mod result;
mod source;

pub use error::RejectReason;
pub use params::FrameParams;
pub use pipeline::propose_frame;
pub use result::{EdgeLengths, FrameCommit};
pub use source::CornerSource;
