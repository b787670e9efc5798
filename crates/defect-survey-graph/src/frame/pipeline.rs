//! The validate-then-commit pipeline for defect frames.

use defect_survey_core::ScreenPoint;
use log::{debug, info};

use crate::graph::SurveyGraph;
use crate::session::{RaycastHit, TrackingSession};
use crate::station::StationRole;

use super::error::RejectReason;
use super::params::FrameParams;
use super::result::{EdgeLengths, FrameCommit};
use super::source::CornerSource;

/// Validate a frame proposal against the tracking session and the current
/// graph, and commit it atomically if every check passes.
///
/// On success the graph gains six stations and five lines, and the
/// committed marker id plus measured edge lengths are returned. On
/// rejection the graph is untouched and the tagged reason is returned; the
/// caller decides whether to log, ignore, or surface it.
pub fn propose_frame<T: TrackingSession>(
    graph: &mut SurveyGraph,
    tracking: &T,
    source: CornerSource,
    defect_type: &str,
    params: &FrameParams,
) -> Result<FrameCommit, RejectReason> {
    let [pt1, pt2, pt3, pt4] = source.corners();

    // The label center interpolates the top edge horizontally and the left
    // edge vertically.
    let center = ScreenPoint::new((pt1.x + pt2.x) / 2.0, (pt1.y + pt4.y) / 2.0);
    let mids = [
        ScreenPoint::midpoint(pt1, pt2),
        ScreenPoint::midpoint(pt2, pt3),
        ScreenPoint::midpoint(pt3, pt4),
        ScreenPoint::midpoint(pt4, pt1),
    ];

    // Every sample point must hit a surface before anything is committed.
    let cast = |p: ScreenPoint| tracking.raycast(p).ok_or(RejectReason::NoSurfaceDetected);
    let corner_hits = [cast(pt1)?, cast(pt2)?, cast(pt3)?, cast(pt4)?];
    let center_hit = cast(center)?;
    let mid_hits = [cast(mids[0])?, cast(mids[1])?, cast(mids[2])?, cast(mids[3])?];

    let spread = corner_depth_spread(&corner_hits);
    if spread >= params.max_corner_spread {
        debug!("frame proposal rejected: corner depth spread {spread:.3} m");
        return Err(RejectReason::InconsistentDepth { spread });
    }

    let range = center_hit.distance;
    if range > params.max_center_range {
        debug!("frame proposal rejected: center {range:.3} m from camera");
        return Err(RejectReason::TooFarFromCamera { range });
    }

    // Dedup against every already-marked frame center, whatever its defect
    // type.
    let center_pos = center_hit.pose.position();
    for existing in graph.stations_with_role(StationRole::Center) {
        let distance = nalgebra::distance(&center_pos, &existing.pose.position());
        if distance < params.allow_dist {
            debug!(
                "frame proposal rejected: center {distance:.3} m from {}",
                existing.name
            );
            return Err(RejectReason::TooCloseToExistingFrame { distance });
        }
    }

    let camera = tracking.camera_pose();
    let committed = graph.commit_frame(
        defect_type,
        [
            corner_hits[0].pose,
            corner_hits[1].pose,
            corner_hits[2].pose,
            corner_hits[3].pose,
        ],
        center_hit.pose,
        camera,
    );

    let corner_pos = corner_hits.map(|h| h.pose.position());
    let edges = EdgeLengths {
        top: nalgebra::distance(&corner_pos[0], &corner_pos[1]),
        right: nalgebra::distance(&corner_pos[1], &corner_pos[2]),
        bottom: nalgebra::distance(&corner_pos[2], &corner_pos[3]),
        left: nalgebra::distance(&corner_pos[3], &corner_pos[0]),
    };

    info!(
        "committed frame {} ({defect_type}, {} mode, edges {:.2}/{:.2}/{:.2}/{:.2} m)",
        committed.marker_id,
        if source.is_automatic() {
            "detector"
        } else {
            "manual"
        },
        edges.top,
        edges.right,
        edges.bottom,
        edges.left,
    );

    let mut label_anchors = [center_hit.pose.position(); 5];
    for (anchor, hit) in label_anchors.iter_mut().zip(mid_hits.iter()) {
        *anchor = hit.pose.position();
    }

    Ok(FrameCommit {
        marker_id: committed.marker_id,
        defect_type: defect_type.to_owned(),
        station_ids: committed.station_ids,
        edges,
        label_anchors,
    })
}

fn corner_depth_spread(hits: &[RaycastHit; 4]) -> f32 {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for hit in hits {
        min = min.min(hit.distance);
        max = max.max(hit.distance);
    }
    max - min
}
