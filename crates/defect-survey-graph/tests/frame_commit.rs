use defect_survey_core::{Pose, ScreenPoint, ScreenRect};
use defect_survey_graph::{
    propose_frame, CornerSource, FrameParams, GraphError, RaycastHit, RejectReason, StationRole,
    SurveyGraph, TrackingSession,
};
use nalgebra::Point3;

/// Tracking fake backed by a closure, so each test scripts its own
/// surface geometry.
struct FnTracker<F: Fn(ScreenPoint) -> Option<RaycastHit>> {
    cast: F,
    camera: Pose,
}

impl<F: Fn(ScreenPoint) -> Option<RaycastHit>> TrackingSession for FnTracker<F> {
    fn raycast(&self, point: ScreenPoint) -> Option<RaycastHit> {
        (self.cast)(point)
    }

    fn camera_pose(&self) -> Pose {
        self.camera
    }
}

/// A flat wall 1.5 m in front of a camera at the origin; 1 px maps to
/// 2 mm of wall.
fn wall_tracker() -> FnTracker<impl Fn(ScreenPoint) -> Option<RaycastHit>> {
    FnTracker {
        cast: |p: ScreenPoint| {
            let pos = Point3::new(p.x * 0.002, p.y * 0.002, 1.5);
            Some(RaycastHit {
                pose: Pose::from_translation(pos),
                distance: pos.coords.norm(),
            })
        },
        camera: Pose::identity(),
    }
}

fn detector_box(x: f32, y: f32) -> CornerSource {
    CornerSource::Detector {
        rect: ScreenRect::new(x, y, 100.0, 100.0),
    }
}

#[test]
fn commit_shape_on_empty_graph() {
    let tracking = wall_tracker();
    let mut graph = SurveyGraph::new();
    let params = FrameParams::default();

    let commit = propose_frame(
        &mut graph,
        &tracking,
        detector_box(0.0, 0.0),
        "concrete crack",
        &params,
    )
    .expect("valid proposal");

    assert_eq!(commit.marker_id, 1);
    assert_eq!(graph.stations().len(), 6);
    assert_eq!(graph.lines().len(), 5);

    let names: Vec<&str> = graph.stations().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "1_concrete crack_pt1",
            "1_concrete crack_pt2",
            "1_concrete crack_pt3",
            "1_concrete crack_pt4",
            "1_concrete crack_Center",
            "1_concrete crack_Camera",
        ]
    );

    let line_names: Vec<&str> = graph.lines().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        line_names,
        [
            "1_concrete crack_pt1_to_pt2",
            "1_concrete crack_pt2_to_pt3",
            "1_concrete crack_pt3_to_pt4",
            "1_concrete crack_pt4_to_pt1",
            "1_concrete crack_center_to_cam",
        ]
    );

    // Camera station carries the camera pose, not a surface hit.
    let camera_station = graph.station(commit.station_ids[5]).unwrap();
    assert_eq!(camera_station.pose, Pose::identity());

    // A 100 px box on this wall is 0.2 m on a side.
    approx::assert_relative_eq!(commit.edges.top, 0.2, epsilon = 1e-6);
    approx::assert_relative_eq!(commit.edges.left, 0.2, epsilon = 1e-6);
}

#[test]
fn second_commit_extends_the_graph() {
    let tracking = wall_tracker();
    let mut graph = SurveyGraph::new();
    let params = FrameParams::default();

    propose_frame(&mut graph, &tracking, detector_box(0.0, 0.0), "bubble", &params)
        .expect("first proposal");
    let second = propose_frame(
        &mut graph,
        &tracking,
        detector_box(300.0, 0.0),
        "bubble",
        &params,
    )
    .expect("second proposal");

    assert_eq!(second.marker_id, 2);
    assert_eq!(graph.stations().len(), 12);
    assert_eq!(graph.lines().len(), 10);
    assert!(graph.stations()[6..]
        .iter()
        .all(|s| s.name.starts_with("2_bubble_")));
}

#[test]
fn dedup_rejects_nearby_center_regardless_of_type() {
    let tracking = wall_tracker();
    let mut graph = SurveyGraph::new();
    let params = FrameParams::default();

    propose_frame(&mut graph, &tracking, detector_box(0.0, 0.0), "bubble", &params)
        .expect("first proposal");

    // Same physical spot, different defect label: still rejected.
    let err = propose_frame(
        &mut graph,
        &tracking,
        detector_box(0.0, 0.0),
        "paint peeling",
        &params,
    )
    .unwrap_err();

    assert!(matches!(err, RejectReason::TooCloseToExistingFrame { .. }));
    assert_eq!(graph.stations().len(), 6);
    assert_eq!(graph.lines().len(), 5);
}

#[test]
fn inconsistent_corner_depths_reject() {
    // Corner distances 1.0 / 1.2 / 1.6 / 1.0 → spread 0.6 ≥ 0.5.
    let tracking = FnTracker {
        cast: |p: ScreenPoint| {
            let distance = match (p.x as i32, p.y as i32) {
                (100, 0) => 1.2,
                (100, 100) => 1.6,
                _ => 1.0,
            };
            Some(RaycastHit {
                pose: Pose::from_translation(Point3::new(p.x, p.y, distance)),
                distance,
            })
        },
        camera: Pose::identity(),
    };
    let mut graph = SurveyGraph::new();

    let err = propose_frame(
        &mut graph,
        &tracking,
        detector_box(0.0, 0.0),
        "bubble",
        &FrameParams::default(),
    )
    .unwrap_err();

    match err {
        RejectReason::InconsistentDepth { spread } => {
            approx::assert_relative_eq!(spread, 0.6, epsilon = 1e-6);
        }
        other => panic!("expected InconsistentDepth, got {other:?}"),
    }
    assert!(graph.stations().is_empty());
}

#[test]
fn center_range_gate() {
    let tracker_at = |depth: f32| FnTracker {
        cast: move |p: ScreenPoint| {
            Some(RaycastHit {
                pose: Pose::from_translation(Point3::new(p.x * 0.001, p.y * 0.001, depth)),
                distance: depth,
            })
        },
        camera: Pose::identity(),
    };
    let params = FrameParams::default();

    let mut graph = SurveyGraph::new();
    let err = propose_frame(
        &mut graph,
        &tracker_at(2.5),
        detector_box(0.0, 0.0),
        "bubble",
        &params,
    )
    .unwrap_err();
    assert!(matches!(err, RejectReason::TooFarFromCamera { .. }));
    assert!(graph.stations().is_empty());

    // 1.9 m is within range.
    propose_frame(
        &mut graph,
        &tracker_at(1.9),
        detector_box(0.0, 0.0),
        "bubble",
        &params,
    )
    .expect("within range");
}

#[test]
fn any_raycast_miss_rejects_without_mutation() {
    // The bottom-edge midpoint (50, 100) finds no surface.
    let tracking = FnTracker {
        cast: |p: ScreenPoint| {
            if (p.x as i32, p.y as i32) == (50, 100) {
                return None;
            }
            Some(RaycastHit {
                pose: Pose::from_translation(Point3::new(p.x * 0.002, p.y * 0.002, 1.5)),
                distance: 1.5,
            })
        },
        camera: Pose::identity(),
    };
    let mut graph = SurveyGraph::new();

    let err = propose_frame(
        &mut graph,
        &tracking,
        detector_box(0.0, 0.0),
        "bubble",
        &FrameParams::default(),
    )
    .unwrap_err();

    assert_eq!(err, RejectReason::NoSurfaceDetected);
    assert!(graph.stations().is_empty());
    assert!(graph.lines().is_empty());
}

#[test]
fn undo_restores_exact_pre_commit_state() {
    let tracking = wall_tracker();
    let mut graph = SurveyGraph::new();
    let params = FrameParams::default();

    propose_frame(&mut graph, &tracking, detector_box(0.0, 0.0), "bubble", &params)
        .expect("first proposal");

    let stations_before = graph.stations().to_vec();
    let lines_before = graph.lines().to_vec();

    propose_frame(
        &mut graph,
        &tracking,
        detector_box(300.0, 0.0),
        "paint crack",
        &params,
    )
    .expect("second proposal");
    graph.remove_last_frame().expect("frame at tail");

    assert_eq!(graph.stations(), stations_before.as_slice());
    assert_eq!(graph.lines(), lines_before.as_slice());
}

#[test]
fn marker_id_is_reused_after_undo() {
    let tracking = wall_tracker();
    let mut graph = SurveyGraph::new();
    let params = FrameParams::default();

    propose_frame(&mut graph, &tracking, detector_box(0.0, 0.0), "bubble", &params)
        .expect("first proposal");
    propose_frame(
        &mut graph,
        &tracking,
        detector_box(300.0, 0.0),
        "bubble",
        &params,
    )
    .expect("second proposal");

    graph.remove_last_frame().expect("frame at tail");
    assert_eq!(graph.next_marker_id(), 2);

    let third = propose_frame(
        &mut graph,
        &tracking,
        detector_box(300.0, 0.0),
        "bubble",
        &params,
    )
    .expect("recommit after undo");
    assert_eq!(third.marker_id, 2);
}

#[test]
fn undo_refuses_when_frame_is_not_at_tail() {
    let tracking = wall_tracker();
    let mut graph = SurveyGraph::new();

    propose_frame(
        &mut graph,
        &tracking,
        detector_box(0.0, 0.0),
        "bubble",
        &FrameParams::default(),
    )
    .expect("proposal");
    graph.add_anonymous_station(Pose::identity());

    assert_eq!(graph.remove_last_frame().unwrap_err(), GraphError::Underflow);
    assert_eq!(graph.stations().len(), 7);
}

#[test]
fn center_stations_are_discoverable_by_role() {
    let tracking = wall_tracker();
    let mut graph = SurveyGraph::new();
    let params = FrameParams::default();

    propose_frame(&mut graph, &tracking, detector_box(0.0, 0.0), "bubble", &params)
        .expect("first proposal");
    propose_frame(
        &mut graph,
        &tracking,
        detector_box(300.0, 0.0),
        "rebar",
        &params,
    )
    .expect("second proposal");

    let centers: Vec<&str> = graph
        .stations_with_role(StationRole::Center)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(centers, ["1_bubble_Center", "2_rebar_Center"]);
}
