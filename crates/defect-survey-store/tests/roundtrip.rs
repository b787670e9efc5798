use defect_survey_core::Pose;
use defect_survey_graph::{Line, Station, SurveyGraph};
use defect_survey_store::{decode, encode, read_scan, write_scan, DecodeError, ScanFile};
use nalgebra::{Matrix4, Point3, Vector3};
use uuid::Uuid;

fn sample_scan() -> ScanFile {
    let mut graph = SurveyGraph::new();
    let a = graph.add_station(
        Pose::from_matrix(Matrix4::from_fn(|r, c| (r as f32) * 1.5 - (c as f32) * 0.125)),
        "1_concrete crack_pt1",
    );
    let b = graph.add_station(
        Pose::from_translation(Point3::new(0.25, -1.0, 3.75)),
        "1_concrete crack_pt2",
    );
    // A station whose name is its id string exercises the compact
    // no-name encoding.
    graph.add_anonymous_station(Pose::from_translation(Point3::new(-2.0, 0.5, 0.0)));
    graph
        .add_line(a, b, "1_concrete crack_pt1_to_pt2")
        .expect("both endpoints present");

    ScanFile {
        timestamp: 1_754_438_400.25,
        mesh: vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x42],
        start_snapshot: Some(vec![1, 2, 3]),
        end_snapshot: None,
        ..ScanFile::from_graph(&graph, Vec::new(), None, None)
    }
}

#[test]
fn round_trip_is_field_exact() {
    let scan = sample_scan();
    let decoded = decode(&encode(&scan)).expect("decode");
    assert_eq!(decoded, scan);
}

#[test]
fn anonymous_station_skips_name_bytes() {
    let mut graph = SurveyGraph::new();
    graph.add_anonymous_station(Pose::identity());
    let anonymous = ScanFile::from_graph(&graph, Vec::new(), None, None);

    let mut graph = SurveyGraph::new();
    graph.add_station(Pose::identity(), "1_bubble_Center");
    let named = ScanFile::from_graph(&graph, Vec::new(), None, None);

    // The id string is 36 characters; storing it would dwarf the name
    // actually written for labeled stations.
    let anonymous_len = encode(&anonymous).len();
    let named_len = encode(&named).len();
    assert!(anonymous_len < named_len);

    let decoded = decode(&encode(&anonymous)).expect("decode");
    assert_eq!(decoded.stations[0].name, decoded.stations[0].id.to_string());
}

#[test]
fn unknown_version_is_reported() {
    let mut bytes = encode(&sample_scan());
    bytes[..4].copy_from_slice(&9u32.to_le_bytes());

    assert_eq!(
        decode(&bytes).unwrap_err(),
        DecodeError::VersionMismatch { found: 9 }
    );
}

#[test]
fn truncated_payload_is_corrupt_not_panic() {
    let bytes = encode(&sample_scan());
    for cut in [4, 12, 40, bytes.len() - 1] {
        let err = decode(&bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, DecodeError::Corrupt { .. }),
            "cut at {cut}: {err:?}"
        );
    }
}

#[test]
fn trailing_garbage_is_corrupt() {
    let mut bytes = encode(&sample_scan());
    bytes.push(0xff);
    assert!(matches!(
        decode(&bytes).unwrap_err(),
        DecodeError::Corrupt { .. }
    ));
}

#[test]
fn lines_always_carry_their_name() {
    let id_a = Uuid::new_v4();
    let id_b = Uuid::new_v4();
    let scan = ScanFile {
        encoding_version: 1,
        timestamp: 0.0,
        center: Point3::origin(),
        extent: Vector3::zeros(),
        stations: vec![
            Station {
                id: id_a,
                name: id_a.to_string(),
                pose: Pose::identity(),
            },
            Station {
                id: id_b,
                name: id_b.to_string(),
                pose: Pose::identity(),
            },
        ],
        lines: vec![Line::new(id_a, id_b, "Screen_touch")],
        mesh: Vec::new(),
        start_snapshot: None,
        end_snapshot: None,
    };

    let decoded = decode(&encode(&scan)).expect("decode");
    assert_eq!(decoded.lines[0].name, "Screen_touch");
    assert_eq!(decoded.lines[0].start_id, id_a);
    assert_eq!(decoded.lines[0].end_id, id_b);
}

#[test]
fn file_helpers_round_trip_on_disk() {
    let scan = sample_scan();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hall_b.survey");

    write_scan(&path, &scan).expect("write");
    let loaded = read_scan(&path).expect("read");
    assert_eq!(loaded, scan);
}
