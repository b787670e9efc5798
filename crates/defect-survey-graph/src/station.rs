//! Survey stations.
//!
//! A station is a labeled 3D point. Its id is assigned once at creation and
//! never changes; the name is normally overwritten with the structured
//! `{marker}_{defect_type}_{role}` label once the station joins a defect
//! frame. A station named exactly `"Center"` (no marker prefix) is the
//! session's reference-origin singleton.

use defect_survey_core::Pose;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role a station plays inside its defect frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationRole {
    Pt1,
    Pt2,
    Pt3,
    Pt4,
    Center,
    Camera,
}

impl StationRole {
    /// The name segment used for this role in the station naming schema.
    pub fn label(self) -> &'static str {
        match self {
            StationRole::Pt1 => "pt1",
            StationRole::Pt2 => "pt2",
            StationRole::Pt3 => "pt3",
            StationRole::Pt4 => "pt4",
            StationRole::Center => "Center",
            StationRole::Camera => "Camera",
        }
    }

    fn parse(segment: &str) -> Option<StationRole> {
        match segment {
            "pt1" => Some(StationRole::Pt1),
            "pt2" => Some(StationRole::Pt2),
            "pt3" => Some(StationRole::Pt3),
            "pt4" => Some(StationRole::Pt4),
            "Center" => Some(StationRole::Center),
            "Camera" => Some(StationRole::Camera),
            _ => None,
        }
    }
}

/// A labeled 3D reference point in the survey graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: Uuid,
    pub name: String,
    pub pose: Pose,
}

impl Station {
    /// Create a station with an explicit name.
    pub fn new(pose: Pose, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pose,
        }
    }

    /// Create a station whose name defaults to its id's string form.
    pub fn anonymous(pose: Pose) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            name: id.to_string(),
            pose,
        }
    }

    /// The frame role encoded in the station name, if any.
    ///
    /// The bare `"Center"` origin singleton also reports
    /// [`StationRole::Center`].
    pub fn role(&self) -> Option<StationRole> {
        self.name.rsplit('_').next().and_then(StationRole::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_structured_name() {
        let mut s = Station::new(Pose::identity(), "3_exposed rebar_pt2");
        assert_eq!(s.role(), Some(StationRole::Pt2));

        s.name = "3_exposed rebar_Camera".into();
        assert_eq!(s.role(), Some(StationRole::Camera));
    }

    #[test]
    fn origin_singleton_is_center() {
        let s = Station::new(Pose::identity(), "Center");
        assert_eq!(s.role(), Some(StationRole::Center));
    }

    #[test]
    fn anonymous_station_has_no_role() {
        let s = Station::anonymous(Pose::identity());
        assert_eq!(s.name, s.id.to_string());
        assert_eq!(s.role(), None);
    }
}
