use defect_survey_core::{ScreenPoint, ScreenRect};

/// Where a proposal's corner points come from.
///
/// Both modes resolve to the same ordered corner array; only the automatic
/// mode is subject to the minimum-box-area gate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CornerSource {
    /// Bounding box reported by the object detector.
    Detector { rect: ScreenRect },
    /// Fixed on-screen template rectangle placed by the operator.
    ManualTemplate { rect: ScreenRect },
}

impl CornerSource {
    #[inline]
    pub fn rect(&self) -> ScreenRect {
        match *self {
            CornerSource::Detector { rect } | CornerSource::ManualTemplate { rect } => rect,
        }
    }

    /// Corner points ordered top-left, top-right, bottom-right, bottom-left.
    #[inline]
    pub fn corners(&self) -> [ScreenPoint; 4] {
        self.rect().corners()
    }

    /// Whether this proposal originates from the object detector.
    #[inline]
    pub fn is_automatic(&self) -> bool {
        matches!(self, CornerSource::Detector { .. })
    }
}
