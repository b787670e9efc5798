//! World-space rigid transforms.
//!
//! A [`Pose`] is a 4×4 rigid transform in the world-tracking coordinate
//! frame established once per scanning session. The matrix arrives from the
//! external tracking collaborator and is stored as-is: no orthonormality
//! check is performed, so a degenerate upstream transform propagates
//! unchanged rather than being corrected here.

use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// A rigid transform (rotation + translation) in the session world frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    matrix: Matrix4<f32>,
}

impl Pose {
    /// Wrap a raw 4×4 matrix supplied by the tracking collaborator.
    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }

    /// A pose with identity rotation at the given position.
    pub fn from_translation(position: Point3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&position.coords),
        }
    }

    /// The identity pose (world origin).
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// The underlying 4×4 matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// The translation column of the transform.
    #[inline]
    pub fn position(&self) -> Point3<f32> {
        let col = self.matrix.column(3);
        Point3::new(col[0], col[1], col[2])
    }

    /// Euclidean distance between the positions of two poses.
    pub fn distance_to(&self, other: &Pose) -> f32 {
        nalgebra::distance(&self.position(), &other.position())
    }
}
