use std::ops::Mul;

use glam::{Mat4, Quat, Vec3};

/// Placement of an object in model space.
///
/// Instance placements coming out of CAD documents are not guaranteed to be
/// scale-rotation-translation (shear and mirroring show up in practice), so
/// this holds the full matrix rather than decomposed parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
    };

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(translation))
    }

    pub fn from_scale_rotation_translation(scale: f32, rotation: Quat, translation: Vec3) -> Self {
        Self::from_matrix(Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            rotation,
            translation,
        ))
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Mat4::IDENTITY
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self::from_matrix(matrix)
    }
}

/// `parent * child` applies `child` first.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform::from_matrix(self.matrix * rhs.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert!(Transform::default().is_identity());
        assert_eq!(Transform::default().translation(), Vec3::ZERO);
    }

    #[test]
    fn composition_applies_child_first() {
        let parent = Transform::from_scale_rotation_translation(2.0, Quat::IDENTITY, Vec3::X);
        let child = Transform::from_translation(Vec3::Y);

        let point = (parent * child).transform_point(Vec3::ZERO);
        assert_eq!(point, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn from_mat4_keeps_shear() {
        let mut matrix = Mat4::IDENTITY;
        matrix.y_axis.x = 0.5;

        let sheared = Transform::from(matrix);
        assert_eq!(sheared.transform_point(Vec3::Y), Vec3::new(0.5, 1.0, 0.0));
        assert!(!sheared.is_identity());
    }
}
