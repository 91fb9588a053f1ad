use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(point1: Vec3, point2: Vec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<AABB> {
        points.into_iter().fold(None, |bounds, point| match bounds {
            None => Some(AABB {
                min: point,
                max: point,
            }),
            Some(bounds) => Some(AABB {
                min: bounds.min.min(point),
                max: bounds.max.max(point),
            }),
        })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Axis-aligned box around this box's corners after `transform`.
    pub fn transform(&self, transform: &Mat4) -> AABB {
        let corners = self
            .corners()
            .map(|corner| transform.transform_point3(corner));

        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }

        AABB { min, max }
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_handles_empty_and_unordered_input() {
        assert_eq!(AABB::from_points(std::iter::empty()), None);

        let bounds = AABB::from_points([
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.5),
            Vec3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -4.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 0.5));
    }

    #[test]
    fn transform_rebounds_rotated_box() {
        let bounds = AABB::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let rotated = bounds.transform(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));

        assert!(rotated.min.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
        assert!(rotated.max.abs_diff_eq(Vec3::new(0.0, 2.0, 1.0), 1e-5));
    }

    #[test]
    fn union_and_contains() {
        let a = AABB::new(Vec3::ZERO, Vec3::ONE);
        let b = AABB::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let both = a.union(&b);

        assert!(both.contains_point(Vec3::splat(1.5)));
        assert!(!a.contains_point(Vec3::splat(1.5)));
        assert_eq!(both.center(), Vec3::splat(1.5));
        assert_eq!(both.size(), Vec3::splat(3.0));
    }
}
