use crate::math::Vec2;

/// Axis-aligned box stored as center plus half-size. Min/max are always
/// derived so they track position changes without cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    center: Vec2,
    half_size: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_size: size.scaled(0.5),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn min(&self) -> Vec2 {
        self.center.sub(self.half_size)
    }

    pub fn max(&self) -> Vec2 {
        self.center.add(self.half_size)
    }

    /// Strict exclusive interior test: points exactly on an edge are NOT
    /// contained.
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
    }

    /// Separating-axis overlap test; symmetric in its two operands.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_min = self.min();
        let a_max = self.max();
        let b_min = other.min();
        let b_max = other.max();

        !(a_max.x < b_min.x || b_max.x < a_min.x || a_max.y < b_min.y || b_max.y < a_min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f32, y: f32) -> Aabb {
        Aabb::from_center_size(Vec2::new(x, y), Vec2::new(2.0, 2.0))
    }

    #[test]
    fn min_max_track_center() {
        let b = unit_box_at(3.0, 4.0);
        assert_eq!(b.min(), Vec2::new(2.0, 3.0));
        assert_eq!(b.max(), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn contains_interior_point() {
        let b = unit_box_at(0.0, 0.0);
        assert!(b.contains(Vec2::new(0.5, -0.5)));
        assert!(b.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_excludes_edge_points() {
        let b = unit_box_at(0.0, 0.0);
        assert!(!b.contains(Vec2::new(1.0, 0.0)));
        assert!(!b.contains(Vec2::new(0.0, -1.0)));
        assert!(!b.contains(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn contains_excludes_exterior_points() {
        let b = unit_box_at(0.0, 0.0);
        assert!(!b.contains(Vec2::new(2.0, 0.0)));
        assert!(!b.contains(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn intersects_is_symmetric() {
        let cases = [
            (unit_box_at(0.0, 0.0), unit_box_at(1.5, 0.0)),
            (unit_box_at(0.0, 0.0), unit_box_at(3.0, 0.0)),
            (unit_box_at(0.0, 0.0), unit_box_at(0.0, 1.9)),
            (unit_box_at(-1.0, -1.0), unit_box_at(1.0, 1.0)),
            (unit_box_at(5.0, 5.0), unit_box_at(-5.0, -5.0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }

    #[test]
    fn intersects_overlapping_and_separated() {
        let origin = unit_box_at(0.0, 0.0);
        assert!(origin.intersects(&unit_box_at(1.0, 1.0)));
        assert!(!origin.intersects(&unit_box_at(3.0, 0.0)));
        assert!(!origin.intersects(&unit_box_at(0.0, -3.0)));
    }

    #[test]
    fn intersects_tests_both_axes_on_both_boxes() {
        // A sits above-right of B with overlap only on x: no intersection.
        // The naive reference comparison got the y-axis wrong for exactly
        // this arrangement; both orders must agree here.
        let a = unit_box_at(0.5, 3.0);
        let b = unit_box_at(0.0, 0.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn touching_edges_still_intersect() {
        // Shared edge counts as overlap for the non-strict AABB test.
        let a = unit_box_at(0.0, 0.0);
        let b = unit_box_at(2.0, 0.0);
        assert!(a.intersects(&b));
    }
}
