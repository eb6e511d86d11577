use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned rectangular collider. `offset` displaces the box from the
/// entity's position; negative sizes are normalized when queried.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// (min, max) corners of the AABB for a given entity position.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }

    /// AABB as (x, y, w, h), handy for drawing.
    pub fn rect(&self, position: Vector2) -> (f32, f32, f32, f32) {
        let (min, max) = self.aabb(position);
        (min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Overlap test against another collider at another position.
    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn contains_point(&self, position: Vector2, point: Vector2) -> bool {
        let (min, max) = self.aabb(position);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_size_is_normalized() {
        let collider = BoxCollider::new(-10.0, -4.0);
        let (min, max) = collider.aabb(Vector2::zero());
        assert_eq!((min.x, min.y), (-10.0, -4.0));
        assert_eq!((max.x, max.y), (0.0, 0.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(!a.overlaps(Vector2::zero(), &b, Vector2::new(10.0, 0.0)));
        assert!(a.overlaps(Vector2::zero(), &b, Vector2::new(9.9, 0.0)));
    }

    #[test]
    fn contains_point_includes_borders() {
        let collider = BoxCollider::new(4.0, 4.0).with_offset(Vector2::new(1.0, 1.0));
        assert!(collider.contains_point(Vector2::zero(), Vector2::new(1.0, 1.0)));
        assert!(collider.contains_point(Vector2::zero(), Vector2::new(5.0, 5.0)));
        assert!(!collider.contains_point(Vector2::zero(), Vector2::new(0.5, 3.0)));
    }
}
