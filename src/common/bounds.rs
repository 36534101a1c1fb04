//! Stateless bounding-box overlap test.
//!
//! Every entity kind uses a center-anchored box: `position` is the middle of the box and `size`
//! its full extent. Overlap is strict, so boxes that only share an edge do not collide.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

/// Center-anchored box for an entity at `center` with full extent `size`.
#[inline]
pub fn centered(center: Vec2, size: Vec2) -> Aabb2d {
    Aabb2d::new(center, size * 0.5)
}

/// Strict AABB intersection. Bevy's `IntersectsVolume` counts touching edges as a hit,
/// which the sweep must not.
#[inline]
pub fn overlaps(a: &Aabb2d, b: &Aabb2d) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Anything the collision sweep can test.
pub trait Bounded {
    fn bounds(&self) -> Aabb2d;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_collide() {
        let a = centered(Vec2::ZERO, Vec2::splat(10.0));
        let b = centered(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn shared_edge_is_not_an_overlap() {
        let a = centered(Vec2::ZERO, Vec2::splat(10.0));
        let right = centered(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let above = centered(Vec2::new(0.0, 10.0), Vec2::splat(10.0));
        let corner = centered(Vec2::new(10.0, 10.0), Vec2::splat(10.0));
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &above));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let big = centered(Vec2::ZERO, Vec2::splat(150.0));
        let small = centered(Vec2::new(30.0, -40.0), Vec2::splat(15.0));
        assert!(overlaps(&big, &small));
    }

    #[test]
    fn separated_on_one_axis_only_is_a_miss() {
        let a = centered(Vec2::ZERO, Vec2::splat(10.0));
        let b = centered(Vec2::new(0.0, 25.0), Vec2::splat(10.0));
        assert!(!overlaps(&a, &b));
    }
}
