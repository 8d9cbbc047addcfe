#[allow(unused_imports)]
use crate::prelude::*;
#[allow(unused_imports)]
use crate::assert::*;

use crate::fix::Fix;
use crate::linalg::{FixVec2, FixVec3};
use serde::{Deserialize, Serialize};
use std::{fmt, fmt::Formatter};

/// An axis-aligned box in 3D.
///
/// The derived quantities (extents, min, max) are stored alongside the
/// defining center and size so reads are free; every mutator resynchronizes
/// all five fields. Faces are part of the box: containment and intersection
/// are inclusive.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    center: FixVec3,
    extents: FixVec3,
    min: FixVec3,
    max: FixVec3,
    size: FixVec3,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Quadrant {
    Left,
    Right,
    Middle,
}

impl Bounds {
    #[must_use]
    pub fn new(center: FixVec3, size: FixVec3) -> Bounds {
        let extents = size / 2;
        Bounds {
            center,
            extents,
            min: center - extents,
            max: center + extents,
            size,
        }
    }

    /// Builds the box spanning the two given corners.
    #[must_use]
    pub fn from_min_max(min: FixVec3, max: FixVec3) -> Bounds {
        let mut bounds = Bounds::default();
        bounds.set_min_max(min, max);
        bounds
    }

    #[must_use]
    pub fn center(&self) -> FixVec3 {
        self.center
    }
    #[must_use]
    pub fn extents(&self) -> FixVec3 {
        self.extents
    }
    #[must_use]
    pub fn min(&self) -> FixVec3 {
        self.min
    }
    #[must_use]
    pub fn max(&self) -> FixVec3 {
        self.max
    }
    #[must_use]
    pub fn size(&self) -> FixVec3 {
        self.size
    }

    /// Redefines the box by its corners.
    pub fn set_min_max(&mut self, min: FixVec3, max: FixVec3) {
        self.min = min;
        self.max = max;
        self.update_from_min_max();
    }

    fn update_from_min_max(&mut self) {
        check_le!(self.min.x, self.max.x);
        check_le!(self.min.y, self.max.y);
        check_le!(self.min.z, self.max.z);
        self.center = (self.min + self.max) / 2;
        self.extents = (self.max - self.min) / 2;
        self.size = self.extents * 2;
    }

    #[must_use]
    pub fn contains_point(&self, point: FixVec3) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
            && self.min.z <= point.z
            && point.z <= self.max.z
    }

    #[must_use]
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Whether the two boxes share any point; touching faces count.
    #[must_use]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// The point of the box closest to `point` (the point itself if inside).
    #[must_use]
    pub fn closest_point(&self, point: FixVec3) -> FixVec3 {
        FixVec3 {
            x: point.x.clamp(self.min.x, self.max.x),
            y: point.y.clamp(self.min.y, self.max.y),
            z: point.z.clamp(self.min.z, self.max.z),
        }
    }

    /// Squared distance from `point` to the box; zero inside.
    #[must_use]
    pub fn sqr_distance(&self, point: FixVec3) -> Fix {
        (point - self.closest_point(point)).sqr_magnitude()
    }

    /// Grows the box just enough to contain `point`.
    pub fn encapsulate_point(&mut self, point: FixVec3) {
        self.min = FixVec3 {
            x: self.min.x.min(point.x),
            y: self.min.y.min(point.y),
            z: self.min.z.min(point.z),
        };
        self.max = FixVec3 {
            x: self.max.x.max(point.x),
            y: self.max.y.max(point.y),
            z: self.max.z.max(point.z),
        };
        self.update_from_min_max();
    }

    /// Grows the box just enough to contain `other`.
    pub fn encapsulate_bounds(&mut self, other: &Bounds) {
        self.encapsulate_point(other.min);
        self.encapsulate_point(other.max);
    }

    /// Grows the size by `amount` on every axis (half on each side).
    /// Negative amounts shrink.
    pub fn expand(&mut self, amount: Fix) {
        self.expand_vec(FixVec3::splat(amount));
    }

    /// Per-axis [`expand`](Bounds::expand).
    pub fn expand_vec(&mut self, amount: FixVec3) {
        self.extents += amount / 2;
        self.size = self.extents * 2;
        self.min = self.center - self.extents;
        self.max = self.center + self.extents;
    }

    /// Where `ray` first hits the box: the distance from the ray origin to
    /// the entry point, `Some(0)` if the origin is already inside, `None` on
    /// a miss (including hits that lie behind the origin).
    ///
    /// Fast ray-box from Graphics Gems: classify the origin against the slab
    /// planes per axis, intersect the candidate planes, and take the
    /// farthest candidate, which is the true entry plane if the ray hits at
    /// all.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Fix> {
        let origin: [Fix; 3] = ray.origin().into();
        let dir: [Fix; 3] = ray.direction().into();
        let min: [Fix; 3] = self.min.into();
        let max: [Fix; 3] = self.max.into();

        let mut quadrant = [Quadrant::Middle; 3];
        let mut candidate_plane = [Fix::ZERO; 3];
        let mut inside = true;
        for i in 0..3 {
            if origin[i] < min[i] {
                quadrant[i] = Quadrant::Left;
                candidate_plane[i] = min[i];
                inside = false;
            } else if origin[i] > max[i] {
                quadrant[i] = Quadrant::Right;
                candidate_plane[i] = max[i];
                inside = false;
            }
        }
        if inside {
            return Some(Fix::ZERO);
        }

        // -1 marks axes that cannot produce the entry plane.
        let mut max_t = [-Fix::ONE; 3];
        for i in 0..3 {
            if quadrant[i] != Quadrant::Middle && dir[i] != Fix::ZERO {
                max_t[i] = (candidate_plane[i] - origin[i]) / dir[i];
            }
        }
        let mut which_plane = 0;
        for i in 1..3 {
            if max_t[which_plane] < max_t[i] {
                which_plane = i;
            }
        }
        if max_t[which_plane] < Fix::ZERO {
            return None;
        }

        let mut coord = [Fix::ZERO; 3];
        for i in 0..3 {
            if which_plane == i {
                coord[i] = candidate_plane[i];
            } else {
                coord[i] = origin[i] + max_t[which_plane] * dir[i];
                if coord[i] < min[i] || coord[i] > max[i] {
                    return None;
                }
            }
        }
        Some((FixVec3::from(coord) - ray.origin()).magnitude())
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "bounds(center: {}, size: {})", self.center, self.size)
    }
}

/// A half-line: origin plus a direction, normalized at construction so
/// parameters passed to [`point_at`](Ray::point_at) are distances.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ray {
    origin: FixVec3,
    direction: FixVec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: FixVec3, direction: FixVec3) -> Ray {
        Ray { origin, direction: direction.normalized() }
    }

    #[must_use]
    pub fn origin(&self) -> FixVec3 {
        self.origin
    }

    /// Unit direction, or zero if the ray was built from a zero direction.
    #[must_use]
    pub fn direction(&self) -> FixVec3 {
        self.direction
    }

    /// The point `distance` along the ray.
    #[must_use]
    pub fn point_at(&self, distance: Fix) -> FixVec3 {
        self.origin + self.direction * distance
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ray(origin: {}, direction: {})", self.origin, self.direction)
    }
}

/// An axis-aligned rectangle in 2D, stored like [`Bounds`] with derived
/// corners cached next to the defining position and size.
///
/// Containment follows the half-open convention: the min edges belong to the
/// rectangle, the max edges do not. [`overlaps`](Rect::overlaps) is strict,
/// so rectangles that merely share an edge do not overlap.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    position: FixVec2,
    size: FixVec2,
    min: FixVec2,
    max: FixVec2,
    center: FixVec2,
}

impl Rect {
    /// A rectangle from its min corner and size.
    #[must_use]
    pub fn new(position: FixVec2, size: FixVec2) -> Rect {
        let mut rect = Rect {
            position,
            size,
            ..Rect::default()
        };
        rect.update_from_position_size();
        rect
    }

    /// A rectangle from its edge coordinates.
    #[must_use]
    pub fn from_min_max(x_min: Fix, y_min: Fix, x_max: Fix, y_max: Fix) -> Rect {
        Rect::new(
            FixVec2::new(x_min, y_min),
            FixVec2::new(x_max - x_min, y_max - y_min),
        )
    }

    fn update_from_position_size(&mut self) {
        self.min = self.position;
        self.max = self.position + self.size;
        self.center = self.position + self.size / 2;
    }

    #[must_use]
    pub fn position(&self) -> FixVec2 {
        self.position
    }
    #[must_use]
    pub fn size(&self) -> FixVec2 {
        self.size
    }
    #[must_use]
    pub fn min(&self) -> FixVec2 {
        self.min
    }
    #[must_use]
    pub fn max(&self) -> FixVec2 {
        self.max
    }
    #[must_use]
    pub fn center(&self) -> FixVec2 {
        self.center
    }
    #[must_use]
    pub fn x_min(&self) -> Fix {
        self.min.x
    }
    #[must_use]
    pub fn y_min(&self) -> Fix {
        self.min.y
    }
    #[must_use]
    pub fn x_max(&self) -> Fix {
        self.max.x
    }
    #[must_use]
    pub fn y_max(&self) -> Fix {
        self.max.y
    }
    #[must_use]
    pub fn width(&self) -> Fix {
        self.size.x
    }
    #[must_use]
    pub fn height(&self) -> Fix {
        self.size.y
    }

    /// Min edges inclusive, max edges exclusive.
    #[must_use]
    pub fn contains_point(&self, point: FixVec2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    /// [`contains_point`](Rect::contains_point) on the x/y components of a
    /// 3D point.
    #[must_use]
    pub fn contains_point3(&self, point: FixVec3) -> bool {
        self.contains_point(point.truncate())
    }

    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Whether the interiors intersect. Sharing only an edge or corner is
    /// not an overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.max.x > self.min.x
            && other.min.x < self.max.x
            && other.max.y > self.min.y
            && other.min.y < self.max.y
    }

    /// Grows the rectangle just enough to contain `point`.
    pub fn encapsulate_point(&mut self, point: FixVec2) {
        let min = FixVec2::new(self.min.x.min(point.x), self.min.y.min(point.y));
        let max = FixVec2::new(self.max.x.max(point.x), self.max.y.max(point.y));
        self.position = min;
        self.size = max - min;
        self.update_from_position_size();
    }

    /// Grows the rectangle just enough to contain `other`.
    pub fn encapsulate_rect(&mut self, other: &Rect) {
        self.encapsulate_point(other.min);
        self.encapsulate_point(other.max);
    }

    /// Maps normalized coordinates in [0, 1] to a point in the rectangle:
    /// `(0, 0)` is the min corner, `(1, 1)` the max corner.
    #[must_use]
    pub fn normalized_to_point(&self, normalized: FixVec2) -> FixVec2 {
        FixVec2 {
            x: self.min.x + normalized.x * self.size.x,
            y: self.min.y + normalized.y * self.size.y,
        }
    }

    /// Inverse of [`normalized_to_point`](Rect::normalized_to_point),
    /// clamped to [0, 1].
    ///
    /// # Panics
    ///
    /// Zero-size rectangles have no normalized coordinates; the division
    /// panics.
    #[must_use]
    pub fn point_to_normalized(&self, point: FixVec2) -> FixVec2 {
        FixVec2 {
            x: ((point.x - self.min.x) / self.size.x).clamp(Fix::ZERO, Fix::ONE),
            y: ((point.y - self.min.y) / self.size.y).clamp(Fix::ZERO, Fix::ONE),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "rect(position: {}, size: {})", self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv2(x: i32, y: i32) -> FixVec2 {
        FixVec2::new(Fix::from_int(x), Fix::from_int(y))
    }

    fn fv3(x: i32, y: i32, z: i32) -> FixVec3 {
        FixVec3::new(Fix::from_int(x), Fix::from_int(y), Fix::from_int(z))
    }

    fn unit_box() -> Bounds {
        // Centered at the origin, corners at (+-1, +-1, +-1).
        Bounds::new(FixVec3::ZERO, FixVec3::splat(Fix::from_int(2)))
    }

    // ==================== Bounds ====================

    #[test]
    fn bounds_new_derives_all_fields() {
        let b = Bounds::new(fv3(1, 2, 3), fv3(4, 6, 8));
        assert_eq!(b.center(), fv3(1, 2, 3));
        assert_eq!(b.extents(), fv3(2, 3, 4));
        assert_eq!(b.min(), fv3(-1, -1, -1));
        assert_eq!(b.max(), fv3(3, 5, 7));
        assert_eq!(b.size(), fv3(4, 6, 8));
    }

    #[test]
    fn bounds_set_min_max_resynchronizes() {
        let mut b = unit_box();
        b.set_min_max(fv3(0, 0, 0), fv3(4, 2, 6));
        assert_eq!(b.center(), fv3(2, 1, 3));
        assert_eq!(b.extents(), fv3(2, 1, 3));
        assert_eq!(b.size(), fv3(4, 2, 6));
        assert_eq!(Bounds::from_min_max(fv3(0, 0, 0), fv3(4, 2, 6)), b);
    }

    #[test]
    fn bounds_contains_point_is_face_inclusive() {
        let b = unit_box();
        assert!(b.contains_point(FixVec3::ZERO));
        assert!(b.contains_point(fv3(1, 1, 1)));
        assert!(b.contains_point(fv3(-1, 0, 1)));
        assert!(!b.contains_point(fv3(1, 1, 2)));
        assert!(!b.contains_point(FixVec3::splat(Fix::ONE + Fix::EPSILON)));
    }

    #[test]
    fn bounds_contains_bounds() {
        let outer = unit_box();
        let inner = Bounds::new(FixVec3::ZERO, FixVec3::splat(Fix::ONE));
        assert!(outer.contains_bounds(&inner));
        assert!(!inner.contains_bounds(&outer));
        assert!(outer.contains_bounds(&outer));
    }

    #[test]
    fn bounds_intersects_touching_faces() {
        let a = unit_box();
        let b = Bounds::new(fv3(2, 0, 0), FixVec3::splat(Fix::from_int(2)));
        let c = Bounds::new(fv3(4, 0, 0), FixVec3::splat(Fix::from_int(2)));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn bounds_closest_point_and_sqr_distance() {
        let b = unit_box();
        assert_eq!(b.closest_point(fv3(0, 0, 0)), fv3(0, 0, 0));
        assert_eq!(b.closest_point(fv3(5, 0, 0)), fv3(1, 0, 0));
        assert_eq!(b.closest_point(fv3(5, -7, 0)), fv3(1, -1, 0));
        assert_eq!(b.sqr_distance(fv3(0, 0, 0)), Fix::ZERO);
        assert_eq!(b.sqr_distance(fv3(4, 0, 0)), Fix::from_int(9));
        assert_eq!(b.sqr_distance(fv3(4, 5, 0)), Fix::from_int(25));
    }

    #[test]
    fn bounds_encapsulate_point_grows_minimally() {
        let mut b = unit_box();
        b.encapsulate_point(fv3(3, 0, 0));
        assert_eq!(b.min(), fv3(-1, -1, -1));
        assert_eq!(b.max(), fv3(3, 1, 1));
        assert_eq!(b.center(), fv3(1, 0, 0));
        // Already-contained points change nothing.
        let before = b;
        b.encapsulate_point(fv3(0, 0, 0));
        assert_eq!(b, before);
    }

    #[test]
    fn bounds_encapsulate_bounds() {
        let mut b = unit_box();
        b.encapsulate_bounds(&Bounds::new(fv3(5, 5, 5), FixVec3::splat(Fix::from_int(2))));
        assert_eq!(b.min(), fv3(-1, -1, -1));
        assert_eq!(b.max(), fv3(6, 6, 6));
    }

    #[test]
    fn bounds_expand() {
        let mut b = unit_box();
        b.expand(Fix::from_int(2));
        assert_eq!(b.size(), fv3(4, 4, 4));
        assert_eq!(b.min(), fv3(-2, -2, -2));
        assert_eq!(b.center(), FixVec3::ZERO);
        b.expand_vec(fv3(2, 0, -2));
        assert_eq!(b.size(), fv3(6, 4, 2));
        assert_eq!(b.center(), FixVec3::ZERO);
    }

    // ==================== Ray ====================

    #[test]
    fn ray_normalizes_direction() {
        let r = Ray::new(fv3(1, 2, 3), fv3(0, 0, 9));
        assert_eq!(r.direction(), FixVec3::UNIT_Z);
        assert_eq!(r.origin(), fv3(1, 2, 3));
        assert_eq!(r.point_at(Fix::from_int(2)), fv3(1, 2, 5));
    }

    #[test]
    fn ray_zero_direction_goes_nowhere() {
        let r = Ray::new(fv3(1, 0, 0), FixVec3::ZERO);
        assert_eq!(r.direction(), FixVec3::ZERO);
        assert_eq!(r.point_at(Fix::from_int(10)), fv3(1, 0, 0));
    }

    // ==================== Ray-box intersection ====================

    #[test]
    fn intersect_ray_axis_aligned_hit() {
        let b = unit_box();
        let r = Ray::new(fv3(5, 0, 0), fv3(-1, 0, 0));
        assert_eq!(b.intersect_ray(&r), Some(Fix::from_int(4)));
    }

    #[test]
    fn intersect_ray_origin_inside_is_zero() {
        let b = unit_box();
        let r = Ray::new(fv3(0, 0, 0), fv3(1, 0, 0));
        assert_eq!(b.intersect_ray(&r), Some(Fix::ZERO));
        // A point on the face counts as inside.
        let on_face = Ray::new(fv3(1, 0, 0), fv3(1, 0, 0));
        assert_eq!(b.intersect_ray(&on_face), Some(Fix::ZERO));
    }

    #[test]
    fn intersect_ray_pointing_away_misses() {
        let b = unit_box();
        let r = Ray::new(fv3(5, 0, 0), fv3(1, 0, 0));
        assert_eq!(b.intersect_ray(&r), None);
    }

    #[test]
    fn intersect_ray_parallel_offset_misses() {
        let b = unit_box();
        let r = Ray::new(fv3(5, 5, 0), fv3(-1, 0, 0));
        assert_eq!(b.intersect_ray(&r), None);
    }

    #[test]
    fn intersect_ray_diagonal_corner_hit() {
        let b = unit_box();
        let r = Ray::new(fv3(2, 2, 0), fv3(-1, -1, 0));
        // Entry at the (1, 1, 0) edge, sqrt(2) from the origin.
        assert_eq!(b.intersect_ray(&r), Some(Fix::from_raw(92_682)));
    }

    #[test]
    fn intersect_ray_hit_from_above() {
        let b = unit_box();
        let r = Ray::new(fv3(0, 5, 0), fv3(0, -1, 0));
        assert_eq!(b.intersect_ray(&r), Some(Fix::from_int(4)));
    }

    #[test]
    fn intersect_ray_zero_direction_outside_misses() {
        let b = unit_box();
        let r = Ray::new(fv3(5, 0, 0), FixVec3::ZERO);
        assert_eq!(b.intersect_ray(&r), None);
    }

    // ==================== Rect ====================

    #[test]
    fn rect_new_derives_all_fields() {
        let r = Rect::new(fv2(1, 2), fv2(4, 6));
        assert_eq!(r.position(), fv2(1, 2));
        assert_eq!(r.size(), fv2(4, 6));
        assert_eq!(r.min(), fv2(1, 2));
        assert_eq!(r.max(), fv2(5, 8));
        assert_eq!(r.center(), fv2(3, 5));
        assert_eq!(r.x_min(), Fix::from_int(1));
        assert_eq!(r.x_max(), Fix::from_int(5));
        assert_eq!(r.y_min(), Fix::from_int(2));
        assert_eq!(r.y_max(), Fix::from_int(8));
        assert_eq!(r.width(), Fix::from_int(4));
        assert_eq!(r.height(), Fix::from_int(6));
    }

    #[test]
    fn rect_from_min_max_matches_new() {
        assert_eq!(
            Rect::from_min_max(
                Fix::from_int(1),
                Fix::from_int(2),
                Fix::from_int(5),
                Fix::from_int(8)
            ),
            Rect::new(fv2(1, 2), fv2(4, 6))
        );
    }

    #[test]
    fn rect_contains_point_half_open() {
        let r = Rect::new(fv2(0, 0), fv2(2, 2));
        assert!(r.contains_point(fv2(0, 0)));
        assert!(r.contains_point(fv2(1, 1)));
        assert!(!r.contains_point(fv2(2, 0)));
        assert!(!r.contains_point(fv2(0, 2)));
        assert!(r.contains_point(FixVec2::splat(Fix::from_int(2) - Fix::EPSILON)));
    }

    #[test]
    fn rect_contains_point3_ignores_z() {
        let r = Rect::new(fv2(0, 0), fv2(2, 2));
        assert!(r.contains_point3(fv3(1, 1, 99)));
        assert!(!r.contains_point3(fv3(3, 1, 0)));
    }

    #[test]
    fn rect_contains_rect() {
        let outer = Rect::new(fv2(0, 0), fv2(10, 10));
        let inner = Rect::new(fv2(2, 2), fv2(3, 3));
        assert!(outer.contains_rect(&inner));
        assert!(outer.contains_rect(&outer));
        assert!(!inner.contains_rect(&outer));
    }

    #[test]
    fn rect_overlaps_symmetric() {
        let a = Rect::new(fv2(0, 0), fv2(4, 4));
        let b = Rect::new(fv2(2, 2), fv2(4, 4));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn rect_overlaps_vertical_offset_only() {
        // Separated purely along y; x intervals coincide.
        let a = Rect::new(fv2(0, 0), fv2(2, 2));
        let b = Rect::new(fv2(0, 5), fv2(2, 2));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn rect_overlaps_shared_edge_is_not_overlap() {
        let a = Rect::new(fv2(0, 0), fv2(2, 2));
        let right = Rect::new(fv2(2, 0), fv2(2, 2));
        let above = Rect::new(fv2(0, 2), fv2(2, 2));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
    }

    #[test]
    fn rect_encapsulate() {
        let mut r = Rect::new(fv2(0, 0), fv2(2, 2));
        r.encapsulate_point(fv2(5, 1));
        assert_eq!(r.min(), fv2(0, 0));
        assert_eq!(r.max(), fv2(5, 2));
        r.encapsulate_rect(&Rect::new(fv2(-1, -1), fv2(1, 1)));
        assert_eq!(r.min(), fv2(-1, -1));
        assert_eq!(r.max(), fv2(5, 2));
    }

    #[test]
    fn rect_normalized_to_point() {
        let r = Rect::new(fv2(1, 2), fv2(4, 6));
        assert_eq!(r.normalized_to_point(FixVec2::ZERO), fv2(1, 2));
        assert_eq!(r.normalized_to_point(FixVec2::ONE), fv2(5, 8));
        assert_eq!(r.normalized_to_point(FixVec2::splat(Fix::HALF)), fv2(3, 5));
    }

    #[test]
    fn rect_point_to_normalized_clamps() {
        let r = Rect::new(fv2(1, 2), fv2(4, 6));
        assert_eq!(r.point_to_normalized(fv2(1, 2)), FixVec2::ZERO);
        assert_eq!(r.point_to_normalized(fv2(5, 8)), FixVec2::ONE);
        assert_eq!(r.point_to_normalized(fv2(3, 5)), FixVec2::splat(Fix::HALF));
        assert_eq!(r.point_to_normalized(fv2(-10, 50)), FixVec2::new(Fix::ZERO, Fix::ONE));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn rect_point_to_normalized_degenerate_panics() {
        let r = Rect::new(fv2(1, 2), FixVec2::ZERO);
        let _ = r.point_to_normalized(fv2(1, 2));
    }
}
