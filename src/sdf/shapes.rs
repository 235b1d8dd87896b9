//! Closed-form signed distances for the 2D primitives
//!
//! Negative inside, zero on the boundary, positive outside. Every function
//! is total: degenerate parameters collapse to a smaller shape instead of
//! producing NaN.

use glam::Vec2;
use std::f32::consts::PI;

use crate::geom::{arc_angle_offset, cross2, ortho_left};
use crate::{bearing, dir_from_bearing};

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an oriented rectangle
///
/// The box extends `front` along `dir` and `back` against it from `origin`,
/// with lateral half-extent `half_width`.
pub fn sd_rect(p: Vec2, origin: Vec2, dir: Vec2, front: f32, back: f32, half_width: f32) -> f32 {
    let offset = p - origin;
    let forward = offset.dot(dir);
    let side = offset.dot(ortho_left(dir));

    // Recenter so the box sits symmetric around the local origin
    let half_len = (front + back) * 0.5;
    let mid = (front - back) * 0.5;

    let qx = side.abs() - half_width;
    let qy = (forward - mid).abs() - half_len;
    let outside = Vec2::new(qx.max(0.0), qy.max(0.0)).length();
    outside + qx.max(qy).min(0.0)
}

/// Signed distance to a circular sector of `radius` centered on `dir`
///
/// A half-angle of pi or more closes the sector into a full circle.
pub fn sd_cone(p: Vec2, origin: Vec2, radius: f32, dir: Vec2, half_angle: f32) -> f32 {
    if half_angle >= PI {
        return sd_circle(p, origin, radius);
    }
    let half_angle = half_angle.max(0.0);
    let radius = radius.max(0.0);

    let offset = p - origin;
    // Local frame: y along the sector axis, x folded onto the positive side
    let lp = Vec2::new(offset.dot(ortho_left(dir)).abs(), offset.dot(dir));
    let sc = Vec2::new(half_angle.sin(), half_angle.cos());

    let l = lp.length() - radius;
    let m = (lp - sc * lp.dot(sc).clamp(0.0, radius)).length();
    l.max(m * (sc.y * lp.x - sc.x * lp.y).signum())
}

/// Signed distance to the annulus [inner, outer]
#[inline]
pub fn sd_donut(p: Vec2, center: Vec2, inner: f32, outer: f32) -> f32 {
    let d = (p - center).length();
    (inner - d).max(d - outer)
}

/// Signed distance to an annular sector: donut clipped to a cone
#[inline]
pub fn sd_donut_sector(
    p: Vec2,
    origin: Vec2,
    inner: f32,
    outer: f32,
    dir: Vec2,
    half_angle: f32,
) -> f32 {
    sd_donut(p, origin, inner, outer).max(sd_cone(p, origin, outer, dir, half_angle))
}

/// Signed distance to a cross: two perpendicular rects, union by min
#[inline]
pub fn sd_cross(p: Vec2, origin: Vec2, dir: Vec2, length: f32, half_width: f32) -> f32 {
    let a = sd_rect(p, origin, dir, length, length, half_width);
    let b = sd_rect(p, origin, ortho_left(dir), length, length, half_width);
    a.min(b)
}

/// Signed distance to a triangle with vertices relative to `origin`
pub fn sd_triangle(p: Vec2, origin: Vec2, a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let p0 = origin + a;
    let p1 = origin + b;
    let p2 = origin + c;

    let e0 = p1 - p0;
    let e1 = p2 - p1;
    let e2 = p0 - p2;
    let v0 = p - p0;
    let v1 = p - p1;
    let v2 = p - p2;

    let pq0 = v0 - e0 * (v0.dot(e0) / e0.length_squared().max(1e-12)).clamp(0.0, 1.0);
    let pq1 = v1 - e1 * (v1.dot(e1) / e1.length_squared().max(1e-12)).clamp(0.0, 1.0);
    let pq2 = v2 - e2 * (v2.dot(e2) / e2.length_squared().max(1e-12)).clamp(0.0, 1.0);

    let s = cross2(e0, e2).signum();
    let dx = pq0
        .length_squared()
        .min(pq1.length_squared())
        .min(pq2.length_squared());
    let dy = (s * cross2(v0, e0))
        .min(s * cross2(v1, e1))
        .min(s * cross2(v2, e2));

    -dx.sqrt() * dy.signum()
}

/// Signed distance to a capsule around the segment from `origin`
/// along `dir * length`
pub fn sd_capsule(p: Vec2, origin: Vec2, dir: Vec2, length: f32, radius: f32) -> f32 {
    let offset = p - origin;
    let t = offset.dot(dir).clamp(0.0, length.max(0.0));
    (offset - dir * t).length() - radius
}

/// Signed distance to a tube swept along a circular arc
///
/// The arc starts at `start`, orbits `center`, and sweeps `sweep` radians
/// (sign picks the direction). Inside the swept wedge the distance is to
/// the annular band; beyond it, to the nearer hemispheric endcap.
pub fn sd_arc_capsule(p: Vec2, start: Vec2, center: Vec2, sweep: f32, tube_radius: f32) -> f32 {
    let radius = (start - center).length();
    let v = p - center;

    if arc_angle_offset(v, start - center, sweep).is_some() {
        return (v.length() - radius).abs() - tube_radius;
    }

    let end = center + dir_from_bearing(bearing(start - center) + sweep) * radius;
    let d_start = (p - start).length() - tube_radius;
    let d_end = (p - end).length() - tube_radius;
    d_start.min(d_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EPSILON;

    #[test]
    fn test_sd_circle_signs() {
        let c = Vec2::ZERO;
        assert!((sd_circle(Vec2::new(5.0, 0.0), c, 10.0) - (-5.0)).abs() < EPSILON);
        assert!((sd_circle(Vec2::new(15.0, 0.0), c, 10.0) - 5.0).abs() < EPSILON);
        assert!(sd_circle(Vec2::new(10.0, 0.0), c, 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_sd_rect_faces() {
        let o = Vec2::ZERO;
        let dir = Vec2::new(0.0, 1.0); // facing +Z
        // front 10, back 2, half width 3
        assert!((sd_rect(Vec2::new(0.0, 12.0), o, dir, 10.0, 2.0, 3.0) - 2.0).abs() < EPSILON);
        assert!((sd_rect(Vec2::new(0.0, -4.0), o, dir, 10.0, 2.0, 3.0) - 2.0).abs() < EPSILON);
        assert!((sd_rect(Vec2::new(5.0, 4.0), o, dir, 10.0, 2.0, 3.0) - 2.0).abs() < EPSILON);
        // Center of extents is the deepest lateral point
        let inside = sd_rect(Vec2::new(0.0, 4.0), o, dir, 10.0, 2.0, 3.0);
        assert!((inside - (-3.0)).abs() < EPSILON);
    }

    #[test]
    fn test_sd_rect_corner_diagonal() {
        let o = Vec2::ZERO;
        let dir = Vec2::new(0.0, 1.0);
        // Outside past the front-right corner (3, 10)
        let d = sd_rect(Vec2::new(6.0, 14.0), o, dir, 10.0, 0.0, 3.0);
        assert!((d - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_sd_cone_axis_and_collapse() {
        let o = Vec2::ZERO;
        let dir = Vec2::new(0.0, 1.0);
        // On the axis inside
        let d = sd_cone(Vec2::new(0.0, 5.0), o, 10.0, dir, 0.5);
        assert!(d < 0.0);
        // Beyond the arc along the axis
        let d = sd_cone(Vec2::new(0.0, 12.0), o, 10.0, dir, 0.5);
        assert!((d - 2.0).abs() < 1e-4);
        // Behind the apex
        assert!(sd_cone(Vec2::new(0.0, -3.0), o, 10.0, dir, 0.5) > 0.0);
        // Half angle >= pi acts as a circle
        let d = sd_cone(Vec2::new(0.0, -3.0), o, 10.0, dir, PI);
        assert!((d - sd_circle(Vec2::new(0.0, -3.0), o, 10.0)).abs() < EPSILON);
    }

    #[test]
    fn test_sd_donut_depths() {
        let c = Vec2::ZERO;
        // Deepest point of the annulus [5, 15] sits at radius 10
        assert!((sd_donut(Vec2::new(10.0, 0.0), c, 5.0, 15.0) - (-5.0)).abs() < EPSILON);
        // Hole center is inner-radius away from danger
        assert!((sd_donut(c, c, 5.0, 15.0) - 5.0).abs() < EPSILON);
        assert!((sd_donut(Vec2::new(20.0, 0.0), c, 5.0, 15.0) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_sd_donut_sector_clips() {
        let o = Vec2::ZERO;
        let dir = Vec2::new(0.0, 1.0);
        // In the band and inside the wedge
        assert!(sd_donut_sector(Vec2::new(0.0, 10.0), o, 5.0, 15.0, dir, 0.6) < 0.0);
        // In the band but outside the wedge
        assert!(sd_donut_sector(Vec2::new(0.0, -10.0), o, 5.0, 15.0, dir, 0.6) > 0.0);
    }

    #[test]
    fn test_sd_cross_union_of_rects() {
        let o = Vec2::ZERO;
        let dir = Vec2::new(0.0, 1.0);
        assert!(sd_cross(Vec2::new(0.0, 8.0), o, dir, 10.0, 2.0) < 0.0);
        assert!(sd_cross(Vec2::new(8.0, 0.0), o, dir, 10.0, 2.0) < 0.0);
        let diag = sd_cross(Vec2::new(8.0, 8.0), o, dir, 10.0, 2.0);
        assert!((diag - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_sd_triangle_signs() {
        let o = Vec2::ZERO;
        let (a, b, c) = (Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        assert!(sd_triangle(Vec2::new(1.0, 1.0), o, a, b, c) < 0.0);
        assert!(sd_triangle(Vec2::new(4.0, 4.0), o, a, b, c) > 0.0);
        // Edge midpoint is on the boundary
        assert!(sd_triangle(Vec2::new(2.0, 0.0), o, a, b, c).abs() < EPSILON);
        // Distance below the bottom edge is the plain vertical gap
        let d = sd_triangle(Vec2::new(2.0, -3.0), o, a, b, c);
        assert!((d - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_sd_triangle_reversed_winding() {
        let o = Vec2::ZERO;
        let p_in = Vec2::new(1.0, 1.0);
        let d1 = sd_triangle(p_in, o, Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        let d2 = sd_triangle(p_in, o, Vec2::new(0.0, 4.0), Vec2::new(4.0, 0.0), Vec2::ZERO);
        assert!((d1 - d2).abs() < EPSILON);
        assert!(d1 < 0.0);
    }

    #[test]
    fn test_sd_capsule_ends() {
        let o = Vec2::ZERO;
        let dir = Vec2::new(0.0, 1.0);
        assert!((sd_capsule(Vec2::new(0.0, 5.0), o, dir, 10.0, 2.0) - (-2.0)).abs() < EPSILON);
        assert!((sd_capsule(Vec2::new(0.0, -4.0), o, dir, 10.0, 2.0) - 2.0).abs() < EPSILON);
        assert!((sd_capsule(Vec2::new(0.0, 14.0), o, dir, 10.0, 2.0) - 2.0).abs() < EPSILON);
        assert!((sd_capsule(Vec2::new(5.0, 5.0), o, dir, 10.0, 2.0) - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_sd_arc_capsule_band() {
        let center = Vec2::ZERO;
        let start = Vec2::new(0.0, 10.0);
        let sweep = PI / 2.0;

        let mid = dir_from_bearing(PI / 4.0) * 10.0;
        assert!((sd_arc_capsule(mid, start, center, sweep, 1.5) - (-1.5)).abs() < EPSILON);

        let outside_band = dir_from_bearing(PI / 4.0) * 13.0;
        assert!((sd_arc_capsule(outside_band, start, center, sweep, 1.5) - 1.5).abs() < EPSILON);
    }

    #[test]
    fn test_sd_arc_capsule_endcaps() {
        let center = Vec2::ZERO;
        let start = Vec2::new(0.0, 10.0);
        let sweep = PI / 2.0;
        let end = Vec2::new(10.0, 0.0);

        // Just beyond the end of the sweep the cap takes over
        let past_end = end + Vec2::new(0.0, -3.0);
        let d = sd_arc_capsule(past_end, start, center, sweep, 1.0);
        assert!((d - 2.0).abs() < 1e-4);
    }
}
