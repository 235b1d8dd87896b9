//! Plane-vector helpers and boolean region predicates
//!
//! Cheap membership tests on (point, origin, parameters) tuples. These back
//! the AOE shape layer's `check` path; the signed-distance layer gives the
//! same answers with gradation. Comparisons use squared distances wherever
//! possible.

use glam::Vec2;

use crate::{bearing, dir_from_bearing, normalize_angle};

/// Left orthogonal (90 degrees counter-bearing): +Z maps to -X
#[inline]
pub fn ortho_left(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Right orthogonal (90 degrees along bearing): +Z maps to +X
#[inline]
pub fn ortho_right(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Rotate a vector by a precomputed (cos, sin) pair, clockwise positive
#[inline]
pub fn rotate_by_unit(v: Vec2, cos: f32, sin: f32) -> Vec2 {
    Vec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin)
}

/// Absolute angular difference between two bearings, folded into [0, pi]
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Point within `radius` of `origin`
#[inline]
pub fn in_circle(p: Vec2, origin: Vec2, radius: f32) -> bool {
    (p - origin).length_squared() <= radius * radius
}

/// Point within the annulus [inner, outer] around `origin`
#[inline]
pub fn in_donut(p: Vec2, origin: Vec2, inner: f32, outer: f32) -> bool {
    let d2 = (p - origin).length_squared();
    d2 >= inner * inner && d2 <= outer * outer
}

/// Point within `half_angle` of `dir` as seen from `origin`
///
/// The apex itself counts as inside; a half-angle of pi or more admits
/// every direction. `dir` must be unit length.
pub fn in_cone(p: Vec2, origin: Vec2, dir: Vec2, half_angle: f32) -> bool {
    if half_angle >= std::f32::consts::PI {
        return true;
    }
    let offset = p - origin;
    let len_sq = offset.length_squared();
    if len_sq <= f32::EPSILON {
        return true;
    }
    let n = offset / len_sq.sqrt();
    n.dot(dir) >= half_angle.cos()
}

/// Circular sector: cone clipped at `radius`
#[inline]
pub fn in_circle_cone(p: Vec2, origin: Vec2, radius: f32, dir: Vec2, half_angle: f32) -> bool {
    in_circle(p, origin, radius) && in_cone(p, origin, dir, half_angle)
}

/// Annular sector: donut clipped to a cone
#[inline]
pub fn in_donut_cone(
    p: Vec2,
    origin: Vec2,
    inner: f32,
    outer: f32,
    dir: Vec2,
    half_angle: f32,
) -> bool {
    in_donut(p, origin, inner, outer) && in_cone(p, origin, dir, half_angle)
}

/// Alias for the annular sector test in AOE terms
#[inline]
pub fn in_donut_sector(
    p: Vec2,
    origin: Vec2,
    inner: f32,
    outer: f32,
    dir: Vec2,
    half_angle: f32,
) -> bool {
    in_donut_cone(p, origin, inner, outer, dir, half_angle)
}

/// Oriented rectangle: forward extent [-back, front] along `dir`,
/// lateral extent [-half_width, half_width]
pub fn in_rect(p: Vec2, origin: Vec2, dir: Vec2, front: f32, back: f32, half_width: f32) -> bool {
    let offset = p - origin;
    let forward = offset.dot(dir);
    let side = offset.dot(ortho_left(dir));
    forward >= -back && forward <= front && side.abs() <= half_width
}

/// Rectangle spanned by a start point and a start-to-end vector
///
/// A zero-length span is no rectangle at all and contains nothing.
pub fn in_rect_span(p: Vec2, start: Vec2, start_to_end: Vec2, half_width: f32) -> bool {
    let len_sq = start_to_end.length_squared();
    if len_sq <= f32::EPSILON {
        return false;
    }
    let len = len_sq.sqrt();
    let dir = start_to_end / len;
    in_rect(p, start, dir, len, 0.0, half_width)
}

/// Cross: union of two perpendicular rects sharing origin and half-width
pub fn in_cross(p: Vec2, origin: Vec2, dir: Vec2, length: f32, half_width: f32) -> bool {
    in_rect(p, origin, dir, length, length, half_width)
        || in_rect(p, origin, ortho_left(dir), length, length, half_width)
}

/// Triangle with vertices given relative to `origin` (barycentric signs)
pub fn in_tri(p: Vec2, origin: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let va = origin + a;
    let vb = origin + b;
    let vc = origin + c;

    let d1 = cross2(p - va, vb - va);
    let d2 = cross2(p - vb, vc - vb);
    let d3 = cross2(p - vc, va - vc);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Capsule: within `radius` of the segment from `origin` along `dir * length`
pub fn in_capsule(p: Vec2, origin: Vec2, dir: Vec2, length: f32, radius: f32) -> bool {
    let offset = p - origin;
    let t = offset.dot(dir).clamp(0.0, length);
    (offset - dir * t).length_squared() <= radius * radius
}

/// Arc capsule: tube of `tube_radius` swept along a circular arc
///
/// The arc starts at `start`, orbits `center`, and sweeps by `sweep`
/// radians (sign picks the direction). Hemispheric caps close both ends.
pub fn in_arc_capsule(p: Vec2, start: Vec2, center: Vec2, sweep: f32, tube_radius: f32) -> bool {
    let radius = (start - center).length();
    let v = p - center;

    if arc_angle_offset(v, start - center, sweep).is_some() {
        let band = (v.length() - radius).abs();
        return band <= tube_radius;
    }

    // Endcaps
    let end = center + dir_from_bearing(bearing(start - center) + sweep) * radius;
    (p - start).length_squared() <= tube_radius * tube_radius
        || (p - end).length_squared() <= tube_radius * tube_radius
}

/// Angular offset of `v` from `from` measured along the sweep direction.
///
/// Returns `Some(offset)` in [0, |sweep|] when `v` lies inside the swept
/// wedge, `None` otherwise.
pub(crate) fn arc_angle_offset(v: Vec2, from: Vec2, sweep: f32) -> Option<f32> {
    use std::f32::consts::TAU;

    let span = sweep.abs();
    if span >= TAU {
        return Some(normalize_angle(bearing(v) - bearing(from)).rem_euclid(TAU));
    }
    let mut delta = normalize_angle(bearing(v) - bearing(from));
    if sweep < 0.0 {
        delta = -delta;
    }
    if delta < 0.0 {
        delta += TAU;
    }
    if delta <= span {
        Some(delta)
    } else {
        None
    }
}

/// Scalar z-component of the 2D cross product
#[inline]
pub fn cross2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}
