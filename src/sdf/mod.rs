//! Signed distance fields for dangerous regions
//!
//! One tagged variant covers every primitive plus the boolean combinators,
//! so the innermost query loop dispatches with a plain `match` instead of
//! virtual calls. Sign convention: negative inside, zero on the boundary,
//! positive outside. Union takes the min over children, intersection the
//! max, and `Inverted` negates its child.

pub mod shapes;

pub use shapes::{
    sd_arc_capsule, sd_capsule, sd_circle, sd_cone, sd_cross, sd_donut, sd_donut_sector, sd_rect,
    sd_triangle,
};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A composable signed distance field on the horizontal plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Sdf {
    Circle {
        center: Vec2,
        radius: f32,
    },
    Rect {
        origin: Vec2,
        dir: Vec2,
        front: f32,
        back: f32,
        half_width: f32,
    },
    Cone {
        origin: Vec2,
        radius: f32,
        dir: Vec2,
        half_angle: f32,
    },
    Donut {
        center: Vec2,
        inner: f32,
        outer: f32,
    },
    DonutSector {
        origin: Vec2,
        inner: f32,
        outer: f32,
        dir: Vec2,
        half_angle: f32,
    },
    Cross {
        origin: Vec2,
        dir: Vec2,
        length: f32,
        half_width: f32,
    },
    Triangle {
        origin: Vec2,
        a: Vec2,
        b: Vec2,
        c: Vec2,
    },
    Capsule {
        origin: Vec2,
        dir: Vec2,
        length: f32,
        radius: f32,
    },
    ArcCapsule {
        start: Vec2,
        center: Vec2,
        sweep: f32,
        tube_radius: f32,
    },
    /// Min over children; empty evaluates to +inf (no region)
    Union(Vec<Sdf>),
    /// Max over children; empty evaluates to +inf (no region)
    Intersection(Vec<Sdf>),
    /// Negated child: inside and outside swap
    Inverted(Box<Sdf>),
}

impl Sdf {
    /// Signed distance from `p` to this field's boundary
    pub fn distance(&self, p: Vec2) -> f32 {
        match self {
            Sdf::Circle { center, radius } => sd_circle(p, *center, *radius),
            Sdf::Rect {
                origin,
                dir,
                front,
                back,
                half_width,
            } => sd_rect(p, *origin, *dir, *front, *back, *half_width),
            Sdf::Cone {
                origin,
                radius,
                dir,
                half_angle,
            } => sd_cone(p, *origin, *radius, *dir, *half_angle),
            Sdf::Donut {
                center,
                inner,
                outer,
            } => sd_donut(p, *center, *inner, *outer),
            Sdf::DonutSector {
                origin,
                inner,
                outer,
                dir,
                half_angle,
            } => sd_donut_sector(p, *origin, *inner, *outer, *dir, *half_angle),
            Sdf::Cross {
                origin,
                dir,
                length,
                half_width,
            } => sd_cross(p, *origin, *dir, *length, *half_width),
            Sdf::Triangle { origin, a, b, c } => sd_triangle(p, *origin, *a, *b, *c),
            Sdf::Capsule {
                origin,
                dir,
                length,
                radius,
            } => sd_capsule(p, *origin, *dir, *length, *radius),
            Sdf::ArcCapsule {
                start,
                center,
                sweep,
                tube_radius,
            } => sd_arc_capsule(p, *start, *center, *sweep, *tube_radius),
            Sdf::Union(children) => children
                .iter()
                .map(|s| s.distance(p))
                .fold(f32::INFINITY, f32::min),
            Sdf::Intersection(children) => {
                if children.is_empty() {
                    f32::INFINITY
                } else {
                    children
                        .iter()
                        .map(|s| s.distance(p))
                        .fold(f32::NEG_INFINITY, f32::max)
                }
            }
            Sdf::Inverted(inner) => -inner.distance(p),
        }
    }

    /// Boundary and interior membership: `distance(p) <= 0`
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.distance(p) <= 0.0
    }

    /// Flip inside and outside. Double inversion unwraps.
    pub fn inverted(self) -> Sdf {
        match self {
            Sdf::Inverted(inner) => *inner,
            other => Sdf::Inverted(Box::new(other)),
        }
    }

    /// Union of fields: min over children
    pub fn union(children: Vec<Sdf>) -> Sdf {
        Sdf::Union(children)
    }

    /// Intersection of fields: max over children
    pub fn intersection(children: Vec<Sdf>) -> Sdf {
        Sdf::Intersection(children)
    }

    /// Complement of a union (treats everything outside the union as danger)
    pub fn inverted_union(children: Vec<Sdf>) -> Sdf {
        Sdf::Union(children).inverted()
    }

    /// Complement of an intersection
    pub fn inverted_intersection(children: Vec<Sdf>) -> Sdf {
        Sdf::Intersection(children).inverted()
    }

    /// A circle enclosing the whole field, when one exists
    ///
    /// Combinators: a union merges child bounds, an intersection may use any
    /// child's bound, and inverted fields are unbounded.
    pub fn bounding_circle(&self) -> Option<(Vec2, f32)> {
        match self {
            Sdf::Circle { center, radius } => Some((*center, radius.max(0.0))),
            Sdf::Rect {
                origin,
                dir,
                front,
                back,
                half_width,
            } => {
                let half_len = (front + back) * 0.5;
                let mid = origin + *dir * ((front - back) * 0.5);
                Some((mid, half_len.hypot(*half_width)))
            }
            Sdf::Cone { origin, radius, .. } => Some((*origin, radius.max(0.0))),
            Sdf::Donut { center, outer, .. } => Some((*center, outer.max(0.0))),
            Sdf::DonutSector { origin, outer, .. } => Some((*origin, outer.max(0.0))),
            Sdf::Cross {
                origin,
                length,
                half_width,
                ..
            } => Some((*origin, length.hypot(*half_width))),
            Sdf::Triangle { origin, a, b, c } => {
                let centroid = origin + (*a + *b + *c) / 3.0;
                let r = [origin + *a, origin + *b, origin + *c]
                    .iter()
                    .map(|v| (*v - centroid).length())
                    .fold(0.0, f32::max);
                Some((centroid, r))
            }
            Sdf::Capsule {
                origin,
                dir,
                length,
                radius,
            } => {
                let half = length.max(0.0) * 0.5;
                Some((origin + *dir * half, half + radius.max(0.0)))
            }
            Sdf::ArcCapsule {
                start,
                center,
                tube_radius,
                ..
            } => Some((*center, (*start - *center).length() + tube_radius.max(0.0))),
            Sdf::Union(children) => {
                let mut merged: Option<(Vec2, f32)> = None;
                for child in children {
                    let bound = child.bounding_circle()?;
                    merged = Some(match merged {
                        None => bound,
                        Some(prev) => merge_circles(prev, bound),
                    });
                }
                merged
            }
            Sdf::Intersection(children) => children
                .iter()
                .filter_map(|c| c.bounding_circle())
                .min_by(|a, b| a.1.total_cmp(&b.1)),
            Sdf::Inverted(_) => None,
        }
    }

    /// Cheap rejection for a row sweep: can the strip of `width` (plus
    /// `cushion`) along `start .. start + delta` touch this field?
    ///
    /// `true` is always a safe answer; bounded fields reject via their
    /// bounding circle.
    pub fn row_intersects(&self, start: Vec2, delta: Vec2, width: f32, cushion: f32) -> bool {
        match self {
            Sdf::Union(children) => children
                .iter()
                .any(|c| c.row_intersects(start, delta, width, cushion)),
            Sdf::Intersection(children) => {
                !children.is_empty()
                    && children
                        .iter()
                        .all(|c| c.row_intersects(start, delta, width, cushion))
            }
            Sdf::Inverted(_) => true,
            _ => match self.bounding_circle() {
                Some((center, radius)) => {
                    segment_point_distance(center, start, start + delta)
                        <= radius + width + cushion
                }
                None => true,
            },
        }
    }
}

/// Smallest circle containing both input circles
fn merge_circles(a: (Vec2, f32), b: (Vec2, f32)) -> (Vec2, f32) {
    let (ca, ra) = a;
    let (cb, rb) = b;
    let d = (cb - ca).length();
    if d + rb <= ra {
        return a;
    }
    if d + ra <= rb {
        return b;
    }
    let r = (d + ra + rb) * 0.5;
    (ca + (cb - ca) * ((r - ra) / d), r)
}

/// Distance from a point to the segment [a, b]
fn segment_point_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ba = b - a;
    let t = ((p - a).dot(ba) / ba.length_squared().max(1e-12)).clamp(0.0, 1.0);
    (p - a - ba * t).length()
}
