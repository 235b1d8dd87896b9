//! High-level attack shapes
//!
//! An `AoeShape` bundles a primitive's parameters with its facing and an
//! `invert_forbidden` flag (the attack covers everything *except* the
//! shape). The cast origin is supplied per query, so one shape value can be
//! replayed at every position an attack snapshots to.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::dir_from_bearing;
use crate::geom;
use crate::sdf::Sdf;

/// Shape parameters relative to a cast origin
///
/// `facing` is a bearing (0 = +Z, clockwise positive); lengths are in
/// world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AoeKind {
    Circle {
        radius: f32,
    },
    Cone {
        radius: f32,
        facing: f32,
        half_angle: f32,
    },
    Donut {
        inner: f32,
        outer: f32,
    },
    DonutSector {
        inner: f32,
        outer: f32,
        facing: f32,
        half_angle: f32,
    },
    Rect {
        facing: f32,
        front: f32,
        back: f32,
        half_width: f32,
    },
    Cross {
        facing: f32,
        length: f32,
        half_width: f32,
    },
    /// Cone approximated by its apex and the two arc-edge vertices
    TriCone {
        radius: f32,
        facing: f32,
        half_angle: f32,
    },
    Capsule {
        facing: f32,
        length: f32,
        radius: f32,
    },
    /// Arc swept around `orbit_center` (relative to the cast origin),
    /// starting at the origin itself
    ArcCapsule {
        orbit_center: Vec2,
        sweep: f32,
        tube_radius: f32,
    },
}

/// An attack footprint: a primitive plus the forbidden-side flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AoeShape {
    pub kind: AoeKind,
    /// When set, the danger is everywhere the primitive is not
    pub invert_forbidden: bool,
}

impl AoeShape {
    pub fn new(kind: AoeKind) -> Self {
        Self {
            kind,
            invert_forbidden: false,
        }
    }

    /// Mark the complement of the shape as the dangerous region
    pub fn invert(mut self) -> Self {
        self.invert_forbidden = !self.invert_forbidden;
        self
    }

    /// Does the attack cast at `origin` cover `p`?
    pub fn check(&self, p: Vec2, origin: Vec2) -> bool {
        let hit = match self.kind {
            AoeKind::Circle { radius } => geom::in_circle(p, origin, radius),
            AoeKind::Cone {
                radius,
                facing,
                half_angle,
            } => geom::in_circle_cone(p, origin, radius, dir_from_bearing(facing), half_angle),
            AoeKind::Donut { inner, outer } => geom::in_donut(p, origin, inner, outer),
            AoeKind::DonutSector {
                inner,
                outer,
                facing,
                half_angle,
            } => geom::in_donut_sector(
                p,
                origin,
                inner,
                outer,
                dir_from_bearing(facing),
                half_angle,
            ),
            AoeKind::Rect {
                facing,
                front,
                back,
                half_width,
            } => geom::in_rect(p, origin, dir_from_bearing(facing), front, back, half_width),
            AoeKind::Cross {
                facing,
                length,
                half_width,
            } => geom::in_cross(p, origin, dir_from_bearing(facing), length, half_width),
            AoeKind::TriCone {
                radius,
                facing,
                half_angle,
            } => {
                let (a, b, c) = tri_cone_vertices(radius, facing, half_angle);
                geom::in_tri(p, origin, a, b, c)
            }
            AoeKind::Capsule {
                facing,
                length,
                radius,
            } => geom::in_capsule(p, origin, dir_from_bearing(facing), length, radius),
            AoeKind::ArcCapsule {
                orbit_center,
                sweep,
                tube_radius,
            } => geom::in_arc_capsule(p, origin, origin + orbit_center, sweep, tube_radius),
        };
        hit != self.invert_forbidden
    }

    /// Build the signed distance field for a cast at `origin`
    pub fn distance_field(&self, origin: Vec2) -> Sdf {
        let field = match self.kind {
            AoeKind::Circle { radius } => Sdf::Circle {
                center: origin,
                radius,
            },
            AoeKind::Cone {
                radius,
                facing,
                half_angle,
            } => Sdf::Cone {
                origin,
                radius,
                dir: dir_from_bearing(facing),
                half_angle,
            },
            AoeKind::Donut { inner, outer } => Sdf::Donut {
                center: origin,
                inner,
                outer,
            },
            AoeKind::DonutSector {
                inner,
                outer,
                facing,
                half_angle,
            } => Sdf::DonutSector {
                origin,
                inner,
                outer,
                dir: dir_from_bearing(facing),
                half_angle,
            },
            AoeKind::Rect {
                facing,
                front,
                back,
                half_width,
            } => Sdf::Rect {
                origin,
                dir: dir_from_bearing(facing),
                front,
                back,
                half_width,
            },
            AoeKind::Cross {
                facing,
                length,
                half_width,
            } => Sdf::Cross {
                origin,
                dir: dir_from_bearing(facing),
                length,
                half_width,
            },
            AoeKind::TriCone {
                radius,
                facing,
                half_angle,
            } => {
                let (a, b, c) = tri_cone_vertices(radius, facing, half_angle);
                Sdf::Triangle { origin, a, b, c }
            }
            AoeKind::Capsule {
                facing,
                length,
                radius,
            } => Sdf::Capsule {
                origin,
                dir: dir_from_bearing(facing),
                length,
                radius,
            },
            AoeKind::ArcCapsule {
                orbit_center,
                sweep,
                tube_radius,
            } => Sdf::ArcCapsule {
                start: origin,
                center: origin + orbit_center,
                sweep,
                tube_radius,
            },
        };
        if self.invert_forbidden {
            field.inverted()
        } else {
            field
        }
    }
}

/// Apex-relative vertices of the triangle approximating a cone
fn tri_cone_vertices(radius: f32, facing: f32, half_angle: f32) -> (Vec2, Vec2, Vec2) {
    (
        Vec2::ZERO,
        dir_from_bearing(facing - half_angle) * radius,
        dir_from_bearing(facing + half_angle) * radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    fn sample_points(extent: f32, step: f32) -> Vec<Vec2> {
        let mut points = Vec::new();
        let n = (2.0 * extent / step) as i32;
        for i in 0..=n {
            for j in 0..=n {
                points.push(Vec2::new(
                    -extent + i as f32 * step,
                    -extent + j as f32 * step,
                ));
            }
        }
        points
    }

    fn all_kinds() -> Vec<AoeKind> {
        vec![
            AoeKind::Circle { radius: 6.0 },
            AoeKind::Cone {
                radius: 8.0,
                facing: 0.9,
                half_angle: 0.7,
            },
            AoeKind::Donut {
                inner: 3.0,
                outer: 7.0,
            },
            AoeKind::DonutSector {
                inner: 3.0,
                outer: 8.0,
                facing: -1.2,
                half_angle: 1.0,
            },
            AoeKind::Rect {
                facing: 0.4,
                front: 9.0,
                back: 1.0,
                half_width: 2.5,
            },
            AoeKind::Cross {
                facing: 0.4,
                length: 7.0,
                half_width: 1.5,
            },
            AoeKind::TriCone {
                radius: 8.0,
                facing: 0.9,
                half_angle: 0.7,
            },
            AoeKind::Capsule {
                facing: -0.6,
                length: 8.0,
                radius: 2.0,
            },
            AoeKind::ArcCapsule {
                orbit_center: Vec2::new(0.0, -6.0),
                sweep: 1.8,
                tube_radius: 1.5,
            },
        ]
    }

    #[test]
    fn test_check_matches_distance_sign() {
        let origin = Vec2::new(1.5, -0.5);
        for kind in all_kinds() {
            let shape = AoeShape::new(kind);
            let field = shape.distance_field(origin);
            for p in sample_points(12.0, 0.7) {
                let d = field.distance(p);
                if d.abs() < 1e-3 {
                    continue; // boundary points may flip either way
                }
                assert_eq!(
                    shape.check(p, origin),
                    d < 0.0,
                    "{:?} disagrees at {:?} (d={})",
                    kind,
                    p,
                    d
                );
            }
        }
    }

    #[test]
    fn test_invert_flag_flips_both_paths() {
        let origin = Vec2::ZERO;
        for kind in all_kinds() {
            let shape = AoeShape::new(kind);
            let flipped = shape.invert();
            for p in sample_points(10.0, 1.3) {
                let d = shape.distance_field(origin).distance(p);
                if d.abs() < 1e-3 {
                    continue;
                }
                assert_eq!(shape.check(p, origin), !flipped.check(p, origin));
                assert!(
                    (flipped.distance_field(origin).distance(p) + d).abs() < 1e-5,
                    "inverted field is not the negation for {:?}",
                    kind
                );
            }
        }
    }

    #[test]
    fn test_tri_cone_sits_inside_cone() {
        let origin = Vec2::ZERO;
        let tri = AoeShape::new(AoeKind::TriCone {
            radius: 8.0,
            facing: 0.0,
            half_angle: 0.6,
        });
        let cone = AoeShape::new(AoeKind::Cone {
            radius: 8.0,
            facing: 0.0,
            half_angle: 0.6,
        });
        for p in sample_points(9.0, 0.5) {
            if tri.check(p, origin) {
                assert!(cone.check(p, origin), "triangle leaks outside cone at {:?}", p);
            }
        }
    }

    #[test]
    fn test_rect_full_turn_is_identity() {
        let origin = Vec2::new(2.0, 3.0);
        let base = AoeShape::new(AoeKind::Rect {
            facing: 0.3,
            front: 9.0,
            back: 1.0,
            half_width: 2.5,
        });
        let turned = AoeShape::new(AoeKind::Rect {
            facing: 0.3 + TAU,
            front: 9.0,
            back: 1.0,
            half_width: 2.5,
        });
        for p in sample_points(12.0, 0.7) {
            let d = base.distance_field(origin).distance(p);
            if d.abs() < 1e-4 {
                continue;
            }
            assert_eq!(base.check(p, origin), turned.check(p, origin));
        }
    }

    #[test]
    fn test_arc_capsule_starts_at_origin() {
        let origin = Vec2::new(4.0, 0.0);
        let shape = AoeShape::new(AoeKind::ArcCapsule {
            orbit_center: Vec2::new(-4.0, 0.0), // orbit the world origin
            sweep: PI / 2.0,
            tube_radius: 1.0,
        });
        assert!(shape.check(origin, origin));
        // A point on the orbit a quarter-turn along the sweep
        let along = Vec2::new(0.0, 0.0) + crate::dir_from_bearing(crate::bearing(origin) + 0.7) * 4.0;
        assert!(shape.check(along, origin));
    }

    #[test]
    fn test_serde_round_trip() {
        for kind in all_kinds() {
            let shape = AoeShape::new(kind).invert();
            let json = serde_json::to_string(&shape).unwrap();
            let back: AoeShape = serde_json::from_str(&json).unwrap();
            assert_eq!(shape, back);
        }
    }
}
