//! Safespot - a 2D signed-distance-field safety engine
//!
//! Core modules:
//! - `geom`: plane vectors, bearings, boolean region predicates
//! - `sdf`: signed distance fields for primitives and boolean combinators
//! - `aoe`: high-level attack shapes bundling orientation and inversion
//! - `arena`: playfield bounds (circle / oriented rect)
//! - `safety`: forbidden-zone registry and safe-position queries
//! - `contour`: marching-squares iso-contour extraction for overlays
//! - `overlay`: optional weak-handle registry for renderer hand-off
//!
//! All geometry lives on the horizontal plane: `Vec2.x` is world X and
//! `Vec2.y` is world Z. Heights are dropped on ingest and reattached on
//! egress. Bearings are `atan2(x, z)`: 0 points along +Z, clockwise
//! positive, normalized to (-pi, pi].

pub mod aoe;
pub mod arena;
pub mod contour;
pub mod geom;
pub mod overlay;
pub mod safety;
pub mod sdf;

pub use aoe::{AoeKind, AoeShape};
pub use arena::ArenaBounds;
pub use contour::ContourSegment;
pub use safety::{ForbiddenZone, SafePositionQuery, SafeZoneCalculator};
pub use sdf::Sdf;

use glam::{Vec2, Vec3};

/// Monotonic combat time in seconds. The engine never reads a clock;
/// callers pass the query time to every operation.
pub type Timestamp = f64;

/// Engine tuning constants
pub mod consts {
    /// Boundary tolerance for containment and sign checks
    pub const EPSILON: f32 = 1e-5;

    /// Floor for the minimum spacing between query result points
    pub const MIN_POINT_SPACING: f32 = 0.1;

    /// Spacing used when a query does not set one; keeps candidate counts
    /// bounded on arena-sized searches
    pub const DEFAULT_POINT_SPACING: f32 = 1.0;

    /// Candidate attempts per active sample in Poisson-disk generation
    pub const POISSON_ATTEMPTS: u32 = 30;

    /// Default ray count for `find_safest_direction`
    pub const DIRECTION_SAMPLES: u32 = 8;

    /// Probe distance along each sampled direction
    pub const DIRECTION_PROBE_STEP: f32 = 1.0;

    /// Default cells per axis for `find_safest_position`
    pub const GRID_RESOLUTION: u32 = 16;

    /// Score weight on distance to the nearest danger (higher = safer)
    pub const DANGER_WEIGHT: f32 = 10.0;

    /// Score penalty weight on distance to the requested target
    pub const TARGET_WEIGHT: f32 = 5.0;
}

/// Normalize an angle to (-pi, pi]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Bearing of a plane vector: 0 = +Z, clockwise positive, (-pi, pi]
#[inline]
pub fn bearing(v: Vec2) -> f32 {
    v.x.atan2(v.y)
}

/// Unit direction for a bearing angle
#[inline]
pub fn dir_from_bearing(theta: f32) -> Vec2 {
    Vec2::new(theta.sin(), theta.cos())
}

/// Drop the height component of a world position
#[inline]
pub fn flatten(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Reattach a height to a plane position
#[inline]
pub fn lift(p: Vec2, height: f32) -> Vec3 {
    Vec3::new(p.x, height, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(PI + 0.1) - (-PI + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_bearing_convention() {
        // +Z is bearing 0, +X is a quarter turn clockwise
        assert!(bearing(Vec2::new(0.0, 1.0)).abs() < 1e-6);
        assert!((bearing(Vec2::new(1.0, 0.0)) - PI / 2.0).abs() < 1e-6);
        assert!((bearing(Vec2::new(0.0, -1.0)).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_round_trip() {
        for i in -3..=3 {
            let theta = i as f32 * 0.9;
            let v = dir_from_bearing(theta);
            assert!((bearing(v) - normalize_angle(theta)).abs() < 1e-5);
            assert!((v.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_flatten_lift() {
        let p = Vec3::new(3.0, 7.5, -2.0);
        let flat = flatten(p);
        assert_eq!(flat, Vec2::new(3.0, -2.0));
        assert_eq!(lift(flat, 7.5), p);
    }
}
