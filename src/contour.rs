//! Marching-squares contour extraction
//!
//! Walks a square lattice over the sampling window and emits line segments
//! approximating the iso-contour `d(p) = 0` of any signed distance
//! function. Output is a flat segment list in world space with the caller's
//! height, color, and thickness attached; the host draws it.
//!
//! Saddle cells (cases 5 and 10) emit two independent segments without
//! sub-sampling; shrink the step when saddle topology matters.

use glam::{Vec2, Vec3};

use crate::lift;
use crate::sdf::Sdf;

/// One overlay line segment with draw attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourSegment {
    pub a: Vec3,
    pub b: Vec3,
    pub color: [f32; 4],
    pub thickness: f32,
}

/// Extract the zero contour of `field` inside the square window
/// `[center - radius, center + radius]` on both axes.
///
/// Non-positive or non-finite `radius`/`step` produce an empty list.
pub fn build<F>(
    field: F,
    center: Vec2,
    radius: f32,
    step: f32,
    height: f32,
    color: [f32; 4],
    thickness: f32,
) -> Vec<ContourSegment>
where
    F: Fn(Vec2) -> f32,
{
    if !(radius > 0.0) || !radius.is_finite() || !(step > 0.0) || !step.is_finite() {
        return Vec::new();
    }

    let cells = ((2.0 * radius / step).ceil() as usize).max(1);
    let stride = cells + 1;

    // Sample the whole lattice once; each interior value is shared by four
    // cells
    let mut values = Vec::with_capacity(stride * stride);
    for j in 0..stride {
        for i in 0..stride {
            values.push(field(lattice_point(center, radius, step, i, j)));
        }
    }

    let mut segments = Vec::new();
    let mut emit = |p: Vec2, q: Vec2| {
        segments.push(ContourSegment {
            a: lift(p, height),
            b: lift(q, height),
            color,
            thickness,
        });
    };

    for j in 0..cells {
        for i in 0..cells {
            let pa = lattice_point(center, radius, step, i, j);
            let pb = lattice_point(center, radius, step, i + 1, j);
            let pc = lattice_point(center, radius, step, i + 1, j + 1);
            let pd = lattice_point(center, radius, step, i, j + 1);
            let da = values[j * stride + i];
            let db = values[j * stride + i + 1];
            let dc = values[(j + 1) * stride + i + 1];
            let dd = values[(j + 1) * stride + i];

            let mut mask = 0u8;
            if da <= 0.0 {
                mask |= 1;
            }
            if db <= 0.0 {
                mask |= 2;
            }
            if dc <= 0.0 {
                mask |= 4;
            }
            if dd <= 0.0 {
                mask |= 8;
            }
            if mask == 0 || mask == 15 {
                continue;
            }

            let ab = || zero_crossing(pa, pb, da, db);
            let bc = || zero_crossing(pb, pc, db, dc);
            let cd = || zero_crossing(pc, pd, dc, dd);
            let da_edge = || zero_crossing(pd, pa, dd, da);

            match mask {
                1 | 14 => emit(da_edge(), ab()),
                2 | 13 => emit(ab(), bc()),
                3 | 12 => emit(da_edge(), bc()),
                4 | 11 => emit(bc(), cd()),
                6 | 9 => emit(ab(), cd()),
                7 | 8 => emit(cd(), da_edge()),
                5 => {
                    emit(da_edge(), ab());
                    emit(bc(), cd());
                }
                10 => {
                    emit(ab(), bc());
                    emit(cd(), da_edge());
                }
                _ => unreachable!("masks 0 and 15 are skipped above"),
            }
        }
    }

    segments
}

/// Contour of a composed [`Sdf`]
pub fn build_sdf(
    field: &Sdf,
    center: Vec2,
    radius: f32,
    step: f32,
    height: f32,
    color: [f32; 4],
    thickness: f32,
) -> Vec<ContourSegment> {
    build(
        |p| field.distance(p),
        center,
        radius,
        step,
        height,
        color,
        thickness,
    )
}

#[inline]
fn lattice_point(center: Vec2, radius: f32, step: f32, i: usize, j: usize) -> Vec2 {
    Vec2::new(
        center.x - radius + i as f32 * step,
        center.y - radius + j as f32 * step,
    )
}

/// Linear zero crossing between two lattice corners, clamped to the edge;
/// a non-finite interpolant falls back to the midpoint
fn zero_crossing(pa: Vec2, pb: Vec2, da: f32, db: f32) -> Vec2 {
    let t = da / (da - db);
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    pa + (pb - pa) * t
}
