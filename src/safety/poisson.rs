//! Poisson-disk candidate generation
//!
//! Bridson-style dart throwing over a background grid: one candidate per
//! cell, new darts in the annulus [d, 2d] around a random active sample,
//! thirty attempts before an active sample retires. The caller injects the
//! RNG, so a fixed seed replays the exact candidate set.

use std::collections::HashMap;
use std::f32::consts::{SQRT_2, TAU};

use glam::Vec2;
use rand::Rng;

use crate::arena::ArenaBounds;
use crate::consts::POISSON_ATTEMPTS;
use crate::dir_from_bearing;

/// Fill the disk of `radius` around `center` with points at least
/// `min_dist` apart, clipped to the arena when one is set.
///
/// The search center itself seeds the set. Degenerate radius or spacing
/// yields an empty list.
pub fn sample_disk<R: Rng>(
    center: Vec2,
    radius: f32,
    min_dist: f32,
    arena: Option<&ArenaBounds>,
    rng: &mut R,
) -> Vec<Vec2> {
    if !(radius > 0.0) || !radius.is_finite() || !(min_dist > 0.0) || !min_dist.is_finite() {
        return Vec::new();
    }

    // One sample per cell makes the 5x5 neighborhood check sufficient
    let cell = min_dist / SQRT_2;
    let cell_of = |p: Vec2| -> (i32, i32) {
        (
            ((p.x - center.x) / cell).floor() as i32,
            ((p.y - center.y) / cell).floor() as i32,
        )
    };

    let mut points: Vec<Vec2> = Vec::new();
    let mut grid: HashMap<(i32, i32), usize> = HashMap::new();
    let mut active: Vec<usize> = Vec::new();

    points.push(center);
    grid.insert(cell_of(center), 0);
    active.push(0);

    while !active.is_empty() {
        let slot = rng.gen_range(0..active.len());
        let base = points[active[slot]];

        let mut placed = false;
        for _ in 0..POISSON_ATTEMPTS {
            let angle = rng.gen_range(0.0..TAU);
            let dist = rng.gen_range(min_dist..min_dist * 2.0);
            let candidate = base + dir_from_bearing(angle) * dist;

            if (candidate - center).length_squared() > radius * radius {
                continue;
            }
            if let Some(a) = arena {
                if !a.contains(candidate) {
                    continue;
                }
            }
            if !clear_of_neighbors(&grid, &points, cell_of(candidate), candidate, min_dist) {
                continue;
            }

            let idx = points.len();
            points.push(candidate);
            grid.insert(cell_of(candidate), idx);
            active.push(idx);
            placed = true;
            break;
        }

        if !placed {
            active.swap_remove(slot);
        }
    }

    points
}

/// No existing sample within `min_dist` in the 5x5 cell neighborhood
fn clear_of_neighbors(
    grid: &HashMap<(i32, i32), usize>,
    points: &[Vec2],
    (cx, cz): (i32, i32),
    candidate: Vec2,
    min_dist: f32,
) -> bool {
    for dx in -2..=2 {
        for dz in -2..=2 {
            if let Some(&idx) = grid.get(&(cx + dx, cz + dz)) {
                if (points[idx] - candidate).length_squared() < min_dist * min_dist {
                    return false;
                }
            }
        }
    }
    true
}
