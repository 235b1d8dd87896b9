//! Time-gated registry of dangerous regions
//!
//! Zones activate when their timestamp is reached and stay active until
//! cleared. All queries take the time explicitly; the calculator never
//! reads a clock. Every mutation bumps a generation counter so downstream
//! consumers can discard stale derived data.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::ArenaBounds;
use crate::consts::{DIRECTION_PROBE_STEP, DIRECTION_SAMPLES, GRID_RESOLUTION};
use crate::sdf::Sdf;
use crate::{dir_from_bearing, Timestamp};

use super::query::SafePositionQuery;

static NEXT_CALCULATOR_ID: AtomicU64 = AtomicU64::new(1);

/// A dangerous region with an activation time
///
/// The zone is active at query time `t` iff `activation <= t`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForbiddenZone {
    pub shape: Sdf,
    pub activation: Timestamp,
}

impl ForbiddenZone {
    pub fn new(shape: Sdf, activation: Timestamp) -> Self {
        Self { shape, activation }
    }

    /// A zone that is dangerous from the beginning of time
    pub fn immediate(shape: Sdf) -> Self {
        Self {
            shape,
            activation: Timestamp::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn is_active(&self, t: Timestamp) -> bool {
        self.activation <= t
    }
}

/// Owns the zone list and the optional arena; answers safety queries
#[derive(Debug)]
pub struct SafeZoneCalculator {
    id: u64,
    zones: Vec<ForbiddenZone>,
    arena: Option<ArenaBounds>,
    generation: u64,
}

impl Default for SafeZoneCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeZoneCalculator {
    pub fn new() -> Self {
        Self {
            id: NEXT_CALCULATOR_ID.fetch_add(1, Ordering::Relaxed),
            zones: Vec::new(),
            arena: None,
            generation: 0,
        }
    }

    /// Process-unique identity, stable for the calculator's lifetime
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Bumped by every mutation; cached query results keyed on an older
    /// generation are stale
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn arena(&self) -> Option<&ArenaBounds> {
        self.arena.as_ref()
    }

    /// Replace the playfield bounds (or remove them with `None`)
    pub fn set_arena(&mut self, arena: Option<ArenaBounds>) {
        log::debug!("calculator {}: arena set to {:?}", self.id, arena);
        self.arena = arena;
        self.generation += 1;
    }

    pub fn add_zone(&mut self, zone: ForbiddenZone) {
        self.zones.push(zone);
        self.generation += 1;
    }

    pub fn add_zones(&mut self, zones: impl IntoIterator<Item = ForbiddenZone>) {
        let before = self.zones.len();
        self.zones.extend(zones);
        log::debug!(
            "calculator {}: {} zones added ({} total)",
            self.id,
            self.zones.len() - before,
            self.zones.len()
        );
        self.generation += 1;
    }

    /// Drop every zone (the arena stays)
    pub fn clear(&mut self) {
        log::debug!(
            "calculator {}: cleared {} zones",
            self.id,
            self.zones.len()
        );
        self.zones.clear();
        self.generation += 1;
    }

    /// Zones whose activation time has been reached at `t`
    pub fn active_zones(&self, t: Timestamp) -> impl Iterator<Item = &ForbiddenZone> {
        self.zones.iter().filter(move |z| z.is_active(t))
    }

    pub fn active_zone_count(&self, t: Timestamp) -> usize {
        self.active_zones(t).count()
    }

    /// Safe means inside the arena (when set) and strictly outside every
    /// active zone
    pub fn is_safe(&self, p: Vec2, t: Timestamp) -> bool {
        if let Some(arena) = &self.arena {
            if !arena.contains(p) {
                return false;
            }
        }
        self.active_zones(t).all(|z| z.shape.distance(p) > 0.0)
    }

    /// Smallest signed distance to any active danger
    ///
    /// Positive clearance, negative depth inside a zone, +inf with nothing
    /// active. Outside the arena the (negative) border distance is the
    /// answer: the playfield edge is the nearest danger.
    pub fn distance_to_nearest_danger(&self, p: Vec2, t: Timestamp) -> f32 {
        if let Some(arena) = &self.arena {
            if !arena.contains(p) {
                return -arena.distance_to_border(p).abs();
            }
        }
        self.active_zones(t)
            .map(|z| z.shape.distance(p))
            .fold(f32::INFINITY, f32::min)
    }

    /// Unit direction from `p` whose probe point has the most clearance
    ///
    /// Bearings are sampled evenly starting at +Z; ties keep the lowest
    /// sample index. `samples` of 0 uses the default of 8.
    pub fn find_safest_direction(&self, p: Vec2, t: Timestamp, samples: u32) -> Vec2 {
        let samples = if samples == 0 { DIRECTION_SAMPLES } else { samples };
        let mut best_dir = dir_from_bearing(0.0);
        let mut best_clearance = f32::NEG_INFINITY;
        for i in 0..samples {
            let dir = dir_from_bearing(i as f32 / samples as f32 * std::f32::consts::TAU);
            let clearance = self.distance_to_nearest_danger(p + dir * DIRECTION_PROBE_STEP, t);
            if clearance > best_clearance {
                best_clearance = clearance;
                best_dir = dir;
            }
        }
        best_dir
    }

    /// Grid-scan the disk around `center` for the cell with the most
    /// clearance
    ///
    /// `resolution` cells per axis (0 uses the default of 16). Cells
    /// outside the disk or the arena are skipped; ties keep the first cell
    /// in scan order (low X, then low Z, first). Falls back to `center`
    /// when every cell is excluded.
    pub fn find_safest_position(
        &self,
        center: Vec2,
        radius: f32,
        t: Timestamp,
        resolution: u32,
    ) -> Vec2 {
        let resolution = if resolution == 0 { GRID_RESOLUTION } else { resolution };
        if !(radius > 0.0) || !radius.is_finite() {
            return center;
        }
        let step = 2.0 * radius / resolution as f32;
        let mut best = center;
        let mut best_clearance = f32::NEG_INFINITY;
        for ix in 0..resolution {
            for iz in 0..resolution {
                let cell = center
                    + Vec2::new(
                        -radius + (ix as f32 + 0.5) * step,
                        -radius + (iz as f32 + 0.5) * step,
                    );
                if (cell - center).length_squared() > radius * radius {
                    continue;
                }
                if let Some(arena) = &self.arena {
                    if !arena.contains(cell) {
                        continue;
                    }
                }
                let clearance = self.distance_to_nearest_danger(cell, t);
                if clearance > best_clearance {
                    best_clearance = clearance;
                    best = cell;
                }
            }
        }
        best
    }

    /// Start a safe-position query for `count` points at time `t`
    ///
    /// The search region defaults to the arena; narrow it with
    /// [`SafePositionQuery::within`].
    pub fn find_safe_positions(&self, count: usize, t: Timestamp) -> SafePositionQuery<'_> {
        SafePositionQuery::new(self, count, t)
    }
}
