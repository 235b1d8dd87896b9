//! Constrained multi-point safe-position queries
//!
//! A transient builder over one calculator. `execute` runs the pipeline in
//! fixed order: Poisson-disk candidates, safety filter, scoring, selection
//! under the angular constraint, final ordering. Stages are pure functions
//! over slices; nothing is cached across executions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{DANGER_WEIGHT, DEFAULT_POINT_SPACING, MIN_POINT_SPACING, TARGET_WEIGHT};
use crate::geom::angle_between;
use crate::{bearing, Timestamp};

use super::calculator::SafeZoneCalculator;
use super::poisson;

/// Builder for a safe-position search; see the stage order above
#[derive(Debug)]
pub struct SafePositionQuery<'a> {
    calc: &'a SafeZoneCalculator,
    count: usize,
    time: Timestamp,
    center: Option<Vec2>,
    radius: Option<f32>,
    target: Option<Vec2>,
    target_max: Option<f32>,
    min_spacing: f32,
    angle_constraint: Option<(Vec2, f32)>,
    order_ref: Option<Vec2>,
    seed: u64,
}

impl<'a> SafePositionQuery<'a> {
    pub(super) fn new(calc: &'a SafeZoneCalculator, count: usize, time: Timestamp) -> Self {
        Self {
            calc,
            count,
            time,
            center: None,
            radius: None,
            target: None,
            target_max: None,
            min_spacing: DEFAULT_POINT_SPACING,
            angle_constraint: None,
            order_ref: None,
            seed: 0,
        }
    }

    /// Search the disk of `radius` around `center` instead of the arena
    pub fn within(mut self, center: Vec2, radius: f32) -> Self {
        self.center = Some(center);
        self.radius = Some(radius);
        self
    }

    /// Prefer points close to `target`; with `max_distance`, reject points
    /// farther away. Also makes `target` the implicit ordering reference.
    pub fn near_target(mut self, target: Vec2, max_distance: Option<f32>) -> Self {
        self.target = Some(target);
        self.target_max = max_distance;
        self
    }

    /// Keep result points at least `d` apart (floored at 0.1)
    pub fn min_distance_between(mut self, d: f32) -> Self {
        self.min_spacing = d.max(MIN_POINT_SPACING);
        self
    }

    /// Require every pair of results to subtend at least `min_angle`
    /// radians as seen from `center`
    pub fn with_min_angle(mut self, center: Vec2, min_angle: f32) -> Self {
        self.angle_constraint = Some((center, min_angle));
        self
    }

    /// Sort the final list by distance to `reference`, closest first
    pub fn order_by_distance_to(mut self, reference: Vec2) -> Self {
        self.order_ref = Some(reference);
        self
    }

    /// Reseed the candidate sampler (default seed is 0)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run the pipeline. May return fewer than the requested count when the
    /// constraints cannot be met; the caller decides how to relax them.
    pub fn execute(self) -> Vec<Vec2> {
        let (center, radius) = match (self.center, self.radius) {
            (Some(c), Some(r)) => (c, r),
            _ => match self.calc.arena() {
                Some(arena) => (arena.center(), arena.approx_radius()),
                None => {
                    log::debug!("safe-position query without region or arena; nothing to search");
                    return Vec::new();
                }
            },
        };

        let mut rng = Pcg32::seed_from_u64(self.seed);
        let candidates =
            poisson::sample_disk(center, radius, self.min_spacing, self.calc.arena(), &mut rng);

        let safe: Vec<Vec2> = candidates
            .iter()
            .copied()
            .filter(|c| self.calc.is_safe(*c, self.time))
            .filter(|c| match (self.target, self.target_max) {
                (Some(target), Some(max)) => (*c - target).length() <= max,
                _ => true,
            })
            .collect();

        let scored = self.score(&safe);
        let selected = self.select(&scored);
        let ordered = self.order(selected);

        log::debug!(
            "safe-position query: {} candidates, {} safe, {} selected of {} requested",
            candidates.len(),
            safe.len(),
            ordered.len(),
            self.count
        );
        ordered
    }

    /// Clearance-weighted score, penalized by target distance; descending
    fn score(&self, points: &[Vec2]) -> Vec<(Vec2, f32)> {
        let mut scored: Vec<(Vec2, f32)> = points
            .iter()
            .map(|p| {
                let clearance = self.calc.distance_to_nearest_danger(*p, self.time);
                let mut score = DANGER_WEIGHT * clearance;
                if let Some(target) = self.target {
                    score -= TARGET_WEIGHT * (*p - target).length();
                }
                (*p, score)
            })
            .collect();
        // Stable: ties keep candidate-generation order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    /// Walk the scored list, enforcing the angular constraint against
    /// everything already chosen
    fn select(&self, scored: &[(Vec2, f32)]) -> Vec<Vec2> {
        let mut selected: Vec<Vec2> = Vec::with_capacity(self.count.min(scored.len()));
        for (p, _) in scored {
            if selected.len() >= self.count {
                break;
            }
            if let Some((apex, min_angle)) = self.angle_constraint {
                let candidate_bearing = bearing(*p - apex);
                let blocked = selected
                    .iter()
                    .any(|s| angle_between(bearing(*s - apex), candidate_bearing) < min_angle);
                if blocked {
                    continue;
                }
            }
            selected.push(*p);
        }
        selected
    }

    /// Final ordering: explicit reference first, else the near-target
    /// point, else selection order
    fn order(&self, mut selected: Vec<Vec2>) -> Vec<Vec2> {
        if let Some(reference) = self.order_ref.or(self.target) {
            selected.sort_by(|a, b| {
                (*a - reference)
                    .length_squared()
                    .total_cmp(&(*b - reference).length_squared())
            });
        }
        selected
    }
}
