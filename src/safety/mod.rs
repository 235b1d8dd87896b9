//! Forbidden-zone registry and safe-position search
//!
//! The calculator owns the time-gated zone set and the optional arena;
//! queries are transient builders that run a fixed pipeline: Poisson-disk
//! candidates, safety filter, scoring, constrained selection, ordering.
//! Everything here is synchronous and deterministic under a fixed seed.

pub mod calculator;
pub mod poisson;
pub mod query;

pub use calculator::{ForbiddenZone, SafeZoneCalculator};
pub use query::SafePositionQuery;
