//! Playfield bounds
//!
//! Positions outside the arena are never safe. `distance_to_border` is
//! positive inside and turns negative by the overshoot magnitude outside
//! (diagonal overshoot composes both axes).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom::ortho_left;

/// The navigable region of the battlefield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArenaBounds {
    Circle {
        center: Vec2,
        radius: f32,
    },
    /// Oriented rectangle; `dir` points along the half-length axis.
    /// A zero-length `dir` behaves as unit +X.
    Rect {
        center: Vec2,
        dir: Vec2,
        half_width: f32,
        half_length: f32,
    },
}

impl ArenaBounds {
    /// Is `p` on the playfield?
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            ArenaBounds::Circle { center, radius } => {
                (p - *center).length_squared() <= radius * radius
            }
            ArenaBounds::Rect {
                center,
                dir,
                half_width,
                half_length,
            } => {
                let axis = rect_axis(*dir);
                let offset = p - *center;
                offset.dot(axis).abs() <= *half_length
                    && offset.dot(ortho_left(axis)).abs() <= *half_width
            }
        }
    }

    /// Distance to the arena edge: positive inside, negative outside
    pub fn distance_to_border(&self, p: Vec2) -> f32 {
        match self {
            ArenaBounds::Circle { center, radius } => radius - (p - *center).length(),
            ArenaBounds::Rect {
                center,
                dir,
                half_width,
                half_length,
            } => {
                let axis = rect_axis(*dir);
                let offset = p - *center;
                let slack_len = half_length - offset.dot(axis).abs();
                let slack_wid = half_width - offset.dot(ortho_left(axis)).abs();
                if slack_len >= 0.0 && slack_wid >= 0.0 {
                    slack_len.min(slack_wid)
                } else {
                    let over_len = (-slack_len).max(0.0);
                    let over_wid = (-slack_wid).max(0.0);
                    if over_len > 0.0 && over_wid > 0.0 {
                        -over_len.hypot(over_wid)
                    } else {
                        -over_len.max(over_wid)
                    }
                }
            }
        }
    }

    /// Geometric center of the playfield
    pub fn center(&self) -> Vec2 {
        match self {
            ArenaBounds::Circle { center, .. } => *center,
            ArenaBounds::Rect { center, .. } => *center,
        }
    }

    /// Radius of a circle enclosing the playfield
    pub fn approx_radius(&self) -> f32 {
        match self {
            ArenaBounds::Circle { radius, .. } => *radius,
            ArenaBounds::Rect {
                half_width,
                half_length,
                ..
            } => half_length.hypot(*half_width),
        }
    }
}

/// Normalized rect axis with the +X fallback for degenerate directions
fn rect_axis(dir: Vec2) -> Vec2 {
    if dir.length_squared() <= f32::EPSILON {
        Vec2::X
    } else {
        dir.normalize()
    }
}
