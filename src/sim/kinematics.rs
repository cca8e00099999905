//! Kinematics helpers for the toroidal arena
//!
//! Angles are in degrees with 0° pointing right (+x) and increasing clockwise,
//! since screen-space y grows downward.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Rectangular wrap-around play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Wrap a position across the arena edges.
///
/// An entity only reappears on the opposite side once it is fully off-screen:
/// leaving past `width + margin` lands it at `-margin`, leaving past `-margin`
/// lands it at `width + margin`. Both axes are handled independently, so a
/// diagonal exit wraps both in the same call.
pub fn wrap_position(pos: Vec2, margin: f32, arena: Arena) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, margin, arena.width),
        wrap_axis(pos.y, margin, arena.height),
    )
}

#[inline]
fn wrap_axis(value: f32, margin: f32, extent: f32) -> f32 {
    if value - margin > extent {
        -margin
    } else if value + margin < 0.0 {
        extent + margin
    } else {
        value
    }
}

/// Velocity vector of length `speed` pointing along `angle_deg`
#[inline]
pub fn velocity_from_angle(angle_deg: f32, speed: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(speed * rad.cos(), speed * rad.sin())
}

/// Normalized angle to [0°, 360°)
#[inline]
pub fn normalize_angle(angle_deg: f32) -> f32 {
    let wrapped = angle_deg.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Scale `v` down to `max` length if it is longer, keeping its direction.
///
/// Vectors at or below `max` (including exactly at it) come back untouched.
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let magnitude = v.length();
    if magnitude <= max || magnitude == 0.0 {
        return v;
    }
    v * (max / magnitude)
}

/// Uniform sample in `[min, max)`; collapses to `min` for empty ranges
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.random_range(min..max)
}

/// Jagged polygon outline around the origin.
///
/// Vertex `i` sits at angle `i * 2π / count` (vertex 0 lies on +x) and at a
/// distance of `radius` scaled by an independent factor in
/// `[1 - jaggedness, 1 + jaggedness]`.
pub fn generate_asteroid_vertices<R: Rng + ?Sized>(
    rng: &mut R,
    radius: f32,
    count: usize,
    jaggedness: f32,
) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / count.max(1) as f32;
    (0..count)
        .map(|i| {
            let theta = i as f32 * step;
            let factor = random_between(rng, 1.0 - jaggedness, 1.0 + jaggedness);
            let r = radius * factor;
            Vec2::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}
