//! Circle overlap queries
//!
//! Every entity collides as a circle. Distances are measured straight across
//! the arena; overlap does not look through the wrap edges.

use glam::Vec2;

use super::asteroid::Asteroid;

/// Whether two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Index of the first asteroid overlapping the given circle
pub fn first_asteroid_hit(asteroids: &[Asteroid], pos: Vec2, radius: f32) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| circles_overlap(pos, radius, a.pos, a.radius()))
}
