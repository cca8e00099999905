//! Drifting asteroids and their size tiers

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::{
    Arena, generate_asteroid_vertices, random_between, velocity_from_angle, wrap_position,
};
use crate::consts::ASTEROID_JAGGEDNESS;

/// Size tier, ordered Large > Medium > Small
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 3] =
        [AsteroidSize::Large, AsteroidSize::Medium, AsteroidSize::Small];

    /// Collision radius (also the wrap margin)
    pub const fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 22.0,
            AsteroidSize::Small => 11.0,
        }
    }

    /// Drift speed range in pixels per second, `[min, max)`
    pub const fn speed_range(self) -> (f32, f32) {
        match self {
            AsteroidSize::Large => (20.0, 50.0),
            AsteroidSize::Medium => (40.0, 80.0),
            AsteroidSize::Small => (60.0, 120.0),
        }
    }

    /// Outline vertex count
    pub const fn vertex_count(self) -> usize {
        match self {
            AsteroidSize::Large => 12,
            AsteroidSize::Medium => 10,
            AsteroidSize::Small => 8,
        }
    }

    /// Points awarded for shooting one
    pub const fn score(self) -> u64 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Tier produced when this one splits, `None` for the smallest
    pub const fn child(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AsteroidSize::Large => "large",
            AsteroidSize::Medium => "medium",
            AsteroidSize::Small => "small",
        }
    }
}

/// An asteroid entity. Velocity is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    /// Outline offsets from `pos`, fixed for the asteroid's lifetime
    pub vertices: Vec<Vec2>,
}

impl Asteroid {
    /// Create an asteroid with an explicit velocity and a fresh outline
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        vel: Vec2,
        size: AsteroidSize,
        rng: &mut R,
    ) -> Self {
        let vertices = generate_asteroid_vertices(
            rng,
            size.radius(),
            size.vertex_count(),
            ASTEROID_JAGGEDNESS,
        );
        Self {
            id,
            pos,
            vel,
            size,
            vertices,
        }
    }

    /// Create an asteroid heading in a random direction at a speed drawn from
    /// its tier's range
    pub fn with_random_heading<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        size: AsteroidSize,
        rng: &mut R,
    ) -> Self {
        let (min_speed, max_speed) = size.speed_range();
        let angle = random_between(rng, 0.0, 360.0);
        let speed = random_between(rng, min_speed, max_speed);
        Self::new(id, pos, velocity_from_angle(angle, speed), size, rng)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    /// Tier of the two children this asteroid breaks into
    #[inline]
    pub fn child_size(&self) -> Option<AsteroidSize> {
        self.size.child()
    }

    /// Drift along the fixed velocity and wrap
    pub fn update(&mut self, dt: f32, arena: Arena) {
        self.pos = wrap_position(self.pos + self.vel * dt, self.radius(), arena);
    }
}
