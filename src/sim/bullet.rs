//! Player projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::{Arena, wrap_position};

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at launch
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds left before the bullet expires
    pub lifespan: f32,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, lifespan: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            lifespan,
        }
    }

    /// Advance one step. Returns `false` once the lifespan runs out; an
    /// expiring bullet does not move on that final call.
    pub fn update(&mut self, dt: f32, arena: Arena) -> bool {
        self.lifespan -= dt;
        if self.lifespan <= 0.0 {
            return false;
        }
        self.pos = wrap_position(self.pos + self.vel * dt, self.radius, arena);
        true
    }
}
