//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::{
    Arena, clamp_magnitude, normalize_angle, velocity_from_angle, wrap_position,
};
use super::tick::TickInput;
use crate::consts::SHIP_SPAWN_ANGLE;
use crate::tuning::ShipTuning;

/// Active invincibility window, as deadlines on the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invincibility {
    pub started: f64,
    pub until: f64,
}

/// The player's ship.
///
/// Ships know nothing about lives; the session decides when they die and
/// calls [`Ship::reset`] to bring them back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing in degrees (0 = right, 90 = down)
    pub angle: f32,
    /// Clock value of the last shot, `None` if it never fired
    pub last_fire: Option<f64>,
    pub invincibility: Option<Invincibility>,
    pub tuning: ShipTuning,
}

impl Ship {
    pub fn new(id: u32, pos: Vec2, tuning: ShipTuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            angle: SHIP_SPAWN_ANGLE,
            last_fire: None,
            invincibility: None,
            tuning,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.tuning.radius
    }

    /// Rotate, thrust and drift. There is no drag: velocity carries over
    /// between frames until thrust changes it.
    pub fn update(&mut self, dt: f32, input: &TickInput, arena: Arena) {
        if input.turn_left {
            self.angle -= self.tuning.rotation_rate * dt;
        }
        if input.turn_right {
            self.angle += self.tuning.rotation_rate * dt;
        }
        self.angle = normalize_angle(self.angle);

        if input.thrust {
            self.vel += velocity_from_angle(self.angle, self.tuning.thrust_accel * dt);
            self.vel = clamp_magnitude(self.vel, self.tuning.max_speed);
        }

        self.pos = wrap_position(self.pos + self.vel * dt, self.radius(), arena);
    }

    /// Whether the fire-rate gate is open at `now`
    pub fn can_fire(&self, now: f64) -> bool {
        match self.last_fire {
            Some(last) => now - last >= f64::from(self.tuning.fire_interval),
            None => true,
        }
    }

    /// Close the fire-rate gate; call once per bullet spawned
    pub fn record_fire(&mut self, now: f64) {
        self.last_fire = Some(now);
    }

    /// Where bullets leave the ship
    pub fn nose(&self) -> Vec2 {
        self.pos + velocity_from_angle(self.angle, self.radius())
    }

    /// Start (or restart) the invincibility window at `now`
    pub fn make_invincible(&mut self, now: f64) {
        self.invincibility = Some(Invincibility {
            started: now,
            until: now + f64::from(self.tuning.invincibility_duration),
        });
    }

    /// Drop expired deadlines. Call once per step after the clock advances.
    pub fn refresh_timers(&mut self, now: f64) {
        if let Some(inv) = self.invincibility
            && now >= inv.until
        {
            self.invincibility = None;
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_some()
    }

    /// Flicker phase while invincible: visible on even intervals, hidden on
    /// odd ones. Always visible otherwise.
    pub fn flicker_visible(&self, now: f64) -> bool {
        match self.invincibility {
            Some(inv) if self.tuning.flicker_interval > 0.0 => {
                let elapsed = (now - inv.started).max(0.0);
                let phase = (elapsed / f64::from(self.tuning.flicker_interval)).floor() as u64;
                phase % 2 == 0
            }
            _ => true,
        }
    }

    /// Respawn at `pos`: stopped, facing up, invincible from `now`
    pub fn reset(&mut self, pos: Vec2, now: f64) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.angle = SHIP_SPAWN_ANGLE;
        self.make_invincible(now);
    }

    /// Forget every pending deadline (session teardown / game over)
    pub fn release_timers(&mut self) {
        self.invincibility = None;
        self.last_fire = None;
    }
}
