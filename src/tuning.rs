//! Data-driven game balance
//!
//! Every "configured" gameplay number lives here. Files are JSON; missing keys
//! fall back to the defaults in [`crate::consts`], so a tuning file only needs
//! to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Arena;

/// Errors raised while loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Ship handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    pub radius: f32,
    /// Degrees per second
    pub rotation_rate: f32,
    /// Pixels per second squared
    pub thrust_accel: f32,
    pub max_speed: f32,
    /// Minimum seconds between shots
    pub fire_interval: f32,
    pub invincibility_duration: f32,
    pub flicker_interval: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            radius: SHIP_RADIUS,
            rotation_rate: SHIP_ROTATION_RATE,
            thrust_accel: SHIP_THRUST_ACCEL,
            max_speed: SHIP_MAX_SPEED,
            fire_interval: SHIP_FIRE_INTERVAL,
            invincibility_duration: SHIP_INVINCIBILITY_DURATION,
            flicker_interval: SHIP_FLICKER_INTERVAL,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub speed: f32,
    /// Seconds before the bullet expires
    pub lifespan: f32,
    pub radius: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            lifespan: BULLET_LIFESPAN,
            radius: BULLET_RADIUS,
        }
    }
}

/// Lives, waves and respawn pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    pub starting_lives: u32,
    /// Large asteroids in wave 1; each later wave adds one
    pub initial_asteroid_count: u32,
    pub respawn_delay: f32,
    pub spawn_clearance: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            initial_asteroid_count: INITIAL_ASTEROID_COUNT,
            respawn_delay: RESPAWN_DELAY,
            spawn_clearance: SPAWN_CLEARANCE,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: Arena,
    pub ship: ShipTuning,
    pub bullet: BulletTuning,
    pub session: SessionTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;

        positive("ship.radius", self.ship.radius)?;
        non_negative("ship.rotation_rate", self.ship.rotation_rate)?;
        non_negative("ship.thrust_accel", self.ship.thrust_accel)?;
        positive("ship.max_speed", self.ship.max_speed)?;
        non_negative("ship.fire_interval", self.ship.fire_interval)?;
        non_negative("ship.invincibility_duration", self.ship.invincibility_duration)?;
        positive("ship.flicker_interval", self.ship.flicker_interval)?;

        positive("bullet.speed", self.bullet.speed)?;
        positive("bullet.lifespan", self.bullet.lifespan)?;
        positive("bullet.radius", self.bullet.radius)?;

        if self.session.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "session.starting_lives",
                reason: "must be at least 1",
            });
        }
        if self.session.initial_asteroid_count == 0 {
            return Err(TuningError::Invalid {
                field: "session.initial_asteroid_count",
                reason: "must be at least 1",
            });
        }
        non_negative("session.respawn_delay", self.session.respawn_delay)?;
        non_negative("session.spawn_clearance", self.session.spawn_clearance)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a finite number greater than zero",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a finite number no less than zero",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "ship": { "max_speed": 120.0 }, "session": { "starting_lives": 5 } }"#;
        let tuning = Tuning::from_json(json).expect("partial tuning should parse");
        assert_eq!(tuning.ship.max_speed, 120.0);
        assert_eq!(tuning.ship.radius, SHIP_RADIUS);
        assert_eq!(tuning.session.starting_lives, 5);
        assert_eq!(tuning.arena, Arena::default());
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = Tuning::from_json(r#"{ "session": { "starting_lives": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "session.starting_lives",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_arena() {
        let err =
            Tuning::from_json(r#"{ "arena": { "width": -1.0, "height": 600.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "arena.width", .. }));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
