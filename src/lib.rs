//! Asteroid Field - a toroidal space-combat simulation
//!
//! Core modules:
//! - `sim`: Simulation and collision core (entities, per-frame step, session life-cycle)
//! - `tuning`: Data-driven game balance
//! - `present`: One-way presentation seam for renderers and HUDs
//! - `highscores`: In-memory leaderboard fed by finished sessions

pub mod highscores;
pub mod present;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed step used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions (pixels, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 12.0;
    /// Degrees per second
    pub const SHIP_ROTATION_RATE: f32 = 200.0;
    /// Pixels per second squared
    pub const SHIP_THRUST_ACCEL: f32 = 300.0;
    pub const SHIP_MAX_SPEED: f32 = 300.0;
    /// Seconds between shots
    pub const SHIP_FIRE_INTERVAL: f32 = 0.25;
    pub const SHIP_INVINCIBILITY_DURATION: f32 = 3.0;
    /// Visible/hidden toggle period while invincible
    pub const SHIP_FLICKER_INTERVAL: f32 = 0.1;
    /// Facing at spawn: straight up in screen space (0 = right, 90 = down)
    pub const SHIP_SPAWN_ANGLE: f32 = -90.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 500.0;
    pub const BULLET_LIFESPAN: f32 = 1.0;
    pub const BULLET_RADIUS: f32 = 2.0;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const INITIAL_ASTEROID_COUNT: u32 = 4;
    pub const RESPAWN_DELAY: f32 = 2.0;
    /// Minimum distance between a wave-spawned asteroid and the ship
    pub const SPAWN_CLEARANCE: f32 = 150.0;

    /// Per-vertex radial jitter for asteroid outlines
    pub const ASTEROID_JAGGEDNESS: f32 = 0.35;
}
