//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform concerns:
//! - One step runs to completion per call to [`tick`]
//! - Timers are deadlines on the state's own clock, never callbacks
//! - Presentation only hears about changes through [`GameEvent`]s

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod kinematics;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize};
pub use bullet::Bullet;
pub use collision::{circles_overlap, first_asteroid_hit};
pub use kinematics::{
    Arena, clamp_magnitude, generate_asteroid_vertices, normalize_angle, random_between,
    velocity_from_angle, wrap_position,
};
pub use ship::{Invincibility, Ship};
pub use state::{GameEvent, GamePhase, GameState, Shape};
pub use tick::{TickInput, spawn_wave, split_asteroid, tick, wave_asteroid_count};
