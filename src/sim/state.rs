//! Session state and core simulation types
//!
//! The state owns the ship and every live asteroid and bullet. Entities never
//! point back at the state or at each other.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::bullet::Bullet;
use super::ship::Ship;
use crate::tuning::Tuning;

/// Session life-cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship under player control
    Playing,
    /// Ship hidden after losing a life; comes back at `until`
    Respawning { until: f64 },
    /// Out of lives. Terminal until a new session starts.
    GameOver,
}

/// What a renderer needs to build an entity's visual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Ship { radius: f32 },
    Asteroid { size: AsteroidSize, vertices: Vec<Vec2> },
    Bullet { radius: f32 },
}

/// One-way notifications for presentation collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, shape: Shape },
    Despawned { id: u32 },
    ShipVisibility { visible: bool },
    ScoreChanged { score: u64 },
    LivesChanged { lives: u32 },
    WaveStarted { wave: u32 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Simulation clock (seconds); every deadline compares against it
    pub clock: f64,
    /// Wave number, starting at 1
    pub wave: u32,
    pub lives: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub ship: Ship,
    /// Live asteroids in spawn order
    pub asteroids: Vec<Asteroid>,
    /// Live bullets in spawn order
    pub bullets: Vec<Bullet>,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a seeded session at wave 1
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    /// Start a session seeded from the thread RNG
    pub fn with_entropy(tuning: Tuning) -> Self {
        Self::with_rng(tuning, Pcg32::from_rng(&mut rand::rng()))
    }

    fn with_rng(tuning: Tuning, rng: Pcg32) -> Self {
        let ship = Ship::new(0, tuning.arena.center(), tuning.ship);
        let mut state = Self {
            tuning,
            clock: 0.0,
            wave: 1,
            lives: tuning.session.starting_lives,
            score: 0,
            phase: GamePhase::Playing,
            ship,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            rng,
            events: Vec::new(),
            next_id: 1,
        };
        state.begin_session();
        state
    }

    /// Spawn the ship and the first wave for a fresh session
    fn begin_session(&mut self) {
        let id = self.next_entity_id();
        self.ship = Ship::new(id, self.tuning.arena.center(), self.tuning.ship);
        self.emit(GameEvent::Spawned {
            id,
            shape: Shape::Ship {
                radius: self.ship.radius(),
            },
        });
        self.emit(GameEvent::ScoreChanged { score: self.score });
        self.emit(GameEvent::LivesChanged { lives: self.lives });
        log::info!("New session: {} lives", self.lives);
        super::tick::spawn_wave(self);
    }

    /// Tear down the current session and start over at wave 1.
    ///
    /// Every entity is despawned and the ship's timers and any pending
    /// respawn deadline are dropped before the new session installs its own.
    pub fn new_session(&mut self) {
        self.ship.release_timers();
        self.phase = GamePhase::Playing;

        let ids: Vec<u32> = std::iter::once(self.ship.id)
            .chain(self.asteroids.iter().map(|a| a.id))
            .chain(self.bullets.iter().map(|b| b.id))
            .collect();
        for id in ids {
            self.emit(GameEvent::Despawned { id });
        }
        self.asteroids.clear();
        self.bullets.clear();

        self.wave = 1;
        self.lives = self.tuning.session.starting_lives;
        self.score = 0;
        self.begin_session();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every notification recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the ship is in play (not waiting to respawn, not game over)
    pub fn ship_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether a renderer should draw the ship this frame
    pub fn ship_visible(&self) -> bool {
        self.ship_active() && self.ship.flicker_visible(self.clock)
    }

    /// Add an asteroid and announce it
    pub fn add_asteroid(&mut self, asteroid: Asteroid) {
        self.emit(GameEvent::Spawned {
            id: asteroid.id,
            shape: Shape::Asteroid {
                size: asteroid.size,
                vertices: asteroid.vertices.clone(),
            },
        });
        self.asteroids.push(asteroid);
    }

    /// Add a bullet and announce it
    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.emit(GameEvent::Spawned {
            id: bullet.id,
            shape: Shape::Bullet {
                radius: bullet.radius,
            },
        });
        self.bullets.push(bullet);
    }

    /// Remove the asteroid at `index` and announce it
    pub fn remove_asteroid(&mut self, index: usize) -> Asteroid {
        let asteroid = self.asteroids.remove(index);
        self.emit(GameEvent::Despawned { id: asteroid.id });
        asteroid
    }

    /// Remove the bullet at `index` and announce it
    pub fn remove_bullet(&mut self, index: usize) -> Bullet {
        let bullet = self.bullets.remove(index);
        self.emit(GameEvent::Despawned { id: bullet.id });
        bullet
    }
}
