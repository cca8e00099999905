//! Per-frame simulation step
//!
//! Advances the ship, bullets and asteroids, resolves collisions, and drives
//! the respawn / wave / game-over transitions.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidSize};
use super::bullet::Bullet;
use super::collision::first_asteroid_hit;
use super::kinematics::{random_between, velocity_from_angle};
use super::state::{GameEvent, GamePhase, GameState};

/// Upper bound on rejection-sampling rolls for one wave asteroid
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Held-key state for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Advance the game state by `dt` seconds.
///
/// Negative or non-finite `dt` is treated as zero. Does nothing once the
/// session is over.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_game_over() {
        return;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.clock += f64::from(dt);
    let now = state.clock;
    let arena = state.tuning.arena;

    state.ship.refresh_timers(now);
    if let GamePhase::Respawning { until } = state.phase
        && now >= until
    {
        respawn_ship(state);
    }

    // Ship control and firing
    if state.ship_active() {
        state.ship.update(dt, input, arena);
        if input.fire && state.ship.can_fire(now) {
            fire_bullet(state);
            state.ship.record_fire(now);
        }
    }

    // Bullets expire before they would move on their final frame
    for i in (0..state.bullets.len()).rev() {
        if !state.bullets[i].update(dt, arena) {
            state.remove_bullet(i);
        }
    }

    for asteroid in &mut state.asteroids {
        asteroid.update(dt, arena);
    }

    resolve_bullet_hits(state);
    resolve_ship_hit(state);

    if state.asteroids.is_empty() && !state.is_game_over() {
        state.wave += 1;
        spawn_wave(state);
    }
}

/// Launch a bullet from the ship's nose, inheriting the ship's momentum
fn fire_bullet(state: &mut GameState) {
    let tuning = state.tuning.bullet;
    let vel = velocity_from_angle(state.ship.angle, tuning.speed) + state.ship.vel;
    let id = state.next_entity_id();
    let bullet = Bullet::new(id, state.ship.nose(), vel, tuning.radius, tuning.lifespan);
    log::debug!("Bullet {} fired at {:.1}°", id, state.ship.angle);
    state.add_bullet(bullet);
}

/// Each bullet destroys at most the first asteroid it overlaps
fn resolve_bullet_hits(state: &mut GameState) {
    let mut i = 0;
    while i < state.bullets.len() {
        let bullet = &state.bullets[i];
        match first_asteroid_hit(&state.asteroids, bullet.pos, bullet.radius) {
            Some(hit) => {
                let points = state.asteroids[hit].size.score();
                state.score += points;
                state.emit(GameEvent::ScoreChanged { score: state.score });
                split_asteroid(state, hit);
                state.remove_bullet(i);
            }
            None => i += 1,
        }
    }
}

/// Ship collisions are ignored while respawning or invincible. The asteroid
/// survives the impact.
fn resolve_ship_hit(state: &mut GameState) {
    if !state.ship_active() || state.ship.is_invincible() {
        return;
    }
    if first_asteroid_hit(&state.asteroids, state.ship.pos, state.ship.radius()).is_some() {
        lose_life(state);
    }
}

/// Remove the asteroid at `index`, replacing it with two children of the next
/// tier down. Smallest asteroids leave nothing behind.
///
/// Children start at the parent's position, each with an independent random
/// heading and a speed drawn from the child tier's range.
pub fn split_asteroid(state: &mut GameState, index: usize) {
    let parent = state.remove_asteroid(index);
    let Some(child_size) = parent.child_size() else {
        log::debug!("Asteroid {} destroyed", parent.id);
        return;
    };

    for _ in 0..2 {
        let id = state.next_entity_id();
        let child = Asteroid::with_random_heading(id, parent.pos, child_size, &mut state.rng);
        state.add_asteroid(child);
    }
    log::debug!(
        "Asteroid {} split into two {} asteroids",
        parent.id,
        child_size.as_str()
    );
}

/// Spend a life; respawn after a delay or end the session
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.emit(GameEvent::LivesChanged { lives: state.lives });

    if state.lives == 0 {
        state.ship.release_timers();
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::ShipVisibility { visible: false });
        state.emit(GameEvent::GameOver { score: state.score });
        log::info!("Game over at wave {} with score {}", state.wave, state.score);
        return;
    }

    let until = state.clock + f64::from(state.tuning.session.respawn_delay);
    state.phase = GamePhase::Respawning { until };
    state.emit(GameEvent::ShipVisibility { visible: false });
    log::info!("Ship destroyed, {} lives left", state.lives);
}

fn respawn_ship(state: &mut GameState) {
    let center = state.tuning.arena.center();
    state.ship.reset(center, state.clock);
    state.phase = GamePhase::Playing;
    state.emit(GameEvent::ShipVisibility { visible: true });
    log::info!("Ship respawned");
}

/// Number of large asteroids in wave `wave` (1-based)
pub fn wave_asteroid_count(initial: u32, wave: u32) -> u32 {
    initial + wave.saturating_sub(1)
}

/// Spawn the current wave: large asteroids on the arena edges, each at least
/// the configured clearance away from the ship.
pub fn spawn_wave(state: &mut GameState) {
    let count = wave_asteroid_count(state.tuning.session.initial_asteroid_count, state.wave);
    log::info!("Wave {}: spawning {} asteroids", state.wave, count);
    state.emit(GameEvent::WaveStarted { wave: state.wave });

    for _ in 0..count {
        let pos = pick_spawn_point(state);
        let id = state.next_entity_id();
        let asteroid = Asteroid::with_random_heading(id, pos, AsteroidSize::Large, &mut state.rng);
        state.add_asteroid(asteroid);
    }
}

/// Rejection-sample an edge point clear of the ship. If the arena is too small
/// to ever satisfy the clearance, settle for the farthest roll.
fn pick_spawn_point(state: &mut GameState) -> Vec2 {
    let ship_pos = state.ship.pos;
    let clearance = state.tuning.session.spawn_clearance;
    let arena = state.tuning.arena;

    let mut best = Vec2::ZERO;
    let mut best_dist = f32::NEG_INFINITY;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = random_edge_point(&mut state.rng, arena.width, arena.height);
        let dist = candidate.distance(ship_pos);
        if dist >= clearance {
            return candidate;
        }
        if dist > best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    log::warn!(
        "No spawn point {:.0}px clear of the ship after {} rolls; using {:.0}px",
        clearance,
        MAX_SPAWN_ATTEMPTS,
        best_dist
    );
    best
}

/// Uniform point along one of the four arena edges
fn random_edge_point<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    match rng.random_range(0..4u8) {
        0 => Vec2::new(random_between(rng, 0.0, width), 0.0),
        1 => Vec2::new(width, random_between(rng, 0.0, height)),
        2 => Vec2::new(random_between(rng, 0.0, width), height),
        _ => Vec2::new(0.0, random_between(rng, 0.0, height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::Arena;
    use crate::tuning::Tuning;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 12345);
        state.asteroids.clear();
        state.drain_events();
        state
    }

    fn parked(state: &mut GameState, pos: Vec2, size: AsteroidSize) -> u32 {
        let id = state.next_entity_id();
        let asteroid = Asteroid::new(id, pos, Vec2::ZERO, size, &mut state.rng);
        state.asteroids.push(asteroid);
        id
    }

    #[test]
    fn test_fire_spawns_bullet_at_nose_with_momentum() {
        let mut state = quiet_state();
        parked(&mut state, Vec2::new(50.0, 50.0), AsteroidSize::Large);
        state.ship.vel = Vec2::new(30.0, 0.0);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 0.0);

        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        let expected = velocity_from_angle(-90.0, state.tuning.bullet.speed) + Vec2::new(30.0, 0.0);
        assert!((bullet.vel - expected).length() < 1e-3);
        assert!((bullet.pos - state.ship.nose()).length() < 1e-3);
    }

    #[test]
    fn test_fire_rate_gate() {
        let mut state = quiet_state();
        parked(&mut state, Vec2::new(50.0, 50.0), AsteroidSize::Large);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        tick(&mut state, &fire, SIM_DT);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_removed_after_lifespan() {
        let mut state = quiet_state();
        parked(&mut state, Vec2::new(50.0, 50.0), AsteroidSize::Large);
        let id = state.next_entity_id();
        state.add_bullet(Bullet::new(id, Vec2::new(700.0, 500.0), Vec2::new(0.0, -10.0), 2.0, 0.1));
        tick(&mut state, &TickInput::default(), 0.06);
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &TickInput::default(), 0.06);
        assert!(state.bullets.is_empty());
        assert!(state.drain_events().contains(&GameEvent::Despawned { id }));
    }

    #[test]
    fn test_bullet_hits_one_asteroid_only() {
        let mut state = quiet_state();
        let pos = Vec2::new(100.0, 100.0);
        parked(&mut state, pos, AsteroidSize::Small);
        parked(&mut state, pos, AsteroidSize::Small);
        let id = state.next_entity_id();
        state.add_bullet(Bullet::new(id, pos, Vec2::ZERO, 2.0, 1.0));

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.score, AsteroidSize::Small.score());
    }

    #[test]
    fn test_split_large_into_two_medium() {
        let mut state = quiet_state();
        let pos = Vec2::new(200.0, 150.0);
        let parent = parked(&mut state, pos, AsteroidSize::Large);
        split_asteroid(&mut state, 0);

        assert_eq!(state.asteroids.len(), 2);
        let (min, max) = AsteroidSize::Medium.speed_range();
        for child in &state.asteroids {
            assert_eq!(child.size, AsteroidSize::Medium);
            assert_eq!(child.pos, pos);
            let speed = child.vel.length();
            assert!(speed >= min - 1e-3 && speed <= max + 1e-3);
            assert_ne!(child.id, parent);
        }
    }

    #[test]
    fn test_split_small_leaves_nothing() {
        let mut state = quiet_state();
        let id = parked(&mut state, Vec2::new(200.0, 150.0), AsteroidSize::Small);
        split_asteroid(&mut state, 0);
        assert!(state.asteroids.is_empty());
        assert!(state.drain_events().contains(&GameEvent::Despawned { id }));
    }

    #[test]
    fn test_ship_hit_keeps_asteroid_and_respawns() {
        let mut state = quiet_state();
        let ship_pos = state.ship.pos;
        parked(&mut state, ship_pos, AsteroidSize::Large);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.lives, 2);
        assert_eq!(state.asteroids.len(), 1);
        assert!(matches!(state.phase, GamePhase::Respawning { .. }));
        assert!(!state.ship_visible());

        // Input is ignored while respawning
        let thrust = TickInput {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &thrust, SIM_DT);
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert!(state.bullets.is_empty());

        // Respawn delay elapses
        let delay = state.tuning.session.respawn_delay;
        tick(&mut state, &TickInput::default(), delay);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.ship.is_invincible());
        assert_eq!(state.ship.pos, state.tuning.arena.center());
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_wave_advance_when_cleared() {
        let mut state = quiet_state();
        let pos = Vec2::new(100.0, 100.0);
        parked(&mut state, pos, AsteroidSize::Small);
        let id = state.next_entity_id();
        state.add_bullet(Bullet::new(id, pos, Vec2::ZERO, 2.0, 1.0));

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.wave, 2);
        let expected = wave_asteroid_count(state.tuning.session.initial_asteroid_count, 2);
        assert_eq!(state.asteroids.len(), expected as usize);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
    }

    #[test]
    fn test_wave_spawn_clearance() {
        for seed in 0..20 {
            let state = GameState::new(Tuning::default(), seed);
            let clearance = state.tuning.session.spawn_clearance;
            for a in &state.asteroids {
                assert!(a.pos.distance(state.ship.pos) >= clearance);
                let on_edge = a.pos.x == 0.0
                    || a.pos.y == 0.0
                    || a.pos.x == state.tuning.arena.width
                    || a.pos.y == state.tuning.arena.height;
                assert!(on_edge);
            }
        }
    }

    #[test]
    fn test_wave_spawn_clearance_from_corner() {
        for seed in 0..50 {
            let mut state = GameState::new(Tuning::default(), seed);
            state.asteroids.clear();
            state.ship.pos = Vec2::new(5.0, 5.0);
            spawn_wave(&mut state);

            let clearance = state.tuning.session.spawn_clearance;
            assert_eq!(
                state.asteroids.len(),
                state.tuning.session.initial_asteroid_count as usize
            );
            for a in &state.asteroids {
                assert!(a.pos.distance(state.ship.pos) >= clearance);
            }
        }
    }

    #[test]
    fn test_spawn_falls_back_to_farthest_roll() {
        // No edge point is ever 150px from the middle of a 100x100 arena
        let tuning = Tuning {
            arena: Arena::new(100.0, 100.0),
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 31);
        assert_eq!(
            state.asteroids.len(),
            tuning.session.initial_asteroid_count as usize
        );

        let ship_pos = state.ship.pos;
        let mut replay = state.rng.clone();
        let mut expected = Vec2::ZERO;
        let mut best = f32::NEG_INFINITY;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = random_edge_point(&mut replay, 100.0, 100.0);
            let dist = candidate.distance(ship_pos);
            if dist > best {
                expected = candidate;
                best = dist;
            }
        }

        let picked = pick_spawn_point(&mut state);
        assert_eq!(picked, expected);
        assert!(picked.distance(ship_pos) < tuning.session.spawn_clearance);
    }

    #[test]
    fn test_clock_advances_late_in_long_session() {
        let mut state = quiet_state();
        parked(&mut state, Vec2::new(50.0, 50.0), AsteroidSize::Large);
        state.clock = 600_000.0;
        state.ship.make_invincible(state.clock);
        let start = state.clock;

        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        assert!((state.clock - start - 10.0).abs() < 1e-3);
        assert!(!state.ship.is_invincible());
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut state = quiet_state();
        parked(&mut state, Vec2::new(50.0, 50.0), AsteroidSize::Large);
        tick(&mut state, &TickInput::default(), -1.0);
        assert_eq!(state.clock, 0.0);
        tick(&mut state, &TickInput::default(), f32::NAN);
        assert_eq!(state.clock, 0.0);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = quiet_state();
        state.lives = 1;
        let ship_pos = state.ship.pos;
        parked(&mut state, ship_pos, AsteroidSize::Large);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));

        let clock = state.clock;
        tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(state.clock, clock);
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
