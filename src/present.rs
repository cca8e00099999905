//! Presentation seam
//!
//! Renderers and HUDs sit behind [`Presenter`]. The [`PresentationBridge`]
//! keeps each entity's render handle keyed by entity id, applies the state's
//! events, and pushes poses out every frame. Nothing flows back into the
//! simulation.

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{GameEvent, GameState, Shape};

/// Where and how to draw an entity this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    /// Degrees, 0 = right, 90 = down
    pub angle: f32,
    pub visible: bool,
}

/// A rendering / HUD collaborator
pub trait Presenter {
    /// Opaque per-entity visual
    type Handle;

    fn create(&mut self, id: u32, shape: &Shape) -> Self::Handle;
    fn destroy(&mut self, id: u32, handle: Self::Handle);
    fn place(&mut self, handle: &mut Self::Handle, pose: Pose);

    fn score_changed(&mut self, _score: u64) {}
    fn lives_changed(&mut self, _lives: u32) {}
    fn wave_started(&mut self, _wave: u32) {}
    fn game_over(&mut self, _final_score: u64) {}
}

/// Routes state changes to a [`Presenter`]
pub struct PresentationBridge<P: Presenter> {
    presenter: P,
    handles: HashMap<u32, P::Handle>,
}

impl<P: Presenter> PresentationBridge<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            handles: HashMap::new(),
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Number of live render handles
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn has_handle(&self, id: u32) -> bool {
        self.handles.contains_key(&id)
    }

    /// Drain pending events and refresh every pose. Call once per frame after
    /// [`crate::sim::tick`].
    pub fn frame(&mut self, state: &mut GameState) {
        for event in state.drain_events() {
            self.apply(&event);
        }
        self.sync(state);
    }

    /// Apply one event
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Spawned { id, shape } => {
                let handle = self.presenter.create(*id, shape);
                if let Some(stale) = self.handles.insert(*id, handle) {
                    log::warn!("Entity {id} spawned twice; dropping old handle");
                    self.presenter.destroy(*id, stale);
                }
            }
            GameEvent::Despawned { id } => match self.handles.remove(id) {
                Some(handle) => self.presenter.destroy(*id, handle),
                None => log::debug!("Despawn for unknown entity {id}"),
            },
            // Ship visibility is carried by the pose on the next sync
            GameEvent::ShipVisibility { .. } => {}
            GameEvent::ScoreChanged { score } => self.presenter.score_changed(*score),
            GameEvent::LivesChanged { lives } => self.presenter.lives_changed(*lives),
            GameEvent::WaveStarted { wave } => self.presenter.wave_started(*wave),
            GameEvent::GameOver { score } => self.presenter.game_over(*score),
        }
    }

    /// Push the current pose of every live entity
    pub fn sync(&mut self, state: &GameState) {
        let ship = &state.ship;
        if let Some(handle) = self.handles.get_mut(&ship.id) {
            self.presenter.place(
                handle,
                Pose {
                    pos: ship.pos,
                    angle: ship.angle,
                    visible: state.ship_visible(),
                },
            );
        }

        for asteroid in &state.asteroids {
            if let Some(handle) = self.handles.get_mut(&asteroid.id) {
                self.presenter.place(
                    handle,
                    Pose {
                        pos: asteroid.pos,
                        angle: 0.0,
                        visible: true,
                    },
                );
            }
        }

        for bullet in &state.bullets {
            if let Some(handle) = self.handles.get_mut(&bullet.id) {
                let angle = bullet.vel.y.atan2(bullet.vel.x).to_degrees();
                self.presenter.place(
                    handle,
                    Pose {
                        pos: bullet.pos,
                        angle,
                        visible: true,
                    },
                );
            }
        }
    }
}
