//! Asteroid Field headless driver
//!
//! Runs sessions at a fixed timestep with a simple autopilot and reports the
//! leaderboard as JSON.
//!
//! Usage: `asteroid-field [tuning.json] [--seed N] [--sessions N]`

use asteroid_field::consts::SIM_DT;
use asteroid_field::present::{Pose, PresentationBridge, Presenter};
use asteroid_field::sim::{GameState, Shape, TickInput, tick};
use asteroid_field::{HighScores, Tuning};

/// Stop a session that outlives this many frames (ten minutes at 60 Hz)
const MAX_FRAMES_PER_SESSION: u32 = 60 * 60 * 10;

/// Presenter that narrates the session through `log`
#[derive(Default)]
struct LogPresenter {
    final_score: Option<u64>,
    wave: u32,
}

impl Presenter for LogPresenter {
    type Handle = u32;

    fn create(&mut self, id: u32, shape: &Shape) -> u32 {
        match shape {
            Shape::Ship { .. } => log::debug!("+ship #{id}"),
            Shape::Asteroid { size, vertices } => {
                log::debug!("+{} asteroid #{id} ({} vertices)", size.as_str(), vertices.len())
            }
            Shape::Bullet { .. } => log::trace!("+bullet #{id}"),
        }
        id
    }

    fn destroy(&mut self, id: u32, _handle: u32) {
        log::trace!("-#{id}");
    }

    fn place(&mut self, _handle: &mut u32, _pose: Pose) {}

    fn score_changed(&mut self, score: u64) {
        log::debug!("Score: {score}");
    }

    fn lives_changed(&mut self, lives: u32) {
        log::info!("Lives: {lives}");
    }

    fn wave_started(&mut self, wave: u32) {
        self.wave = wave;
    }

    fn game_over(&mut self, final_score: u64) {
        self.final_score = Some(final_score);
    }
}

/// Spin and shoot, with a short thrust burst every couple of seconds
fn autopilot(frame: u32) -> TickInput {
    TickInput {
        turn_left: false,
        turn_right: true,
        thrust: frame % 120 < 10,
        fire: true,
    }
}

struct Args {
    tuning_path: Option<String>,
    seed: Option<u64>,
    sessions: u32,
}

fn parse_args() -> Args {
    let mut args = Args {
        tuning_path: None,
        seed: None,
        sessions: 1,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => match iter.next().and_then(|v| v.parse().ok()) {
                Some(seed) => args.seed = Some(seed),
                None => log::warn!("--seed expects an integer; ignoring"),
            },
            "--sessions" => match iter.next().and_then(|v| v.parse().ok()) {
                Some(n) => args.sessions = n,
                None => log::warn!("--sessions expects an integer; ignoring"),
            },
            _ => args.tuning_path = Some(arg),
        }
    }
    args
}

fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let args = parse_args();
    let tuning = match &args.tuning_path {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    let mut state = match args.seed {
        Some(seed) => GameState::new(tuning, seed),
        None => GameState::with_entropy(tuning),
    };
    let mut bridge = PresentationBridge::new(LogPresenter::default());
    let mut high_scores = HighScores::new();

    for session in 1..=args.sessions {
        if session > 1 {
            state.new_session();
        }
        bridge.presenter_mut().final_score = None;

        let mut frame = 0;
        while !state.is_game_over() && frame < MAX_FRAMES_PER_SESSION {
            tick(&mut state, &autopilot(frame), SIM_DT);
            bridge.frame(&mut state);
            frame += 1;
        }

        let presenter = bridge.presenter();
        let score = presenter.final_score.unwrap_or(state.score);
        if presenter.final_score.is_none() {
            log::warn!("Session {session} hit the frame cap at wave {}", presenter.wave);
        }
        match high_scores.add_score(score, state.wave) {
            Some(rank) => log::info!("Session {session}: {score} points, rank #{rank}"),
            None => log::info!("Session {session}: {score} points"),
        }
    }

    if let Some(best) = high_scores.top_score() {
        log::info!("Best score: {best}");
    }
    match high_scores.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize high scores: {err}"),
    }
}
