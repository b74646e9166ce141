//! Lane Chase entry point
//!
//! Runs the simulation headless with a simple dodge autopilot, which
//! exercises the whole stack: fixed-timestep ticking, the enemy
//! lifecycle, bonus scoring, profile persistence, and (when an API URL
//! is configured) cloud score submission and the leaderboard.
//!
//! Environment:
//! - `CHASE_API_URL`  base URL of the score service (optional)
//! - `CHASE_PLAYER`   display name to save before playing (optional)
//! - `CHASE_SEED`     session seed (defaults to the clock)
//! - `CHASE_RUN_SECS` how long to run the demo (default 30)

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use lane_chase::Session;
use lane_chase::config::SimConfig;
use lane_chase::consts::SIM_DT;
use lane_chase::leaderboard::{
    DEFAULT_LEADERBOARD_LIMIT, HttpScoreService, ScoreService,
};
use lane_chase::profile::ProfileStore;
use lane_chase::sim::{GamePhase, GameState, TickInput};

const PROFILE_PATH: &str = "chase_profile.json";

fn main() {
    env_logger::init();

    let seed = std::env::var("CHASE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(clock_seed);
    let run_secs: u64 = std::env::var("CHASE_RUN_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);
    let api_url = std::env::var("CHASE_API_URL").ok();

    let service: Option<Box<dyn ScoreService>> = match api_url.as_deref() {
        Some(url) => {
            let client = HttpScoreService::new(url);
            match client.health() {
                Ok(banner) => log::info!("score service reachable: {banner}"),
                Err(err) => log::warn!("score service probe failed: {err}"),
            }
            Some(Box::new(client))
        }
        None => {
            log::info!("no CHASE_API_URL set; running without the cloud leaderboard");
            None
        }
    };

    let store = ProfileStore::new(PROFILE_PATH);
    let mut session = match Session::new(SimConfig::default(), seed, store, service) {
        Ok(session) => session,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    if let Ok(name) = std::env::var("CHASE_PLAYER") {
        session.set_player_name(&name);
    }

    log::info!(
        "running as {} for {run_secs}s (seed {seed})",
        session.profile().player_name
    );

    let frame = Duration::from_secs_f32(SIM_DT);
    let started = Instant::now();
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    let mut lives = 0u32;

    while started.elapsed() < Duration::from_secs(run_secs) {
        session.advance_frame(SIM_DT, &input);
        input = TickInput::default();

        match session.state().phase {
            GamePhase::Playing => input.reverse = should_dodge(session.state()),
            GamePhase::GameOver => {
                lives += 1;
                input.restart = true;
            }
            GamePhase::NotStarted => input.start = true,
        }

        std::thread::sleep(frame);
    }

    log::info!(
        "demo done: {lives} run(s) ended, last score {}, best {}",
        session.state().score,
        session.best_score()
    );

    if let Some(url) = api_url {
        print_leaderboard(&url);
    }
}

/// Tap-to-turn autopilot: reverse when a live enemy is closing in from
/// ahead.
fn should_dodge(state: &GameState) -> bool {
    if !state.enemy.is_collidable() || state.player.invincible {
        return false;
    }
    let gap = state.enemy.position - state.player.position;
    let ahead = gap * state.player.direction.sign() > 0.0;
    ahead && gap.abs() < 1.5 * state.config.collision_distance
}

fn print_leaderboard(url: &str) {
    let client = HttpScoreService::new(url);
    match client.leaderboard(DEFAULT_LEADERBOARD_LIMIT) {
        Ok(entries) if entries.is_empty() => log::info!("leaderboard is empty"),
        Ok(entries) => {
            log::info!("top {} leaderboard:", entries.len());
            for (rank, entry) in entries.iter().enumerate() {
                log::info!("{:>2}. {:<20} {}", rank + 1, entry.player_name, entry.best_score);
            }
        }
        Err(err) => log::warn!("could not fetch leaderboard: {err}"),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
