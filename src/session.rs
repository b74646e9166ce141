//! Session shell around the deterministic simulation
//!
//! Owns the fixed-timestep accumulator, the player profile, and the one
//! component allowed to talk to the remote score service. The shell
//! drains simulation events each frame and applies the reconciliation
//! policy: the authoritative best is whatever the server last returned,
//! and whenever the local cache is ahead the local value is re-submitted
//! (at-least-once; the server's max-wins contract makes that idempotent).

use crate::config::{ConfigError, SimConfig};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::leaderboard::{ScoreService, ScoreSubmission};
use crate::profile::{PlayerProfile, ProfileStore, sanitize_name};
use crate::score_sync::{ScoreSync, SyncUpdate};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// One game session: simulation state plus cloud score plumbing
pub struct Session {
    state: GameState,
    accumulator: f32,
    profile: PlayerProfile,
    store: ProfileStore,
    sync: Option<ScoreSync>,
    /// Advisory cache of the last known server-side best
    remote_best: Option<u32>,
}

impl Session {
    /// Build a session. `service` is optional: without one, scoring and
    /// collision simulation run unaffected and only cloud features are
    /// skipped.
    pub fn new(
        config: SimConfig,
        seed: u64,
        store: ProfileStore,
        service: Option<Box<dyn ScoreService>>,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(config, seed)?;
        let profile = store.load();
        let sync = service.map(ScoreSync::spawn);
        if let Some(sync) = &sync {
            // Kick off reconciliation; the result lands on a later frame
            sync.request_best_refresh(&profile.device_id);
        }
        Ok(Self {
            state,
            accumulator: 0.0,
            profile,
            store,
            sync,
            remote_best: None,
        })
    }

    /// Advance one host frame: run fixed-timestep substeps, then react
    /// to whatever the simulation and the sync worker produced.
    ///
    /// One-shot inputs apply to the first substep only.
    pub fn advance_frame(&mut self, frame_dt: f32, input: &TickInput) {
        self.poll_sync();

        // Cap runaway frames so a stall cannot spiral
        self.accumulator += frame_dt.min(0.1);

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &input, SIM_DT);
            input = TickInput::default();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.handle_events();
    }

    /// Read-only view for rendering; hosts snapshot via `Clone`.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    /// Last known server-side best, if any fetch or submission resolved.
    pub fn remote_best(&self) -> Option<u32> {
        self.remote_best
    }

    /// Best across the local cache and the remote hint.
    pub fn best_score(&self) -> u32 {
        self.profile.best_score.max(self.remote_best.unwrap_or(0))
    }

    /// Update the display name; it reaches the server with the next
    /// submission.
    pub fn set_player_name(&mut self, raw: &str) {
        let name = sanitize_name(raw);
        if name != self.profile.player_name {
            log::info!("player name set to {name}");
            self.profile.player_name = name;
            self.store.save(&self.profile);
        }
    }

    fn poll_sync(&mut self) {
        let Some(sync) = &self.sync else { return };
        for update in sync.poll() {
            match update {
                SyncUpdate::RemoteBest(best) => {
                    log::debug!("remote best is {best:?}");
                    self.remote_best = best;
                    // Stale-client-ahead: converge by re-submitting the
                    // local value; max-wins makes this idempotent
                    if self.profile.best_score > best.unwrap_or(0) && self.profile.best_score > 0 {
                        log::info!(
                            "local best {} ahead of remote, re-submitting",
                            self.profile.best_score
                        );
                        sync.submit(ScoreSubmission {
                            device_id: self.profile.device_id.clone(),
                            player_name: self.profile.player_name.clone(),
                            score: self.profile.best_score,
                        });
                    }
                }
                SyncUpdate::Submitted(outcome) => {
                    // A hint until the next explicit fetch; never lower
                    // the cache
                    if let Some(best) = outcome.best_after_submit()
                        && best >= self.remote_best.unwrap_or(0)
                    {
                        self.remote_best = Some(best);
                    }
                }
            }
        }
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { final_score } => self.on_game_over(final_score),
                GameEvent::BonusCollected { score } => {
                    log::debug!("bonus collected, score {score}");
                }
                GameEvent::WaveSpawned { bonus_count } => {
                    log::debug!("wave spawned with {bonus_count} bonuses");
                }
                GameEvent::Started | GameEvent::Restarted | GameEvent::EnemyExpired => {}
            }
        }
    }

    fn on_game_over(&mut self, final_score: u32) {
        if final_score > self.profile.best_score {
            self.profile.best_score = final_score;
            self.store.save(&self.profile);
        }

        let Some(sync) = &self.sync else { return };
        sync.submit(ScoreSubmission {
            device_id: self.profile.device_id.clone(),
            player_name: self.profile.player_name.clone(),
            score: final_score,
        });
        // Optimistic cache bump, pending server confirmation
        if final_score > self.remote_best.unwrap_or(0) {
            self.remote_best = Some(final_score);
        }
    }
}
