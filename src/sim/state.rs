//! Game state and core simulation types
//!
//! One `GameState` per session, constructed explicitly and passed by
//! reference; there is no global instance. All random draws go through
//! the seeded session RNG so a run is reproducible from its seed.
//! Rendering hosts snapshot the state via `Clone` and never mutate it.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{ConfigError, SimConfig};

use super::bonus::{Bonus, layout_wave};
use super::enemy::Enemy;
use super::player::{Direction, Player};
use super::track::Track;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start command
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended; only restart leaves this phase
    GameOver,
}

/// Notable transitions produced while ticking, drained by the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    /// A fresh wave spawned (enemy + replaced bonus batch)
    WaveSpawned { bonus_count: usize },
    /// A bonus was collected; carries the score after the award
    BonusCollected { score: u32 },
    /// The enemy survived its lifetime and hid; awards nothing
    EnemyExpired,
    GameOver { final_score: u32 },
    Restarted,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub track: Track,
    pub phase: GamePhase,
    /// Resets to zero only on explicit restart
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemy: Enemy,
    /// Current bonus batch, replaced wholesale at each wave spawn
    pub bonuses: Vec<Bonus>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Validate the tuning and build a session in `NotStarted`.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let track = Track::new(config.track_width)?;
        let player = Player::new(config.player_speed, config.player_half_width);
        let enemy = Enemy::dormant(config.enemy_half_width);
        Ok(Self {
            seed,
            track,
            phase: GamePhase::NotStarted,
            score: 0,
            time_ticks: 0,
            player,
            enemy,
            bonuses: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
            events: Vec::new(),
        })
    }

    /// Host viewport resized; positions keep their values and wrap
    /// against the new edges from the next tick on.
    pub fn resize_track(&mut self, width: f32) -> Result<(), ConfigError> {
        self.track = Track::new(width)?;
        Ok(())
    }

    /// Leave `NotStarted`: spawn the first wave and begin playing.
    pub fn begin(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        self.spawn_wave();
        log::info!("session started (seed {})", self.seed);
    }

    /// Reset score, player, enemy and bonuses, then play again.
    pub fn restart(&mut self) {
        if self.phase == GamePhase::NotStarted {
            return;
        }
        self.score = 0;
        self.player.teleport_to(0.0);
        self.player.set_direction(Direction::Right);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        self.spawn_wave();
        log::info!("session restarted");
    }

    /// Start a fresh wave: respawn the enemy relative to the player,
    /// replace the bonus batch, and grant the spawn-window invincibility.
    pub(crate) fn spawn_wave(&mut self) {
        self.enemy.spawn(
            self.player.position,
            self.player.speed,
            &self.track,
            &self.config,
            &mut self.rng,
        );
        self.bonuses = layout_wave(
            self.config.bonus_count,
            &self.track,
            self.config.bonus_jitter,
            &mut self.rng,
        );
        self.player
            .grant_invincibility(self.config.spawn_animation_duration);
        self.events.push(GameEvent::WaveSpawned {
            bonus_count: self.bonuses.len(),
        });
    }

    /// Fatal collision resolution. Idempotent: the phase guard makes a
    /// second call a no-op, so one run produces exactly one transition
    /// and one `GameOver` event.
    pub fn trigger_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("game over, final score {}", self.score);
    }

    /// Take all events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_not_started() {
        let state = GameState::new(SimConfig::default(), 42).unwrap();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.bonuses.is_empty());
        assert!(!state.enemy.visible);
    }

    #[test]
    fn test_invalid_config_refuses_to_start() {
        let config = SimConfig {
            min_life_time: 9.0,
            max_life_time: 1.0,
            ..Default::default()
        };
        assert!(GameState::new(config, 42).is_err());
    }

    #[test]
    fn test_begin_spawns_wave_and_grants_invincibility() {
        let mut state = GameState::new(SimConfig::default(), 42).unwrap();
        state.begin();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bonuses.len(), state.config.bonus_count);
        assert!(state.enemy.visible);
        assert!(state.player.invincible);
        assert_eq!(state.enemy.speed, state.player.speed);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Started));
        assert!(matches!(events[1], GameEvent::WaveSpawned { .. }));
    }

    #[test]
    fn test_begin_is_single_shot() {
        let mut state = GameState::new(SimConfig::default(), 42).unwrap();
        state.begin();
        let _ = state.drain_events();
        state.begin();
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut state = GameState::new(SimConfig::default(), 42).unwrap();
        state.begin();
        let _ = state.drain_events();

        state.score = 7;
        state.trigger_game_over();
        state.trigger_game_over();

        assert_eq!(state.phase, GamePhase::GameOver);
        let game_overs: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs, vec![GameEvent::GameOver { final_score: 7 }]);
    }

    #[test]
    fn test_restart_resets_score_and_player() {
        let mut state = GameState::new(SimConfig::default(), 42).unwrap();
        state.begin();
        state.score = 12;
        state.player.teleport_to(300.0);
        state.player.set_direction(Direction::Left);
        state.trigger_game_over();

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.position, 0.0);
        assert_eq!(state.player.direction, Direction::Right);
        assert_eq!(state.bonuses.len(), state.config.bonus_count);
    }

    #[test]
    fn test_resize_track_rejects_degenerate_width() {
        let mut state = GameState::new(SimConfig::default(), 42).unwrap();
        assert!(state.resize_track(0.0).is_err());
        assert!(state.resize_track(1920.0).is_ok());
        assert_eq!(state.track.width(), 1920.0);
    }

    #[test]
    fn test_snapshot_is_independent_of_live_state() {
        let mut state = GameState::new(SimConfig::default(), 42).unwrap();
        state.begin();
        let snapshot = state.clone();

        state.score = 99;
        state.player.teleport_to(123.0);
        state.bonuses.clear();

        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.player.position, 0.0);
        assert_eq!(snapshot.bonuses.len(), snapshot.config.bonus_count);
    }
}
