//! Enemy lifecycle state machine
//!
//! One live enemy per session, cycling Spawning → Active → Respawning →
//! Spawning for as long as the session runs. Spawn parameters are drawn
//! fresh each wave: the speed snapshots the player's so difficulty stays
//! coupled to player configuration, the position is a fixed offset to a
//! random side of the player, and lifetime / direction-change intervals
//! come from uniform configured ranges.
//!
//! The Spawning phase doubles as the grace period: it plays a
//! deterministic scale/alpha easing and the enemy is not collidable
//! until the phase ends. The session grants the player an invincibility
//! window of the same duration, so both end together.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::SimConfig;
use crate::consts::{
    ENEMY_DRIFT_SPEED_STEP, ENEMY_SPEED_MAX_FACTOR, ENEMY_SPEED_MIN_FACTOR, UI_COORD_SCALE,
};
use crate::smoothstep;

use super::player::Direction;
use super::track::Track;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyPhase {
    /// Playing the spawn animation; not yet a threat
    Spawning { elapsed: f32 },
    /// Moving and collidable
    Active,
    /// Hidden, waiting out the respawn delay
    Respawning,
}

/// Transition produced by one lifecycle step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStep {
    /// Spawn animation finished; the enemy is now a threat
    Activated,
    /// Lifetime ran out; the enemy hid and entered the respawn delay
    Expired,
    /// Respawn delay elapsed; the owner must start the next wave
    RespawnDue,
}

/// Enemy state
#[derive(Debug, Clone)]
pub struct Enemy {
    pub position: f32,
    pub half_width: f32,
    pub speed: f32,
    pub direction: Direction,
    pub phase: EnemyPhase,
    pub visible: bool,
    pub life_timer: f32,
    pub life_limit: f32,
    pub direction_timer: f32,
    pub direction_interval: f32,
    pub respawn_timer: f32,
}

impl Enemy {
    /// A dormant enemy; the first wave spawn brings it to life.
    pub fn dormant(half_width: f32) -> Self {
        Self {
            position: 0.0,
            half_width,
            speed: 0.0,
            direction: Direction::Left,
            phase: EnemyPhase::Respawning,
            visible: false,
            life_timer: 0.0,
            life_limit: 0.0,
            direction_timer: 0.0,
            direction_interval: 0.0,
            respawn_timer: 0.0,
        }
    }

    /// Re-initialize for a new wave and enter `Spawning`.
    ///
    /// The spawn point is always relative to the player: a fixed offset
    /// to a uniformly random side, wrapped into the track.
    pub fn spawn(
        &mut self,
        player_position: f32,
        player_speed: f32,
        track: &Track,
        config: &SimConfig,
        rng: &mut Pcg32,
    ) {
        let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.position = track.wrap(player_position + side * config.spawn_offset, self.half_width);
        // Exact snapshot, not a random draw
        self.speed = player_speed;
        self.direction = Direction::random(rng);
        self.life_limit = rng.random_range(config.min_life_time..=config.max_life_time);
        self.life_timer = 0.0;
        self.direction_interval =
            rng.random_range(config.min_direction_change_time..=config.max_direction_change_time);
        self.direction_timer = 0.0;
        self.respawn_timer = 0.0;
        self.visible = true;
        self.phase = EnemyPhase::Spawning { elapsed: 0.0 };
    }

    /// Advance the lifecycle by one tick.
    ///
    /// Movement happens only in `Active`; `Spawning` only accumulates
    /// animation time and `Respawning` only counts toward the next wave.
    /// The caller reacts to the returned transition (`RespawnDue` means
    /// it must call [`Enemy::spawn`] with fresh wave state).
    pub fn step(
        &mut self,
        dt: f32,
        player_speed: f32,
        track: &Track,
        config: &SimConfig,
        rng: &mut Pcg32,
    ) -> Option<EnemyStep> {
        match self.phase {
            EnemyPhase::Spawning { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= config.spawn_animation_duration {
                    self.phase = EnemyPhase::Active;
                    Some(EnemyStep::Activated)
                } else {
                    self.phase = EnemyPhase::Spawning { elapsed };
                    None
                }
            }
            EnemyPhase::Active => {
                let next =
                    self.position + self.direction.sign() * self.speed * dt * UI_COORD_SCALE;
                self.position = track.wrap(next, self.half_width);

                self.direction_timer += dt;
                if self.direction_timer >= self.direction_interval {
                    self.drift(player_speed, config, rng);
                }

                self.life_timer += dt;
                if self.life_timer >= self.life_limit {
                    self.visible = false;
                    self.respawn_timer = 0.0;
                    self.phase = EnemyPhase::Respawning;
                    return Some(EnemyStep::Expired);
                }
                None
            }
            EnemyPhase::Respawning => {
                self.respawn_timer += dt;
                if self.respawn_timer >= config.respawn_delay {
                    Some(EnemyStep::RespawnDue)
                } else {
                    None
                }
            }
        }
    }

    /// Direction-change event: a fresh uniform direction draw (it may
    /// land on the same side), a fixed ± speed perturbation, and a newly
    /// drawn interval.
    fn drift(&mut self, player_speed: f32, config: &SimConfig, rng: &mut Pcg32) {
        self.direction = Direction::random(rng);

        let factor = if rng.random_bool(0.5) {
            1.0 + ENEMY_DRIFT_SPEED_STEP
        } else {
            1.0 - ENEMY_DRIFT_SPEED_STEP
        };
        // Absolute clamp first; the player-relative band last so the
        // coupling bound always holds
        self.speed = (self.speed * factor)
            .clamp(config.min_enemy_speed, config.max_enemy_speed)
            .clamp(
                ENEMY_SPEED_MIN_FACTOR * player_speed,
                ENEMY_SPEED_MAX_FACTOR * player_speed,
            );

        self.direction_timer = 0.0;
        self.direction_interval =
            rng.random_range(config.min_direction_change_time..=config.max_direction_change_time);
    }

    /// Collidable only once fully spawned; `Spawning` is a grace period.
    #[inline]
    pub fn is_collidable(&self) -> bool {
        self.visible && matches!(self.phase, EnemyPhase::Active)
    }

    /// Spawn animation progress in `[0, 1]`; 1 once active.
    pub fn spawn_progress(&self, config: &SimConfig) -> f32 {
        match self.phase {
            EnemyPhase::Spawning { elapsed } => {
                if config.spawn_animation_duration <= 0.0 {
                    1.0
                } else {
                    (elapsed / config.spawn_animation_duration).clamp(0.0, 1.0)
                }
            }
            _ => 1.0,
        }
    }

    /// Render scale for the spawn easing (grows from 0 to full size).
    pub fn spawn_scale(&self, config: &SimConfig) -> f32 {
        smoothstep(self.spawn_progress(config))
    }

    /// Render alpha for the spawn easing (fades in alongside the scale).
    pub fn spawn_alpha(&self, config: &SimConfig) -> f32 {
        smoothstep(self.spawn_progress(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;

    fn fixture() -> (Track, SimConfig, Pcg32) {
        let config = SimConfig::default();
        let track = Track::new(config.track_width).unwrap();
        (track, config, Pcg32::seed_from_u64(7))
    }

    #[test]
    fn test_spawn_snapshots_player_speed_exactly() {
        let (track, config, mut rng) = fixture();
        let mut enemy = Enemy::dormant(config.enemy_half_width);
        enemy.spawn(0.0, 4.0, &track, &config, &mut rng);
        assert_eq!(enemy.speed, 4.0);

        // And again after the player speed changes
        enemy.spawn(0.0, 2.5, &track, &config, &mut rng);
        assert_eq!(enemy.speed, 2.5);
    }

    #[test]
    fn test_spawn_offset_is_relative_to_player() {
        let (track, config, mut rng) = fixture();
        let mut enemy = Enemy::dormant(config.enemy_half_width);
        for _ in 0..32 {
            enemy.spawn(100.0, 4.0, &track, &config, &mut rng);
            let offset = enemy.position - 100.0;
            // Either side, fixed magnitude (no wrap at this distance)
            assert!((offset.abs() - config.spawn_offset).abs() < 1e-3);
        }
    }

    #[test]
    fn test_spawning_is_not_collidable_until_activated() {
        let (track, config, mut rng) = fixture();
        let mut enemy = Enemy::dormant(config.enemy_half_width);
        enemy.spawn(0.0, 4.0, &track, &config, &mut rng);
        assert!(!enemy.is_collidable());

        let mut activated = false;
        for _ in 0..120 {
            if enemy.step(SIM_DT, 4.0, &track, &config, &mut rng) == Some(EnemyStep::Activated) {
                activated = true;
                break;
            }
        }
        assert!(activated);
        assert!(enemy.is_collidable());
    }

    #[test]
    fn test_expiry_hides_enemy_and_starts_respawn() {
        let (track, config, mut rng) = fixture();
        let mut enemy = Enemy::dormant(config.enemy_half_width);
        enemy.spawn(0.0, 4.0, &track, &config, &mut rng);
        enemy.phase = EnemyPhase::Active;
        enemy.life_timer = enemy.life_limit; // force expiry on next step

        let step = enemy.step(SIM_DT, 4.0, &track, &config, &mut rng);
        assert_eq!(step, Some(EnemyStep::Expired));
        assert!(!enemy.visible);
        assert_eq!(enemy.phase, EnemyPhase::Respawning);

        // Respawn delay then reports due without self-spawning
        let ticks = (config.respawn_delay / SIM_DT).ceil() as u32 + 1;
        let mut due = false;
        for _ in 0..ticks {
            if enemy.step(SIM_DT, 4.0, &track, &config, &mut rng) == Some(EnemyStep::RespawnDue) {
                due = true;
                break;
            }
        }
        assert!(due);
        assert_eq!(enemy.phase, EnemyPhase::Respawning);
    }

    #[test]
    fn test_drift_keeps_speed_inside_player_band() {
        let (track, config, mut rng) = fixture();
        let player_speed = 4.0;
        let mut enemy = Enemy::dormant(config.enemy_half_width);
        enemy.spawn(0.0, player_speed, &track, &config, &mut rng);
        enemy.phase = EnemyPhase::Active;

        for _ in 0..200 {
            enemy.direction_timer = enemy.direction_interval; // force a drift event
            enemy.life_timer = 0.0; // keep the wave alive
            let _ = enemy.step(SIM_DT, player_speed, &track, &config, &mut rng);
            assert!(enemy.speed >= ENEMY_SPEED_MIN_FACTOR * player_speed - 1e-4);
            assert!(enemy.speed <= ENEMY_SPEED_MAX_FACTOR * player_speed + 1e-4);
        }
    }

    #[test]
    fn test_life_and_interval_draws_stay_in_configured_ranges() {
        let (track, config, mut rng) = fixture();
        let mut enemy = Enemy::dormant(config.enemy_half_width);
        for _ in 0..64 {
            enemy.spawn(0.0, 4.0, &track, &config, &mut rng);
            assert!(enemy.life_limit >= config.min_life_time);
            assert!(enemy.life_limit <= config.max_life_time);
            assert!(enemy.direction_interval >= config.min_direction_change_time);
            assert!(enemy.direction_interval <= config.max_direction_change_time);
        }
    }

    #[test]
    fn test_spawn_easing_is_monotonic() {
        let (track, config, mut rng) = fixture();
        let mut enemy = Enemy::dormant(config.enemy_half_width);
        enemy.spawn(0.0, 4.0, &track, &config, &mut rng);

        let mut last = -1.0;
        while matches!(enemy.phase, EnemyPhase::Spawning { .. }) {
            let scale = enemy.spawn_scale(&config);
            assert!(scale >= last);
            last = scale;
            let _ = enemy.step(SIM_DT, 4.0, &track, &config, &mut rng);
        }
        assert_eq!(enemy.spawn_scale(&config), 1.0);
    }
}
