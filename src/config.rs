//! Simulation tuning configuration
//!
//! All gameplay balance values live here as one serde-loadable struct.
//! Invalid tuning (inverted random ranges, a degenerate track) is fatal
//! at construction time; nothing inside the tick loop re-validates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive, finite number")]
    NonPositive { name: &'static str },
    #[error("{name} must not be negative")]
    Negative { name: &'static str },
    #[error("{min_name} must not exceed {max_name}")]
    InvertedRange {
        min_name: &'static str,
        max_name: &'static str,
    },
}

/// Simulation tuning constants
///
/// Defaults match the original game balance. Distances and widths are in
/// track units; speeds are in the pre-scale units multiplied by
/// [`crate::consts::UI_COORD_SCALE`] each tick; times are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Track (viewport) width
    pub track_width: f32,

    /// Player base movement speed
    pub player_speed: f32,
    /// Half of the player glyph width, used for edge wrapping
    pub player_half_width: f32,

    /// Absolute floor for enemy speed after drift
    pub min_enemy_speed: f32,
    /// Absolute ceiling for enemy speed after drift
    pub max_enemy_speed: f32,
    /// Half of the enemy glyph width, used for edge wrapping
    pub enemy_half_width: f32,
    /// Shortest possible enemy lifetime per wave
    pub min_life_time: f32,
    /// Longest possible enemy lifetime per wave
    pub max_life_time: f32,
    /// Delay between an enemy expiring and the next wave spawning
    pub respawn_delay: f32,
    /// Shortest interval between enemy direction changes
    pub min_direction_change_time: f32,
    /// Longest interval between enemy direction changes
    pub max_direction_change_time: f32,
    /// Length of the spawn scale/alpha animation; the player invincibility
    /// window spans the same interval so both end together
    pub spawn_animation_duration: f32,
    /// Distance from the player at which the enemy (re)spawns
    pub spawn_offset: f32,

    /// Bonuses laid out per wave
    pub bonus_count: usize,
    /// Bound of the symmetric random offset applied to each bonus position
    pub bonus_jitter: f32,
    /// Seconds an uncollected bonus survives
    pub bonus_life_time: f32,

    /// Player-enemy overlap threshold (fatal)
    pub collision_distance: f32,
    /// Player-bonus overlap threshold (scoring)
    pub bonus_collision_distance: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            track_width: 1080.0,

            player_speed: 4.0,
            player_half_width: 50.0,

            min_enemy_speed: 2.0,
            max_enemy_speed: 6.0,
            enemy_half_width: 50.0,
            min_life_time: 3.0,
            max_life_time: 8.0,
            respawn_delay: 1.0,
            min_direction_change_time: 1.5,
            max_direction_change_time: 4.0,
            spawn_animation_duration: 1.0,
            spawn_offset: 400.0,

            bonus_count: 3,
            bonus_jitter: 40.0,
            bonus_life_time: 10.0,

            collision_distance: 100.0,
            bonus_collision_distance: 70.0,
        }
    }
}

impl SimConfig {
    /// Check every tuning value; the simulation refuses to start on error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(self.track_width, "track_width")?;
        positive(self.player_speed, "player_speed")?;
        positive(self.player_half_width, "player_half_width")?;
        positive(self.min_enemy_speed, "min_enemy_speed")?;
        positive(self.max_enemy_speed, "max_enemy_speed")?;
        positive(self.enemy_half_width, "enemy_half_width")?;
        positive(self.min_life_time, "min_life_time")?;
        positive(self.max_life_time, "max_life_time")?;
        positive(self.min_direction_change_time, "min_direction_change_time")?;
        positive(self.max_direction_change_time, "max_direction_change_time")?;
        positive(self.bonus_life_time, "bonus_life_time")?;
        positive(self.collision_distance, "collision_distance")?;
        positive(self.bonus_collision_distance, "bonus_collision_distance")?;
        non_negative(self.respawn_delay, "respawn_delay")?;
        non_negative(self.spawn_animation_duration, "spawn_animation_duration")?;
        non_negative(self.spawn_offset, "spawn_offset")?;
        non_negative(self.bonus_jitter, "bonus_jitter")?;

        ordered(
            self.min_enemy_speed,
            self.max_enemy_speed,
            "min_enemy_speed",
            "max_enemy_speed",
        )?;
        ordered(
            self.min_life_time,
            self.max_life_time,
            "min_life_time",
            "max_life_time",
        )?;
        ordered(
            self.min_direction_change_time,
            self.max_direction_change_time,
            "min_direction_change_time",
            "max_direction_change_time",
        )?;

        Ok(())
    }
}

fn positive(value: f32, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name })
    }
}

fn non_negative(value: f32, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name })
    }
}

fn ordered(
    min: f32,
    max: f32,
    min_name: &'static str,
    max_name: &'static str,
) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { min_name, max_name })
    }
}
