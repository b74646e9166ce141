//! Track geometry for the wrapped 1-D lane
//!
//! Positions live in a symmetric interval `[-W/2, +W/2]` sized to the
//! hosting viewport. An actor leaving one edge re-enters at the other,
//! offset by its own half width so the glyph slides fully off screen
//! before reappearing.

use crate::config::ConfigError;

/// The symmetric 1-D coordinate space actors move within
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    half_width: f32,
}

impl Track {
    /// Build a track for the given viewport width. Zero or negative
    /// widths are a configuration error, not a runtime condition.
    pub fn new(width: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "track_width",
            });
        }
        Ok(Self {
            half_width: width / 2.0,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Reflect an out-of-bounds position to the opposite edge.
    ///
    /// Deterministic and side-effect free; called once per actor per tick.
    #[inline]
    pub fn wrap(&self, position: f32, half_actor_width: f32) -> f32 {
        let limit = self.half_width + half_actor_width;
        if position < -limit {
            limit
        } else if position > limit {
            -limit
        } else {
            position
        }
    }
}
