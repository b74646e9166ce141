//! Bonus collectibles and per-wave layout
//!
//! Each enemy spawn replaces the whole bonus batch: the configured count
//! is spread evenly across the usable middle of the track (80% of the
//! width), each position nudged by a bounded symmetric jitter. Bonuses
//! are static; they score when touched and quietly expire otherwise.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::BONUS_TRACK_USAGE;

use super::track::Track;

/// A collectible on the track
#[derive(Debug, Clone)]
pub struct Bonus {
    pub position: f32,
    pub collected: bool,
    pub life_timer: f32,
}

impl Bonus {
    pub fn new(position: f32) -> Self {
        Self {
            position,
            collected: false,
            life_timer: 0.0,
        }
    }

    /// Expired bonuses self-destruct without scoring.
    #[inline]
    pub fn is_expired(&self, life_limit: f32) -> bool {
        self.life_timer >= life_limit
    }
}

/// Lay out a fresh wave of `count` bonuses.
///
/// A single bonus sits at track center. Larger waves are spaced
/// `usable / (count - 1)` apart across the usable width, plus a jitter
/// draw in `[-jitter, +jitter]` per bonus.
pub fn layout_wave(count: usize, track: &Track, jitter: f32, rng: &mut Pcg32) -> Vec<Bonus> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![Bonus::new(0.0)];
    }

    let usable = BONUS_TRACK_USAGE * track.width();
    let spacing = usable / (count - 1) as f32;
    let leftmost = -usable / 2.0;

    (0..count)
        .map(|i| {
            let offset = if jitter > 0.0 {
                rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            Bonus::new(leftmost + i as f32 * spacing + offset)
        })
        .collect()
}
