//! Overlap detection on the 1-D track
//!
//! Two thresholds are in play: the fatal player-enemy distance and the
//! scoring player-bonus distance. Entity counts are tiny, so collision
//! resolution is a linear scan per tick.

/// True when two track positions are closer than `threshold`.
#[inline]
pub fn overlaps(pos_a: f32, pos_b: f32, threshold: f32) -> bool {
    (pos_a - pos_b).abs() < threshold
}
