//! Player actor
//!
//! The player glyph moves continuously along the track; the only control
//! is an explicit direction command. Invincibility is granted by the
//! session around each enemy spawn and counts down here.

use crate::consts::UI_COORD_SCALE;

use super::track::Track;

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Uniform draw; both sides are equally likely.
    pub fn random(rng: &mut impl rand::Rng) -> Self {
        if rng.random_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Player state
///
/// `speed` is configuration, never runtime-randomized; `direction` flips
/// only through an explicit command.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: f32,
    pub half_width: f32,
    pub speed: f32,
    pub direction: Direction,
    pub invincible: bool,
    pub invincible_remaining: f32,
}

impl Player {
    pub fn new(speed: f32, half_width: f32) -> Self {
        Self {
            position: 0.0,
            half_width,
            speed,
            direction: Direction::Right,
            invincible: false,
            invincible_remaining: 0.0,
        }
    }

    /// Move one tick forward and wrap at the track edges.
    pub fn advance(&mut self, dt: f32, track: &Track) {
        let next = self.position + self.direction.sign() * self.speed * dt * UI_COORD_SCALE;
        self.position = track.wrap(next, self.half_width);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// "Tap to turn" control scheme.
    pub fn reverse_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// Used by restart.
    pub fn teleport_to(&mut self, x: f32) {
        self.position = x;
    }

    pub fn grant_invincibility(&mut self, duration: f32) {
        self.invincible = true;
        self.invincible_remaining = duration;
    }

    /// Count the invincibility window down; flips to false at zero,
    /// never renews on its own.
    pub fn tick_invincibility(&mut self, dt: f32) {
        if !self.invincible {
            return;
        }
        self.invincible_remaining -= dt;
        if self.invincible_remaining <= 0.0 {
            self.invincible = false;
            self.invincible_remaining = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_advance_moves_by_scaled_speed() {
        let track = Track::new(10_000.0).unwrap();
        let mut player = Player::new(4.0, 50.0);
        player.advance(SIM_DT, &track);
        let expected = 4.0 * SIM_DT * UI_COORD_SCALE;
        assert!((player.position - expected).abs() < 1e-4);
    }

    #[test]
    fn test_reverse_flips_direction() {
        let mut player = Player::new(4.0, 50.0);
        assert_eq!(player.direction, Direction::Right);
        player.reverse_direction();
        assert_eq!(player.direction, Direction::Left);
        player.reverse_direction();
        assert_eq!(player.direction, Direction::Right);
    }

    #[test]
    fn test_advance_wraps_at_edges() {
        let track = Track::new(1000.0).unwrap();
        let mut player = Player::new(4.0, 50.0);
        player.teleport_to(550.0);
        player.advance(SIM_DT, &track);
        assert_eq!(player.position, -550.0);
    }

    #[test]
    fn test_invincibility_expires_without_renewal() {
        let mut player = Player::new(4.0, 50.0);
        player.grant_invincibility(0.05);
        player.tick_invincibility(SIM_DT);
        assert!(player.invincible);
        player.tick_invincibility(SIM_DT);
        player.tick_invincibility(SIM_DT);
        assert!(!player.invincible);
        assert_eq!(player.invincible_remaining, 0.0);
        // No renewal on further ticks
        player.tick_invincibility(SIM_DT);
        assert!(!player.invincible);
    }
}
