//! Fixed timestep simulation tick
//!
//! One tick advances the whole session: invincibility countdown, player
//! movement, the enemy lifecycle, then collision resolution. Everything
//! here is a state-machine transition; there are no error paths inside
//! the tick.

use crate::consts::BONUS_SCORE_AWARD;

use super::collision::overlaps;
use super::enemy::EnemyStep;
use super::player::Direction;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start the session from `NotStarted`
    pub start: bool,
    /// Reset and play again
    pub restart: bool,
    /// Tap-to-turn: flip the player's direction
    pub reverse: bool,
    /// Explicit direction command (from ±1 style input)
    pub direction: Option<Direction>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::NotStarted => {
            if input.start {
                state.begin();
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // Restart is honored mid-run too (the restart control is always live)
    if input.restart {
        state.restart();
        return;
    }

    state.time_ticks += 1;

    if let Some(direction) = input.direction {
        state.player.set_direction(direction);
    }
    if input.reverse {
        state.player.reverse_direction();
    }

    state.player.tick_invincibility(dt);
    state.player.advance(dt, &state.track);

    // Enemy lifecycle. Timers always run; the threat path below is what
    // the invincibility window suppresses.
    let player_speed = state.player.speed;
    let step = state
        .enemy
        .step(dt, player_speed, &state.track, &state.config, &mut state.rng);
    match step {
        Some(EnemyStep::Expired) => {
            // Surviving a wave awards nothing; bonuses are the only
            // scoring path
            state.events.push(GameEvent::EnemyExpired);
        }
        Some(EnemyStep::RespawnDue) => state.spawn_wave(),
        Some(EnemyStep::Activated) | None => {}
    }

    if !state.player.invincible
        && state.enemy.is_collidable()
        && overlaps(
            state.player.position,
            state.enemy.position,
            state.config.collision_distance,
        )
    {
        state.trigger_game_over();
        return;
    }

    // Bonuses: expire quietly, then resolve collection scanning from the
    // end so removal keeps the remaining indices stable
    let bonus_life = state.config.bonus_life_time;
    for bonus in &mut state.bonuses {
        bonus.life_timer += dt;
    }
    state.bonuses.retain(|b| !b.is_expired(bonus_life));

    let threshold = state.config.bonus_collision_distance;
    for i in (0..state.bonuses.len()).rev() {
        if overlaps(state.player.position, state.bonuses[i].position, threshold) {
            state.bonuses[i].collected = true;
            let _ = state.bonuses.remove(i);
            state.score += BONUS_SCORE_AWARD;
            state.events.push(GameEvent::BonusCollected {
                score: state.score,
            });
        }
    }
}
