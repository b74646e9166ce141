//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No I/O, rendering or platform dependencies
//!
//! The session shell drives [`tick`] and reacts to the [`GameEvent`]s it
//! produces; nothing in here talks to the score service.

pub mod bonus;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod state;
pub mod tick;
pub mod track;

pub use bonus::Bonus;
pub use collision::overlaps;
pub use enemy::{Enemy, EnemyPhase, EnemyStep};
pub use player::{Direction, Player};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use track::Track;
