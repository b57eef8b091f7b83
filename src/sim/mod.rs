//! Simulation core
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (list order of the populations)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod entity;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ai::{Bot, BotBrain, BotGoal, Decision};
pub use collision::{GameEvent, resolve_collisions};
pub use entity::{Entity, EntityKind, dominates};
pub use snapshot::{EntityView, LeaderboardEntry, RenderSnapshot, capture, leaderboard};
pub use state::{BOT_NAMES, GamePhase, GameState, PALETTE};
pub use tick::{InputMode, TickInput, camera_for, tick};
