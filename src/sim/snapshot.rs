//! Read-only view of a world for the renderer and HUD
//!
//! Borrowed from the state, so producing one per frame copies no names.

use glam::Vec2;
use serde::Serialize;

use super::entity::{Entity, EntityKind};
use super::state::{GamePhase, GameState};

/// Drawable circle
#[derive(Debug, Clone, Serialize)]
pub struct EntityView<'a> {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a Entity> for EntityView<'a> {
    fn from(e: &'a Entity) -> Self {
        Self {
            kind: e.kind,
            pos: e.pos,
            radius: e.radius(),
            color: e.color,
            name: &e.name,
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry<'a> {
    /// 1-based
    pub rank: usize,
    pub name: &'a str,
    pub color: &'a str,
    /// Whole units of mass
    pub mass: u32,
}

/// Everything a frame needs to be drawn
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub world_size: f32,
    /// Top-left corner of the visible area in world units
    pub camera: Vec2,
    pub viewport: Vec2,
    pub food: Vec<EntityView<'a>>,
    pub bots: Vec<EntityView<'a>>,
    pub player: EntityView<'a>,
    pub score: u32,
    pub leaderboard: Vec<LeaderboardEntry<'a>>,
}

/// Capture the current frame
pub fn capture(state: &GameState) -> RenderSnapshot<'_> {
    RenderSnapshot {
        phase: state.phase,
        world_size: state.tuning.world_size,
        camera: state.camera,
        viewport: state.viewport,
        food: state.food.iter().map(EntityView::from).collect(),
        bots: state.bots.iter().map(|b| EntityView::from(&b.body)).collect(),
        player: EntityView::from(&state.player),
        score: state.score(),
        leaderboard: leaderboard(state, state.tuning.leaderboard_size),
    }
}

/// Heaviest `size` entities among the player and the bots.
///
/// Ties keep list order, player first.
pub fn leaderboard(state: &GameState, size: usize) -> Vec<LeaderboardEntry<'_>> {
    let mut ranked: Vec<&Entity> = std::iter::once(&state.player)
        .chain(state.bots.iter().map(|b| &b.body))
        .collect();
    ranked.sort_by(|a, b| b.mass().total_cmp(&a.mass()));

    ranked
        .into_iter()
        .take(size)
        .enumerate()
        .map(|(i, e)| LeaderboardEntry {
            rank: i + 1,
            name: &e.name,
            color: e.color,
            mass: e.mass().floor() as u32,
        })
        .collect()
}
