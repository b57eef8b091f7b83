//! Session lifecycle: NotStarted -> Running -> GameOver, and back to Running
//! on restart with a freshly seeded world and the same player name.

use glam::Vec2;

use crate::consts::DEFAULT_PLAYER_NAME;
use crate::sim::{GameState, RenderSnapshot, TickInput, capture, tick};
use crate::tuning::Tuning;

/// Session-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Running,
    GameOver,
}

/// Emitted once, on the frame the player is eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSignal {
    /// Whole units of the player's mass at the moment of death
    pub final_mass: u32,
}

/// Trimmed display name, or the fallback label when blank
pub fn resolve_player_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Owns the current world and drives it one frame at a time
#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
    tuning: Tuning,
    player_name: String,
    world: Option<GameState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            tuning,
            player_name: String::new(),
            world: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn world(&self) -> Option<&GameState> {
        self.world.as_ref()
    }

    /// Start a new game; valid from any phase. `viewport` is the visible
    /// area the first frame will be mapped through.
    pub fn start(&mut self, raw_name: &str, seed: u64, viewport: Vec2) {
        self.player_name = resolve_player_name(raw_name);
        let mut world = GameState::with_tuning(seed, &self.player_name, self.tuning.clone());
        world.set_viewport(viewport);
        self.world = Some(world);
        self.phase = SessionPhase::Running;
        log::info!("Session started for '{}' (seed {})", self.player_name, seed);
    }

    /// Re-seed the world, keeping the player name. Returns false before the
    /// first start, when there is no name to keep.
    pub fn restart(&mut self, seed: u64, viewport: Vec2) -> bool {
        if self.phase == SessionPhase::NotStarted {
            log::warn!("Restart ignored: no game has been started");
            return false;
        }
        let name = self.player_name.clone();
        self.start(&name, seed, viewport);
        true
    }

    /// Run one frame. Returns the game-over signal on the frame the player dies.
    pub fn frame(&mut self, input: &TickInput) -> Option<GameOverSignal> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let world = self.world.as_mut()?;

        tick(world, input);
        if !world.is_over() {
            return None;
        }

        self.phase = SessionPhase::GameOver;
        let signal = GameOverSignal {
            final_mass: world.score(),
        };
        log::info!(
            "Game over for '{}': final mass {}",
            self.player_name,
            signal.final_mass
        );
        Some(signal)
    }

    /// Drawable view of the current world, if any
    pub fn snapshot(&self) -> Option<RenderSnapshot<'_>> {
        self.world.as_ref().map(capture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bot, Entity, EntityKind};

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn small_tuning() -> Tuning {
        Tuning {
            bot_count: 0,
            food_count: 10,
            big_bot_count: 0,
            ..Tuning::default()
        }
    }

    fn still(world: &GameState) -> TickInput {
        TickInput::pointer(world.player.pos - world.camera, VIEWPORT)
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(resolve_player_name("   "), "Oyuncu");
        assert_eq!(resolve_player_name("  Ada "), "Ada");
    }

    #[test]
    fn test_not_started_does_nothing() {
        let mut session = Session::new(small_tuning());
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.frame(&TickInput::default()).is_none());
        assert!(session.snapshot().is_none());
        assert!(!session.restart(1, VIEWPORT));
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut session = Session::new(small_tuning());
        session.start("", 3, VIEWPORT);
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.player_name(), "Oyuncu");

        // Drop a heavy bot right on top of the player
        let world = session.world.as_mut().unwrap();
        world.food.clear();
        let p = world.player.pos;
        world.bots.push(Bot::new(Entity::new(
            EntityKind::Bot,
            p + Vec2::new(40.0, 0.0),
            3000.0_f32.sqrt(),
            "#FF6B6B",
            "Titan",
        )));

        let input = still(session.world().unwrap());
        let signal = session.frame(&input);
        assert_eq!(signal, Some(GameOverSignal { final_mass: 1225 }));
        assert_eq!(session.phase(), SessionPhase::GameOver);

        // The loop is stopped: further frames are ignored
        assert!(session.frame(&input).is_none());

        assert!(session.restart(4, VIEWPORT));
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.player_name(), "Oyuncu");
        let world = session.world().unwrap();
        assert_eq!(world.seed, 4);
        assert_eq!(world.score(), 1225);
        assert!(world.bots.is_empty());
        assert_eq!(world.food.len(), 10);
    }

    #[test]
    fn test_first_frame_with_centred_pointer_holds_still() {
        let mut session = Session::new(small_tuning());
        session.start("Ada", 1, VIEWPORT);
        let world = session.world().unwrap();
        let start = world.player.pos;
        assert_eq!(world.camera, start - VIEWPORT / 2.0);

        let input = TickInput::pointer(VIEWPORT / 2.0, VIEWPORT);
        session.frame(&input);
        let player = &session.world().unwrap().player;
        assert_eq!(player.pos, start);
        assert_eq!(player.vel, Vec2::ZERO);

        // Restart re-seeds the camera the same way
        session.restart(2, VIEWPORT);
        let world = session.world().unwrap();
        assert_eq!(world.camera, world.player.pos - VIEWPORT / 2.0);
        session.frame(&input);
        assert_eq!(session.world().unwrap().player.pos, start);
    }

    #[test]
    fn test_snapshot_follows_world() {
        let mut session = Session::new(small_tuning());
        session.start("Ada", 9, VIEWPORT);
        let snap = session.snapshot().unwrap();
        assert_eq!(snap.player.name, "Ada");
        assert_eq!(snap.leaderboard.len(), 1);
    }
}
