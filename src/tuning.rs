//! Data-driven game balance
//!
//! Every knob that shapes a session (world size, populations, speeds, AI radii)
//! lives in [`Tuning`]. Defaults reproduce the stock game; a JSON document can
//! override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_size: f32,
    pub food_count: usize,
    pub bot_count: usize,
    /// Bots seeded first get `big_bot_size_factor × min_size`
    pub big_bot_count: usize,
    pub big_bot_size_factor: f32,
    pub min_size: f32,
    pub food_size: f32,
    pub max_speed: f32,
    pub dead_zone: f32,

    // === Bot AI ===
    /// Bots move at this fraction of the player's speed at equal size
    pub bot_speed_factor: f32,
    pub threat_radius: f32,
    pub prey_radius: f32,
    pub forage_radius: f32,
    pub flee_distance: f32,
    pub wander_cooldown_ticks: u32,

    // === Presentation ===
    pub leaderboard_size: usize,
    pub joystick_reach: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            food_count: FOOD_COUNT,
            bot_count: BOT_COUNT,
            big_bot_count: BIG_BOT_COUNT,
            big_bot_size_factor: BIG_BOT_SIZE_FACTOR,
            min_size: MIN_SIZE,
            food_size: FOOD_SIZE,
            max_speed: MAX_SPEED,
            dead_zone: STEERING_DEAD_ZONE,

            bot_speed_factor: BOT_SPEED_FACTOR,
            threat_radius: THREAT_RADIUS,
            prey_radius: PREY_RADIUS,
            forage_radius: FORAGE_RADIUS,
            flee_distance: FLEE_DISTANCE,
            wander_cooldown_ticks: WANDER_COOLDOWN_TICKS,

            leaderboard_size: LEADERBOARD_SIZE,
            joystick_reach: JOYSTICK_REACH,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Size of the largest entity seeded at world creation
    pub fn largest_start_size(&self) -> f32 {
        if self.big_bot_count > 0 {
            self.min_size * self.big_bot_size_factor.max(1.0)
        } else {
            self.min_size
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.world_size > 0.0) {
            return Err(TuningError::Invalid("world_size must be positive"));
        }
        if !(self.min_size > 0.0) || !(self.food_size > 0.0) {
            return Err(TuningError::Invalid("entity sizes must be positive"));
        }
        if !(self.max_speed > 0.0) {
            return Err(TuningError::Invalid("max_speed must be positive"));
        }
        if !self.dead_zone.is_finite() || self.dead_zone < 0.0 {
            return Err(TuningError::Invalid("dead_zone must be finite and not negative"));
        }
        let ai_ranges = [
            self.threat_radius,
            self.prey_radius,
            self.forage_radius,
            self.flee_distance,
        ];
        if ai_ranges.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(TuningError::Invalid("AI radii must be finite and positive"));
        }
        if !(self.bot_speed_factor > 0.0) {
            return Err(TuningError::Invalid("bot_speed_factor must be positive"));
        }
        if self.big_bot_count > self.bot_count {
            return Err(TuningError::Invalid("big_bot_count exceeds bot_count"));
        }
        if self.world_size <= 2.0 * self.largest_start_size() {
            return Err(TuningError::Invalid(
                "world_size too small for the largest starting entity",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.largest_start_size(), 105.0);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "bot_count": 8, "food_count": 50 }"#).unwrap();
        assert_eq!(tuning.bot_count, 8);
        assert_eq!(tuning.food_count, 50);
        // Untouched fields keep their defaults
        assert_eq!(tuning.world_size, WORLD_SIZE);
        assert_eq!(tuning.prey_radius, PREY_RADIUS);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ bot_count: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Tuning::from_json(r#"{ "world_size": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "bot_count": 2, "big_bot_count": 3 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "world_size": 150.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_finite_ranges() {
        let nan_dead_zone = Tuning {
            dead_zone: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(nan_dead_zone.validate(), Err(TuningError::Invalid(_))));

        let nan_radius = Tuning {
            forage_radius: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(nan_radius.validate(), Err(TuningError::Invalid(_))));

        let endless_threat = Tuning {
            threat_radius: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(endless_threat.validate().is_err());

        let err = Tuning::from_json(r#"{ "flee_distance": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }
}
