//! # Engine Configuration
//!
//! Every tuning constant of the simulation in one place.
//!
//! Distances (speeds, radii, ranges) are fractions of the pitch length and
//! are converted with [`Pitch::units`](crate::models::Pitch::units), so the
//! same config drives a 100x60 demo pitch and a 1050x680 full-size one.
//!
//! ```rust
//! use fse_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let tests = EngineConfig::deterministic();
//! assert_eq!(config.rules, tests.rules);
//! ```

use crate::models::{MatchRules, PositionClass};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Squad size and number of halves, copied into every new match.
    pub rules: MatchRules,
    pub movement: MovementConfig,
    pub ball: BallConfig,
    pub injury: InjuryConfig,
    pub kickoff: KickoffPolicy,
}

impl EngineConfig {
    /// For tests: no injuries and team 1 always kicks off.
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.injury.chance_per_tick = 0.0;
        cfg.kickoff = KickoffPolicy::Team1;
        cfg
    }

    /// Same tuning with a different squad size (small demo matches).
    pub fn with_squad_size(mut self, squad_size: usize) -> Self {
        self.rules = MatchRules::with_squad_size(squad_size);
        self
    }
}

/// Player movement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovementConfig {
    // === Speed ===
    /// Base distance per tick (default: 0.012)
    pub base_speed: f32,
    /// Class multipliers (default: 0.7 / 0.9 / 1.0 / 1.05)
    pub goalkeeper_speed: f32,
    pub defender_speed: f32,
    pub midfielder_speed: f32,
    pub forward_speed: f32,
    /// Carrier speed relative to running without the ball (default: 0.85)
    pub dribble_factor: f32,

    // === Fitness ===
    /// Fitness lost per pitch length run (default: 2.0)
    pub fitness_cost: f32,

    // === Shape ===
    /// Formation push toward goal while the team has the ball (default: 0.1)
    pub possession_push: f32,
    /// Formation drop back while the opponent has the ball (default: 0.05)
    pub defensive_drop: f32,
    /// Share of the ball's offset from centre the block follows (default: 0.3)
    pub shape_follow: f32,
    /// Distance ahead of the ball a supporting player runs to (default: 0.1)
    pub support_distance: f32,
    /// Distance from its slot within which a keeper comes for a loose ball (default: 0.15)
    pub keeper_range: f32,
    /// How far forwards run past the last defender while their team has the ball (default: 0.02)
    pub forward_run: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.012,
            goalkeeper_speed: 0.7,
            defender_speed: 0.9,
            midfielder_speed: 1.0,
            forward_speed: 1.05,
            dribble_factor: 0.85,

            fitness_cost: 2.0,

            possession_push: 0.1,
            defensive_drop: 0.05,
            shape_follow: 0.3,
            support_distance: 0.1,
            keeper_range: 0.15,
            forward_run: 0.02,
        }
    }
}

impl MovementConfig {
    pub fn class_speed(&self, class: PositionClass) -> f32 {
        match class {
            PositionClass::Goalkeeper => self.goalkeeper_speed,
            PositionClass::Defender => self.defender_speed,
            PositionClass::Midfielder => self.midfielder_speed,
            PositionClass::Forward => self.forward_speed,
        }
    }
}

/// Ball flight, possession and contest parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BallConfig {
    /// Pass speed per tick (default: 0.04)
    pub pass_speed: f32,
    /// Shot speed per tick (default: 0.06)
    pub shot_speed: f32,
    /// Share of drift velocity kept each tick (default: 0.6)
    pub drift_friction: f32,
    /// Drift velocity of a ball knocked loose (default: 0.02)
    pub knock_on_speed: f32,

    /// Distance at which a player can claim the ball (default: 0.02)
    pub capture_radius: f32,
    /// Distance at which a presser can tackle (default: 0.025)
    pub tackle_radius: f32,
    /// Opponent distance that makes the carrier look for a pass (default: 0.1)
    pub pressure_radius: f32,
    /// Distance to the goal centre from which the carrier shoots (default: 0.25)
    pub shooting_range: f32,
    /// Longest pass attempted (default: 0.5)
    pub pass_range: f32,

    /// Interception chance at skill 100 (default: 0.35)
    pub intercept_chance: f32,
    /// Share of a contest won outright (default: 0.6)
    pub tackle_win_share: f32,
    /// Chance that a lost contest still knocks the ball loose (default: 0.2)
    pub knock_loose_chance: f32,
    /// Shot spread in goal widths at shooting 0 (default: 1.5)
    pub shot_spread: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            pass_speed: 0.04,
            shot_speed: 0.06,
            drift_friction: 0.6,
            knock_on_speed: 0.02,

            capture_radius: 0.02,
            tackle_radius: 0.025,
            pressure_radius: 0.1,
            shooting_range: 0.25,
            pass_range: 0.5,

            intercept_chance: 0.35,
            tackle_win_share: 0.6,
            knock_loose_chance: 0.2,
            shot_spread: 1.5,
        }
    }
}

/// Random injury parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InjuryConfig {
    /// Chance per healthy player per tick (default: 1/40000)
    pub chance_per_tick: f32,
    /// Relative weights of minor / moderate / severe (default: 6 / 3 / 1)
    pub minor_weight: f32,
    pub moderate_weight: f32,
    pub severe_weight: f32,
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            chance_per_tick: 1.0 / 40_000.0,
            minor_weight: 6.0,
            moderate_weight: 3.0,
            severe_weight: 1.0,
        }
    }
}

/// How the first-half kickoff team is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "camelCase")]
pub enum KickoffPolicy {
    /// Weighted coin flip; `team1_weight` is the chance team 1 kicks off.
    #[serde(rename_all = "camelCase")]
    Random { team1_weight: f32 },
    Team1,
    Team2,
}

impl Default for KickoffPolicy {
    fn default() -> Self {
        KickoffPolicy::Random { team1_weight: 0.5 }
    }
}

/// Turn a configured chance into a probability `gen_bool` accepts.
pub(crate) fn probability(p: f32) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        f64::from(p.clamp(0.0, 1.0))
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.rules.squad_size, 11);
        assert!((cfg.ball.capture_radius - 0.02).abs() < 1e-6);
        assert!(cfg.injury.chance_per_tick > 0.0);
        assert_eq!(cfg.kickoff, KickoffPolicy::Random { team1_weight: 0.5 });
    }

    #[test]
    fn test_deterministic_preset() {
        let cfg = EngineConfig::deterministic();
        assert_eq!(cfg.injury.chance_per_tick, 0.0);
        assert_eq!(cfg.kickoff, KickoffPolicy::Team1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"rules": {"squadSize": 5}, "kickoff": {"policy": "team2"}}"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.rules.squad_size, 5);
        assert_eq!(cfg.rules.halves, 2);
        assert_eq!(cfg.kickoff, KickoffPolicy::Team2);
        assert_eq!(cfg.movement, MovementConfig::default());
    }

    #[test]
    fn test_config_keys_are_camel_case() {
        let json = r#"{"injury": {"chancePerTick": 0.0}, "ball": {"shootingRange": 0.3}}"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.injury.chance_per_tick, 0.0);
        assert!((cfg.ball.shooting_range - 0.3).abs() < 1e-6);

        let value = serde_json::to_value(EngineConfig::default()).unwrap();
        assert!(value["movement"].get("baseSpeed").is_some());
        assert!(value["injury"].get("chance_per_tick").is_none());
    }

    #[test]
    fn test_with_squad_size_keeps_tuning() {
        let cfg = EngineConfig::deterministic().with_squad_size(2);
        assert_eq!(cfg.rules.squad_size, 2);
        assert_eq!(cfg.rules.halves, 2);
        assert_eq!(cfg.kickoff, KickoffPolicy::Team1);
        assert_eq!(cfg.injury.chance_per_tick, 0.0);
    }

    #[test]
    fn test_random_policy_json() {
        let json = r#"{"policy": "random", "team1Weight": 0.8}"#;
        let policy: KickoffPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy, KickoffPolicy::Random { team1_weight: 0.8 });
    }

    #[test]
    fn test_probability_clamps() {
        assert_eq!(probability(1.5), 1.0);
        assert_eq!(probability(-0.1), 0.0);
        assert_eq!(probability(f32::NAN), 0.0);
    }
}
