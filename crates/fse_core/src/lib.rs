//! # fse_core - Tick-Based Football Match Simulation Engine
//!
//! Plays a match one iteration at a time on a 2D pitch. The caller owns the
//! [`MatchDetails`] state and passes it back in on every call; the engine
//! only holds tuning and its random source.
//!
//! ## Features
//! - Deterministic with a seeded engine (same seed = same match)
//! - Whole-state validation before every mutation
//! - Position snapshot output for renderers
//! - JSON API for transport layers

// Engine steps take the match plus tuning, rng and log.
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod snapshot;
pub mod validate;

#[cfg(test)]
mod test_fixtures;

// Re-export main API functions
pub use api::{
    initiate_json, initiate_response, switch_half_json, switch_half_response, tick_json,
    tick_response, ApiError, ApiResponse, API_VERSION,
};
pub use engine::{EngineConfig, MatchEngine, MatchStart};
pub use error::{ErrorKind, MatchError, Result};
pub use models::{
    AttackDirection, Ball, Coord, IterationLog, MatchDetails, MatchEvent, MatchRules,
    PitchDefinition, Player, PlayerDefinition, Position, Skill, Team, TeamDefinition, TeamSide,
};
pub use snapshot::{match_details_from_value, PositionSnapshot};
pub use validate::Validator;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
