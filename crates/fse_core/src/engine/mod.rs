//! # Match engine
//!
//! [`MatchEngine`] owns the tuning and the random source; the caller owns the
//! [`MatchDetails`] and hands it in for every call. Each operation validates
//! the whole state first, so an `Err` leaves the match untouched.
//!
//! ```rust
//! use fse_core::engine::{config::EngineConfig, MatchEngine};
//!
//! let engine = MatchEngine::seeded(42, EngineConfig::default());
//! assert_eq!(engine.config().rules.squad_size, 11);
//! ```

pub mod actions;
pub mod ball_movement;
pub mod config;
pub mod geometry;
pub mod half;
pub mod injury;
pub mod offside;
pub mod player_movement;
pub mod setup;

pub use config::{BallConfig, EngineConfig, InjuryConfig, KickoffPolicy, MovementConfig};
pub use player_movement::{closest_player_to_ball, ClosestPlayer};
pub use setup::MatchStart;

use crate::error::Result;
use crate::models::{IterationLog, MatchDetails, PitchDefinition, TeamDefinition};
use crate::validate::Validator;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Simulation engine for any number of independent matches.
pub struct MatchEngine<R = ChaCha8Rng> {
    config: EngineConfig,
    rng: R,
}

impl MatchEngine<ChaCha8Rng> {
    /// Engine over a seeded ChaCha8 stream: the same seed and inputs
    /// reproduce the same match.
    pub fn seeded(seed: u64, config: EngineConfig) -> Self {
        Self { config, rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl<R: Rng> MatchEngine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a match from two team definitions and a pitch.
    pub fn initiate(
        &mut self,
        team1: &TeamDefinition,
        team2: &TeamDefinition,
        pitch: &PitchDefinition,
    ) -> Result<MatchStart> {
        setup::create_match(team1, team2, pitch, &self.config, &mut self.rng)
    }

    /// Advance the match by one tick.
    ///
    /// Steps, in order: injuries, ball movement, closest-player search,
    /// movement decisions (carrier, then every move, then tackles), offside.
    pub fn tick(&mut self, details: &mut MatchDetails) -> Result<IterationLog> {
        Validator::validate_for_iteration(details)?;

        let mut log = IterationLog::new();
        details.iteration += 1;
        let restart_tick = details.ball.ball_over_iterations.is_empty();

        injury::resolve_injuries(details, &self.config.injury, &mut self.rng, &mut log);
        ball_movement::move_ball(details, &self.config.ball, &mut self.rng, &mut log);

        let ball = details.ball.position;
        let closest = [
            closest_player_to_ball(&details.kick_off_team, ball).map(|c| c.index),
            closest_player_to_ball(&details.second_team, ball).map(|c| c.index),
        ];
        player_movement::decide_movement(details, &self.config, closest, &mut self.rng, &mut log);

        let run_offside = restart_tick || details.ball.with_team.is_some();
        offside::update_offside(details, run_offside, &mut log);

        debug!(
            iteration = details.iteration,
            events = log.len(),
            ball_x = details.ball.position.x,
            ball_y = details.ball.position.y,
            "tick"
        );
        Ok(log)
    }

    /// Half-time transition. Fails once the last half has started.
    pub fn switch_half(&mut self, details: &mut MatchDetails) -> Result<IterationLog> {
        Validator::validate_half_switch(details)?;
        let mut log = IterationLog::new();
        half::switch_half(details, &mut log);
        Ok(log)
    }
}
