//! Test Fixtures Module
//!
//! Shared teams, pitches and matches for the unit tests.
//!
//! ## Usage
//! ```rust,ignore
//! #[cfg(test)]
//! use crate::test_fixtures::*;
//! ```

use crate::engine::{EngineConfig, MatchEngine};
use crate::models::{
    AttackDirection, Coord, MatchDetails, Pitch, PitchDefinition, PlayerDefinition, Position,
    Skill, Team, TeamDefinition,
};

// =============================================================================
// Pitches
// =============================================================================

pub fn small_pitch_definition() -> PitchDefinition {
    PitchDefinition::new(100, 60)
}

pub fn small_pitch() -> Pitch {
    small_pitch_definition().to_pitch()
}

pub fn full_pitch_definition() -> PitchDefinition {
    PitchDefinition::new(1050, 680)
}

pub fn full_pitch() -> Pitch {
    full_pitch_definition().to_pitch()
}

// =============================================================================
// Teams
// =============================================================================

fn player(team: &str, number: usize, position: Position, skill: Skill, at: Coord) -> PlayerDefinition {
    PlayerDefinition {
        name: format!("{} Player {}", team, number),
        position,
        rating: 70,
        skill,
        start_pos: at,
        injured: false,
    }
}

/// Keeper at (5, 30) and striker at (40, 30) on the 100x60 pitch.
pub fn two_player_team(name: &str) -> TeamDefinition {
    TeamDefinition {
        name: name.to_string(),
        players: vec![
            player(name, 1, Position::GK, Skill::default(), Coord::new(5, 30)),
            player(name, 2, Position::ST, Skill::default(), Coord::new(40, 30)),
        ],
    }
}

/// 4-4-2 on the 1050x680 pitch, attacking right from the left half.
pub fn full_team(name: &str) -> TeamDefinition {
    let keeper = Skill { saving: 80, ..Skill::default() };
    let defender = Skill { tackling: 70, strength: 65, ..Skill::default() };
    let midfielder = Skill { passing: 70, agility: 60, ..Skill::default() };
    let forward = Skill { shooting: 75, agility: 65, ..Skill::default() };

    let slots = [
        (Position::GK, keeper, Coord::new(20, 340)),
        (Position::LB, defender, Coord::new(200, 100)),
        (Position::CB, defender, Coord::new(180, 250)),
        (Position::CB, defender, Coord::new(180, 430)),
        (Position::RB, defender, Coord::new(200, 580)),
        (Position::LM, midfielder, Coord::new(360, 100)),
        (Position::CM, midfielder, Coord::new(340, 260)),
        (Position::CM, midfielder, Coord::new(340, 420)),
        (Position::RM, midfielder, Coord::new(360, 580)),
        (Position::ST, forward, Coord::new(480, 280)),
        (Position::ST, forward, Coord::new(480, 400)),
    ];

    TeamDefinition {
        name: name.to_string(),
        players: slots
            .iter()
            .enumerate()
            .map(|(i, &(position, skill, at))| player(name, i + 1, position, skill, at))
            .collect(),
    }
}

/// Match-state team of central midfielders at the given positions,
/// attacking right.
pub fn team_at(name: &str, positions: &[Coord]) -> Team {
    let def = TeamDefinition {
        name: name.to_string(),
        players: positions
            .iter()
            .enumerate()
            .map(|(i, &at)| player(name, i + 1, Position::CM, Skill::default(), at))
            .collect(),
    };
    Team::from_definition(&def, AttackDirection::Right, false)
}

// =============================================================================
// Matches
// =============================================================================

/// Deterministic config for two-a-side matches.
pub fn small_config() -> EngineConfig {
    EngineConfig::deterministic().with_squad_size(2)
}

/// Fresh two-a-side match: "Slugs" kick off against "Dragons", ball on the
/// centre spot.
pub fn small_match() -> MatchDetails {
    MatchEngine::seeded(7, small_config())
        .initiate(&two_player_team("Slugs"), &two_player_team("Dragons"), &small_pitch_definition())
        .expect("fixture match")
        .details
}
