//! Input validation for every engine entry point.
//!
//! All checks are pure. Engine operations run them before touching the match
//! state, so a call either fails here or completes.

use crate::error::{MatchError, Result};
use crate::models::{
    BallIntent, Coord, MatchDetails, MatchRules, Pitch, PitchDefinition, Player, Skill, Team,
    TeamDefinition,
};
use serde_json::Value;
use std::collections::HashSet;

/// Validation entry points, grouped the way the engine calls them.
pub struct Validator;

impl Validator {
    /// Raw call arguments at the JSON boundary: every argument must be an
    /// object.
    pub fn validate_json_arguments(team1: &Value, team2: &Value, pitch: &Value) -> Result<()> {
        for (label, value) in [("team1", team1), ("team2", team2), ("pitch", pitch)] {
            match value {
                Value::Object(map) if !map.is_empty() => {}
                Value::Null => {
                    return Err(MatchError::Argument(format!("{label} is missing")));
                }
                _ => {
                    return Err(MatchError::Argument(format!("{label} must be a JSON object")));
                }
            }
        }
        Ok(())
    }

    /// The two teams passed to `initiate` must be distinct, named teams.
    pub fn validate_arguments(team1: &TeamDefinition, team2: &TeamDefinition) -> Result<()> {
        if team1.name.trim().is_empty() || team2.name.trim().is_empty() {
            return Err(MatchError::Argument("both teams need a name".to_string()));
        }
        if team1.name == team2.name {
            return Err(MatchError::Argument(format!(
                "both arguments describe the same team '{}'",
                team1.name
            )));
        }
        Ok(())
    }

    pub fn validate_rules(rules: &MatchRules) -> Result<()> {
        if rules.squad_size == 0 {
            return Err(MatchError::MatchState("squad size must be at least 1".to_string()));
        }
        if rules.halves == 0 {
            return Err(MatchError::MatchState("a match needs at least one half".to_string()));
        }
        Ok(())
    }

    pub fn validate_pitch(pitch: &PitchDefinition) -> Result<()> {
        Self::check_pitch(&pitch.to_pitch())
    }

    fn check_pitch(pitch: &Pitch) -> Result<()> {
        if pitch.width <= 0 || pitch.height <= 0 {
            return Err(MatchError::Pitch(format!(
                "width and height must be positive, got {}x{}",
                pitch.width, pitch.height
            )));
        }
        if pitch.width > Pitch::MAX_SIDE || pitch.height > Pitch::MAX_SIDE {
            return Err(MatchError::Pitch(format!(
                "width and height must be at most {}, got {}x{}",
                Pitch::MAX_SIDE,
                pitch.width,
                pitch.height
            )));
        }
        if pitch.goal_width <= 0 || pitch.goal_width > pitch.height {
            return Err(MatchError::Pitch(format!(
                "goal width {} must be within 1..={}",
                pitch.goal_width, pitch.height
            )));
        }
        Ok(())
    }

    /// Team definition before the match exists.
    pub fn validate_team(team: &TeamDefinition, rules: &MatchRules, pitch: &Pitch) -> Result<()> {
        if team.name.trim().is_empty() {
            return Err(MatchError::team(&team.name, "team name is empty"));
        }
        Self::check_squad(&team.name, team.players.len(), rules)?;
        Self::check_unique_names(&team.name, team.players.iter().map(|p| p.name.as_str()))?;

        for player in &team.players {
            Self::check_ratings(&team.name, &player.name, player.rating, &player.skill)?;
            Self::check_position(&format!("{} start position", player.name), player.start_pos, pitch)?;
        }
        Ok(())
    }

    /// Top-level shape and internal consistency of a running match.
    pub fn validate_match_details(details: &MatchDetails) -> Result<()> {
        Self::validate_rules(&details.rules)?;
        Self::check_pitch(&details.pitch).map_err(|e| MatchError::MatchState(e.to_string()))?;

        if details.half == 0 || details.half > details.rules.halves {
            return Err(MatchError::MatchState(format!(
                "half {} is outside 1..={}",
                details.half, details.rules.halves
            )));
        }

        let (home, away) = (&details.kick_off_team, &details.second_team);
        if home.name.is_empty() || away.name.is_empty() || home.name == away.name {
            return Err(MatchError::MatchState(
                "teams must have distinct, non-empty names".to_string(),
            ));
        }
        if home.kick_off == away.kick_off {
            return Err(MatchError::MatchState(
                "exactly one team must hold the kickoff".to_string(),
            ));
        }
        if home.attacks == away.attacks {
            return Err(MatchError::MatchState("both teams attack the same goal".to_string()));
        }

        Self::check_ball(details)
    }

    fn check_ball(details: &MatchDetails) -> Result<()> {
        let ball = &details.ball;

        if let Some(name) = ball.with_player.as_deref() {
            let Some(side) = ball.with_team else {
                return Err(MatchError::MatchState(format!(
                    "ball is with player '{name}' but with no team"
                )));
            };
            if details.team(side).player(name).is_none() {
                return Err(MatchError::MatchState(format!(
                    "ball carrier '{name}' is not in {}",
                    details.team(side).name
                )));
            }
            if ball.restart.is_some() {
                return Err(MatchError::MatchState(
                    "a restart is pending while the ball is carried".to_string(),
                ));
            }
        }

        match &ball.intent {
            BallIntent::Carried if ball.with_player.is_none() => Err(MatchError::MatchState(
                "ball is marked as carried but has no carrier".to_string(),
            )),
            BallIntent::ToPlayer { side, name } => {
                if ball.with_team != Some(*side) {
                    return Err(MatchError::MatchState(format!(
                        "pass to '{name}' in flight without possession"
                    )));
                }
                if details.team(*side).player(name).is_none() {
                    return Err(MatchError::MatchState(format!(
                        "pass target '{name}' is not in {}",
                        details.team(*side).name
                    )));
                }
                Ok(())
            }
            BallIntent::Drift { dx, dy } if !dx.is_finite() || !dy.is_finite() => {
                Err(MatchError::MatchState("ball drift is not finite".to_string()))
            }
            _ if ball.with_player.is_some() && ball.intent != BallIntent::Carried => Err(
                MatchError::MatchState("carried ball has a flight intent".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Team still has a full, valid squad in the middle of a match.
    pub fn validate_team_second_half(team: &Team, rules: &MatchRules) -> Result<()> {
        Self::check_squad(&team.name, team.players.len(), rules)?;
        Self::check_unique_names(&team.name, team.players.iter().map(|p| p.name.as_str()))?;
        for player in &team.players {
            Self::check_ratings(&team.name, &player.name, player.rating, &player.skill)?;
            Self::check_fitness(&team.name, player)?;
        }
        Ok(())
    }

    /// Every player (live and formation slot) and the ball lie on the pitch.
    pub fn validate_player_positions(details: &MatchDetails) -> Result<()> {
        let pitch = &details.pitch;
        for team in [&details.kick_off_team, &details.second_team] {
            for player in &team.players {
                Self::check_position(&player.name, player.current_pos, pitch)?;
                Self::check_position(
                    &format!("{} start position", player.name),
                    player.start_pos,
                    pitch,
                )?;
            }
        }
        Self::check_position("ball", details.ball.position, pitch)
    }

    /// Full precondition set for `tick` and `switch_half`.
    pub fn validate_for_iteration(details: &MatchDetails) -> Result<()> {
        Self::validate_match_details(details)?;
        Self::validate_team_second_half(&details.kick_off_team, &details.rules)?;
        Self::validate_team_second_half(&details.second_team, &details.rules)?;
        Self::validate_player_positions(details)
    }

    /// Preconditions of `switch_half`: a valid match with a half left to play.
    pub fn validate_half_switch(details: &MatchDetails) -> Result<()> {
        Self::validate_for_iteration(details)?;
        if details.half >= details.rules.halves {
            return Err(MatchError::MatchState(format!(
                "half {} is the last of {}",
                details.half, details.rules.halves
            )));
        }
        Ok(())
    }

    fn check_squad(team: &str, found: usize, rules: &MatchRules) -> Result<()> {
        if found != rules.squad_size {
            return Err(MatchError::team(
                team,
                format!("expected {} players, found {}", rules.squad_size, found),
            ));
        }
        Ok(())
    }

    fn check_unique_names<'a>(team: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut seen = HashSet::new();
        for name in names {
            if name.trim().is_empty() {
                return Err(MatchError::team(team, "player name is empty"));
            }
            if !seen.insert(name) {
                return Err(MatchError::team(team, format!("duplicate player name '{name}'")));
            }
        }
        Ok(())
    }

    fn check_ratings(team: &str, player: &str, rating: u8, skill: &Skill) -> Result<()> {
        if rating > Skill::MAX {
            return Err(MatchError::team(team, format!("{player} rating {rating} exceeds 100")));
        }
        for (attribute, value) in skill.named_values() {
            if value > Skill::MAX {
                return Err(MatchError::team(
                    team,
                    format!("{player} {attribute} {value} exceeds 100"),
                ));
            }
        }
        Ok(())
    }

    fn check_fitness(team: &str, player: &Player) -> Result<()> {
        if !player.fitness.is_finite() || !(0.0..=Player::MAX_FITNESS).contains(&player.fitness) {
            return Err(MatchError::team(
                team,
                format!("{} fitness {} is outside 0..=100", player.name, player.fitness),
            ));
        }
        Ok(())
    }

    fn check_position(entity: &str, pos: Coord, pitch: &Pitch) -> Result<()> {
        if !pitch.contains(pos) {
            return Err(MatchError::Position {
                entity: entity.to_string(),
                x: pos.x,
                y: pos.y,
                width: pitch.width,
                height: pitch.height,
            });
        }
        Ok(())
    }
}
