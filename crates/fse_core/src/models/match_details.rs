use super::ball::Ball;
use super::pitch::{Coord, Pitch};
use super::team::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the two teams of a match.
///
/// `KickOff` is the team that kicked off the first half; the identity never
/// changes, even when the second half is kicked off by the other team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    #[serde(rename = "kickOffTeam")]
    KickOff,
    #[serde(rename = "secondTeam")]
    Second,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::KickOff, TeamSide::Second];

    pub fn opponent(self) -> Self {
        match self {
            TeamSide::KickOff => TeamSide::Second,
            TeamSide::Second => TeamSide::KickOff,
        }
    }

    /// Position in [`TeamSide::BOTH`].
    pub fn index(self) -> usize {
        match self {
            TeamSide::KickOff => 0,
            TeamSide::Second => 1,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::KickOff => f.write_str("kickOffTeam"),
            TeamSide::Second => f.write_str("secondTeam"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatistics {
    pub goals: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub passes: u32,
    pub tackles: u32,
    pub offsides: u32,
    pub injuries: u32,
}

/// Rules fixed when the match is created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRules {
    /// Players per team, constant for the whole match.
    pub squad_size: usize,
    /// Number of halves; more than two is an explicit extra-time extension.
    pub halves: u8,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self { squad_size: 11, halves: 2 }
    }
}

impl MatchRules {
    pub fn with_squad_size(squad_size: usize) -> Self {
        Self { squad_size, ..Self::default() }
    }
}

/// The whole state of one match. Owned by the caller and mutated in place by
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    #[serde(rename = "matchID")]
    pub match_id: String,
    #[serde(rename = "pitchSize")]
    pub pitch: Pitch,
    #[serde(default)]
    pub rules: MatchRules,
    pub half: u8,
    /// Ticks played so far.
    #[serde(default)]
    pub iteration: u64,
    pub kick_off_team: Team,
    pub second_team: Team,
    pub ball: Ball,
    pub kick_off_team_statistics: TeamStatistics,
    pub second_team_statistics: TeamStatistics,
}

impl MatchDetails {
    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::KickOff => &self.kick_off_team,
            TeamSide::Second => &self.second_team,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::KickOff => &mut self.kick_off_team,
            TeamSide::Second => &mut self.second_team,
        }
    }

    pub fn statistics(&self, side: TeamSide) -> &TeamStatistics {
        match side {
            TeamSide::KickOff => &self.kick_off_team_statistics,
            TeamSide::Second => &self.second_team_statistics,
        }
    }

    pub fn statistics_mut(&mut self, side: TeamSide) -> &mut TeamStatistics {
        match side {
            TeamSide::KickOff => &mut self.kick_off_team_statistics,
            TeamSide::Second => &mut self.second_team_statistics,
        }
    }

    /// Side and roster index of the player carrying the ball.
    pub fn carrier(&self) -> Option<(TeamSide, usize)> {
        let side = self.ball.with_team?;
        let name = self.ball.with_player.as_deref()?;
        self.team(side).player_index(name).map(|idx| (side, idx))
    }

    /// Side currently attacking the goal at `x = 0` or `x = width`.
    pub fn side_attacking_goal_at(&self, goal_x: i32) -> TeamSide {
        if self.kick_off_team.attacks.attacked_goal_x(&self.pitch) == goal_x {
            TeamSide::KickOff
        } else {
            TeamSide::Second
        }
    }

    /// Every player position in snapshot order: kickoff team roster, then the
    /// second team roster.
    pub fn player_positions(&self) -> impl Iterator<Item = Coord> + '_ {
        self.kick_off_team
            .players
            .iter()
            .chain(self.second_team.players.iter())
            .map(|p| p.current_pos)
    }

    pub fn score(&self) -> (u32, u32) {
        (self.statistics(TeamSide::KickOff).goals, self.statistics(TeamSide::Second).goals)
    }
}
