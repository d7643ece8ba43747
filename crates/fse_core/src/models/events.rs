//! Match events and the per-operation iteration log.
//!
//! The log is produced fresh by every engine call and handed back to the
//! caller; it is never stored inside `MatchDetails`.

use super::player::InjurySeverity;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    KickOffTeam { team: String },
    SecondTeam { team: String },
    PlayerInjured { team: String, player: String, severity: InjurySeverity },
    Pass { team: String, from: String, to: String },
    Shot { team: String, player: String },
    Goal { team: String, player: String },
    ShotSaved { team: String, keeper: String },
    Interception { team: String, player: String },
    TackleWon { team: String, player: String },
    BallKnockedLoose { team: String, player: String },
    TackleFailed { team: String, player: String },
    OutOfPlay { restart_team: String },
    Offside { team: String, player: String },
    HalfTime { half: u8, home: String, home_goals: u32, away: String, away_goals: u32 },
    HalfKickOff { half: u8, team: String },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchEvent::KickOffTeam { team } => write!(f, "Team to kick off - {}", team),
            MatchEvent::SecondTeam { team } => write!(f, "Second team - {}", team),
            MatchEvent::PlayerInjured { team, player, severity } => {
                write!(f, "Player Injured - {} ({}, {})", player, team, severity.as_str())
            }
            MatchEvent::Pass { team, from, to } => {
                write!(f, "Pass - {} to {} ({})", from, to, team)
            }
            MatchEvent::Shot { team, player } => write!(f, "Shot - {} ({})", player, team),
            MatchEvent::Goal { team, player } => {
                write!(f, "Goal Scored by - {} - ({})", player, team)
            }
            MatchEvent::ShotSaved { team, keeper } => {
                write!(f, "Shot Saved by - {} ({})", keeper, team)
            }
            MatchEvent::Interception { team, player } => {
                write!(f, "Ball Intercepted by - {} ({})", player, team)
            }
            MatchEvent::TackleWon { team, player } => {
                write!(f, "Successful Tackle - {} ({})", player, team)
            }
            MatchEvent::BallKnockedLoose { team, player } => {
                write!(f, "Ball knocked loose - {} ({})", player, team)
            }
            MatchEvent::TackleFailed { team, player } => {
                write!(f, "Failed Tackle - {} ({})", player, team)
            }
            MatchEvent::OutOfPlay { restart_team } => {
                write!(f, "Ball out of play - restart to {}", restart_team)
            }
            MatchEvent::Offside { team, player } => write!(f, "Offside - {} ({})", player, team),
            MatchEvent::HalfTime { half, home, home_goals, away, away_goals } => write!(
                f,
                "End of half {} - {} {} : {} {}",
                half, home, home_goals, away_goals, away
            ),
            MatchEvent::HalfKickOff { half, team } => {
                write!(f, "Half {} kick off - {}", half, team)
            }
        }
    }
}

/// Events of a single engine call, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationLog {
    events: Vec<MatchEvent>,
}

impl IterationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn goals(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, MatchEvent::Goal { .. })).count()
    }
}

impl Serialize for IterationLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.events.iter().map(ToString::to_string))
    }
}
