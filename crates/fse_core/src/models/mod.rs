pub mod ball;
pub mod events;
pub mod match_details;
pub mod pitch;
pub mod player;
pub mod team;

pub use ball::{Ball, BallIntent};
pub use events::{IterationLog, MatchEvent};
pub use match_details::{MatchDetails, MatchRules, TeamSide, TeamStatistics};
pub use pitch::{Coord, Pitch, PitchDefinition};
pub use player::{
    InjurySeverity, InjuryState, Player, PlayerDefinition, PlayerStats, Position, PositionClass,
    Skill,
};
pub use team::{AttackDirection, Team, TeamDefinition};
