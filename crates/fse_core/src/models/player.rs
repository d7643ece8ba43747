use super::pitch::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playing position of a squad member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Position {
    GK,
    LB,
    CB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
    // Generic positions
    DF,
    MF,
    FW,
}

/// Broad role that drives movement strategy and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionClass {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 18] = [
        Position::GK,
        Position::LB,
        Position::CB,
        Position::RB,
        Position::LWB,
        Position::RWB,
        Position::CDM,
        Position::CM,
        Position::CAM,
        Position::LM,
        Position::RM,
        Position::LW,
        Position::RW,
        Position::CF,
        Position::ST,
        Position::DF,
        Position::MF,
        Position::FW,
    ];

    pub fn class(self) -> PositionClass {
        match self {
            Position::GK => PositionClass::Goalkeeper,
            Position::LB
            | Position::CB
            | Position::RB
            | Position::LWB
            | Position::RWB
            | Position::DF => PositionClass::Defender,
            Position::CDM
            | Position::CM
            | Position::CAM
            | Position::LM
            | Position::RM
            | Position::MF => PositionClass::Midfielder,
            Position::LW | Position::RW | Position::CF | Position::ST | Position::FW => {
                PositionClass::Forward
            }
        }
    }

    pub fn is_goalkeeper(self) -> bool {
        self == Position::GK
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::RB => "RB",
            Position::LWB => "LWB",
            Position::RWB => "RWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::LM => "LM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }
}

/// Accepts any case and the long generic codes `DEF`, `MID` and `FWD`.
impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        let code = match code.as_str() {
            "DEF" => "DF",
            "MID" => "MF",
            "FWD" => "FW",
            other => other,
        };
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == code)
            .ok_or_else(|| format!("unknown position code {s:?}"))
    }
}

impl TryFrom<String> for Position {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill ratings, each on a 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub passing: u8,
    pub shooting: u8,
    pub tackling: u8,
    pub saving: u8,
    pub agility: u8,
    pub strength: u8,
    pub penalty_taking: u8,
    pub jumping: u8,
}

impl Default for Skill {
    fn default() -> Self {
        Self::uniform(50)
    }
}

impl Skill {
    pub const MAX: u8 = 100;

    pub fn uniform(value: u8) -> Self {
        Self {
            passing: value,
            shooting: value,
            tackling: value,
            saving: value,
            agility: value,
            strength: value,
            penalty_taking: value,
            jumping: value,
        }
    }

    /// Named values, used by validation to report the offending attribute.
    pub fn named_values(&self) -> [(&'static str, u8); 8] {
        [
            ("passing", self.passing),
            ("shooting", self.shooting),
            ("tackling", self.tackling),
            ("saving", self.saving),
            ("agility", self.agility),
            ("strength", self.strength),
            ("penaltyTaking", self.penalty_taking),
            ("jumping", self.jumping),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InjurySeverity {
    Minor,
    Moderate,
    Severe,
}

impl InjurySeverity {
    /// Fraction of normal speed an injured player can still reach.
    pub fn speed_factor(self) -> f32 {
        match self {
            InjurySeverity::Minor => 0.5,
            InjurySeverity::Moderate => 0.25,
            InjurySeverity::Severe => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InjurySeverity::Minor => "minor",
            InjurySeverity::Moderate => "moderate",
            InjurySeverity::Severe => "severe",
        }
    }
}

/// Injuries are never healed during a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum InjuryState {
    #[default]
    Healthy,
    #[serde(rename_all = "camelCase")]
    Injured { severity: InjurySeverity, since_iteration: u64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlayerStats {
    pub goals: u32,
    pub shots: u32,
    pub passes: u32,
    pub tackles: u32,
}

/// Squad member as supplied in a team definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDefinition {
    pub name: String,
    pub position: Position,
    pub rating: u8,
    #[serde(default)]
    pub skill: Skill,
    #[serde(rename = "startPOS")]
    pub start_pos: Coord,
    #[serde(default)]
    pub injured: bool,
}

/// Player state inside a running match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub rating: u8,
    pub skill: Skill,
    /// Formation slot, mirrored with the team at half time.
    #[serde(rename = "startPOS")]
    pub start_pos: Coord,
    #[serde(rename = "currentPOS")]
    pub current_pos: Coord,
    pub fitness: f32,
    #[serde(default)]
    pub injury: InjuryState,
    #[serde(default)]
    pub offside: bool,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    pub const MAX_FITNESS: f32 = 100.0;

    pub fn from_definition(def: &PlayerDefinition) -> Self {
        let injury = if def.injured {
            InjuryState::Injured { severity: InjurySeverity::Minor, since_iteration: 0 }
        } else {
            InjuryState::Healthy
        };
        Self {
            name: def.name.clone(),
            position: def.position,
            rating: def.rating,
            skill: def.skill,
            start_pos: def.start_pos,
            current_pos: def.start_pos,
            fitness: Self::MAX_FITNESS,
            injury,
            offside: false,
            stats: PlayerStats::default(),
        }
    }

    pub fn class(&self) -> PositionClass {
        self.position.class()
    }

    pub fn is_injured(&self) -> bool {
        matches!(self.injury, InjuryState::Injured { .. })
    }

    /// Injury multiplier on movement speed (1.0 when healthy).
    pub fn injury_speed_factor(&self) -> f32 {
        match self.injury {
            InjuryState::Healthy => 1.0,
            InjuryState::Injured { severity, .. } => severity.speed_factor(),
        }
    }

    /// Whether the player can still move, and so claim or receive the ball.
    pub fn can_play(&self) -> bool {
        self.injury_speed_factor() > 0.0
    }

    /// Mirror both the live position and the formation slot.
    pub fn mirror(&mut self, width: i32) {
        self.current_pos = self.current_pos.mirrored(width);
        self.start_pos = self.start_pos.mirrored(width);
    }
}
