use super::pitch::Pitch;
use super::player::{Player, PlayerDefinition};
use serde::{Deserialize, Serialize};

/// Which goal a team is currently attacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackDirection {
    /// Attacks the goal at `x = width`, defends `x = 0`.
    Right,
    /// Attacks the goal at `x = 0`, defends `x = width`.
    Left,
}

impl AttackDirection {
    pub fn flipped(self) -> Self {
        match self {
            AttackDirection::Right => AttackDirection::Left,
            AttackDirection::Left => AttackDirection::Right,
        }
    }

    /// +1 when attacking toward increasing x.
    pub fn sign(self) -> f32 {
        match self {
            AttackDirection::Right => 1.0,
            AttackDirection::Left => -1.0,
        }
    }

    pub fn attacked_goal_x(self, pitch: &Pitch) -> i32 {
        match self {
            AttackDirection::Right => pitch.width,
            AttackDirection::Left => 0,
        }
    }

    /// Team-view length: 0 at the team's own goal line, `width` at the goal
    /// it attacks.
    pub fn team_view_x(self, x: f32, pitch: &Pitch) -> f32 {
        match self {
            AttackDirection::Right => x,
            AttackDirection::Left => pitch.width as f32 - x,
        }
    }
}

/// Team as supplied by the caller's configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamDefinition {
    pub name: String,
    pub players: Vec<PlayerDefinition>,
}

/// Team state inside a running match. Roster order is fixed for the whole
/// match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    pub attacks: AttackDirection,
    /// Holds the kickoff of the current half.
    pub kick_off: bool,
}

impl Team {
    pub fn from_definition(def: &TeamDefinition, attacks: AttackDirection, kick_off: bool) -> Self {
        Self {
            name: def.name.clone(),
            players: def.players.iter().map(Player::from_definition).collect(),
            attacks,
            kick_off,
        }
    }

    pub fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Swap ends: mirror every player and reverse the attacking direction.
    pub fn switch_side(&mut self, pitch: &Pitch) {
        for player in &mut self.players {
            player.mirror(pitch.width);
        }
        self.attacks = self.attacks.flipped();
    }

    pub fn reset_to_formation(&mut self) {
        for player in &mut self.players {
            player.current_pos = player.start_pos;
        }
    }

    pub fn clear_offside(&mut self) {
        for player in &mut self.players {
            player.offside = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::{Coord, PitchDefinition};
    use crate::models::player::{Position, Skill};

    fn definition() -> TeamDefinition {
        TeamDefinition {
            name: "Harbour".into(),
            players: vec![
                PlayerDefinition {
                    name: "Keeper".into(),
                    position: Position::GK,
                    rating: 70,
                    skill: Skill::default(),
                    start_pos: Coord::new(2, 30),
                    injured: false,
                },
                PlayerDefinition {
                    name: "Striker".into(),
                    position: Position::ST,
                    rating: 75,
                    skill: Skill::default(),
                    start_pos: Coord::new(40, 25),
                    injured: false,
                },
            ],
        }
    }

    #[test]
    fn test_switch_side_mirrors_and_flips() {
        let pitch = PitchDefinition::new(100, 60).to_pitch();
        let mut team = Team::from_definition(&definition(), AttackDirection::Right, true);
        team.switch_side(&pitch);

        assert_eq!(team.attacks, AttackDirection::Left);
        assert_eq!(team.players[0].current_pos, Coord::new(98, 30));
        assert_eq!(team.players[1].start_pos, Coord::new(60, 25));
    }

    #[test]
    fn test_team_view() {
        let pitch = PitchDefinition::new(100, 60).to_pitch();
        assert_eq!(AttackDirection::Right.team_view_x(80.0, &pitch), 80.0);
        assert_eq!(AttackDirection::Left.team_view_x(80.0, &pitch), 20.0);
        assert_eq!(AttackDirection::Left.attacked_goal_x(&pitch), 0);
    }

    #[test]
    fn test_lookup_by_name() {
        let team = Team::from_definition(&definition(), AttackDirection::Right, false);
        assert_eq!(team.player_index("Striker"), Some(1));
        assert!(team.player("Nobody").is_none());
    }
}
