use super::match_details::TeamSide;
use super::pitch::{Coord, Pitch};
use serde::{Deserialize, Serialize};

/// What the ball is currently doing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BallIntent {
    /// Resting where it is.
    #[default]
    Stationary,
    /// At a player's feet (`Ball::with_player`).
    Carried,
    /// Rolling loose, slowing every tick.
    Drift { dx: f32, dy: f32 },
    /// Travelling toward a teammate, following them as they move.
    ToPlayer { side: TeamSide, name: String },
    /// Shot travelling toward a point just past the goal line.
    ToGoal { target: Coord, shooter: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ball {
    pub position: Coord,
    /// Team in possession, kept while its own pass or shot is in flight.
    pub with_team: Option<TeamSide>,
    pub with_player: Option<String>,
    #[serde(default)]
    pub intent: BallIntent,
    #[serde(default)]
    pub last_touch: Option<TeamSide>,
    /// Pending kickoff or restart: only this team may claim the ball.
    #[serde(default)]
    pub restart: Option<TeamSide>,
    /// Ball positions since the last restart, one per tick.
    #[serde(default)]
    pub ball_over_iterations: Vec<Coord>,
}

impl Ball {
    /// Unclaimed ball on the centre spot with a kickoff pending for `side`.
    pub fn kick_off(pitch: &Pitch, side: TeamSide) -> Self {
        Self::restart_at(pitch.centre(), side)
    }

    pub fn restart_at(position: Coord, side: TeamSide) -> Self {
        Self {
            position,
            with_team: None,
            with_player: None,
            intent: BallIntent::Stationary,
            last_touch: None,
            restart: Some(side),
            ball_over_iterations: Vec::new(),
        }
    }

    pub fn is_carried(&self) -> bool {
        self.with_player.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.intent, BallIntent::ToPlayer { .. } | BallIntent::ToGoal { .. })
    }

    /// Hand the ball to a player.
    pub fn give_to(&mut self, side: TeamSide, name: &str, position: Coord) {
        self.position = position;
        self.with_team = Some(side);
        self.with_player = Some(name.to_string());
        self.intent = BallIntent::Carried;
        self.last_touch = Some(side);
        self.restart = None;
    }

    /// Let the ball go; possession ends unless `keep_team` (own pass or shot).
    pub fn release(&mut self, intent: BallIntent, keep_team: bool) {
        self.with_player = None;
        if !keep_team {
            self.with_team = None;
        }
        self.intent = intent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::PitchDefinition;

    #[test]
    fn test_kick_off_ball() {
        let pitch = PitchDefinition::new(100, 60).to_pitch();
        let ball = Ball::kick_off(&pitch, TeamSide::KickOff);
        assert_eq!(ball.position, Coord::new(50, 30));
        assert!(ball.with_team.is_none());
        assert_eq!(ball.restart, Some(TeamSide::KickOff));
        assert!(ball.ball_over_iterations.is_empty());
    }

    #[test]
    fn test_give_and_release() {
        let pitch = PitchDefinition::new(100, 60).to_pitch();
        let mut ball = Ball::kick_off(&pitch, TeamSide::Second);
        ball.give_to(TeamSide::Second, "Nine", Coord::new(48, 30));
        assert!(ball.is_carried());
        assert!(ball.restart.is_none());

        ball.release(
            BallIntent::ToPlayer { side: TeamSide::Second, name: "Ten".into() },
            true,
        );
        assert!(ball.is_in_flight());
        assert_eq!(ball.with_team, Some(TeamSide::Second));
        assert!(ball.with_player.is_none());

        ball.release(BallIntent::Drift { dx: 1.0, dy: 0.0 }, false);
        assert!(ball.with_team.is_none());
    }

    #[test]
    fn test_intent_json_tag() {
        let intent = BallIntent::ToGoal { target: Coord::new(-1, 30), shooter: "Nine".into() };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["type"], "toGoal");
        assert_eq!(json["target"], serde_json::json!([-1, 30]));
    }
}
