use crate::models::{Ball, IterationLog, MatchDetails, MatchEvent, TeamSide};
use tracing::info;

/// Half-time transition. Callers validate first; this only mutates.
///
/// Both teams swap ends (live positions and formation slots mirrored,
/// directions flipped) and the kickoff passes to the team that did not take
/// the previous one. The ball goes back to the centre spot.
pub fn switch_half(details: &mut MatchDetails, log: &mut IterationLog) {
    let (home_goals, away_goals) = details.score();
    log.push(MatchEvent::HalfTime {
        half: details.half,
        home: details.kick_off_team.name.clone(),
        home_goals,
        away: details.second_team.name.clone(),
        away_goals,
    });

    let pitch = details.pitch;
    for side in TeamSide::BOTH {
        let team = details.team_mut(side);
        team.switch_side(&pitch);
        team.clear_offside();
        team.kick_off = !team.kick_off;
    }

    let kicker =
        if details.kick_off_team.kick_off { TeamSide::KickOff } else { TeamSide::Second };
    details.ball = Ball::kick_off(&pitch, kicker);
    details.half += 1;

    let team = details.team(kicker).name.clone();
    info!(half = details.half, team = %team, home_goals, away_goals, "half started");
    log.push(MatchEvent::HalfKickOff { half: details.half, team });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttackDirection, Coord};
    use crate::test_fixtures::*;

    #[test]
    fn test_sides_swap() {
        let mut details = small_match();
        details.kick_off_team.players[0].current_pos = Coord::new(10, 20);
        let mut log = IterationLog::new();
        switch_half(&mut details, &mut log);

        assert_eq!(details.half, 2);
        assert_eq!(details.kick_off_team.players[0].current_pos, Coord::new(90, 20));
        assert_eq!(details.kick_off_team.attacks, AttackDirection::Left);
        assert_eq!(details.second_team.attacks, AttackDirection::Right);
    }

    #[test]
    fn test_second_team_kicks_off() {
        let mut details = small_match();
        details.kick_off_team_statistics.goals = 2;
        details.second_team_statistics.goals = 1;
        let mut log = IterationLog::new();
        switch_half(&mut details, &mut log);

        assert!(!details.kick_off_team.kick_off);
        assert!(details.second_team.kick_off);
        assert_eq!(details.ball.restart, Some(TeamSide::Second));
        assert_eq!(details.ball.position, Coord::new(50, 30));
        assert!(details.ball.ball_over_iterations.is_empty());
        assert_eq!(details.score(), (2, 1));

        let lines = log.lines();
        assert_eq!(lines[0], format!(
            "End of half 1 - {} 2 : 1 {}",
            details.kick_off_team.name, details.second_team.name
        ));
        assert_eq!(lines[1], format!("Half 2 kick off - {}", details.second_team.name));
    }
}
