//! Match creation: validates the definitions, decides who kicks off and faces
//! the two teams across the halfway line.

use super::config::{probability, EngineConfig, KickoffPolicy};
use crate::error::Result;
use crate::models::{
    AttackDirection, Ball, IterationLog, MatchDetails, MatchEvent, PitchDefinition, Team,
    TeamDefinition, TeamSide, TeamStatistics,
};
use crate::validate::Validator;
use rand::Rng;
use tracing::info;

/// A freshly created match and the log of its creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStart {
    pub details: MatchDetails,
    pub log: IterationLog,
}

/// Decide whether team 1 takes the first-half kickoff.
pub fn team1_kicks_off<R: Rng>(policy: KickoffPolicy, rng: &mut R) -> bool {
    match policy {
        KickoffPolicy::Random { team1_weight } => rng.gen_bool(probability(team1_weight)),
        KickoffPolicy::Team1 => true,
        KickoffPolicy::Team2 => false,
    }
}

pub fn create_match<R: Rng>(
    team1: &TeamDefinition,
    team2: &TeamDefinition,
    pitch: &PitchDefinition,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<MatchStart> {
    Validator::validate_arguments(team1, team2)?;
    Validator::validate_rules(&config.rules)?;
    Validator::validate_pitch(pitch)?;
    let pitch = pitch.to_pitch();
    Validator::validate_team(team1, &config.rules, &pitch)?;
    Validator::validate_team(team2, &config.rules, &pitch)?;

    let (kicker, other) =
        if team1_kicks_off(config.kickoff, rng) { (team1, team2) } else { (team2, team1) };

    // Formations are defined attacking right; the second team faces them.
    let kick_off_team = Team::from_definition(kicker, AttackDirection::Right, true);
    let mut second_team = Team::from_definition(other, AttackDirection::Right, false);
    second_team.switch_side(&pitch);

    let match_id = format!("{:016x}", rng.gen::<u64>());

    let mut log = IterationLog::new();
    log.push(MatchEvent::KickOffTeam { team: kick_off_team.name.clone() });
    log.push(MatchEvent::SecondTeam { team: second_team.name.clone() });

    info!(match_id = %match_id, kick_off = %kick_off_team.name, second = %second_team.name, "match created");

    let details = MatchDetails {
        match_id,
        pitch,
        rules: config.rules,
        half: 1,
        iteration: 0,
        kick_off_team,
        second_team,
        ball: Ball::kick_off(&pitch, TeamSide::KickOff),
        kick_off_team_statistics: TeamStatistics::default(),
        second_team_statistics: TeamStatistics::default(),
    };

    Ok(MatchStart { details, log })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Coord;
    use crate::test_fixtures::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_small_match_setup() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let start = create_match(
            &two_player_team("Slugs"),
            &two_player_team("Dragons"),
            &small_pitch_definition(),
            &small_config(),
            &mut rng,
        )
        .unwrap();
        let details = &start.details;

        assert_eq!(details.ball.position, Coord::new(50, 30));
        assert!(details.ball.with_team.is_none());
        assert_eq!(details.half, 1);
        assert!(details.kick_off_team.kick_off);
        assert!(!details.second_team.kick_off);
        assert_eq!(details.kick_off_team.name, "Slugs");
        assert_eq!(
            start.log.lines(),
            vec!["Team to kick off - Slugs", "Second team - Dragons"]
        );
    }

    #[test]
    fn test_second_team_is_mirrored() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let start = create_match(
            &two_player_team("Slugs"),
            &two_player_team("Dragons"),
            &small_pitch_definition(),
            &small_config(),
            &mut rng,
        )
        .unwrap();
        let home = &start.details.kick_off_team;
        let away = &start.details.second_team;

        assert_eq!(away.attacks, AttackDirection::Left);
        for (h, a) in home.players.iter().zip(&away.players) {
            assert_eq!(a.current_pos, h.current_pos.mirrored(100));
            assert_eq!(a.start_pos, a.current_pos);
        }
    }

    #[test]
    fn test_team2_policy() {
        let mut config = small_config();
        config.kickoff = KickoffPolicy::Team2;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let start = create_match(
            &two_player_team("Slugs"),
            &two_player_team("Dragons"),
            &small_pitch_definition(),
            &config,
            &mut rng,
        )
        .unwrap();
        assert_eq!(start.details.kick_off_team.name, "Dragons");
    }

    #[test]
    fn test_random_kickoff_is_seeded() {
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut config = small_config();
            config.kickoff = KickoffPolicy::default();
            create_match(
                &two_player_team("Slugs"),
                &two_player_team("Dragons"),
                &small_pitch_definition(),
                &config,
                &mut rng,
            )
            .unwrap()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_short_roster_rejected() {
        let mut short = full_team("Short");
        short.players.pop();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = create_match(
            &short,
            &full_team("Full"),
            &full_pitch_definition(),
            &EngineConfig::deterministic(),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Team);
    }

    #[test]
    fn test_bad_pitch_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = create_match(
            &two_player_team("Slugs"),
            &two_player_team("Dragons"),
            &PitchDefinition::new(100, 0),
            &small_config(),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Pitch);
    }
}
