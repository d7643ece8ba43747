use super::config::{probability, InjuryConfig};
use crate::models::{
    BallIntent, InjurySeverity, InjuryState, IterationLog, MatchDetails, MatchEvent, TeamSide,
};
use rand::Rng;
use tracing::info;

/// Roll for a new injury on every healthy player, kickoff team first.
///
/// One draw per healthy player, plus one severity draw per injury.
pub fn resolve_injuries<R: Rng>(
    details: &mut MatchDetails,
    config: &InjuryConfig,
    rng: &mut R,
    log: &mut IterationLog,
) {
    let chance = probability(config.chance_per_tick);
    if chance <= 0.0 {
        return;
    }
    let iteration = details.iteration;

    for side in TeamSide::BOTH {
        let mut injured = Vec::new();
        for (idx, player) in details.team(side).players.iter().enumerate() {
            if player.is_injured() {
                continue;
            }
            if rng.gen_bool(chance) {
                injured.push((idx, pick_severity(config, rng)));
            }
        }

        for (idx, severity) in injured {
            let team = details.team_mut(side);
            let team_name = team.name.clone();
            let player = &mut team.players[idx];
            player.injury = InjuryState::Injured { severity, since_iteration: iteration };
            let name = player.name.clone();
            details.statistics_mut(side).injuries += 1;

            info!(team = %team_name, player = %name, severity = severity.as_str(), "player injured");
            log.push(MatchEvent::PlayerInjured { team: team_name, player: name.clone(), severity });

            // A player who cannot move drops the ball.
            let carrying = details.ball.with_team == Some(side)
                && details.ball.with_player.as_deref() == Some(name.as_str());
            if carrying && severity.speed_factor() <= 0.0 {
                details.ball.release(BallIntent::Stationary, false);
            }
        }
    }
}

fn pick_severity<R: Rng>(config: &InjuryConfig, rng: &mut R) -> InjurySeverity {
    let minor = config.minor_weight.max(0.0);
    let moderate = config.moderate_weight.max(0.0);
    let severe = config.severe_weight.max(0.0);
    let total = minor + moderate + severe;
    if total <= 0.0 {
        return InjurySeverity::Minor;
    }
    let roll = rng.gen::<f32>() * total;
    if roll < minor {
        InjurySeverity::Minor
    } else if roll < minor + moderate {
        InjurySeverity::Moderate
    } else {
        InjurySeverity::Severe
    }
}
