//! Offside flags, recomputed from scratch every tick.
//!
//! All geometry is in the attacking team's view: `x = 0` is its own goal
//! line and `x = width` the goal it attacks.

use crate::models::{AttackDirection, IterationLog, MatchDetails, MatchEvent, Pitch, Team, TeamSide};
use tracing::debug;

/// Team the offside rule applies to: the side in possession, or the side
/// holding a pending restart.
pub fn attacking_side(details: &MatchDetails) -> Option<TeamSide> {
    details.ball.with_team.or(details.ball.restart)
}

/// Team-view x of the second-deepest defender. With fewer than two
/// defenders nobody can be offside.
pub fn offside_line(defenders: &Team, attacks: AttackDirection, pitch: &Pitch) -> f32 {
    let mut xs: Vec<f32> = defenders
        .players
        .iter()
        .map(|p| attacks.team_view_x(p.current_pos.x as f32, pitch))
        .collect();
    if xs.len() < 2 {
        return pitch.width as f32;
    }
    xs.sort_by(|a, b| b.total_cmp(a));
    xs[1]
}

/// In the opponent half, beyond the second-deepest defender and ahead of the
/// ball. All values are team-view x.
pub fn is_offside_position(x: f32, line: f32, ball_x: f32, pitch: &Pitch) -> bool {
    x > pitch.width as f32 / 2.0 && x > line && x > ball_x
}

fn compute_flags(details: &MatchDetails, side: TeamSide) -> Vec<bool> {
    let pitch = &details.pitch;
    let team = details.team(side);
    let line = offside_line(details.team(side.opponent()), team.attacks, pitch);
    let ball_x = team.attacks.team_view_x(details.ball.position.x as f32, pitch);
    team.players
        .iter()
        .map(|p| {
            let x = team.attacks.team_view_x(p.current_pos.x as f32, pitch);
            is_offside_position(x, line, ball_x, pitch)
        })
        .collect()
}

/// Refresh every offside flag. When `run` is false, or nobody is attacking,
/// all flags are cleared. Players newly caught offside are counted and
/// logged.
pub fn update_offside(details: &mut MatchDetails, run: bool, log: &mut IterationLog) {
    let attacking = if run { attacking_side(details) } else { None };

    for side in TeamSide::BOTH {
        let flags = if attacking == Some(side) {
            compute_flags(details, side)
        } else {
            vec![false; details.team(side).players.len()]
        };

        let team = details.team_mut(side);
        let team_name = team.name.clone();
        let mut newly = Vec::new();
        for (player, flag) in team.players.iter_mut().zip(flags) {
            if flag && !player.offside {
                newly.push(player.name.clone());
            }
            player.offside = flag;
        }

        for name in newly {
            details.statistics_mut(side).offsides += 1;
            debug!(team = %team_name, player = %name, "offside");
            log.push(MatchEvent::Offside { team: team_name.clone(), player: name });
        }
    }
}
