//! Ball movement for one tick.
//!
//! Order inside the step: advance along the current intent, check the goal
//! and touch lines, then let players claim the ball along the path it just
//! travelled. A ball still in play gets its new position appended to
//! `ballOverIterations`.

use super::config::{probability, BallConfig};
use super::geometry::{crossing_y, distance_to_segment, seek};
use crate::models::{
    Ball, BallIntent, Coord, IterationLog, MatchDetails, MatchEvent, TeamSide,
};
use rand::Rng;
use tracing::{debug, info};

/// Drift slower than this (units per tick) comes to rest.
const REST_SPEED: f32 = 0.5;

/// Claim distances closer than this count as reaching the ball together.
const CONTEST_MARGIN: f32 = 1.0;

pub fn move_ball<R: Rng>(
    details: &mut MatchDetails,
    config: &BallConfig,
    rng: &mut R,
    log: &mut IterationLog,
) {
    let pitch = details.pitch;
    let from = details.ball.position.to_f32();

    let to = match details.ball.intent.clone() {
        BallIntent::Carried => match details.carrier() {
            Some((side, idx)) => details.team(side).players[idx].current_pos.to_f32(),
            None => from,
        },
        BallIntent::Stationary => from,
        BallIntent::Drift { dx, dy } => {
            let (nx, ny) = (dx * config.drift_friction, dy * config.drift_friction);
            details.ball.intent = if nx.hypot(ny) < REST_SPEED {
                BallIntent::Stationary
            } else {
                BallIntent::Drift { dx: nx, dy: ny }
            };
            (from.0 + dx, from.1 + dy)
        }
        BallIntent::ToPlayer { side, name } => {
            let target = details
                .team(side)
                .player(&name)
                .map(|p| p.current_pos.to_f32())
                .unwrap_or(from);
            seek(from, target, pitch.units(config.pass_speed))
        }
        BallIntent::ToGoal { target, .. } => {
            seek(from, target.to_f32(), pitch.units(config.shot_speed))
        }
    };

    let landed = Coord::from_f32(to.0, to.1);
    if !pitch.contains(landed) {
        leave_pitch(details, from, to, landed, log);
        return;
    }
    details.ball.position = landed;

    if !details.ball.is_carried() && !claim_ball(details, config, from, to, rng, log) {
        // A pass whose receiver can no longer take it stops where they stand.
        if let BallIntent::ToPlayer { side, name } = &details.ball.intent {
            let arrived = details.team(*side).player(name).map(|p| p.current_pos) == Some(landed);
            if arrived {
                details.ball.release(BallIntent::Stationary, false);
            }
        }
    }

    details.ball.ball_over_iterations.push(details.ball.position);
}

/// Goal or out of play once the ball lands off the pitch.
fn leave_pitch(
    details: &mut MatchDetails,
    from: (f32, f32),
    to: (f32, f32),
    landed: Coord,
    log: &mut IterationLog,
) {
    let pitch = details.pitch;
    let goal_line = if landed.x < 0 {
        Some(0)
    } else if landed.x > pitch.width {
        Some(pitch.width)
    } else {
        None
    };

    if let Some(goal_x) = goal_line {
        if let Some(y) = crossing_y(from, to, goal_x as f32) {
            if pitch.in_goal_mouth(y) {
                score_goal(details, goal_x, log);
                return;
            }
        }
    }

    let restart = details.ball.last_touch.map(TeamSide::opponent).unwrap_or(TeamSide::KickOff);
    let position = pitch.clamp(landed);
    debug!(x = position.x, y = position.y, restart = %restart, "ball out of play");
    details.ball = Ball::restart_at(position, restart);
    log.push(MatchEvent::OutOfPlay { restart_team: details.team(restart).name.clone() });
}

/// Credit a goal scored in the goal at `goal_x` and restart from the centre
/// spot with the conceding team.
pub fn score_goal(details: &mut MatchDetails, goal_x: i32, log: &mut IterationLog) {
    let scorer_side = details.side_attacking_goal_at(goal_x);
    let conceding = scorer_side.opponent();

    let shooter = match &details.ball.intent {
        BallIntent::ToGoal { shooter, .. } if details.ball.with_team == Some(scorer_side) => {
            Some(shooter.clone())
        }
        _ => None,
    };

    let stats = details.statistics_mut(scorer_side);
    stats.goals += 1;
    if shooter.is_some() {
        stats.shots_on_target += 1;
    }

    let team_name = details.team(scorer_side).name.clone();
    let scorer = match shooter {
        Some(name) => {
            if let Some(player) =
                details.team_mut(scorer_side).players.iter_mut().find(|p| p.name == name)
            {
                player.stats.goals += 1;
            }
            name
        }
        None if details.ball.last_touch == Some(conceding) => "Own Goal".to_string(),
        None => team_name.clone(),
    };

    let (home, away) = details.score();
    info!(team = %team_name, player = %scorer, home, away, "goal");
    log.push(MatchEvent::Goal { team: team_name, player: scorer });

    for side in TeamSide::BOTH {
        details.team_mut(side).reset_to_formation();
    }
    details.ball = Ball::kick_off(&details.pitch, conceding);
}

/// Let the closest eligible player along the travelled path take the ball.
/// Returns whether anyone did.
fn claim_ball<R: Rng>(
    details: &mut MatchDetails,
    config: &BallConfig,
    from: (f32, f32),
    to: (f32, f32),
    rng: &mut R,
    log: &mut IterationLog,
) -> bool {
    let radius = details.pitch.units(config.capture_radius);
    let owner = details.ball.with_team;
    let restart = details.ball.restart;
    let shot = matches!(details.ball.intent, BallIntent::ToGoal { .. });

    let mut candidates: Vec<(f32, TeamSide, usize)> = Vec::new();
    for side in TeamSide::BOTH {
        if restart.is_some_and(|r| r != side) {
            continue;
        }
        // Teammates never block their own shot.
        if shot && owner == Some(side) {
            continue;
        }
        for (idx, player) in details.team(side).players.iter().enumerate() {
            if !player.can_play() {
                continue;
            }
            let d = distance_to_segment(player.current_pos.to_f32(), from, to);
            if d <= radius {
                candidates.push((d, side, idx));
            }
        }
    }
    // Equal distances: the side on the ball first, then roster order.
    candidates.sort_by(|a, b| {
        a.0.total_cmp(&b.0).then_with(|| (Some(a.1) != owner).cmp(&(Some(b.1) != owner)))
    });
    // A loose ball reached by both sides at once is a coin flip.
    if owner.is_none() {
        if let Some(rival) = candidates.iter().position(|c| c.1 != candidates[0].1) {
            if candidates[rival].0 - candidates[0].0 < CONTEST_MARGIN && rng.gen_bool(0.5) {
                candidates.swap(0, rival);
            }
        }
    }

    for (_, side, idx) in candidates {
        let contested = owner.is_some_and(|o| o != side) && details.ball.is_in_flight();
        let player = &details.team(side).players[idx];
        let name = player.name.clone();
        let position = player.current_pos;

        if contested {
            let skill = if player.position.is_goalkeeper() {
                player.skill.saving
            } else {
                player.skill.tackling
            };
            let chance = config.intercept_chance * f32::from(skill) / 100.0;
            if !rng.gen_bool(probability(chance)) {
                continue;
            }

            let team = details.team(side).name.clone();
            if shot && player.position.is_goalkeeper() {
                details.statistics_mut(side.opponent()).shots_on_target += 1;
                debug!(team = %team, keeper = %name, "shot saved");
                log.push(MatchEvent::ShotSaved { team, keeper: name.clone() });
            } else {
                debug!(team = %team, player = %name, "ball intercepted");
                log.push(MatchEvent::Interception { team, player: name.clone() });
            }
        }

        details.ball.give_to(side, &name, position);
        return true;
    }
    false
}
