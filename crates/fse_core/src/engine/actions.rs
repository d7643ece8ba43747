//! On-ball actions: what the carrier does with the ball, and tackles on the
//! carrier.

use super::config::{BallConfig, EngineConfig};
use super::geometry::{distance, normalize};
use super::player_movement::move_player;
use crate::models::{BallIntent, Coord, IterationLog, MatchDetails, MatchEvent, Skill, TeamSide};
use rand::Rng;
use tracing::debug;

/// Carrier decision, in priority order: shoot when in range of the attacked
/// goal, pass forward when an opponent is close, otherwise dribble at goal.
pub fn carrier_action<R: Rng>(
    details: &mut MatchDetails,
    side: TeamSide,
    idx: usize,
    speed: f32,
    config: &EngineConfig,
    rng: &mut R,
    log: &mut IterationLog,
) {
    let pitch = details.pitch;
    let team = details.team(side);
    let pos = team.players[idx].current_pos;
    let goal_x = team.attacks.attacked_goal_x(&pitch);
    let goal_centre = (goal_x as f32, pitch.height as f32 / 2.0);

    if distance(pos.to_f32(), goal_centre) <= pitch.units(config.ball.shooting_range) {
        shoot(details, side, idx, &config.ball, rng, log);
        return;
    }

    if under_pressure(details, side, pos, pitch.units(config.ball.pressure_radius)) {
        if let Some(receiver) = pass_target(details, side, idx, pitch.units(config.ball.pass_range))
        {
            pass(details, side, idx, receiver, log);
            return;
        }
    }

    let step = speed * config.movement.dribble_factor;
    move_player(details, side, idx, goal_centre, step, &config.movement);
}

/// Whether any opponent who can move is within `radius` of `pos`.
pub fn under_pressure(details: &MatchDetails, side: TeamSide, pos: Coord, radius: f32) -> bool {
    details
        .team(side.opponent())
        .players
        .iter()
        .any(|p| p.can_play() && p.current_pos.distance(pos) <= radius)
}

/// Best pass for the carrier at `idx`: the onside teammate within `range`
/// who is furthest forward of the carrier. Ties keep roster order.
pub fn pass_target(details: &MatchDetails, side: TeamSide, idx: usize, range: f32) -> Option<usize> {
    let pitch = &details.pitch;
    let team = details.team(side);
    let carrier = &team.players[idx];
    let carrier_x = team.attacks.team_view_x(carrier.current_pos.x as f32, pitch);

    let mut best: Option<(usize, f32)> = None;
    for (i, mate) in team.players.iter().enumerate() {
        if i == idx || !mate.can_play() || mate.offside {
            continue;
        }
        if mate.current_pos.distance(carrier.current_pos) > range {
            continue;
        }
        let gain = team.attacks.team_view_x(mate.current_pos.x as f32, pitch) - carrier_x;
        if gain > 0.0 && best.map_or(true, |(_, g)| gain > g) {
            best = Some((i, gain));
        }
    }
    best.map(|(i, _)| i)
}

fn pass(
    details: &mut MatchDetails,
    side: TeamSide,
    from: usize,
    to: usize,
    log: &mut IterationLog,
) {
    let team = details.team_mut(side);
    let team_name = team.name.clone();
    let receiver = team.players[to].name.clone();
    let passer = &mut team.players[from];
    passer.stats.passes += 1;
    let passer = passer.name.clone();

    details.ball.release(BallIntent::ToPlayer { side, name: receiver.clone() }, true);
    details.ball.last_touch = Some(side);
    details.statistics_mut(side).passes += 1;

    debug!(team = %team_name, from = %passer, to = %receiver, "pass");
    log.push(MatchEvent::Pass { team: team_name, from: passer, to: receiver });
}

/// Shoot at a point just past the attacked goal line. Accuracy falls with
/// the shooter's `shooting` skill.
fn shoot<R: Rng>(
    details: &mut MatchDetails,
    side: TeamSide,
    idx: usize,
    config: &BallConfig,
    rng: &mut R,
    log: &mut IterationLog,
) {
    let pitch = details.pitch;
    let team = details.team_mut(side);
    let team_name = team.name.clone();
    let attacks = team.attacks;
    let shooter = &mut team.players[idx];
    shooter.stats.shots += 1;
    let name = shooter.name.clone();
    let miss = f32::from(Skill::MAX - shooter.skill.shooting.min(Skill::MAX)) / 100.0;

    let (low, high) = pitch.goal_mouth();
    let half_mouth = (high - low) / 2.0;
    let spread = half_mouth * (0.5 + config.shot_spread * miss);
    let deviation = rng.gen_range(-1.0f32..=1.0) * spread;
    let y = (pitch.height as f32 / 2.0 + deviation).clamp(0.0, pitch.height as f32);
    let x = attacks.attacked_goal_x(&pitch).saturating_add(attacks.sign() as i32);
    let target = Coord::from_f32(x as f32, y);

    details.ball.release(BallIntent::ToGoal { target, shooter: name.clone() }, true);
    details.ball.last_touch = Some(side);
    details.statistics_mut(side).shots += 1;

    debug!(team = %team_name, player = %name, target_y = target.y, "shot");
    log.push(MatchEvent::Shot { team: team_name, player: name });
}

/// Contest the ball if the player at `idx` is within tackle range of an
/// opposing carrier: win it, knock it loose, or fail.
pub fn attempt_tackle<R: Rng>(
    details: &mut MatchDetails,
    side: TeamSide,
    idx: usize,
    config: &BallConfig,
    rng: &mut R,
    log: &mut IterationLog,
) {
    let Some((carrier_side, carrier_idx)) = details.carrier() else {
        return;
    };
    if carrier_side == side {
        return;
    }

    let pitch = details.pitch;
    let tackler = &details.team(side).players[idx];
    let carrier = &details.team(carrier_side).players[carrier_idx];
    if tackler.current_pos.distance(carrier.current_pos) > pitch.units(config.tackle_radius) {
        return;
    }

    let attack = f32::from(tackler.skill.tackling) + f32::from(tackler.skill.strength);
    let defend = f32::from(carrier.skill.agility) + f32::from(carrier.skill.strength);
    let win = (attack + 1.0) / (attack + defend + 2.0) * config.tackle_win_share;
    let roll: f32 = rng.gen();

    let team_name = details.team(side).name.clone();
    let name = tackler.name.clone();
    let tackler_pos = tackler.current_pos;
    let push = normalize((
        (carrier.current_pos.x - tackler_pos.x) as f32,
        (carrier.current_pos.y - tackler_pos.y) as f32,
    ));

    if roll < win {
        credit_tackle(details, side, idx);
        details.ball.give_to(side, &name, tackler_pos);
        debug!(team = %team_name, player = %name, "tackle won");
        log.push(MatchEvent::TackleWon { team: team_name, player: name });
    } else if roll < win + config.knock_loose_chance {
        credit_tackle(details, side, idx);
        let push = if push == (0.0, 0.0) {
            (details.team(side).attacks.sign(), 0.0)
        } else {
            push
        };
        let speed = pitch.units(config.knock_on_speed);
        details.ball.release(BallIntent::Drift { dx: push.0 * speed, dy: push.1 * speed }, false);
        details.ball.last_touch = Some(side);
        debug!(team = %team_name, player = %name, "ball knocked loose");
        log.push(MatchEvent::BallKnockedLoose { team: team_name, player: name });
    } else {
        log.push(MatchEvent::TackleFailed { team: team_name, player: name });
    }
}

fn credit_tackle(details: &mut MatchDetails, side: TeamSide, idx: usize) {
    details.team_mut(side).players[idx].stats.tackles += 1;
    details.statistics_mut(side).tackles += 1;
}
