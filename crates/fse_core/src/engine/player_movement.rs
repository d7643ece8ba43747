//! Closest-player search and per-player movement decisions.

use super::actions;
use super::config::{EngineConfig, MovementConfig};
use super::geometry::step_toward;
use super::offside::offside_line;
use crate::models::{
    BallIntent, Coord, IterationLog, MatchDetails, Pitch, Player, PositionClass, Team, TeamSide,
};
use rand::Rng;

/// Result of the closest-player search for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestPlayer {
    pub index: usize,
    pub name: String,
    pub distance: f32,
}

/// Player of `team` nearest to `ball`, skipping those who cannot move.
///
/// Ties go to the player earlier in roster order.
pub fn closest_player_to_ball(team: &Team, ball: Coord) -> Option<ClosestPlayer> {
    nearest_player(team, ball, None)
}

fn nearest_player(team: &Team, ball: Coord, skip: Option<usize>) -> Option<ClosestPlayer> {
    let mut best: Option<ClosestPlayer> = None;
    for (index, player) in team.players.iter().enumerate() {
        if !player.can_play() || skip == Some(index) {
            continue;
        }
        let distance = player.current_pos.distance(ball);
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(ClosestPlayer { index, name: player.name.clone(), distance });
        }
    }
    best
}

/// Largest distance `player` may cover this tick, in pitch units.
pub fn player_speed(player: &Player, pitch: &Pitch, config: &MovementConfig) -> f32 {
    let agility = 0.75 + f32::from(player.skill.agility) / 400.0;
    let fitness = 0.6 + player.fitness / 250.0;
    pitch.units(config.base_speed)
        * config.class_speed(player.class())
        * agility
        * fitness
        * player.injury_speed_factor()
}

/// Step a player toward `target` and charge fitness for the distance run.
/// A carried ball moves with its carrier.
pub fn move_player(
    details: &mut MatchDetails,
    side: TeamSide,
    idx: usize,
    target: (f32, f32),
    max_step: f32,
    config: &MovementConfig,
) -> Coord {
    let pitch = details.pitch;
    let carrying = details.carrier() == Some((side, idx));

    let player = &mut details.team_mut(side).players[idx];
    let from = player.current_pos;
    let to = pitch.clamp(step_toward(from, target, max_step));
    player.current_pos = to;
    let run = from.distance(to) / pitch.width as f32;
    player.fitness = (player.fitness - run * config.fitness_cost).max(0.0);

    if carrying {
        details.ball.position = to;
    }
    to
}

/// What a player is trying to do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Intent {
    /// Shoot, pass or dribble.
    Carry,
    MoveTo((f32, f32)),
    /// Close down the carrier and tackle once in range.
    Press((f32, f32)),
}

/// Movement decisions for both teams. `closest` holds the closest-player
/// index per side, indexed by [`TeamSide::index`].
///
/// Every intent is read from the state at the start of the step. The
/// carrier acts first, then everyone else moves, then pressers tackle
/// against the positions they all ended up in. No side moves or tackles
/// ahead of the other.
pub fn decide_movement<R: Rng>(
    details: &mut MatchDetails,
    config: &EngineConfig,
    closest: [Option<usize>; 2],
    rng: &mut R,
    log: &mut IterationLog,
) {
    let carrier = details.carrier();
    let ball = details.ball.position;

    let mut plans: Vec<(TeamSide, usize, f32, Intent)> = Vec::new();
    for side in TeamSide::BOTH {
        // The carrier's nearest teammate makes the support run.
        let lead = match carrier {
            Some((owner, idx)) if owner == side && closest[side.index()] == Some(idx) => {
                nearest_player(details.team(side), ball, Some(idx)).map(|c| c.index)
            }
            _ => closest[side.index()],
        };
        for (idx, player) in details.team(side).players.iter().enumerate() {
            if !player.can_play() {
                continue;
            }
            let speed = player_speed(player, &details.pitch, &config.movement);
            let intent = if carrier == Some((side, idx)) {
                Intent::Carry
            } else {
                role_intent(details, side, idx, lead == Some(idx), &config.movement)
            };
            plans.push((side, idx, speed, intent));
        }
    }

    if let Some(&(side, idx, speed, _)) = plans.iter().find(|p| p.3 == Intent::Carry) {
        actions::carrier_action(details, side, idx, speed, config, rng, log);
    }
    for &(side, idx, speed, intent) in &plans {
        if let Intent::MoveTo(target) | Intent::Press(target) = intent {
            move_player(details, side, idx, target, speed, &config.movement);
        }
    }
    for &(side, idx, _, intent) in &plans {
        if let Intent::Press(_) = intent {
            actions::attempt_tackle(details, side, idx, &config.ball, rng, log);
        }
    }
}

fn role_intent(
    details: &MatchDetails,
    side: TeamSide,
    idx: usize,
    is_closest: bool,
    config: &MovementConfig,
) -> Intent {
    let pitch = &details.pitch;
    let team = details.team(side);
    let player = &team.players[idx];
    let ball = &details.ball;
    let ball_pos = ball.position.to_f32();
    let start = player.start_pos.to_f32();
    let sign = team.attacks.sign();
    let opponent = side.opponent();

    // Pending restart for the other team: hold formation.
    if ball.restart == Some(opponent) {
        return Intent::MoveTo(start);
    }

    if let BallIntent::ToPlayer { side: pass_side, name } = &ball.intent {
        if *pass_side == side && *name == player.name {
            return Intent::MoveTo(ball_pos);
        }
    }

    let keeper = player.position.is_goalkeeper();
    let keeper_in_range = player.start_pos.distance(ball.position) <= pitch.units(config.keeper_range);
    if is_closest && (!keeper || keeper_in_range) {
        match ball.with_team {
            None => return Intent::MoveTo(ball_pos),
            Some(owner) if owner == opponent => {
                return if ball.is_carried() {
                    Intent::Press(ball_pos)
                } else {
                    Intent::MoveTo(ball_pos)
                };
            }
            Some(_) => {
                let ahead = ball_pos.0 + sign * pitch.units(config.support_distance);
                return Intent::MoveTo((ahead, (ball_pos.1 + start.1) / 2.0));
            }
        }
    }

    if keeper {
        let (low, high) = pitch.goal_mouth();
        return Intent::MoveTo((start.0, ball_pos.1.clamp(low, high)));
    }

    let (cx, cy) = pitch.centre().to_f32();
    let follow_y = start.1 + (ball_pos.1 - cy) * config.shape_follow;

    // Forwards play on the last defender: run past the line, drop back
    // once flagged.
    if player.class() == PositionClass::Forward && ball.with_team == Some(side) {
        let line = offside_line(details.team(opponent), team.attacks, pitch);
        let run = pitch.units(config.forward_run);
        let view_x = if player.offside { line - run } else { line + run };
        return Intent::MoveTo((team.attacks.team_view_x(view_x, pitch), follow_y));
    }

    let shift = match ball.with_team {
        Some(owner) if owner == side => sign * pitch.units(config.possession_push),
        Some(_) => -sign * pitch.units(config.defensive_drop),
        None => 0.0,
    };
    Intent::MoveTo((start.0 + shift + (ball_pos.0 - cx) * config.shape_follow, follow_y))
}
