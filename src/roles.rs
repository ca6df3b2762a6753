// src/roles.rs
//
// Spatial-proximity role inference for a single moment: ball-handler, on-ball
// defender and screener. These are heuristics, not ground truth; every
// locator returns `None` when no confident inference exists, and callers
// treat that as a normal outcome.

use crate::geometry;
use crate::types::{Moment, PlayerId, TeamId};

/// A possession-team player further than this from the ball cannot plausibly
/// be holding it.
const MAX_HANDLER_BALL_DISTANCE: f64 = 5.0;
/// An opponent further than this from the handler is not the on-ball defender.
const MAX_DEFENDER_HANDLER_DISTANCE: f64 = 12.0;
/// A screener this close to the basket is more likely posting up.
const MIN_SCREENER_BASKET_DISTANCE: f64 = 10.0;
/// A screener must be set next to the handler.
const MAX_SCREENER_HANDLER_DISTANCE: f64 = 5.0;
/// An on-ball screen needs the defender attached to the handler.
const MAX_HANDLER_DEFENDER_DISTANCE: f64 = 10.0;

/// Presumed ball-handler: the possession-team player closest to the ball.
///
/// Exact-tie candidates resolve to the first one encountered in the moment's
/// player order; this is an accepted non-determinism of the heuristic.
pub fn locate_ball_handler(moment: &Moment, poss_team_id: TeamId) -> Option<PlayerId> {
    let ball = (moment.ball_coordinates.x, moment.ball_coordinates.y);

    let mut best: Option<(f64, PlayerId)> = None;
    for player in &moment.player_coordinates {
        if player.team_id != poss_team_id {
            continue;
        }
        let dist = geometry::distance(ball, (player.x, player.y));
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, player.player_id));
        }
    }

    let (dist, handler_id) = best?;
    if dist > MAX_HANDLER_BALL_DISTANCE {
        return None;
    }
    Some(handler_id)
}

/// Presumed on-ball defender: the opposing player closest to the handler.
pub fn locate_defender(
    moment: &Moment,
    poss_team_id: TeamId,
    handler_id: Option<PlayerId>,
) -> Option<PlayerId> {
    // no ball-handler, no on-ball defender
    let handler_id = handler_id?;
    let handler = position_of(moment, handler_id)?;

    let mut best: Option<(f64, PlayerId)> = None;
    for player in &moment.player_coordinates {
        if player.team_id == poss_team_id {
            continue;
        }
        let dist = geometry::distance(handler, (player.x, player.y));
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, player.player_id));
        }
    }

    let (dist, defender_id) = best?;
    if dist > MAX_DEFENDER_HANDLER_DISTANCE {
        return None;
    }
    Some(defender_id)
}

/// Presumed screener: the handler's nearest teammate, subject to the on-ball
/// screen geometry checks. Failing any single check voids the inference.
pub fn locate_screener(
    moment: &Moment,
    poss_team_id: TeamId,
    handler_id: Option<PlayerId>,
    defender_id: Option<PlayerId>,
) -> Option<PlayerId> {
    // no ball-handler, no on-ball screen
    let handler_id = handler_id?;
    let handler = position_of(moment, handler_id)?;

    let mut best: Option<(f64, PlayerId)> = None;
    for player in &moment.player_coordinates {
        if player.team_id != poss_team_id || player.player_id == handler_id {
            continue;
        }
        let dist = geometry::distance(handler, (player.x, player.y));
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, player.player_id));
        }
    }
    let (handler_dist, screener_id) = best?;

    // too close to the basket: likely a post-up, not a screen
    let screener = position_of(moment, screener_id)?;
    if geometry::distance(screener, geometry::BASKET_CENTER) < MIN_SCREENER_BASKET_DISTANCE {
        return None;
    }

    // too far from the handler to be setting a screen
    if handler_dist > MAX_SCREENER_HANDLER_DISTANCE {
        return None;
    }

    // no on-ball defender means nobody to screen
    let defender_id = defender_id?;
    let defender = position_of(moment, defender_id)?;
    if geometry::distance(handler, defender) > MAX_HANDLER_DEFENDER_DISTANCE {
        return None;
    }

    Some(screener_id)
}

fn position_of(moment: &Moment, player_id: PlayerId) -> Option<(f64, f64)> {
    moment
        .player_coordinates
        .iter()
        .find(|p| p.player_id == player_id)
        .map(|p| (p.x, p.y))
}
