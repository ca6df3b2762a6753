// src/classifier.rs
//
// Turnover and made-shot classification: state machines that scan an event's
// moments for the terminal moment of the play and record its clock values on
// `event_info`. Scans that never trigger stop at the final moment; that is
// the fallback, not an error.

use crate::error::MalformedMomentError;
use crate::geometry;
use crate::types::Event;
use tracing::debug;

pub const EVENT_CODE_MADE_SHOT: i64 = 1;
pub const EVENT_CODE_TURNOVER: i64 = 5;

pub const LABEL_MADE_SHOT: &str = "made shot";
pub const LABEL_TURNOVER: &str = "turnover";

/// The primary player holds the ball once it is within this distance.
const POSSESSION_ACQUIRED_DISTANCE: f64 = 2.0;
/// After acquisition, this separation latches the possession as lost.
const POSSESSION_LOST_DISTANCE: f64 = 5.0;
/// After the loss, the play ends once the ball slows below this speed.
const DEAD_BALL_SPEED: f64 = 3.0;
/// A made shot registers once the ball is this close to the basket center.
const MADE_SHOT_BASKET_DISTANCE: f64 = 1.5;

/// Scan a turnover (type 5) event for the moment the play dies.
///
/// Tracks possession acquisition (ball within 2 units of the primary player)
/// and loss (separation beyond 5 units), then stops at the first moment the
/// ball speed drops below 3 units/second. Requires motion features to have
/// been attached. The primary player's last known position carries over
/// through moments where that player is not tracked.
pub fn classify_turnover(event: &mut Event) -> Result<(), MalformedMomentError> {
    let Some(player_id) = event.primary_info.player_id else {
        return Err(MalformedMomentError::new(
            0,
            "turnover event without a primary player id",
        ));
    };
    let Some(last_idx) = event.moments.len().checked_sub(1) else {
        return Ok(());
    };

    let mut acquired = false;
    let mut lost = false;
    let mut player_pos: Option<(f64, f64)> = None;
    let mut stop_idx = last_idx;

    for (i, moment) in event.moments.iter().enumerate() {
        if let Some(p) = moment
            .player_coordinates
            .iter()
            .find(|p| p.player_id == player_id)
        {
            player_pos = Some((p.x, p.y));
        }
        let Some(pos) = player_pos else {
            return Err(MalformedMomentError::new(
                i,
                format!("primary player {player_id} has no tracked position yet"),
            ));
        };

        let ball = (moment.ball_coordinates.x, moment.ball_coordinates.y);
        let dist = geometry::distance(ball, pos);

        if !lost {
            if !acquired {
                if dist < POSSESSION_ACQUIRED_DISTANCE {
                    acquired = true;
                }
            } else if dist > POSSESSION_LOST_DISTANCE {
                lost = true;
            }
        } else if moment
            .ball_coordinates
            .speed
            .is_some_and(|s| s < DEAD_BALL_SPEED)
        {
            stop_idx = i;
            break;
        }
    }

    debug!(
        "turnover scan stopped at frame {stop_idx} (acquired={acquired}, lost={lost})"
    );

    let terminal = event.moments[stop_idx].clone();
    let info = &mut event.event_info;
    info.quarter = Some(terminal.quarter);
    info.game_clock = Some(terminal.game_clock);
    info.shot_clock = terminal.shot_clock;
    info.event_type = Some(LABEL_TURNOVER.to_string());
    info.event_moment = Some(terminal);
    Ok(())
}

/// Scan a made-shot (type 1) event for the moment the ball reaches the rim.
pub fn classify_made_shot(event: &mut Event) {
    let Some(last_idx) = event.moments.len().checked_sub(1) else {
        return;
    };

    let mut stop_idx = last_idx;
    for (i, moment) in event.moments.iter().enumerate() {
        let ball = (moment.ball_coordinates.x, moment.ball_coordinates.y);
        if geometry::distance(ball, geometry::BASKET_CENTER) < MADE_SHOT_BASKET_DISTANCE {
            stop_idx = i;
            break;
        }
    }

    let terminal = &event.moments[stop_idx];
    let info = &mut event.event_info;
    info.quarter = Some(terminal.quarter);
    info.game_clock = Some(terminal.game_clock);
    info.shot_clock = terminal.shot_clock;
    info.event_type = Some(LABEL_MADE_SHOT.to_string());
}
