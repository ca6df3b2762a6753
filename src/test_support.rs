// src/test_support.rs
//
// Shared builders for unit tests. Every helper produces a fully-populated
// record with neutral defaults so individual tests only spell out the fields
// they actually exercise.

use crate::types::{ActorInfo, BallState, Event, EventInfo, Moment, PlayerId, PlayerState, TeamId};

pub fn ball_at(x: f64, y: f64) -> BallState {
    BallState {
        x,
        y,
        z: 0.0,
        speed: None,
        dir_x: None,
        dir_y: None,
    }
}

pub fn player(team_id: TeamId, player_id: PlayerId, x: f64, y: f64) -> PlayerState {
    PlayerState {
        team_id,
        player_id,
        x,
        y,
        z: 0.0,
        speed: None,
        dir_x: None,
        dir_y: None,
    }
}

pub fn moment_with(ball: BallState, players: Vec<PlayerState>) -> Moment {
    moment_with_clock(720.0, ball, players)
}

pub fn moment_with_clock(game_clock: f64, ball: BallState, players: Vec<PlayerState>) -> Moment {
    Moment {
        quarter: 1,
        game_clock,
        shot_clock: Some(14.0),
        ball_coordinates: ball,
        player_coordinates: players,
    }
}

pub fn moment_at_quarter(quarter: u32, ball: BallState) -> Moment {
    Moment {
        quarter,
        game_clock: 720.0,
        shot_clock: Some(14.0),
        ball_coordinates: ball,
        player_coordinates: vec![],
    }
}

/// A candidate-shaped event: possession team and both play-by-play
/// descriptions are set.
pub fn event_with(
    game_id: &str,
    type_code: i64,
    poss_team_id: TeamId,
    moments: Vec<Moment>,
) -> Event {
    Event {
        game_id: game_id.to_string(),
        game_date: None,
        event_info: EventInfo {
            id: "1".to_string(),
            type_code,
            possession_team_id: Some(poss_team_id),
            desc_home: Some("Turnover".to_string()),
            desc_away: Some("Steal".to_string()),
            direction: None,
            game_id: None,
            quarter: None,
            game_clock: None,
            shot_clock: None,
            event_type: None,
            event_moment: None,
            screen_potential: None,
            handler_id: None,
            defender_id: None,
            screener_id: None,
            screen_frame_start: None,
            screen_frame_end: None,
            screen_time_stamps: None,
        },
        primary_info: ActorInfo::default(),
        secondary_info: ActorInfo::default(),
        moments,
    }
}
