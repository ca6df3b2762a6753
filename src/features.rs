// src/features.rs
//
// Frame-to-frame finite-difference motion features for the ball and every
// tracked player: speed in court units per second and a unit direction
// vector. Runs after direction normalization, so the direction vectors are
// expressed in the canonical orientation.

use crate::types::{Event, PlayerId};
use std::collections::HashMap;

/// Attach `speed`, `dir_x`, `dir_y` to every ball/player state in the event.
///
/// Moment 0 gets explicit missing values (no prior frame), as does any player
/// absent from the immediately preceding moment. A stationary object gets a
/// zero direction vector, not a missing value.
pub fn add_motion_features(event: &mut Event, frame_rate: f64) {
    let dt = 1.0 / frame_rate;

    for t in 1..event.moments.len() {
        let (head, tail) = event.moments.split_at_mut(t);
        let prev = &head[t - 1];
        let curr = &mut tail[0];

        let (speed, dir_x, dir_y) = finite_difference(
            (prev.ball_coordinates.x, prev.ball_coordinates.y),
            (curr.ball_coordinates.x, curr.ball_coordinates.y),
            dt,
        );
        curr.ball_coordinates.speed = Some(speed);
        curr.ball_coordinates.dir_x = Some(dir_x);
        curr.ball_coordinates.dir_y = Some(dir_y);

        let prev_positions: HashMap<PlayerId, (f64, f64)> = prev
            .player_coordinates
            .iter()
            .map(|p| (p.player_id, (p.x, p.y)))
            .collect();

        for player in &mut curr.player_coordinates {
            match prev_positions.get(&player.player_id) {
                Some(&prev_pos) => {
                    let (speed, dir_x, dir_y) =
                        finite_difference(prev_pos, (player.x, player.y), dt);
                    player.speed = Some(speed);
                    player.dir_x = Some(dir_x);
                    player.dir_y = Some(dir_y);
                }
                None => {
                    // not tracked in the previous frame
                    player.speed = None;
                    player.dir_x = None;
                    player.dir_y = None;
                }
            }
        }
    }

    if let Some(first) = event.moments.first_mut() {
        first.ball_coordinates.speed = None;
        first.ball_coordinates.dir_x = None;
        first.ball_coordinates.dir_y = None;
        for player in &mut first.player_coordinates {
            player.speed = None;
            player.dir_x = None;
            player.dir_y = None;
        }
    }
}

fn finite_difference(prev: (f64, f64), curr: (f64, f64), dt: f64) -> (f64, f64, f64) {
    let dx = curr.0 - prev.0;
    let dy = curr.1 - prev.1;
    let dist = (dx * dx + dy * dy).sqrt();
    let speed = dist / dt;
    if dist != 0.0 {
        (speed, dx / dist, dy / dist)
    } else {
        (speed, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ball_at, event_with, moment_with, player};

    #[test]
    fn test_ball_speed_and_unit_direction() {
        let mut event = event_with(
            "0021500001",
            5,
            100,
            vec![
                moment_with(ball_at(0.0, 0.0), vec![]),
                moment_with(ball_at(3.0, 4.0), vec![]),
            ],
        );
        add_motion_features(&mut event, 25.0);

        let ball = &event.moments[1].ball_coordinates;
        assert_eq!(ball.speed, Some(125.0)); // 5 units over 1/25 s
        assert_eq!(ball.dir_x, Some(0.6));
        assert_eq!(ball.dir_y, Some(0.8));
    }

    #[test]
    fn test_first_moment_features_are_missing() {
        let mut event = event_with(
            "0021500001",
            5,
            100,
            vec![
                moment_with(ball_at(0.0, 0.0), vec![player(100, 1, 10.0, 10.0)]),
                moment_with(ball_at(3.0, 4.0), vec![player(100, 1, 11.0, 10.0)]),
            ],
        );
        add_motion_features(&mut event, 25.0);

        let first = &event.moments[0];
        assert_eq!(first.ball_coordinates.speed, None);
        assert_eq!(first.ball_coordinates.dir_x, None);
        assert_eq!(first.player_coordinates[0].speed, None);
        assert_eq!(first.player_coordinates[0].dir_y, None);
    }

    #[test]
    fn test_stationary_object_gets_zero_direction() {
        let mut event = event_with(
            "0021500001",
            5,
            100,
            vec![
                moment_with(ball_at(10.0, 10.0), vec![]),
                moment_with(ball_at(10.0, 10.0), vec![]),
            ],
        );
        add_motion_features(&mut event, 25.0);

        let ball = &event.moments[1].ball_coordinates;
        assert_eq!(ball.speed, Some(0.0));
        assert_eq!(ball.dir_x, Some(0.0));
        assert_eq!(ball.dir_y, Some(0.0));
    }

    #[test]
    fn test_player_absent_from_previous_moment_is_missing() {
        let mut event = event_with(
            "0021500001",
            5,
            100,
            vec![
                moment_with(ball_at(0.0, 0.0), vec![player(100, 1, 10.0, 10.0)]),
                moment_with(
                    ball_at(1.0, 0.0),
                    vec![player(100, 1, 10.5, 10.0), player(100, 2, 20.0, 20.0)],
                ),
            ],
        );
        add_motion_features(&mut event, 25.0);

        let second = &event.moments[1];
        // tracked in both frames: features present
        assert_eq!(second.player_coordinates[0].speed, Some(12.5));
        assert_eq!(second.player_coordinates[0].dir_x, Some(1.0));
        // newly appearing player: explicit missing values, not zeros
        assert_eq!(second.player_coordinates[1].speed, None);
        assert_eq!(second.player_coordinates[1].dir_x, None);
    }

    #[test]
    fn test_frame_rate_scales_speed() {
        let mut event = event_with(
            "0021500001",
            5,
            100,
            vec![
                moment_with(ball_at(0.0, 0.0), vec![]),
                moment_with(ball_at(1.0, 0.0), vec![]),
            ],
        );
        add_motion_features(&mut event, 10.0);
        assert_eq!(event.moments[1].ball_coordinates.speed, Some(10.0));
    }
}
