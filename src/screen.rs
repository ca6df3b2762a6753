// src/screen.rs
//
// On-ball screen detection: a per-moment candidate test over the inferred
// roles, plus a state machine that aggregates consecutive candidate frames
// into a confirmed screen interval. Tracking feeds occasionally repeat a
// frame with a frozen game clock; those duplicates neither extend nor break
// a run.

use crate::geometry;
use crate::roles;
use crate::types::{Event, Moment, PlayerId};
use tracing::debug;

/// The ball must be past half-court (canonical orientation) for an on-ball
/// screen to count.
const HALF_COURT_Y: f64 = 47.0;
/// Screens this close to the rim are shot contests, not pick-and-rolls.
const MIN_BALL_BASKET_DISTANCE: f64 = 10.0;

/// One moment's screen-candidate verdict. Role ids pass through unchanged so
/// the interval tracker can check identity continuity across frames.
#[derive(Debug, Clone, Copy)]
pub struct ScreenCandidate {
    pub is_screen: bool,
    pub handler_id: Option<PlayerId>,
    pub defender_id: Option<PlayerId>,
    pub screener_id: Option<PlayerId>,
}

/// Per-moment candidate test: all three roles present, ball past half-court,
/// ball not at the rim.
pub fn detect_screen(
    moment: &Moment,
    handler_id: Option<PlayerId>,
    defender_id: Option<PlayerId>,
    screener_id: Option<PlayerId>,
) -> ScreenCandidate {
    let is_screen = match (handler_id, defender_id, screener_id) {
        (Some(_), Some(_), Some(_)) => {
            let ball = (moment.ball_coordinates.x, moment.ball_coordinates.y);
            ball.1 > HALF_COURT_Y
                && geometry::distance(ball, geometry::BASKET_CENTER) > MIN_BALL_BASKET_DISTANCE
        }
        _ => false,
    };
    ScreenCandidate {
        is_screen,
        handler_id,
        defender_id,
        screener_id,
    }
}

/// A confirmed run of consecutive screen-candidate frames.
#[derive(Debug, Clone)]
pub struct ScreenInterval {
    pub handler_id: PlayerId,
    pub defender_id: PlayerId,
    pub screener_id: PlayerId,
    pub start_frame: usize,
    pub end_frame: usize,
    pub start_clock: f64,
    pub end_clock: f64,
}

#[derive(Debug, Clone)]
enum ScreenState {
    Idle,
    Accumulating {
        handler_id: PlayerId,
        defender_id: PlayerId,
        screener_id: PlayerId,
        start_frame: usize,
        start_clock: f64,
        frames: u32,
    },
}

/// Aggregates per-moment screen candidates into screen intervals.
///
/// A run accumulates only while the same handler/defender/screener hold the
/// candidate and the game clock advances; when the candidate drops after more
/// than `min_consecutive_frames` counted frames, the run is confirmed.
pub struct ScreenTracker {
    state: ScreenState,
    min_consecutive_frames: u32,
}

impl ScreenTracker {
    pub fn new(min_consecutive_frames: u32) -> Self {
        Self {
            state: ScreenState::Idle,
            min_consecutive_frames,
        }
    }

    /// Feed one moment's candidate. Returns a confirmed interval when a
    /// qualifying run ends at this frame.
    pub fn step(
        &mut self,
        candidate: &ScreenCandidate,
        frame_id: usize,
        game_clock: f64,
        clock_advanced: bool,
    ) -> Option<ScreenInterval> {
        // frozen clock = duplicated frame; ignore entirely
        if !clock_advanced {
            return None;
        }

        if candidate.is_screen {
            // candidate frames always carry all three role ids
            let (handler_id, defender_id, screener_id) = (
                candidate.handler_id?,
                candidate.defender_id?,
                candidate.screener_id?,
            );

            match &mut self.state {
                ScreenState::Idle => {
                    self.state = ScreenState::Accumulating {
                        handler_id,
                        defender_id,
                        screener_id,
                        start_frame: frame_id,
                        start_clock: game_clock,
                        frames: 1,
                    };
                }
                ScreenState::Accumulating {
                    handler_id: h,
                    defender_id: d,
                    screener_id: s,
                    frames,
                    ..
                } => {
                    if *h == handler_id && *d == defender_id && *s == screener_id {
                        *frames += 1;
                    } else {
                        // participants changed: this is a different action
                        debug!(
                            "screen run restarted at frame {frame_id}: participants changed"
                        );
                        self.state = ScreenState::Accumulating {
                            handler_id,
                            defender_id,
                            screener_id,
                            start_frame: frame_id,
                            start_clock: game_clock,
                            frames: 1,
                        };
                    }
                }
            }
            None
        } else {
            let confirmed = match &self.state {
                ScreenState::Accumulating {
                    handler_id,
                    defender_id,
                    screener_id,
                    start_frame,
                    start_clock,
                    frames,
                } if *frames > self.min_consecutive_frames => Some(ScreenInterval {
                    handler_id: *handler_id,
                    defender_id: *defender_id,
                    screener_id: *screener_id,
                    start_frame: *start_frame,
                    end_frame: frame_id,
                    start_clock: *start_clock,
                    end_clock: game_clock,
                }),
                _ => None,
            };
            self.state = ScreenState::Idle;
            confirmed
        }
    }

    fn current_run(&self) -> Option<(PlayerId, PlayerId, PlayerId, usize)> {
        match &self.state {
            ScreenState::Accumulating {
                handler_id,
                defender_id,
                screener_id,
                start_frame,
                ..
            } => Some((*handler_id, *defender_id, *screener_id, *start_frame)),
            ScreenState::Idle => None,
        }
    }
}

/// Run role inference and the interval tracker over an event's moments and
/// annotate `event_info` with the first confirmed screen, or with the
/// negative verdict if the moments run out.
pub fn annotate_screen_intervals(event: &mut Event, min_consecutive_frames: u32) {
    let Some(poss_team_id) = event.event_info.possession_team_id else {
        return;
    };

    let mut tracker = ScreenTracker::new(min_consecutive_frames);
    let mut last_clock: Option<f64> = None;

    for (frame_id, moment) in event.moments.iter().enumerate() {
        let handler = roles::locate_ball_handler(moment, poss_team_id);
        let defender = roles::locate_defender(moment, poss_team_id, handler);
        let screener = roles::locate_screener(moment, poss_team_id, handler, defender);
        let candidate = detect_screen(moment, handler, defender, screener);

        let clock_advanced = last_clock != Some(moment.game_clock);
        if let Some(interval) =
            tracker.step(&candidate, frame_id, moment.game_clock, clock_advanced)
        {
            debug!(
                "screen confirmed: frames {}..{} handler {} screener {}",
                interval.start_frame, interval.end_frame, interval.handler_id, interval.screener_id
            );
            let info = &mut event.event_info;
            info.screen_potential = Some(true);
            info.handler_id = Some(interval.handler_id);
            info.defender_id = Some(interval.defender_id);
            info.screener_id = Some(interval.screener_id);
            info.screen_frame_start = Some(interval.start_frame);
            info.screen_frame_end = Some(interval.end_frame);
            info.screen_time_stamps =
                Some([round2(interval.start_clock), interval.end_clock.round()]);
            return;
        }
        last_clock = Some(moment.game_clock);
    }

    // exhausted the moments without a confirmed run
    let info = &mut event.event_info;
    info.screen_potential = Some(false);
    if let Some((handler_id, defender_id, screener_id, start_frame)) = tracker.current_run() {
        info.handler_id = Some(handler_id);
        info.defender_id = Some(defender_id);
        info.screener_id = Some(screener_id);
        info.screen_frame_start = Some(start_frame);
    }
    info.screen_frame_end = Some(event.moments.len());
    info.screen_time_stamps = Some([0.0, 0.0]);
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
