// src/pipeline.rs
//
// Candidate selection and stage orchestration: a lazy, single-pass iterator
// over raw events that yields enriched events. Per-game direction state is
// the only state carried across iterations and resets on every game-id
// change; everything else happens within one event's processing.

use crate::classifier::{self, EVENT_CODE_MADE_SHOT, EVENT_CODE_TURNOVER};
use crate::direction::{self, DirectionTracker};
use crate::error::MalformedMomentError;
use crate::features;
use crate::screen;
use crate::types::{Config, Event};
use tracing::debug;

/// Pipeline knobs, pulled out of the application config.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub frame_rate: f64,
    /// Motion features per event type.
    pub turnover_features: bool,
    pub made_shot_features: bool,
    pub screen_enabled: bool,
    pub screen_min_consecutive_frames: u32,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            frame_rate: config.features.frame_rate,
            turnover_features: config.features.turnover_events,
            made_shot_features: config.features.made_shot_events,
            screen_enabled: config.screen.enabled,
            screen_min_consecutive_frames: config.screen.min_consecutive_frames,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Lazy event-enrichment pipeline. Non-candidate, empty and
/// direction-undetermined events are silently dropped; a structural contract
/// violation inside a kept event surfaces as an error item.
pub struct EventPipeline<I> {
    events: I,
    config: PipelineConfig,
    direction: DirectionTracker,
    current_game_id: Option<String>,
}

impl<I> EventPipeline<I>
where
    I: Iterator<Item = Event>,
{
    pub fn new(events: I, config: PipelineConfig) -> Self {
        Self {
            events,
            config,
            direction: DirectionTracker::new(),
            current_game_id: None,
        }
    }

    fn process(&mut self, mut event: Event) -> Option<Result<Event, MalformedMomentError>> {
        if event.moments.is_empty() {
            debug!("event {} has no moments, skipping", event.event_info.id);
            return None;
        }

        let direction = match self.direction.assign(&event) {
            Some(direction) => direction,
            None => {
                debug!(
                    "event {} direction undetermined, dropping",
                    event.event_info.id
                );
                return None;
            }
        };
        event.event_info.direction = Some(direction);
        direction::rotate_event(&mut event, direction);

        let features_enabled = match event.event_info.type_code {
            EVENT_CODE_TURNOVER => self.config.turnover_features,
            EVENT_CODE_MADE_SHOT => self.config.made_shot_features,
            _ => false,
        };
        if features_enabled {
            features::add_motion_features(&mut event, self.config.frame_rate);
        }

        match event.event_info.type_code {
            EVENT_CODE_TURNOVER => {
                if let Err(err) = classifier::classify_turnover(&mut event) {
                    return Some(Err(err));
                }
            }
            EVENT_CODE_MADE_SHOT => classifier::classify_made_shot(&mut event),
            _ => {}
        }

        event.event_info.game_id = Some(event.game_id.clone());

        if self.config.screen_enabled {
            screen::annotate_screen_intervals(
                &mut event,
                self.config.screen_min_consecutive_frames,
            );
        }

        Some(Ok(event))
    }
}

impl<I> Iterator for EventPipeline<I>
where
    I: Iterator<Item = Event>,
{
    type Item = Result<Event, MalformedMomentError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = self.events.next()?;
            if !is_candidate(&event) {
                continue;
            }

            if self.current_game_id.as_deref() != Some(event.game_id.as_str()) {
                if self.current_game_id.is_some() {
                    debug!("game boundary: {}", event.game_id);
                }
                self.direction.reset();
                self.current_game_id = Some(event.game_id.clone());
            }

            if let Some(result) = self.process(event) {
                return Some(result);
            }
        }
    }
}

/// Candidate test: turnovers need a possession team and both play-by-play
/// descriptions; made shots only need a possession team.
fn is_candidate(event: &Event) -> bool {
    let info = &event.event_info;
    match info.type_code {
        EVENT_CODE_TURNOVER => {
            info.possession_team_id.is_some()
                && info.desc_home.is_some()
                && info.desc_away.is_some()
        }
        EVENT_CODE_MADE_SHOT => info.possession_team_id.is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ball_at, event_with, moment_with, moment_with_clock, player};
    use crate::types::Direction;

    const TEAM_A: i64 = 100;
    const PRIMARY: i64 = 7;

    /// A quarter-1 turnover event whose ball passes through the left basket
    /// region, so it both establishes the game direction and classifies.
    fn opening_turnover(game_id: &str) -> Event {
        let mut moments = vec![moment_with(
            ball_at(4.75, 25.0),
            vec![player(TEAM_A, PRIMARY, 4.75, 25.0)],
        )];
        for i in 1..4 {
            moments.push(moment_with_clock(
                700.0 - i as f64 * 0.04,
                ball_at(4.75, 25.0),
                vec![player(TEAM_A, PRIMARY, 4.75, 25.0)],
            ));
        }
        let mut event = event_with(game_id, 5, TEAM_A, moments);
        event.primary_info.player_id = Some(PRIMARY);
        event
    }

    fn run(events: Vec<Event>, config: PipelineConfig) -> Vec<Event> {
        EventPipeline::new(events.into_iter(), config)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_non_candidates_are_dropped() {
        let mut no_poss = opening_turnover("0021500001");
        no_poss.event_info.possession_team_id = None;

        let mut no_desc = opening_turnover("0021500001");
        no_desc.event_info.desc_away = None;

        let mut wrong_type = opening_turnover("0021500001");
        wrong_type.event_info.type_code = 2;

        let out = run(
            vec![no_poss, no_desc, wrong_type],
            PipelineConfig::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_made_shot_candidate_needs_no_descriptions() {
        let mut event = opening_turnover("0021500001");
        event.event_info.type_code = 1;
        event.event_info.desc_home = None;
        event.event_info.desc_away = None;

        let out = run(vec![event], PipelineConfig::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].event_info.event_type.as_deref(), Some("made shot"));
    }

    #[test]
    fn test_empty_events_are_skipped() {
        let mut event = opening_turnover("0021500001");
        event.moments.clear();
        assert!(run(vec![event], PipelineConfig::default()).is_empty());
    }

    #[test]
    fn test_undetermined_direction_drops_event() {
        let mut event = opening_turnover("0021500001");
        // ball never enters a basket region
        for m in &mut event.moments {
            m.ball_coordinates.x = 47.0;
            m.ball_coordinates.y = 25.0;
        }
        assert!(run(vec![event], PipelineConfig::default()).is_empty());
    }

    #[test]
    fn test_enriched_event_annotations() {
        let out = run(vec![opening_turnover("0021500001")], PipelineConfig::default());
        assert_eq!(out.len(), 1);
        let info = &out[0].event_info;
        assert_eq!(info.direction, Some(Direction::Left));
        assert_eq!(info.game_id.as_deref(), Some("0021500001"));
        assert_eq!(info.event_type.as_deref(), Some("turnover"));
        assert!(info.event_moment.is_some());
        // screen tracker ran and reached a verdict
        assert!(info.screen_potential.is_some());
        // coordinates were rotated into the canonical orientation
        let ball = &out[0].moments[0].ball_coordinates;
        assert_eq!((ball.x, ball.y), (25.0, 4.75));
    }

    #[test]
    fn test_feature_toggle_per_event_type() {
        // reference behavior: turnovers get features, made shots do not
        let turnover = opening_turnover("0021500001");
        let mut made_shot = opening_turnover("0021500001");
        made_shot.event_info.type_code = 1;

        let out = run(vec![turnover, made_shot], PipelineConfig::default());
        assert!(out[0].moments[1].ball_coordinates.speed.is_some());
        assert!(out[1].moments[1].ball_coordinates.speed.is_none());

        // and the toggle can switch made shots on
        let mut config = PipelineConfig::default();
        config.made_shot_features = true;
        let mut made_shot = opening_turnover("0021500002");
        made_shot.event_info.type_code = 1;
        let out = run(vec![made_shot], config);
        assert!(out[0].moments[1].ball_coordinates.speed.is_some());
    }

    #[test]
    fn test_game_boundary_resets_direction_state() {
        let first_game = opening_turnover("0021500001");

        // second game: quarter-1 scan finds the right basket this time
        let mut second_game = opening_turnover("0021500002");
        for m in &mut second_game.moments {
            m.ball_coordinates.x = 89.0;
            m.ball_coordinates.y = 25.0;
        }
        for m in &mut second_game.moments {
            for p in &mut m.player_coordinates {
                p.x = 89.0;
                p.y = 25.0;
            }
        }

        let out = run(vec![first_game, second_game], PipelineConfig::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].event_info.direction, Some(Direction::Left));
        assert_eq!(out[1].event_info.direction, Some(Direction::Right));
    }

    #[test]
    fn test_same_game_second_half_inverts_direction() {
        let first = opening_turnover("0021500001");
        let mut q3 = opening_turnover("0021500001");
        for m in &mut q3.moments {
            m.quarter = 3;
        }

        let out = run(vec![first, q3], PipelineConfig::default());
        assert_eq!(out[1].event_info.direction, Some(Direction::Right));
    }

    #[test]
    fn test_malformed_turnover_surfaces_error() {
        let mut event = opening_turnover("0021500001");
        event.primary_info.player_id = Some(999); // never tracked
        let mut pipeline =
            EventPipeline::new(vec![event].into_iter(), PipelineConfig::default());
        assert!(pipeline.next().unwrap().is_err());
    }
}
