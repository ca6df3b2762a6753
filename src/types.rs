// src/types.rs

use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type TeamId = i64;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Tracking frame rate in frames per second.
    pub frame_rate: f64,
    /// Compute motion features for turnover (type 5) events.
    pub turnover_events: bool,
    /// Compute motion features for made-shot (type 1) events.
    pub made_shot_events: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Run the multi-frame screen interval tracker on every emitted event.
    pub enabled: bool,
    /// A candidate run must exceed this many clock-advancing frames before
    /// it is confirmed as a screen interval.
    pub min_consecutive_frames: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub input_dir: String,
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            frame_rate: 25.0,
            turnover_events: true,
            made_shot_events: false,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_consecutive_frames: 8,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_dir: "data/games".to_string(),
            output_dir: "output".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ============================================================================
// TRACKING RECORDS
// ============================================================================

/// Ball position within one moment. Motion features are attached by the
/// feature extractor; `None` is the explicit missing-value marker (no prior
/// frame to difference against).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_y: Option<f64>,
}

/// One tracked player within one moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(rename = "teamid")]
    pub team_id: TeamId,
    #[serde(rename = "playerid")]
    pub player_id: PlayerId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_y: Option<f64>,
}

/// One sampled frame of tracking data: ball plus every on-court player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Moment {
    pub quarter: u32,
    pub game_clock: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_clock: Option<f64>,
    pub ball_coordinates: BallState,
    pub player_coordinates: Vec<PlayerState>,
}

/// Attack direction on the raw court, before rotation into the canonical
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Play-by-play metadata for one event, plus the annotations the pipeline
/// attaches. Annotation fields stay unset until the relevant stage runs and
/// are omitted from serialized output while unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInfo {
    #[serde(default)]
    pub id: String,
    /// Raw play-by-play type code (1 = made shot, 5 = turnover).
    #[serde(rename = "type")]
    pub type_code: i64,
    #[serde(default)]
    pub possession_team_id: Option<TeamId>,
    #[serde(default)]
    pub desc_home: Option<String>,
    #[serde(default)]
    pub desc_away: Option<String>,

    // ── Pipeline annotations ─────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_clock: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_clock: Option<f64>,
    /// Classification label ("turnover" / "made shot").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Terminal moment snapshot, recorded for turnovers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_moment: Option<Moment>,

    // ── Screen annotations ───────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_potential: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defender_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screener_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_frame_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_frame_end: Option<usize>,
    /// [run start clock rounded to 2 decimals, run end clock rounded].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_time_stamps: Option<[f64; 2]>,
}

/// Team/player reference from the play-by-play source record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorInfo {
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

/// One play-by-play-delimited segment of a game with its run of moments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "gameid")]
    pub game_id: String,
    #[serde(rename = "gamedate", default, skip_serializing_if = "Option::is_none")]
    pub game_date: Option<String>,
    pub event_info: EventInfo,
    #[serde(default)]
    pub primary_info: ActorInfo,
    #[serde(default)]
    pub secondary_info: ActorInfo,
    pub moments: Vec<Moment>,
}
