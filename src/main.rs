// src/main.rs

mod classifier;
mod config;
mod direction;
mod error;
mod features;
mod geometry;
mod pipeline;
mod roles;
mod screen;
#[cfg(test)]
mod test_support;
mod types;

use anyhow::{Context, Result};
use pipeline::{EventPipeline, PipelineConfig};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use types::{Config, Event};
use walkdir::WalkDir;

fn main() -> Result<()> {
    let config = Config::load("config.yaml")?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("playscan={}", config.logging.level))
        .init();

    info!("🏀 Play Extraction Pipeline Starting");
    info!("✓ Configuration loaded");
    info!(
        "Feature extraction: frame_rate={:.1}, turnovers={}, made_shots={}",
        config.features.frame_rate, config.features.turnover_events, config.features.made_shot_events
    );
    info!(
        "Screen tracking: enabled={}, min_consecutive_frames={}",
        config.screen.enabled, config.screen.min_consecutive_frames
    );

    let game_files = find_game_files(&config.data.input_dir)?;
    if game_files.is_empty() {
        error!("No game files found in {}", config.data.input_dir);
        return Ok(());
    }
    info!("Found {} game file(s) to process", game_files.len());

    std::fs::create_dir_all(&config.data.output_dir)
        .with_context(|| format!("failed to create output dir {}", config.data.output_dir))?;

    let pipeline_config = PipelineConfig::from_config(&config);
    let mut totals = ProcessingStats::default();

    for (idx, game_path) in game_files.iter().enumerate() {
        info!("========================================");
        info!(
            "Processing game {}/{}: {}",
            idx + 1,
            game_files.len(),
            game_path.display()
        );

        match process_game_file(game_path, &config, &pipeline_config) {
            Ok(stats) => {
                info!("✓ Game processed");
                info!("  Total events: {}", stats.total_events);
                info!("  Plays emitted: {}", stats.plays_emitted);
                info!("  🔄 Turnovers: {}", stats.turnovers);
                info!("  🎯 Made shots: {}", stats.made_shots);
                if pipeline_config.screen_enabled {
                    info!("  🧱 Screens confirmed: {}", stats.screens_confirmed);
                }
                totals.add(&stats);
            }
            Err(e) => error!("Failed to process {}: {:#}", game_path.display(), e),
        }
    }

    info!("📊 Final Report:");
    info!("  Games processed: {}", game_files.len());
    info!("  Total events seen: {}", totals.total_events);
    info!("  Plays emitted: {}", totals.plays_emitted);
    info!("  🔄 Turnovers: {}", totals.turnovers);
    info!("  🎯 Made shots: {}", totals.made_shots);
    info!("  🧱 Screens confirmed: {}", totals.screens_confirmed);

    Ok(())
}

#[derive(Debug, Default)]
struct ProcessingStats {
    total_events: usize,
    plays_emitted: usize,
    turnovers: usize,
    made_shots: usize,
    screens_confirmed: usize,
}

impl ProcessingStats {
    fn add(&mut self, other: &ProcessingStats) {
        self.total_events += other.total_events;
        self.plays_emitted += other.plays_emitted;
        self.turnovers += other.turnovers;
        self.made_shots += other.made_shots;
        self.screens_confirmed += other.screens_confirmed;
    }
}

/// Catalog the input directory: every .json file, in sorted order so runs
/// are reproducible regardless of directory iteration order.
fn find_game_files(input_dir: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn process_game_file(
    game_path: &Path,
    config: &Config,
    pipeline_config: &PipelineConfig,
) -> Result<ProcessingStats> {
    let file = File::open(game_path)
        .with_context(|| format!("failed to open {}", game_path.display()))?;
    let events: Vec<Event> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", game_path.display()))?;

    let mut stats = ProcessingStats {
        total_events: events.len(),
        ..Default::default()
    };

    let stem = game_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("game");
    let out_path = Path::new(&config.data.output_dir).join(format!("{stem}_plays.jsonl"));
    let out_file = File::create(&out_path)
        .with_context(|| format!("failed to create {}", out_path.display()))?;
    let mut writer = BufWriter::new(out_file);
    info!("💾 Writing plays to {}", out_path.display());

    let pipeline = EventPipeline::new(events.into_iter(), pipeline_config.clone());
    for result in pipeline {
        let event = result.with_context(|| format!("in {}", game_path.display()))?;

        match event.event_info.event_type.as_deref() {
            Some(classifier::LABEL_TURNOVER) => stats.turnovers += 1,
            Some(classifier::LABEL_MADE_SHOT) => stats.made_shots += 1,
            other => warn!(
                "event {} emitted without classification: {:?}",
                event.event_info.id, other
            ),
        }
        if event.event_info.screen_potential == Some(true) {
            stats.screens_confirmed += 1;
        }

        let line = serde_json::to_string(&event)?;
        writeln!(writer, "{line}")?;
        stats.plays_emitted += 1;
    }
    writer.flush()?;

    Ok(stats)
}
