//! Persistence of run artifacts.
//!
//! Three artifacts per run: `episodes.csv` with one row per episode,
//! `summary.json` with per-metric statistics and run metadata, and
//! (when tracing) `trace.csv` with one row per environment step. Tables carry
//! the union of keys seen across their records; a cell whose record lacks the
//! key is left empty.
use anyhow::Result;
use chrono::Local;
use kelvin_core::record::{EpisodeMetrics, StepRecord};
use kelvin_core::stats::Summary;
use kelvin_core::RunStatus;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// The summary artifact: run metadata plus per-metric statistics.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Path the policy artifact was loaded from.
    pub model_path: String,

    /// Artifact format the path classified as.
    pub model_format: String,

    /// Sampling mode of the run.
    pub sample_mode: kelvin_policy::SampleMode,

    /// Environment the run evaluated in.
    pub env_id: String,

    /// Seed groups, in evaluation order.
    pub seeds: Vec<u64>,

    /// Episodes per seed group.
    pub episodes_per_seed: usize,

    /// How the run ended.
    pub status: RunStatus,

    /// When the report was written.
    pub generated_at: String,

    /// Per-metric summary statistics.
    pub metrics: Summary,
}

impl RunReport {
    /// Stamps the report with the current local time.
    pub fn generated_now(mut self) -> Self {
        self.generated_at = Local::now().to_rfc3339();
        self
    }
}

/// Writes one row per episode, with the union of metric names as columns.
pub fn write_episodes_csv(path: &Path, records: &[EpisodeMetrics]) -> Result<()> {
    let names: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.metrics().map(|(k, _)| k))
        .collect();

    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec!["seed".to_string(), "episode".to_string()];
    header.extend(names.iter().map(|n| n.to_string()));
    wtr.write_record(&header)?;

    for r in records {
        let mut row = vec![r.seed.to_string(), r.episode.to_string()];
        for name in &names {
            match r.metrics().find(|(k, _)| k == name) {
                Some((_, v)) => row.push(v.to_string()),
                None => row.push(String::new()),
            }
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one row per traced environment step.
pub fn write_trace_csv(path: &Path, records: &[StepRecord]) -> Result<()> {
    let names: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.scalars.keys().map(|k| k.as_str()))
        .collect();

    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec![
        "seed".to_string(),
        "episode".to_string(),
        "step".to_string(),
        "reward".to_string(),
    ];
    header.extend(names.iter().map(|n| n.to_string()));
    wtr.write_record(&header)?;

    for r in records {
        let mut row = vec![
            r.seed.to_string(),
            r.episode.to_string(),
            r.step.to_string(),
            r.reward.to_string(),
        ];
        for name in &names {
            match r.scalars.get(*name) {
                Some(v) => row.push(v.to_string()),
                None => row.push(String::new()),
            }
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the summary artifact as pretty-printed JSON.
pub fn write_summary_json(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
