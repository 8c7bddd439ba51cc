//! Per-episode metrics record.
use crate::error::EvalError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Metric name under which the accumulated episode return is reported.
pub const EPISODE_REWARD_KEY: &str = "episode_reward";

/// The metrics of one completed episode.
///
/// `seed` and `episode` identify the record; they are not metrics themselves.
/// `episode_reward` is always present and equals the exact sum of per-step
/// rewards in the order they were received. `values` holds whatever KPIs the
/// environment reported for the episode and is best-effort: a key absent here
/// is simply missing from that metric's aggregation, never treated as zero.
///
/// Records are immutable once created and are collected in strict
/// `(seed, episode)` order for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeMetrics {
    /// Seed of the seed group the episode belongs to.
    pub seed: u64,

    /// Episode index within the seed group.
    pub episode: usize,

    /// Accumulated episode return.
    pub episode_reward: f64,

    /// KPI values reported by the environment for this episode.
    pub values: BTreeMap<String, f64>,
}

impl EpisodeMetrics {
    /// Constructs an [`EpisodeMetrics`] record.
    pub fn new(seed: u64, episode: usize, episode_reward: f64, values: BTreeMap<String, f64>) -> Self {
        Self {
            seed,
            episode,
            episode_reward,
            values,
        }
    }

    /// Returns an iterator over the record's metric name/value pairs.
    ///
    /// Yields [`EPISODE_REWARD_KEY`] first, then the KPI values. The
    /// mandatory reward field is authoritative: a KPI map that happens to
    /// carry its own `episode_reward` entry is shadowed here, so each name
    /// appears at most once.
    pub fn metrics(&self) -> impl Iterator<Item = (&str, f64)> {
        std::iter::once((EPISODE_REWARD_KEY, self.episode_reward)).chain(
            self.values
                .iter()
                .filter(|(k, _)| k.as_str() != EPISODE_REWARD_KEY)
                .map(|(k, v)| (k.as_str(), *v)),
        )
    }

    /// Gets a metric value by name.
    pub fn metric(&self, name: &str) -> Result<f64, EvalError> {
        self.metrics()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
            .ok_or_else(|| EvalError::MetricNotFound(name.to_string()))
    }
}
