//! Descriptive statistics over episode records.
//!
//! [`aggregate`] turns a run's ordered collection of
//! [`EpisodeMetrics`](crate::record::EpisodeMetrics) into per-metric summary
//! statistics. Each metric name is summarized independently over the records
//! where it is present, so a KPI missing from some episodes does not skew any
//! other metric.
use crate::error::EvalError;
use crate::record::EpisodeMetrics;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Half-width multiplier of the normal 95% confidence interval.
const CI95_Z: f64 = 1.96;

/// Summary statistics of one metric across a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStats {
    /// Arithmetic mean of the present values.
    pub mean: f64,

    /// Sample standard deviation (n-1 divisor); 0.0 when only one value is
    /// present.
    pub stdev: f64,

    /// Smallest present value.
    pub min: f64,

    /// Largest present value.
    pub max: f64,

    /// Half-width of the 95% confidence interval, present only when two or
    /// more values are.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci95: Option<f64>,

    /// Number of records in which the metric was present.
    pub n: usize,
}

/// Per-metric summary statistics, keyed by metric name.
pub type Summary = BTreeMap<String, MetricStats>;

fn mean(vs: &[f64]) -> f64 {
    vs.iter().sum::<f64>() / vs.len() as f64
}

fn sample_stdev(vs: &[f64], mean: f64) -> f64 {
    if vs.len() < 2 {
        return 0.0;
    }
    let ss = vs.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
    (ss / (vs.len() - 1) as f64).sqrt()
}

fn min(vs: &[f64]) -> f64 {
    *vs.iter().min_by(|x, y| x.total_cmp(y)).unwrap()
}

fn max(vs: &[f64]) -> f64 {
    *vs.iter().max_by(|x, y| x.total_cmp(y)).unwrap()
}

fn summarize(vs: &[f64]) -> MetricStats {
    let mean = mean(vs);
    let stdev = sample_stdev(vs, mean);
    let ci95 = if vs.len() > 1 {
        Some(CI95_Z * stdev / (vs.len() as f64).sqrt())
    } else {
        None
    };
    MetricStats {
        mean,
        stdev,
        min: min(vs),
        max: max(vs),
        ci95,
        n: vs.len(),
    }
}

/// Aggregates episode records into per-metric summary statistics.
///
/// The summary covers the union of metric names across the records. For each
/// name, only the records carrying it contribute; absent entries are skipped
/// silently. The result does not depend on record order.
///
/// All arithmetic is in `f64` and NaN values are not filtered: a NaN among a
/// metric's values propagates into its mean and stdev per ordinary float
/// semantics.
///
/// # Errors
///
/// [`EvalError::EmptyMetricsSet`] when `records` is empty.
pub fn aggregate(records: &[EpisodeMetrics]) -> Result<Summary, EvalError> {
    if records.is_empty() {
        return Err(EvalError::EmptyMetricsSet);
    }

    let names: BTreeSet<&str> = records.iter().flat_map(|r| r.metrics().map(|(k, _)| k)).collect();

    let mut summary = Summary::new();
    for name in names {
        let vs: Vec<f64> = records
            .iter()
            .filter_map(|r| r.metrics().find(|(k, _)| *k == name).map(|(_, v)| v))
            .collect();
        summary.insert(name.to_string(), summarize(&vs));
    }
    Ok(summary)
}
