//! Per-step trace record.
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of an episode trace.
///
/// Identifies the step by `(seed, episode, step)` and carries the step reward
/// together with whatever scalar diagnostics the environment reported.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Seed of the seed group the episode belongs to.
    pub seed: u64,

    /// Episode index within the seed group.
    pub episode: usize,

    /// Step index within the episode, starting at zero.
    pub step: usize,

    /// Reward received at this step.
    pub reward: f64,

    /// Scalar diagnostics reported by the environment at this step.
    pub scalars: BTreeMap<String, f64>,
}

impl StepRecord {
    /// Constructs a [`StepRecord`].
    pub fn new(
        seed: u64,
        episode: usize,
        step: usize,
        reward: f64,
        scalars: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            seed,
            episode,
            step,
            reward,
            scalars,
        }
    }
}
