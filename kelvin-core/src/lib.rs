#![warn(missing_docs)]
//! Core evaluation loop for trained building-control policies.
//!
//! The crate is framework-agnostic: an environment implements [`Env`], a
//! trained controller implements [`Policy`], and [`Evaluation`] drives the
//! seeds-by-episodes loop that produces
//! [`EpisodeMetrics`](record::EpisodeMetrics) records and, via
//! [`stats::aggregate`], summary statistics across a run.
pub mod error;
pub mod record;
pub mod stats;

mod base;
pub use base::{Act, Env, EnvStep, Info, InfoValue, Obs, Policy, EPISODE_METRICS_KEY};

mod eval;
pub use eval::{
    extract_metrics, run_episode, EpisodeOutcome, EvalConfig, EvalOutcome, Evaluation, RunStatus,
    StopFlag,
};

#[cfg(test)]
pub(crate) mod testing;
