//! The evaluation loop.
//!
//! [`Evaluation`] owns the run-level control flow: it iterates the configured
//! seeds, resets the environment for every episode, delegates each episode to
//! [`run_episode`], and collects one
//! [`EpisodeMetrics`](crate::record::EpisodeMetrics) record per episode in
//! strict `(seed, episode)` order. A shared [`StopFlag`] interrupts the run
//! between episodes.
mod config;
mod evaluation;
mod extract;
mod runner;
mod stop;

pub use config::EvalConfig;
pub use evaluation::{EvalOutcome, Evaluation, RunStatus};
pub use extract::extract_metrics;
pub use runner::{run_episode, EpisodeOutcome};
pub use stop::StopFlag;
