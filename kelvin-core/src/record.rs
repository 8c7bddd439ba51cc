//! Types for recording evaluation telemetry.
//!
//! Two record granularities exist:
//!
//! * [`StepRecord`] - one row per environment step, collected into a trace
//!   when tracing is enabled
//! * [`EpisodeMetrics`] - one row per episode, the unit the aggregator and
//!   the persistence layer consume
//!
//! Step records flow through a [`TraceRecorder`]; [`BufferedTraceRecorder`]
//! keeps them in memory for later persistence and [`NullTraceRecorder`]
//! discards them when tracing is off.
mod buffered_recorder;
mod episode_metrics;
mod null_recorder;
mod recorder;
mod step_record;

pub use buffered_recorder::BufferedTraceRecorder;
pub use episode_metrics::{EpisodeMetrics, EPISODE_REWARD_KEY};
pub use null_recorder::NullTraceRecorder;
pub use recorder::TraceRecorder;
pub use step_record::StepRecord;
