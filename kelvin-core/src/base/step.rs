//! Environment step.
use super::{Env, Info};

/// The result of one environment step: the next observation, the scalar
/// reward, the episode-end flags, and auxiliary diagnostics.
pub struct EnvStep<E: Env> {
    /// Observation after the step.
    pub obs: E::Obs,

    /// Scalar reward for the step.
    pub reward: f64,

    /// Flag denoting if the episode has terminated.
    pub terminated: bool,

    /// Flag denoting if the episode was truncated by the environment.
    ///
    /// Carried as data; it ends the episode only when the run opts in.
    pub truncated: bool,

    /// Auxiliary diagnostics emitted by the environment.
    pub info: Info,
}

impl<E: Env> EnvStep<E> {
    /// Constructs an [`EnvStep`] object.
    pub fn new(obs: E::Obs, reward: f64, terminated: bool, truncated: bool, info: Info) -> Self {
        EnvStep {
            obs,
            reward,
            terminated,
            truncated,
            info,
        }
    }

    /// Whether this step ends the episode.
    #[inline]
    pub fn is_done(&self, stop_on_truncation: bool) -> bool {
        self.terminated || (stop_on_truncation && self.truncated)
    }
}
