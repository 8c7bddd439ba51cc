//! Environment.
use super::EnvStep;
use anyhow::Result;
use std::fmt::Debug;

/// Observation of the environment.
///
/// The evaluation loop never inspects observations; they only travel from the
/// environment to the policy.
pub trait Obs: Clone + Debug {}

/// Action applied to the environment.
///
/// Opaque to the evaluation loop; produced by a [`Policy`](super::Policy) and
/// consumed by the environment.
pub trait Act: Clone + Debug {}

/// Represents a simulated environment, typically a building-energy model.
///
/// The contract follows the common gym shape: `reset` yields an initial
/// observation, `step` advances the simulation by one control interval, and
/// `close` releases whatever the simulation holds (a subprocess, a socket, a
/// file handle). Both `reset` and `step` may fail; faults are propagated
/// unmodified to the caller, which decides the fate of the run.
pub trait Env {
    /// Configuration of the environment.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Builds an environment with a given random seed.
    ///
    /// The seed is typically stored and consumed by the first `reset`.
    fn build(config: &Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment to a fresh starting state.
    ///
    /// When `seed` is given, the environment reseeds its random stream before
    /// resetting; when absent, the stream continues from where it was. The
    /// evaluation loop passes a seed only on the first reset of each seed
    /// group.
    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs>;

    /// Performs one environment step.
    fn step(&mut self, act: &Self::Act) -> Result<EnvStep<Self>>
    where
        Self: Sized;

    /// Releases the environment's resources.
    ///
    /// Called exactly once by the evaluation loop on shutdown.
    fn close(&mut self);
}
