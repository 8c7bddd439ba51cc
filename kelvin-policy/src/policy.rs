//! Linear state-feedback policy.
use crate::error::PolicyError;
use kelvin_core::{Env, Policy};
use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Whether a loaded policy returns its mean action or samples around it.
///
/// Fixed for the whole evaluation run at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    /// Always return the mean action.
    Deterministic,

    /// Add Gaussian exploration noise to the mean action.
    Stochastic,
}

/// Persisted form of a linear state-feedback controller.
///
/// Both artifact formats decode into this struct: the action is
/// `W . obs + b`, optionally clipped to per-dimension bounds, with
/// `noise_std` giving the per-dimension spread used in stochastic mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySpec {
    /// Observation dimension.
    pub obs_dim: usize,

    /// Action dimension.
    pub act_dim: usize,

    /// Gain matrix, row-major `act_dim x obs_dim`.
    pub weights: Vec<f64>,

    /// Bias term, length `act_dim`.
    pub bias: Vec<f64>,

    /// Per-dimension stddev of exploration noise, length `act_dim`.
    pub noise_std: Vec<f64>,

    /// Lower action bounds, length `act_dim`.
    pub act_low: Option<Vec<f64>>,

    /// Upper action bounds, length `act_dim`.
    pub act_high: Option<Vec<f64>>,
}

impl PolicySpec {
    /// Checks that the flattened fields agree with the declared dimensions.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let expect = |name: &str, len: usize, want: usize| {
            if len == want {
                Ok(())
            } else {
                Err(PolicyError::DimensionMismatch(format!(
                    "{} has length {}, expected {}",
                    name, len, want
                )))
            }
        };
        expect("weights", self.weights.len(), self.act_dim * self.obs_dim)?;
        expect("bias", self.bias.len(), self.act_dim)?;
        expect("noise_std", self.noise_std.len(), self.act_dim)?;
        if let Some(low) = &self.act_low {
            expect("act_low", low.len(), self.act_dim)?;
        }
        if let Some(high) = &self.act_high {
            expect("act_high", high.len(), self.act_dim)?;
        }
        Ok(())
    }
}

/// A linear state-feedback controller loaded from a policy artifact.
///
/// Implements [`Policy`] for any environment whose observation can be viewed
/// as an `f64` slice and whose action can be built from an `f64` vector.
pub struct LinearPolicy<E> {
    weights: Array2<f64>,
    bias: Array1<f64>,
    noise_std: Array1<f64>,
    bounds: Option<(Array1<f64>, Array1<f64>)>,
    mode: SampleMode,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E> LinearPolicy<E> {
    /// Builds a policy from a decoded spec with the given sampling mode.
    pub fn from_spec(spec: PolicySpec, mode: SampleMode) -> Result<Self, PolicyError> {
        spec.validate()?;
        let weights = Array2::from_shape_vec((spec.act_dim, spec.obs_dim), spec.weights)
            .map_err(|e| PolicyError::DimensionMismatch(e.to_string()))?;
        let bounds = match (spec.act_low, spec.act_high) {
            (Some(low), Some(high)) => Some((Array1::from(low), Array1::from(high))),
            // one-sided bounds are not a thing the artifacts produce
            _ => None,
        };
        Ok(Self {
            weights,
            bias: Array1::from(spec.bias),
            noise_std: Array1::from(spec.noise_std),
            bounds,
            mode,
            rng: SmallRng::seed_from_u64(0),
            phantom: PhantomData,
        })
    }

    /// Reseeds the exploration-noise stream.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// The sampling mode fixed at load time.
    pub fn mode(&self) -> SampleMode {
        self.mode
    }

    /// Mean action for an observation, before noise and clipping.
    fn mean_action(&self, obs: &[f64]) -> Array1<f64> {
        let obs = ArrayView1::from(obs);
        self.weights.dot(&obs) + &self.bias
    }
}

impl<E> Policy<E> for LinearPolicy<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<Vec<f64>>,
{
    /// Sample an action given an observation.
    ///
    /// # Panics
    ///
    /// Panics if the observation length differs from the policy's `obs_dim`.
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let mut act = self.mean_action(obs.as_ref());
        if self.mode == SampleMode::Stochastic {
            for (a, std) in act.iter_mut().zip(self.noise_std.iter()) {
                let z: f64 = StandardNormal.sample(&mut self.rng);
                *a += z * std;
            }
        }
        if let Some((low, high)) = &self.bounds {
            for ((a, lo), hi) in act.iter_mut().zip(low.iter()).zip(high.iter()) {
                *a = a.max(*lo).min(*hi);
            }
        }
        act.to_vec().into()
    }
}
