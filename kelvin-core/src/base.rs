//! Traits shared by environments and policies.
mod env;
mod info;
mod policy;
mod step;

pub use env::{Act, Env, Obs};
pub use info::{Info, InfoValue, EPISODE_METRICS_KEY};
pub use policy::Policy;
pub use step::EnvStep;
