//! Auxiliary step information.
use std::collections::{btree_map, BTreeMap};

/// Key under which an environment reports its end-of-episode KPI map.
///
/// Simulators that compute indicators themselves (energy use, comfort
/// violation hours) attach them under this key on the terminal step.
pub const EPISODE_METRICS_KEY: &str = "episode_metrics";

/// A value stored in an [`Info`] map.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    /// A single scalar diagnostic.
    Scalar(f64),

    /// A nested map of named scalars, e.g. the end-of-episode KPI set.
    Map(BTreeMap<String, f64>),
}

/// Auxiliary diagnostics attached to an environment step.
///
/// A string-keyed map of scalars and nested scalar maps. The evaluation loop
/// treats the info of the final step of an episode as the canonical
/// end-of-episode summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info(BTreeMap<String, InfoValue>);

impl Info {
    /// Creates an empty info map.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a scalar diagnostic.
    pub fn insert_scalar(&mut self, k: impl Into<String>, v: f64) {
        self.0.insert(k.into(), InfoValue::Scalar(v));
    }

    /// Inserts a nested map of named scalars.
    pub fn insert_map(&mut self, k: impl Into<String>, m: BTreeMap<String, f64>) {
        self.0.insert(k.into(), InfoValue::Map(m));
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&InfoValue> {
        self.0.get(k)
    }

    /// Gets a scalar value, if the key holds one.
    pub fn get_scalar(&self, k: &str) -> Option<f64> {
        match self.0.get(k) {
            Some(InfoValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns an iterator over the top-level scalar entries.
    ///
    /// Nested maps are skipped; they are episode-level data, not step
    /// telemetry.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().filter_map(|(k, v)| match v {
            InfoValue::Scalar(v) => Some((k.as_str(), *v)),
            InfoValue::Map(_) => None,
        })
    }

    /// Returns an iterator over all entries.
    pub fn iter(&self) -> btree_map::Iter<'_, String, InfoValue> {
        self.0.iter()
    }

    /// Checks if the info map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, InfoValue>> for Info {
    fn from(m: BTreeMap<String, InfoValue>) -> Self {
        Self(m)
    }
}
