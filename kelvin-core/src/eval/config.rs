//! Configuration of [`Evaluation`](super::Evaluation).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Evaluation`](super::Evaluation).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EvalConfig {
    /// Seeds to evaluate, in order. One seed group per entry.
    pub seeds: Vec<u64>,

    /// Number of episodes per seed group.
    pub episodes_per_seed: usize,

    /// Whether a truncation flag from the environment ends an episode.
    ///
    /// Off by default: only `terminated` ends an episode, and an environment
    /// that never terminates is expected to uphold its side of the contract.
    /// Turn this on for environments that only ever truncate.
    pub stop_on_truncation: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            seeds: vec![0],
            episodes_per_seed: 1,
            stop_on_truncation: false,
        }
    }
}

impl EvalConfig {
    /// Sets the seeds to evaluate.
    pub fn seeds(mut self, seeds: Vec<u64>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Sets the number of episodes per seed group.
    pub fn episodes_per_seed(mut self, v: usize) -> Self {
        self.episodes_per_seed = v;
        self
    }

    /// Sets whether truncation ends an episode.
    pub fn stop_on_truncation(mut self, v: bool) -> Self {
        self.stop_on_truncation = v;
        self
    }

    /// Total number of episodes the run will attempt.
    pub fn n_episodes(&self) -> usize {
        self.seeds.len() * self.episodes_per_seed
    }

    /// Constructs [`EvalConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EvalConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
