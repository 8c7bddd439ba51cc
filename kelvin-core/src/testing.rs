//! This module is used for tests.
use crate::base::{Act, Env, EnvStep, Info, Obs, Policy, EPISODE_METRICS_KEY};
use crate::eval::StopFlag;
use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Scripted observation.
#[derive(Clone, Debug)]
pub struct ScriptedObs;

impl Obs for ScriptedObs {}

/// Scripted action.
#[derive(Clone, Debug)]
pub struct ScriptedAct(pub f64);

impl Act for ScriptedAct {}

/// An environment that replays a fixed per-step reward script.
///
/// Each episode runs the whole script and terminates on its last step.
/// Optional knobs inject truncation flags, faults, terminal KPI maps, and a
/// stop request after a given number of completed episodes. Reset arguments
/// and close calls are recorded through shared handles so tests can inspect
/// them after the environment has been consumed by the loop.
pub struct ScriptedEnv {
    rewards: Vec<f64>,
    truncate_at: Option<usize>,
    fail_at: Option<usize>,
    final_kpis: Option<BTreeMap<String, f64>>,
    step_ix: usize,
    episodes_done: usize,
    stop_after: Option<(usize, StopFlag)>,
    resets: Rc<RefCell<Vec<Option<u64>>>>,
    close_count: Rc<Cell<usize>>,
}

impl ScriptedEnv {
    /// An environment whose single-episode script is the given rewards.
    pub fn with_rewards(rewards: Vec<f64>) -> Self {
        assert!(!rewards.is_empty());
        Self {
            rewards,
            truncate_at: None,
            fail_at: None,
            final_kpis: None,
            step_ix: 0,
            episodes_done: 0,
            stop_after: None,
            resets: Rc::new(RefCell::new(Vec::new())),
            close_count: Rc::new(Cell::new(0)),
        }
    }

    /// Sets the truncated flag on the given step index.
    pub fn truncate_at(mut self, step: usize) -> Self {
        self.truncate_at = Some(step);
        self
    }

    /// Fails with an error on the given step index.
    pub fn fail_at_step(mut self, step: usize) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// Attaches a KPI map to the terminal step's info.
    pub fn with_final_kpis(mut self, kpis: BTreeMap<String, f64>) -> Self {
        self.final_kpis = Some(kpis);
        self
    }

    /// Requests a stop on the given flag once `n` episodes have completed.
    pub fn stop_after_episodes(mut self, n: usize, flag: StopFlag) -> Self {
        self.stop_after = Some((n, flag));
        self
    }

    /// Handle to the recorded reset arguments.
    pub fn reset_log(&self) -> Rc<RefCell<Vec<Option<u64>>>> {
        Rc::clone(&self.resets)
    }

    /// Handle to the close-call counter.
    pub fn close_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.close_count)
    }
}

impl Env for ScriptedEnv {
    type Config = Vec<f64>;
    type Obs = ScriptedObs;
    type Act = ScriptedAct;

    fn build(config: &Self::Config, _seed: u64) -> Result<Self> {
        Ok(Self::with_rewards(config.clone()))
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs> {
        self.resets.borrow_mut().push(seed);
        self.step_ix = 0;
        Ok(ScriptedObs)
    }

    fn step(&mut self, act: &Self::Act) -> Result<EnvStep<Self>> {
        let ix = self.step_ix;
        if self.fail_at == Some(ix) {
            bail!("scripted fault at step {}", ix);
        }
        let reward = self.rewards[ix];
        let terminated = ix == self.rewards.len() - 1;
        let truncated = self.truncate_at == Some(ix);

        let mut info = Info::empty();
        info.insert_scalar("step_ix", ix as f64);
        info.insert_scalar("act", act.0);
        if terminated {
            self.episodes_done += 1;
            if let Some((n, flag)) = &self.stop_after {
                if self.episodes_done >= *n {
                    flag.request_stop();
                }
            }
            if let Some(kpis) = &self.final_kpis {
                info.insert_map(EPISODE_METRICS_KEY, kpis.clone());
            }
        }

        self.step_ix += 1;
        Ok(EnvStep::new(ScriptedObs, reward, terminated, truncated, info))
    }

    fn close(&mut self) {
        self.close_count.set(self.close_count.get() + 1);
    }
}

/// A policy that always returns the same action.
pub struct ConstPolicy(f64);

impl ConstPolicy {
    /// Constructs a [`ConstPolicy`].
    pub fn new(act: f64) -> Self {
        Self(act)
    }
}

impl<E> Policy<E> for ConstPolicy
where
    E: Env<Act = ScriptedAct>,
{
    fn sample(&mut self, _obs: &E::Obs) -> ScriptedAct {
        ScriptedAct(self.0)
    }
}
