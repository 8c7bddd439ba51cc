//! Run-level orchestration.
use super::{extract_metrics, run_episode, EvalConfig, StopFlag};
use crate::base::{Env, Policy};
use crate::record::{EpisodeMetrics, TraceRecorder};
use anyhow::Result;
use log::info;
use serde::Serialize;

/// Where a run ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The run has not started.
    Idle,

    /// The run is in progress.
    Running,

    /// Every planned episode completed.
    Completed,

    /// A stop was requested and honored between episodes.
    Interrupted,
}

/// What a run produced.
#[derive(Debug)]
pub struct EvalOutcome {
    /// One record per completed episode, in `(seed, episode)` order.
    pub metrics: Vec<EpisodeMetrics>,

    /// Terminal status: [`RunStatus::Completed`] or
    /// [`RunStatus::Interrupted`].
    pub status: RunStatus,
}

/// Drives a full evaluation run: seeds x episodes over one environment and
/// one policy, both owned exclusively for the run's lifetime.
///
/// The loop resets the environment before every episode, passing the seed of
/// the group only on its first episode, and delegates the rollout to
/// [`run_episode`]. Records accumulate in strict `(seed, episode)` order.
/// Between episodes the loop polls the run's [`StopFlag`]; a requested stop
/// preserves the records collected so far and moves straight to shutdown,
/// which closes the environment exactly once.
///
/// Any fault from the environment or the policy aborts the run: the error
/// propagates, nothing is saved here.
pub struct Evaluation<E: Env, P: Policy<E>> {
    env: E,
    policy: P,
    config: EvalConfig,
    stop: StopFlag,
    status: RunStatus,
}

impl<E: Env, P: Policy<E>> Evaluation<E, P> {
    /// Constructs an [`Evaluation`] over an environment and a policy.
    pub fn new(env: E, policy: P, config: EvalConfig) -> Self {
        Self {
            env,
            policy,
            config,
            stop: StopFlag::new(),
            status: RunStatus::Idle,
        }
    }

    /// The run's cancellation token.
    ///
    /// Hand a clone to a signal handler or another thread; the loop honors it
    /// between episodes.
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Replaces the run's cancellation token with an externally owned one.
    pub fn with_stop_flag(mut self, flag: StopFlag) -> Self {
        self.stop = flag;
        self
    }

    /// Runs the evaluation to completion or interruption.
    ///
    /// Consumes the evaluation: the environment is closed on the way out and
    /// no state survives for another run.
    pub fn run<R: TraceRecorder>(mut self, recorder: &mut R) -> Result<EvalOutcome> {
        self.status = RunStatus::Running;
        let mut metrics = Vec::with_capacity(self.config.n_episodes());

        'run: for &seed in &self.config.seeds {
            for episode in 0..self.config.episodes_per_seed {
                if self.stop.is_set() {
                    info!(
                        "stop requested, interrupting after {} of {} episodes",
                        metrics.len(),
                        self.config.n_episodes()
                    );
                    self.status = RunStatus::Interrupted;
                    break 'run;
                }

                // seed only the first reset of each seed group
                let reset_seed = if episode == 0 { Some(seed) } else { None };
                let init_obs = self.env.reset(reset_seed)?;
                let outcome = run_episode(
                    &mut self.env,
                    &mut self.policy,
                    init_obs,
                    seed,
                    episode,
                    self.config.stop_on_truncation,
                    recorder,
                )?;
                info!(
                    "seed {} episode {}: {} steps, reward = {}",
                    seed, episode, outcome.steps, outcome.episode_reward
                );

                let values = extract_metrics(&outcome.last_info, Some(outcome.episode_reward));
                metrics.push(EpisodeMetrics::new(
                    seed,
                    episode,
                    outcome.episode_reward,
                    values,
                ));
            }
        }

        if self.status == RunStatus::Running {
            self.status = RunStatus::Completed;
        }
        self.env.close();
        info!("run {:?} with {} episode records", self.status, metrics.len());

        Ok(EvalOutcome {
            metrics,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NullTraceRecorder;
    use crate::testing::{ConstPolicy, ScriptedEnv};
    use std::collections::BTreeMap;

    fn config(seeds: Vec<u64>, episodes: usize) -> EvalConfig {
        EvalConfig::default().seeds(seeds).episodes_per_seed(episodes)
    }

    #[test]
    fn records_every_seed_episode_pair_in_order() -> Result<()> {
        let env = ScriptedEnv::with_rewards(vec![1.0, 2.0]);
        let eval = Evaluation::new(env, ConstPolicy::new(0.0), config(vec![7, 9], 3));

        let outcome = eval.run(&mut NullTraceRecorder {})?;
        assert_eq!(outcome.status, RunStatus::Completed);

        let idents: Vec<_> = outcome.metrics.iter().map(|m| (m.seed, m.episode)).collect();
        assert_eq!(
            idents,
            vec![(7, 0), (7, 1), (7, 2), (9, 0), (9, 1), (9, 2)]
        );
        for m in &outcome.metrics {
            assert_eq!(m.episode_reward, 3.0);
        }
        Ok(())
    }

    #[test]
    fn seed_is_passed_only_on_the_first_reset_of_a_group() -> Result<()> {
        let env = ScriptedEnv::with_rewards(vec![1.0]);
        let resets = env.reset_log();
        let eval = Evaluation::new(env, ConstPolicy::new(0.0), config(vec![7, 9], 3));

        eval.run(&mut NullTraceRecorder {})?;
        assert_eq!(
            *resets.borrow(),
            vec![Some(7), None, None, Some(9), None, None]
        );
        Ok(())
    }

    #[test]
    fn terminal_kpis_land_in_the_episode_record() -> Result<()> {
        let mut kpis = BTreeMap::new();
        kpis.insert("energy_kwh".to_string(), 40.0);
        let env = ScriptedEnv::with_rewards(vec![1.0, 1.0]).with_final_kpis(kpis);
        let eval = Evaluation::new(env, ConstPolicy::new(0.0), config(vec![0], 1));

        let outcome = eval.run(&mut NullTraceRecorder {})?;
        let m = &outcome.metrics[0];
        assert_eq!(m.values["energy_kwh"], 40.0);
        assert_eq!(m.episode_reward, 2.0);
        Ok(())
    }

    #[test]
    fn interrupt_preserves_collected_records_and_closes_once() -> Result<()> {
        let flag = StopFlag::new();
        let env =
            ScriptedEnv::with_rewards(vec![1.0, 1.0]).stop_after_episodes(2, flag.clone());
        let closes = env.close_counter();
        let eval = Evaluation::new(env, ConstPolicy::new(0.0), config(vec![1, 2], 3))
            .with_stop_flag(flag);

        let outcome = eval.run(&mut NullTraceRecorder {})?;
        assert_eq!(outcome.status, RunStatus::Interrupted);
        assert_eq!(outcome.metrics.len(), 2);
        assert_eq!(
            outcome.metrics.iter().map(|m| (m.seed, m.episode)).collect::<Vec<_>>(),
            vec![(1, 0), (1, 1)]
        );
        assert_eq!(closes.get(), 1);
        Ok(())
    }

    #[test]
    fn env_fault_aborts_the_run() {
        let env = ScriptedEnv::with_rewards(vec![1.0, 1.0]).fail_at_step(1);
        let eval = Evaluation::new(env, ConstPolicy::new(0.0), config(vec![0], 2));
        assert!(eval.run(&mut NullTraceRecorder {}).is_err());
    }
}
