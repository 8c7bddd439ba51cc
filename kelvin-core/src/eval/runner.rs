//! Single-episode rollout.
use crate::base::{Env, Info, Policy};
use crate::record::{StepRecord, TraceRecorder};
use anyhow::Result;
use log::trace;
use std::collections::BTreeMap;

/// What one completed episode produced.
#[derive(Debug)]
pub struct EpisodeOutcome {
    /// Sum of per-step rewards, in the order they were received.
    pub episode_reward: f64,

    /// Number of environment steps taken.
    pub steps: usize,

    /// Info map of the final step, the canonical end-of-episode summary.
    pub last_info: Info,
}

/// Runs one episode to completion.
///
/// The environment must already be reset; `init_obs` is the observation that
/// reset produced. The loop queries the policy, applies the action, and
/// accumulates the reward until the environment signals the end of the
/// episode. One [`StepRecord`] is written to `recorder` per environment step,
/// terminal step included; pass a
/// [`NullTraceRecorder`](crate::record::NullTraceRecorder) when tracing is
/// off.
///
/// Environment faults are not handled here; they propagate to the caller
/// unmodified.
pub fn run_episode<E, P, R>(
    env: &mut E,
    policy: &mut P,
    init_obs: E::Obs,
    seed: u64,
    episode: usize,
    stop_on_truncation: bool,
    recorder: &mut R,
) -> Result<EpisodeOutcome>
where
    E: Env,
    P: Policy<E>,
    R: TraceRecorder,
{
    let mut prev_obs = init_obs;
    let mut episode_reward = 0.0;
    let mut steps = 0;
    let last_info;

    loop {
        let act = policy.sample(&prev_obs);
        let step = env.step(&act)?;

        episode_reward += step.reward;

        let mut scalars: BTreeMap<String, f64> =
            step.info.scalars().map(|(k, v)| (k.to_string(), v)).collect();
        scalars.insert("truncated".to_string(), step.truncated as u8 as f64);
        recorder.write(StepRecord::new(seed, episode, steps, step.reward, scalars));
        trace!(
            "seed {} episode {} step {}: reward {}",
            seed,
            episode,
            steps,
            step.reward
        );

        steps += 1;
        if step.is_done(stop_on_truncation) {
            last_info = step.info;
            break;
        }
        prev_obs = step.obs;
    }

    Ok(EpisodeOutcome {
        episode_reward,
        steps,
        last_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BufferedTraceRecorder, NullTraceRecorder};
    use crate::testing::{ConstPolicy, ScriptedEnv};

    #[test]
    fn trace_length_equals_steps_taken() -> Result<()> {
        let mut env = ScriptedEnv::with_rewards(vec![1.0, -2.0, 0.5, 3.0]);
        let mut policy = ConstPolicy::new(0.0);
        let mut recorder = BufferedTraceRecorder::new();

        let obs = env.reset(Some(0))?;
        let outcome = run_episode(&mut env, &mut policy, obs, 0, 0, false, &mut recorder)?;

        assert_eq!(outcome.steps, 4);
        assert_eq!(recorder.len(), outcome.steps);
        let step_ixs: Vec<_> = recorder.iter().map(|r| r.step).collect();
        assert_eq!(step_ixs, vec![0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn reward_is_the_exact_ordered_sum() -> Result<()> {
        let rewards = vec![0.1, 0.2, 0.3, -0.4];
        let mut env = ScriptedEnv::with_rewards(rewards.clone());
        let mut policy = ConstPolicy::new(0.0);

        let obs = env.reset(Some(0))?;
        let outcome =
            run_episode(&mut env, &mut policy, obs, 0, 0, false, &mut NullTraceRecorder {})?;
        assert_eq!(outcome.episode_reward, 0.1 + 0.2 + 0.3 + -0.4);
        Ok(())
    }

    #[test]
    fn truncation_alone_does_not_end_the_episode() -> Result<()> {
        let mut env = ScriptedEnv::with_rewards(vec![1.0, 1.0, 1.0]).truncate_at(1);
        let mut policy = ConstPolicy::new(0.0);
        let mut recorder = BufferedTraceRecorder::new();

        let obs = env.reset(Some(0))?;
        let outcome = run_episode(&mut env, &mut policy, obs, 0, 0, false, &mut recorder)?;

        // ran past the truncation point, up to the scripted termination
        assert_eq!(outcome.steps, 3);
        let flags: Vec<_> = recorder.iter().map(|r| r.scalars["truncated"]).collect();
        assert_eq!(flags, vec![0.0, 1.0, 0.0]);
        Ok(())
    }

    #[test]
    fn truncation_ends_the_episode_when_opted_in() -> Result<()> {
        let mut env = ScriptedEnv::with_rewards(vec![1.0, 1.0, 1.0]).truncate_at(1);
        let mut policy = ConstPolicy::new(0.0);

        let obs = env.reset(Some(0))?;
        let outcome =
            run_episode(&mut env, &mut policy, obs, 0, 0, true, &mut NullTraceRecorder {})?;
        assert_eq!(outcome.steps, 2);
        Ok(())
    }

    #[test]
    fn env_faults_propagate() -> Result<()> {
        let mut env = ScriptedEnv::with_rewards(vec![1.0, 1.0]).fail_at_step(1);
        let mut policy = ConstPolicy::new(0.0);

        let obs = env.reset(Some(0))?;
        let result =
            run_episode(&mut env, &mut policy, obs, 0, 0, false, &mut NullTraceRecorder {});
        assert!(result.is_err());
        Ok(())
    }
}
