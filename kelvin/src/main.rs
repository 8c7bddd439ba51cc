use anyhow::{bail, Context, Result};
use clap::Parser;
use kelvin::output::{self, RunReport};
use kelvin_core::record::{BufferedTraceRecorder, NullTraceRecorder, StepRecord};
use kelvin_core::{stats, EvalConfig, EvalOutcome, Evaluation, Env};
use kelvin_policy::{load_policy, ModelFormat, SampleMode};
use kelvin_zone_env::{ZoneEnv, ZoneEnvConfig};
use log::{info, warn};
use std::path::PathBuf;

const ENV_SINGLE_ZONE: &str = "single-zone";

/// Evaluate a trained building-control policy.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Trained policy artifact: an archive file or a checkpoint directory
    #[arg(short, long)]
    model: PathBuf,

    /// Environment to evaluate in
    #[arg(short, long, default_value = ENV_SINGLE_ZONE)]
    env: String,

    /// YAML file overriding the environment configuration
    #[arg(long)]
    env_config: Option<PathBuf>,

    /// YAML run configuration; replaces the episode/seed/truncation flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Episodes per seed
    #[arg(short = 'n', long, default_value_t = 1)]
    episodes: usize,

    /// Comma-separated seeds, one evaluation group each
    #[arg(short, long, value_delimiter = ',', default_value = "0")]
    seeds: Vec<u64>,

    /// Sample actions instead of taking the deterministic mean
    #[arg(long, default_value_t = false)]
    stochastic: bool,

    /// Record a step-level trace
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// End episodes on truncation as well as termination
    #[arg(long, default_value_t = false)]
    stop_on_truncation: bool,

    /// Directory for the run artifacts
    #[arg(short, long, default_value = "eval-out")]
    out_dir: PathBuf,
}

fn eval_config(args: &Args) -> Result<EvalConfig> {
    match &args.config {
        Some(path) => EvalConfig::load(path),
        None => Ok(EvalConfig::default()
            .seeds(args.seeds.clone())
            .episodes_per_seed(args.episodes)
            .stop_on_truncation(args.stop_on_truncation)),
    }
}

fn build_env(args: &Args, seed: u64) -> Result<ZoneEnv> {
    if args.env != ENV_SINGLE_ZONE {
        bail!(
            "unknown environment {:?}; available: {:?}",
            args.env,
            ENV_SINGLE_ZONE
        );
    }
    let config = match &args.env_config {
        Some(path) => ZoneEnvConfig::load(path)?,
        None => ZoneEnvConfig::default(),
    };
    ZoneEnv::build(&config, seed)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mode = if args.stochastic {
        SampleMode::Stochastic
    } else {
        SampleMode::Deterministic
    };
    let format = ModelFormat::from_path(&args.model).context("model load failed")?;
    let (policy, runtime) =
        load_policy::<ZoneEnv>(&args.model, mode).context("model load failed")?;

    let config = eval_config(&args).context("run configuration failed")?;
    let env = build_env(&args, config.seeds.first().copied().unwrap_or(0))
        .context("environment setup failed")?;
    let eval = Evaluation::new(env, policy, config.clone());

    let stop = eval.stop_flag();
    ctrlc::set_handler(move || {
        warn!("interrupt received, stopping after the in-flight episode");
        stop.request_stop();
    })
    .context("interrupt handler setup failed")?;

    let (outcome, trace): (EvalOutcome, Vec<StepRecord>) = if args.trace {
        let mut recorder = BufferedTraceRecorder::new();
        let outcome = eval.run(&mut recorder).context("environment run failed")?;
        (outcome, recorder.into_records())
    } else {
        let outcome = eval
            .run(&mut NullTraceRecorder {})
            .context("environment run failed")?;
        (outcome, Vec::new())
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create output directory {:?}", args.out_dir))?;
    output::write_episodes_csv(&args.out_dir.join("episodes.csv"), &outcome.metrics)?;
    if args.trace {
        output::write_trace_csv(&args.out_dir.join("trace.csv"), &trace)?;
    }

    if outcome.metrics.is_empty() {
        warn!("no completed episodes, skipping summary");
    } else {
        let summary = stats::aggregate(&outcome.metrics).context("aggregation failed")?;
        let report = RunReport {
            model_path: args.model.display().to_string(),
            model_format: format.name().to_string(),
            sample_mode: mode,
            env_id: args.env.clone(),
            seeds: config.seeds.clone(),
            episodes_per_seed: config.episodes_per_seed,
            status: outcome.status,
            generated_at: String::new(),
            metrics: summary,
        }
        .generated_now();
        output::write_summary_json(&args.out_dir.join("summary.json"), &report)?;
    }

    runtime.shutdown();
    info!(
        "run {:?}: {} episode records written to {:?}",
        outcome.status,
        outcome.metrics.len(),
        args.out_dir
    );
    Ok(())
}
