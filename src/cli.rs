use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Matérn-5/2 Gaussian-process likelihood via Kalman filtering.
#[derive(Parser)]
#[command(
    name = "matern",
    version,
    about = "Matérn-5/2 log marginal likelihood via Kalman filtering"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Time one likelihood evaluation on standard-normal data.
    Bench(BenchArgs),
    /// Evaluate the likelihood of observations read from a file.
    Eval(EvalArgs),
    /// Evaluate a hyperparameter grid in parallel.
    Sweep(SweepArgs),
}

/// Hyperparameter and precision overrides shared by subcommands.
#[derive(Args, Default)]
pub struct ModelArgs {
    /// Override observation noise variance.
    #[arg(long = "noise")]
    pub observation_noise_variance: Option<f64>,

    /// Override process (prior) variance.
    #[arg(long = "variance")]
    pub process_variance: Option<f64>,

    /// Override length scale.
    #[arg(long = "length")]
    pub length_scale: Option<f64>,

    /// Override floating-point precision (`f32` or `f64`).
    #[arg(long)]
    pub precision: Option<String>,
}

/// Arguments for the `bench` subcommand.
#[derive(Args)]
pub struct BenchArgs {
    /// Path to TOML configuration file (defaults apply when absent).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override number of observations.
    #[arg(short = 'n', long)]
    pub n_obs: Option<usize>,

    /// Override number of timed evaluations.
    #[arg(long)]
    pub repeats: Option<usize>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for the `eval` subcommand.
#[derive(Args)]
pub struct EvalArgs {
    /// Path to observations, one value per line (`#` starts a comment).
    #[arg(short, long)]
    pub data: PathBuf,

    /// Path to TOML configuration file (defaults apply when absent).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the per-step filter trace as JSON to this path.
    #[arg(long)]
    pub trace: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args)]
pub struct SweepArgs {
    /// Path to TOML configuration file (defaults apply when absent).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to observations; standard-normal data is drawn when absent.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Path for JSON output (stdout when absent).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override floating-point precision (`f32` or `f64`).
    #[arg(long)]
    pub precision: Option<String>,
}
