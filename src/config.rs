use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
///
/// Every field has a default, so an absent config file is equivalent to an
/// empty one. The defaults reproduce the reference benchmark: 50 000
/// standard-normal observations, single precision, `r = 0.1`, `σ² = 1`,
/// `ℓ = 1`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaternConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Floating-point precision: `"f32"` or `"f64"`.
    #[serde(default = "default_precision")]
    pub precision: String,

    /// Model hyperparameters.
    #[serde(default)]
    pub hyperparameters: HyperparametersToml,

    /// Benchmark settings.
    #[serde(default)]
    pub bench: BenchToml,

    /// Sweep settings.
    #[serde(default)]
    pub sweep: SweepToml,
}

impl Default for MaternConfig {
    fn default() -> Self {
        Self {
            seed: None,
            precision: default_precision(),
            hyperparameters: HyperparametersToml::default(),
            bench: BenchToml::default(),
            sweep: SweepToml::default(),
        }
    }
}

fn default_precision() -> String {
    "f32".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HyperparametersToml {
    #[serde(default = "default_noise")]
    pub observation_noise_variance: f64,
    #[serde(default = "default_one")]
    pub process_variance: f64,
    #[serde(default = "default_one")]
    pub length_scale: f64,
}

impl Default for HyperparametersToml {
    fn default() -> Self {
        Self {
            observation_noise_variance: default_noise(),
            process_variance: default_one(),
            length_scale: default_one(),
        }
    }
}

fn default_noise() -> f64 {
    0.1
}
fn default_one() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchToml {
    #[serde(default = "default_bench_n_obs")]
    pub n_obs: usize,
    #[serde(default = "default_repeats")]
    pub repeats: usize,
}

impl Default for BenchToml {
    fn default() -> Self {
        Self {
            n_obs: default_bench_n_obs(),
            repeats: default_repeats(),
        }
    }
}

fn default_bench_n_obs() -> usize {
    50_000
}
fn default_repeats() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepToml {
    #[serde(default = "default_noise_axis")]
    pub observation_noise_variance: Vec<f64>,
    #[serde(default = "default_process_axis")]
    pub process_variance: Vec<f64>,
    #[serde(default = "default_length_axis")]
    pub length_scale: Vec<f64>,
    #[serde(default = "default_sweep_n_obs")]
    pub n_obs: usize,
}

impl Default for SweepToml {
    fn default() -> Self {
        Self {
            observation_noise_variance: default_noise_axis(),
            process_variance: default_process_axis(),
            length_scale: default_length_axis(),
            n_obs: default_sweep_n_obs(),
        }
    }
}

fn default_noise_axis() -> Vec<f64> {
    vec![0.05, 0.1, 0.5, 1.0]
}
fn default_process_axis() -> Vec<f64> {
    vec![0.5, 1.0, 2.0]
}
fn default_length_axis() -> Vec<f64> {
    vec![1.0, 5.0, 10.0, 20.0, 50.0]
}
fn default_sweep_n_obs() -> usize {
    1000
}

/// Loads the config at `path`, or the defaults when `path` is `None`.
pub fn load(path: Option<&Path>) -> Result<MaternConfig> {
    let Some(path) = path else {
        return Ok(MaternConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
