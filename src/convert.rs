//! Pure conversion functions: TOML config structs + CLI overrides -> crate API types.

use anyhow::{Context, Result, bail};

use matern_kalman::{Hyperparameters, SweepGrid};

use crate::cli::ModelArgs;
use crate::config::{HyperparametersToml, SweepToml};

/// Floating-point type the filter runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// `f32`, the reference precision.
    Single,
    /// `f64`.
    Double,
}

impl Precision {
    /// Name used in config files and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Single => "f32",
            Precision::Double => "f64",
        }
    }
}

/// Parses a precision name string into the corresponding enum variant.
pub fn parse_precision(s: &str) -> Result<Precision> {
    match s.to_lowercase().as_str() {
        "f32" | "single" => Ok(Precision::Single),
        "f64" | "double" => Ok(Precision::Double),
        other => bail!("unknown precision: {other:?} (expected \"f32\" or \"f64\")"),
    }
}

/// Resolves the precision: CLI override first, then config.
pub fn resolve_precision(cli: Option<&str>, config: &str) -> Result<Precision> {
    parse_precision(cli.unwrap_or(config))
}

/// Builds validated [`Hyperparameters`] from the TOML table and CLI overrides.
pub fn build_hyperparameters(
    toml: &HyperparametersToml,
    overrides: &ModelArgs,
) -> Result<Hyperparameters<f64>> {
    Hyperparameters::try_new(
        overrides
            .observation_noise_variance
            .unwrap_or(toml.observation_noise_variance),
        overrides.process_variance.unwrap_or(toml.process_variance),
        overrides.length_scale.unwrap_or(toml.length_scale),
    )
    .context("invalid hyperparameters")
}

/// Builds a [`SweepGrid`] from the TOML sweep table.
pub fn build_sweep_grid(toml: &SweepToml) -> Result<SweepGrid> {
    SweepGrid::new(
        toml.observation_noise_variance.clone(),
        toml.process_variance.clone(),
        toml.length_scale.clone(),
    )
    .context("invalid sweep grid")
}

/// Rejects a zero observation count or repeat count.
pub fn check_count(name: &str, value: usize) -> Result<usize> {
    if value == 0 {
        bail!("{name} must be at least 1");
    }
    Ok(value)
}
