//! Eval command: likelihood of observations read from a file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use matern_kalman::{FilterTrace, Hyperparameters, Scalar, filter_trace};

use crate::cli::EvalArgs;
use crate::config;
use crate::convert::{self, Precision};
use crate::data;

/// Run the standalone evaluation.
pub fn run(args: EvalArgs) -> Result<()> {
    let _cmd = info_span!("eval").entered();
    let config = config::load(args.config.as_deref())?;

    let hyper = convert::build_hyperparameters(&config.hyperparameters, &args.model)?;
    let precision = convert::resolve_precision(args.model.precision.as_deref(), &config.precision)?;

    info!(path = %args.data.display(), "reading observations");
    let observations = data::read_observations(&args.data)?;
    if observations.is_empty() {
        bail!("no observations in {}", args.data.display());
    }
    info!(n_obs = observations.len(), "observations loaded");

    let lml = match precision {
        Precision::Single => trace_and_report::<f32>(&observations, &hyper, args.trace.as_deref())?,
        Precision::Double => trace_and_report::<f64>(&observations, &hyper, args.trace.as_deref())?,
    };

    println!("{lml}");
    Ok(())
}

/// Runs the filter in `T`, logs degeneracy, and optionally writes the trace.
fn trace_and_report<T: Scalar + Serialize>(
    observations: &[f64],
    hyper: &Hyperparameters<f64>,
    trace_path: Option<&Path>,
) -> Result<f64> {
    let y: Vec<T> = observations.iter().map(|&v| T::from_f64(v)).collect();
    let trace = filter_trace(&y, &hyper.cast::<T>());

    if let Some(step) = trace.first_non_finite() {
        warn!(
            step,
            innovation_variance = trace.steps()[step].output.innovation_variance.value(),
            "log density became non-finite"
        );
    }

    if let Some(path) = trace_path {
        write_trace(&trace, path)?;
        info!(path = %path.display(), "filter trace written");
    }

    Ok(trace.log_marginal_likelihood().value())
}

fn write_trace<T: Scalar + Serialize>(trace: &FilterTrace<T>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(trace).context("failed to serialize filter trace")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write trace: {}", path.display()))
}
