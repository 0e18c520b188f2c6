//! Bench command: time the likelihood on freshly drawn standard-normal data.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, warn};

use matern_kalman::{Hyperparameters, Scalar};

use crate::cli::BenchArgs;
use crate::config;
use crate::convert::{self, Precision};
use crate::data;

/// Outcome of a timed run.
#[derive(Debug)]
pub struct BenchReport {
    pub log_likelihood: f64,
    pub elapsed_secs: f64,
}

/// Run the benchmark.
pub fn run(args: BenchArgs) -> Result<()> {
    let _cmd = info_span!("bench").entered();
    let config = config::load(args.config.as_deref())?;

    let hyper = convert::build_hyperparameters(&config.hyperparameters, &args.model)?;
    let precision = convert::resolve_precision(args.model.precision.as_deref(), &config.precision)?;
    let n_obs = convert::check_count("n_obs", args.n_obs.unwrap_or(config.bench.n_obs))?;
    let repeats = convert::check_count("repeats", args.repeats.unwrap_or(config.bench.repeats))?;

    let mut rng = data::make_rng(args.seed.or(config.seed));
    let observations = data::standard_normal(n_obs, &mut rng);
    info!(
        n_obs,
        repeats,
        precision = precision.as_str(),
        "drew standard-normal observations"
    );

    let report = match precision {
        Precision::Single => time_evaluation::<f32>(&observations, &hyper, repeats),
        Precision::Double => time_evaluation::<f64>(&observations, &hyper, repeats),
    };

    if !report.log_likelihood.is_finite() {
        warn!(
            log_likelihood = report.log_likelihood,
            "log marginal likelihood is not finite"
        );
    }

    println!("Log marginal likelihood: {}", report.log_likelihood);
    println!("Elapsed time: {:.6}", report.elapsed_secs);
    Ok(())
}

/// Converts the data to `T` and times `repeats` evaluations.
pub fn time_evaluation<T: Scalar>(
    observations: &[f64],
    hyper: &Hyperparameters<f64>,
    repeats: usize,
) -> BenchReport {
    let y: Vec<T> = observations.iter().map(|&v| T::from_f64(v)).collect();
    let hyper = hyper.cast::<T>();

    info!("start execution");
    let start = Instant::now();
    let mut lml = T::zero();
    for _ in 0..repeats {
        lml = std::hint::black_box(hyper.log_marginal_likelihood(std::hint::black_box(&y)));
    }
    let elapsed = start.elapsed();
    info!(elapsed_ms = elapsed.as_secs_f64() * 1e3, "finished execution");

    BenchReport {
        log_likelihood: lml.value(),
        elapsed_secs: elapsed.as_secs_f64(),
    }
}
