//! Sweep command: evaluate a hyperparameter grid in parallel.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use matern_kalman::{Scalar, SweepGrid, SweepPoint, best_point, sweep};

use crate::cli::SweepArgs;
use crate::config;
use crate::convert::{self, Precision};
use crate::data;

/// JSON document written by the sweep.
#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub precision: &'static str,
    pub n_obs: usize,
    pub n_points: usize,
    pub n_non_finite: usize,
    pub best: Option<SweepPoint>,
    pub points: Vec<SweepPoint>,
}

/// Run the sweep.
pub fn run(args: SweepArgs) -> Result<()> {
    let _cmd = info_span!("sweep").entered();
    let config = config::load(args.config.as_deref())?;

    let grid = convert::build_sweep_grid(&config.sweep)?;
    let precision = convert::resolve_precision(args.precision.as_deref(), &config.precision)?;

    let observations = match &args.data {
        Some(path) => {
            info!(path = %path.display(), "reading observations");
            data::read_observations(path)?
        }
        None => {
            let n_obs = convert::check_count("n_obs", config.sweep.n_obs)?;
            let mut rng = data::make_rng(args.seed.or(config.seed));
            data::standard_normal(n_obs, &mut rng)
        }
    };
    if observations.is_empty() {
        bail!("no observations to evaluate");
    }
    info!(
        n_obs = observations.len(),
        n_points = grid.len(),
        precision = precision.as_str(),
        "starting sweep"
    );

    let report = match precision {
        Precision::Single => build_report::<f32>(&observations, &grid, precision),
        Precision::Double => build_report::<f64>(&observations, &grid, precision),
    };

    if report.best.is_none() {
        warn!("no grid point produced a finite log marginal likelihood");
    }

    let json = serde_json::to_string_pretty(&report).context("failed to serialize sweep report")?;
    match &args.output {
        Some(path) => write_report(&json, path)?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Evaluates the grid in `T` and assembles the report.
pub fn build_report<T: Scalar>(
    observations: &[f64],
    grid: &SweepGrid,
    precision: Precision,
) -> SweepReport {
    let y: Vec<T> = observations.iter().map(|&v| T::from_f64(v)).collect();
    let points = sweep(&y, grid);
    let n_non_finite = points
        .iter()
        .filter(|p| !p.log_likelihood.is_finite())
        .count();

    SweepReport {
        precision: precision.as_str(),
        n_obs: observations.len(),
        n_points: points.len(),
        n_non_finite,
        best: best_point(&points).copied(),
        points,
    }
}

fn write_report(json: &str, path: &Path) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("failed to write sweep report: {}", path.display()))?;
    info!(path = %path.display(), "sweep report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_degenerate_points() {
        let y = data::standard_normal(200, &mut data::make_rng(Some(4)));
        let grid = SweepGrid::new(vec![0.1], vec![1.0], vec![1.0, 10.0, 20.0]).unwrap();
        let report = build_report::<f64>(&y, &grid, Precision::Double);
        assert_eq!(report.n_points, 3);
        assert_eq!(report.n_non_finite, 1);
        assert_eq!(report.n_obs, 200);
        let best = report.best.unwrap();
        assert!(best.hyperparameters.length_scale() >= 10.0);
    }

    #[test]
    fn report_serializes() {
        let grid = SweepGrid::new(vec![0.1], vec![1.0], vec![10.0]).unwrap();
        let report = build_report::<f32>(&[0.1, 0.2], &grid, Precision::Single);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["precision"], "f32");
        assert_eq!(value["points"].as_array().unwrap().len(), 1);
        assert!(value["best"]["log_likelihood"].is_number());
    }
}
