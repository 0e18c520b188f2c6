//! Parallel evaluation over a grid of hyperparameters.
//!
//! Every evaluation is a pure function of its inputs, so grid points are
//! farmed out to the rayon thread pool with no shared mutable state.

use matern_statespace::Scalar;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::KalmanError;
use crate::hyper::{Hyperparameters, check_finite};

/// Cartesian grid over the three hyperparameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepGrid {
    observation_noise_variance: Vec<f64>,
    process_variance: Vec<f64>,
    length_scale: Vec<f64>,
}

impl SweepGrid {
    /// Creates a grid from one list of values per hyperparameter.
    ///
    /// Values are not required to be positive; degenerate points simply
    /// evaluate to a non-finite likelihood.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`KalmanError::EmptyAxis`] | an axis has no values |
    /// | [`KalmanError::NonFiniteHyperparameter`] | an axis holds NaN or infinity |
    pub fn new(
        observation_noise_variance: Vec<f64>,
        process_variance: Vec<f64>,
        length_scale: Vec<f64>,
    ) -> Result<Self, KalmanError> {
        for (axis, values) in [
            ("observation_noise_variance", &observation_noise_variance),
            ("process_variance", &process_variance),
            ("length_scale", &length_scale),
        ] {
            if values.is_empty() {
                return Err(KalmanError::EmptyAxis { axis });
            }
            for &v in values {
                check_finite(axis, v)?;
            }
        }
        Ok(Self {
            observation_noise_variance,
            process_variance,
            length_scale,
        })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.observation_noise_variance.len() * self.process_variance.len() * self.length_scale.len()
    }

    /// Always `false`: construction rejects empty axes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All grid points: noise-major, then process variance, then length scale.
    pub fn points(&self) -> Vec<Hyperparameters<f64>> {
        let mut points = Vec::with_capacity(self.len());
        for &r in &self.observation_noise_variance {
            for &sigma2 in &self.process_variance {
                for &ell in &self.length_scale {
                    points.push(Hyperparameters::new(r, sigma2, ell));
                }
            }
        }
        points
    }
}

/// Log marginal likelihood at one grid point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Hyperparameters of this point.
    pub hyperparameters: Hyperparameters<f64>,
    /// Log marginal likelihood (may be NaN or infinite).
    pub log_likelihood: f64,
}

/// Evaluates every grid point in parallel, in scalar type `T`.
///
/// Results are returned in [`SweepGrid::points`] order.
#[tracing::instrument(skip_all, fields(n_obs = observations.len(), n_points = grid.len()))]
pub fn sweep<T: Scalar>(observations: &[T], grid: &SweepGrid) -> Vec<SweepPoint> {
    let points: Vec<SweepPoint> = grid
        .points()
        .into_par_iter()
        .map(|hyperparameters| SweepPoint {
            hyperparameters,
            log_likelihood: hyperparameters
                .cast::<T>()
                .log_marginal_likelihood(observations)
                .value(),
        })
        .collect();

    let n_non_finite = points
        .iter()
        .filter(|p| !p.log_likelihood.is_finite())
        .count();
    debug!(n_non_finite, "sweep complete");
    points
}

/// The finite point with the highest log marginal likelihood.
pub fn best_point(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points
        .iter()
        .filter(|p| p.log_likelihood.is_finite())
        .max_by(|a, b| a.log_likelihood.total_cmp(&b.log_likelihood))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;

    fn grid() -> SweepGrid {
        SweepGrid::new(vec![0.1, 0.5], vec![1.0], vec![1.0, 10.0, 20.0]).unwrap()
    }

    #[test]
    fn grid_len_and_order() {
        let g = grid();
        assert_eq!(g.len(), 6);
        assert!(!g.is_empty());
        let pts = g.points();
        assert_eq!(pts[0], Hyperparameters::new(0.1, 1.0, 1.0));
        assert_eq!(pts[1], Hyperparameters::new(0.1, 1.0, 10.0));
        assert_eq!(pts[3], Hyperparameters::new(0.5, 1.0, 1.0));
    }

    #[test]
    fn empty_axis_rejected() {
        let err = SweepGrid::new(vec![0.1], vec![], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            KalmanError::EmptyAxis {
                axis: "process_variance"
            }
        ));
    }

    #[test]
    fn non_finite_value_rejected() {
        let err = SweepGrid::new(vec![0.1], vec![1.0], vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            KalmanError::NonFiniteHyperparameter {
                name: "length_scale",
                ..
            }
        ));
    }

    #[test]
    fn matches_sequential_evaluation() {
        let y = [0.3_f64, -0.4, 0.8, 0.1, -0.6];
        let points = sweep(&y, &grid());
        assert_eq!(points.len(), 6);
        for p in &points {
            let h = p.hyperparameters;
            let expected = evaluate(
                &y,
                h.observation_noise_variance(),
                h.process_variance(),
                h.length_scale(),
            );
            assert_eq!(p.log_likelihood.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn best_point_skips_non_finite() {
        let y = [0.3_f64, -0.4, 0.8, 0.1, -0.6];
        let points = sweep(&y, &grid());
        // ℓ = 1 degenerates; the best point must come from a finite one.
        assert!(points[0].log_likelihood.is_nan());
        let best = best_point(&points).unwrap();
        assert!(best.log_likelihood.is_finite());
        for p in points.iter().filter(|p| p.log_likelihood.is_finite()) {
            assert!(best.log_likelihood >= p.log_likelihood);
        }
    }

    #[test]
    fn best_point_none_when_all_degenerate() {
        let g = SweepGrid::new(vec![0.1], vec![1.0], vec![0.0]).unwrap();
        let points = sweep(&[0.1_f64, 0.2], &g);
        assert!(best_point(&points).is_none());
    }

    #[test]
    fn single_precision_sweep() {
        let y = [0.3_f32, -0.4, 0.8];
        let g = SweepGrid::new(vec![0.1], vec![1.0], vec![10.0]).unwrap();
        let points = sweep(&y, &g);
        let expected = evaluate(&y, 0.1_f32, 1.0, 10.0);
        assert_eq!(points[0].log_likelihood, f64::from(expected));
    }
}
