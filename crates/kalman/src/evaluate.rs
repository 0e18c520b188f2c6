//! Public entry point: hyperparameters and data in, log marginal likelihood out.

use matern_statespace::{Scalar, build_state_space};

use crate::kalman;

/// Log marginal likelihood of `observations` under a Matérn-5/2 GP.
///
/// Builds the state-space model from `(process_variance, length_scale)` and
/// runs the Kalman recursion with observation noise variance
/// `observation_noise_variance`.
///
/// Nothing is validated. Non-positive variances or length scales, or data
/// that drives the innovation variance non-positive, produce NaN or infinity,
/// which is returned as-is.
///
/// # Example
///
/// ```
/// use matern_kalman::evaluate;
///
/// let y = [0.2_f64, -0.1, 0.4];
/// let lml = evaluate(&y, 0.1, 1.0, 10.0);
/// assert!(lml.is_finite());
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(n_obs = observations.len()))]
pub fn evaluate<T: Scalar>(
    observations: &[T],
    observation_noise_variance: T,
    process_variance: T,
    length_scale: T,
) -> T {
    let model = build_state_space(process_variance, length_scale);
    kalman::log_marginal_likelihood(&model, observations, observation_noise_variance)
}
