//! Kalman recursion for the Matérn-5/2 log marginal likelihood.
//!
//! Implements a univariate Kalman filter operating on the state-space
//! representation from [`matern_statespace`]. The predicted covariance uses
//! the stationary form
//!
//! ```text
//! P⁻ = Pinf + A (P - Pinf) Aᵀ
//! ```
//!
//! rather than `A P Aᵀ + Q`. Each step is a pure function of the previous
//! [`FilterState`], so the recursion is a fold over the observations with no
//! in-place updates.

use matern_statespace::{Mat3, MaternStateSpace, Scalar, Vec3};
use serde::Serialize;

/// Posterior mean and covariance of the latent state after a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterState<T> {
    mean: Vec3<T>,
    covariance: Mat3<T>,
}

impl<T: Scalar> FilterState<T> {
    /// Initial condition: zero mean, stationary covariance.
    pub fn initial(model: &MaternStateSpace<T>) -> Self {
        Self {
            mean: Vec3::zeros(),
            covariance: *model.stationary_covariance(),
        }
    }

    /// Posterior mean `m` (3 x 1).
    pub fn mean(&self) -> &Vec3<T> {
        &self.mean
    }

    /// Posterior covariance `P` (3 x 3).
    pub fn covariance(&self) -> &Mat3<T> {
        &self.covariance
    }
}

/// Scalar quantities produced by one filter step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StepOutput<T> {
    /// Predicted observation `H m⁻`.
    pub predicted_observation: T,
    /// Innovation `v = y - H m⁻`.
    pub innovation: T,
    /// Innovation variance `S = r + H P⁻ Hᵀ`.
    pub innovation_variance: T,
    /// Log density of `v` under `N(0, S)`.
    pub log_density: T,
}

/// Propagates the state one step: `m⁻ = A m`, `P⁻ = Pinf + A (P - Pinf) Aᵀ`.
pub fn predict<T: Scalar>(model: &MaternStateSpace<T>, state: &FilterState<T>) -> FilterState<T> {
    let a = model.transition();
    let pinf = model.stationary_covariance();

    let mean = a.mul_vec(&state.mean);
    let centred = state.covariance.sub(pinf);
    let covariance = pinf.add(&a.mul_mat(&centred.mul_mat(&a.transpose())));

    FilterState { mean, covariance }
}

/// Conditions a predicted state on observation `y` with noise variance `r`.
pub fn update<T: Scalar>(
    model: &MaternStateSpace<T>,
    predicted: &FilterState<T>,
    y: T,
    r: T,
) -> (FilterState<T>, StepOutput<T>) {
    let h = model.observation_map();

    // P⁻ Hᵀ, shared by S and the gain.
    let pht = predicted.covariance.mul_vec(h);
    let s = r + h.dot(&pht);
    let predicted_observation = h.dot(&predicted.mean);
    let v = y - predicted_observation;
    let log_density = gaussian_log_density(v, s);

    let gain = pht.div_scalar(s);
    let mean = predicted.mean.add(&gain.scale(v));
    let covariance = predicted
        .covariance
        .sub(&Mat3::outer(&gain, &gain.scale(s)));

    (
        FilterState { mean, covariance },
        StepOutput {
            predicted_observation,
            innovation: v,
            innovation_variance: s,
            log_density,
        },
    )
}

/// One full predict/update step.
pub fn step<T: Scalar>(
    model: &MaternStateSpace<T>,
    state: &FilterState<T>,
    y: T,
    r: T,
) -> (FilterState<T>, StepOutput<T>) {
    update(model, &predict(model, state), y, r)
}

/// `-0.5 * (v² / S + ln(2π S))`.
///
/// No guard on `S`: a non-positive variance yields NaN or infinity.
pub fn gaussian_log_density<T: Scalar>(v: T, s: T) -> T {
    T::from_f64(-0.5) * (v * v / s + (T::from_f64(std::f64::consts::TAU) * s).ln())
}

/// Sums the step log densities over `observations`.
///
/// An empty sequence yields exactly zero.
pub fn log_marginal_likelihood<T: Scalar>(
    model: &MaternStateSpace<T>,
    observations: &[T],
    observation_noise_variance: T,
) -> T {
    let (_, total) = observations.iter().fold(
        (FilterState::initial(model), T::zero()),
        |(state, total), &y| {
            let (next, out) = step(model, &state, y, observation_noise_variance);
            (next, total + out.log_density)
        },
    );
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use matern_statespace::build_state_space;

    #[test]
    fn initial_state() {
        let model = build_state_space(1.0_f64, 1.0);
        let state = FilterState::initial(&model);
        assert_eq!(state.mean().as_array(), &[0.0, 0.0, 0.0]);
        assert_eq!(state.covariance(), model.stationary_covariance());
    }

    #[test]
    fn first_prediction_keeps_stationary_covariance() {
        let model = build_state_space(1.0_f64, 2.0);
        let predicted = predict(&model, &FilterState::initial(&model));
        assert_eq!(predicted.covariance(), model.stationary_covariance());
        assert_eq!(predicted.mean().as_array(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn predict_hand_computed_mean() {
        let model = build_state_space(1.0_f64, 1.0);
        let state = FilterState {
            mean: Vec3::from_array([1.0, 2.0, 3.0]),
            covariance: *model.stationary_covariance(),
        };
        let predicted = predict(&model, &state);
        // A = [[0,1,0],[0,0,1],[125,225,45]] for ℓ = 1.
        let m = predicted.mean();
        assert_abs_diff_eq!(m.get(0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.get(1), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.get(2), 125.0 + 450.0 + 135.0, epsilon = 1e-9);
    }

    #[test]
    fn first_step_closed_form() {
        let model = build_state_space(1.0_f64, 1.0);
        let r = 0.1;
        let y = 0.7;
        let (_, out) = step(&model, &FilterState::initial(&model), y, r);

        let s = r + 1.0;
        assert_abs_diff_eq!(out.innovation_variance, s, epsilon = 1e-15);
        assert_abs_diff_eq!(out.innovation, y, epsilon = 1e-15);
        assert_abs_diff_eq!(out.predicted_observation, 0.0, epsilon = 1e-15);
        let expected = -0.5 * (y * y / s + (2.0 * std::f64::consts::PI * s).ln());
        assert_abs_diff_eq!(out.log_density, expected, epsilon = 1e-12);
    }

    #[test]
    fn update_shrinks_observed_variance() {
        let model = build_state_space(1.0_f64, 3.0);
        let predicted = predict(&model, &FilterState::initial(&model));
        let r = 0.5;
        let (posterior, out) = update(&model, &predicted, 1.0, r);
        // Posterior variance of the observed component: P00 - P00² / S.
        let p00 = predicted.covariance().get(0, 0);
        let expected = p00 - p00 * p00 / out.innovation_variance;
        assert_abs_diff_eq!(posterior.covariance().get(0, 0), expected, epsilon = 1e-12);
        assert!(posterior.covariance().get(0, 0) < p00);
    }

    #[test]
    fn update_moves_mean_toward_observation() {
        let model = build_state_space(1.0_f64, 3.0);
        let predicted = predict(&model, &FilterState::initial(&model));
        let (posterior, out) = update(&model, &predicted, 2.0, 0.5);
        let gain0 = predicted.covariance().get(0, 0) / out.innovation_variance;
        assert_abs_diff_eq!(posterior.mean().get(0), gain0 * 2.0, epsilon = 1e-12);
        assert!(posterior.mean().get(0) > 0.0 && posterior.mean().get(0) < 2.0);
    }

    #[test]
    fn log_density_standard_normal_at_zero() {
        let expected = -0.5 * (2.0 * std::f64::consts::PI).ln();
        assert_abs_diff_eq!(gaussian_log_density(0.0_f64, 1.0), expected, epsilon = 1e-15);
    }

    #[test]
    fn log_density_non_positive_variance_not_finite() {
        assert!(gaussian_log_density(1.0_f64, -1.0).is_nan());
        assert!(!gaussian_log_density(1.0_f64, 0.0).is_finite());
    }

    #[test]
    fn empty_sequence_is_zero() {
        let model = build_state_space(1.0_f64, 1.0);
        assert_eq!(log_marginal_likelihood(&model, &[], 0.1), 0.0);
    }

    #[test]
    fn sum_of_step_densities() {
        let model = build_state_space(1.0_f64, 10.0);
        let obs = [0.3, -0.2, 1.1, 0.4];
        let r = 0.1;

        let mut state = FilterState::initial(&model);
        let mut total = 0.0;
        for &y in &obs {
            let (next, out) = step(&model, &state, y, r);
            state = next;
            total += out.log_density;
        }
        assert_eq!(log_marginal_likelihood(&model, &obs, r), total);
    }
}
