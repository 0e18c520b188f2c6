//! Model hyperparameters.

use matern_statespace::Scalar;
use serde::Serialize;

use crate::error::KalmanError;

/// The three hyperparameters of one likelihood evaluation.
///
/// [`Hyperparameters::new`] performs no checks, matching the contract of
/// [`evaluate`](crate::evaluate). Use [`Hyperparameters::try_new`] when
/// invalid values should be rejected up front instead of surfacing as NaN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hyperparameters<T> {
    observation_noise_variance: T,
    process_variance: T,
    length_scale: T,
}

impl<T: Scalar> Hyperparameters<T> {
    /// Creates hyperparameters without validation.
    pub fn new(observation_noise_variance: T, process_variance: T, length_scale: T) -> Self {
        Self {
            observation_noise_variance,
            process_variance,
            length_scale,
        }
    }

    /// Creates hyperparameters, requiring every value to be finite and > 0.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`KalmanError::NonFiniteHyperparameter`] | a value is NaN or infinite |
    /// | [`KalmanError::NonPositiveHyperparameter`] | a value is `<= 0` |
    pub fn try_new(
        observation_noise_variance: T,
        process_variance: T,
        length_scale: T,
    ) -> Result<Self, KalmanError> {
        check_positive("observation_noise_variance", observation_noise_variance.value())?;
        check_positive("process_variance", process_variance.value())?;
        check_positive("length_scale", length_scale.value())?;
        Ok(Self::new(
            observation_noise_variance,
            process_variance,
            length_scale,
        ))
    }

    /// Observation noise variance `r`.
    pub fn observation_noise_variance(&self) -> T {
        self.observation_noise_variance
    }

    /// Process (prior) variance `σ²`.
    pub fn process_variance(&self) -> T {
        self.process_variance
    }

    /// Length scale `ℓ`.
    pub fn length_scale(&self) -> T {
        self.length_scale
    }

    /// Converts to another scalar type through `f64`.
    pub fn cast<U: Scalar>(&self) -> Hyperparameters<U> {
        Hyperparameters::new(
            U::from_f64(self.observation_noise_variance.value()),
            U::from_f64(self.process_variance.value()),
            U::from_f64(self.length_scale.value()),
        )
    }

    /// Log marginal likelihood of `observations` under these hyperparameters.
    pub fn log_marginal_likelihood(&self, observations: &[T]) -> T {
        crate::evaluate(
            observations,
            self.observation_noise_variance,
            self.process_variance,
            self.length_scale,
        )
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), KalmanError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(KalmanError::NonFiniteHyperparameter { name, value })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), KalmanError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(KalmanError::NonPositiveHyperparameter { name, value })
    }
}
