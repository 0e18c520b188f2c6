//! Error types for the matern-kalman crate.
//!
//! The likelihood evaluation itself never fails: degenerate inputs surface
//! as NaN or infinity in the returned value. These errors cover the strict
//! constructors that callers opt into.

/// Error type for all fallible operations in the matern-kalman crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KalmanError {
    /// Returned when a hyperparameter is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFiniteHyperparameter {
        /// Hyperparameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when a hyperparameter is zero or negative.
    #[error("{name} must be > 0, got {value}")]
    NonPositiveHyperparameter {
        /// Hyperparameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when a sweep grid axis has no values.
    #[error("sweep axis {axis} is empty")]
    EmptyAxis {
        /// Axis name.
        axis: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite() {
        let err = KalmanError::NonFiniteHyperparameter {
            name: "length_scale",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "length_scale must be finite, got NaN");
    }

    #[test]
    fn error_non_positive() {
        let err = KalmanError::NonPositiveHyperparameter {
            name: "process_variance",
            value: -1.5,
        };
        assert_eq!(err.to_string(), "process_variance must be > 0, got -1.5");
    }

    #[test]
    fn error_empty_axis() {
        let err = KalmanError::EmptyAxis { axis: "length_scale" };
        assert_eq!(err.to_string(), "sweep axis length_scale is empty");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<KalmanError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<KalmanError>();
    }
}
