//! # matern-kalman
//!
//! Log marginal likelihood of a Matérn-5/2 Gaussian process, evaluated by a
//! Kalman filter over the state-space form built by [`matern_statespace`].
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["(r, σ², ℓ)"] -->|"build_state_space(σ², ℓ)"| B["MaternStateSpace"]
//!     B -->|"predict → innovate → update"| C["log marginal likelihood"]
//!     D["observations"] --> C
//!     E["SweepGrid"] -->|"sweep() (rayon)"| F["Vec<SweepPoint>"]
//! ```
//!
//! ## Usage
//!
//! **Single evaluation**:
//! ```
//! use matern_kalman::evaluate;
//!
//! let y = [0.1_f64, -0.4, 0.3];
//! let lml = evaluate(&y, 0.1, 1.0, 10.0);
//! assert!(lml < 0.0);
//! ```
//!
//! **Per-step diagnostics**:
//! ```
//! use matern_kalman::{Hyperparameters, filter_trace};
//!
//! let trace = filter_trace(&[0.1_f64, -0.4], &Hyperparameters::new(0.1, 1.0, 10.0));
//! assert_eq!(trace.len(), 2);
//! ```
//!
//! ## Differentiation
//!
//! Every function is generic over [`Scalar`]. Instantiating it with a dual
//! number gives gradients with respect to the hyperparameters; the crate
//! itself computes none.
//!
//! ## Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | r | [`Hyperparameters::observation_noise_variance()`] | Observation noise variance |
//! | σ² | [`Hyperparameters::process_variance()`] | Prior variance of the process |
//! | ℓ | [`Hyperparameters::length_scale()`] | Length scale |
//! | v | [`StepOutput::innovation`] | Observed minus predicted |
//! | S | [`StepOutput::innovation_variance`] | Variance of the innovation |

mod error;
mod evaluate;
mod hyper;
mod kalman;
mod sweep;
mod trace;

pub use error::KalmanError;
pub use evaluate::evaluate;
pub use hyper::Hyperparameters;
pub use kalman::{
    FilterState, StepOutput, gaussian_log_density, log_marginal_likelihood, predict, step, update,
};
pub use matern_statespace::Scalar;
pub use sweep::{SweepGrid, SweepPoint, best_point, sweep};
pub use trace::{FilterTrace, TraceStep, filter_trace};
