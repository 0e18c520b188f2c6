//! Per-step diagnostics of a filter run.

use matern_statespace::{Scalar, build_state_space};
use serde::Serialize;

use crate::hyper::Hyperparameters;
use crate::kalman::{FilterState, StepOutput, step};

/// One recorded filter step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TraceStep<T> {
    /// Zero-based observation index.
    pub index: usize,
    /// Scalars produced by the step.
    #[serde(flatten)]
    pub output: StepOutput<T>,
    /// Running log-likelihood after this step.
    pub log_likelihood: T,
}

/// Full record of a filter run, one [`TraceStep`] per observation.
#[derive(Clone, Debug, Serialize)]
pub struct FilterTrace<T> {
    hyperparameters: Hyperparameters<T>,
    steps: Vec<TraceStep<T>>,
}

impl<T: Scalar> FilterTrace<T> {
    /// Hyperparameters of the run.
    pub fn hyperparameters(&self) -> &Hyperparameters<T> {
        &self.hyperparameters
    }

    /// Recorded steps in observation order.
    pub fn steps(&self) -> &[TraceStep<T>] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` when no observations were filtered.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Final log marginal likelihood (zero for an empty run).
    pub fn log_marginal_likelihood(&self) -> T {
        self.steps
            .last()
            .map_or_else(T::zero, |s| s.log_likelihood)
    }

    /// Index of the first step whose log density is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.steps
            .iter()
            .find(|s| !s.output.log_density.is_finite())
            .map(|s| s.index)
    }
}

/// Runs the filter and records every step.
///
/// Uses the same step function as [`evaluate`](crate::evaluate), so
/// [`FilterTrace::log_marginal_likelihood`] matches it exactly.
#[tracing::instrument(level = "debug", skip_all, fields(n_obs = observations.len()))]
pub fn filter_trace<T: Scalar>(
    observations: &[T],
    hyperparameters: &Hyperparameters<T>,
) -> FilterTrace<T> {
    let model = build_state_space(
        hyperparameters.process_variance(),
        hyperparameters.length_scale(),
    );
    let r = hyperparameters.observation_noise_variance();

    let mut steps = Vec::with_capacity(observations.len());
    let mut state = FilterState::initial(&model);
    let mut total = T::zero();
    for (index, &y) in observations.iter().enumerate() {
        let (next, output) = step(&model, &state, y, r);
        state = next;
        total = total + output.log_density;
        steps.push(TraceStep {
            index,
            output,
            log_likelihood: total,
        });
    }

    FilterTrace {
        hyperparameters: *hyperparameters,
        steps,
    }
}
