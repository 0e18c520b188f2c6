//! Matérn-5/2 state-space representation.
//!
//! Converts the process variance `σ²` and length scale `ℓ` into the fixed
//! three-dimensional model consumed by the Kalman recursion:
//!
//! ```text
//! x[k+1] = A * x[k]       (state transition)
//! y[k]   = H * x[k] + e   (observation, e ~ N(0, r))
//! ```
//!
//! with
//!
//! ```text
//! λ    = √5 / ℓ
//! F    = [[0, 1, 0], [0, 0, 1], [-λ³, -15/ℓ², -3λ]]
//! κ    = (5/3) σ² / ℓ²
//! Pinf = [[σ², 0, -κ], [0, κ, 0], [-κ, 0, 25 σ² / ℓ⁴]]
//! A    = F ∘ F
//! H    = [1, 0, 0]
//! ```
//!
//! `A` is the element-wise square of the generator, not `exp(F Δt)`.
//! Likelihood values are defined against this transition, so it must not be
//! replaced by an exact discretisation.

use crate::scalar::Scalar;
use crate::small_linalg::{SmallMat, SmallVec};

/// Dimension of the latent state.
pub const STATE_DIM: usize = 3;

/// 3-vector over the scalar `T`.
pub type Vec3<T> = SmallVec<T, STATE_DIM>;

/// 3 x 3 matrix over the scalar `T`.
pub type Mat3<T> = SmallMat<T, STATE_DIM>;

/// State-space form of a Matérn-5/2 Gaussian process.
///
/// Built once per hyperparameter pair by [`build_state_space`]; immutable
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaternStateSpace<T> {
    process_variance: T,
    length_scale: T,
    generator: Mat3<T>,
    transition: Mat3<T>,
    stationary_covariance: Mat3<T>,
    observation_map: Vec3<T>,
}

/// Builds the Matérn-5/2 state-space matrices for `(σ², ℓ)`.
///
/// Inputs are not validated. Non-positive values yield NaN or infinite
/// entries that propagate into the likelihood.
pub fn build_state_space<T: Scalar>(process_variance: T, length_scale: T) -> MaternStateSpace<T> {
    let zero = T::zero();
    let one = T::one();

    let lambda = T::from_f64(5.0).sqrt() / length_scale;
    let length_sq = length_scale * length_scale;

    let generator = SmallMat::from_rows([
        [zero, one, zero],
        [zero, zero, one],
        [
            -lambda.powi(3),
            -(T::from_f64(15.0) / length_sq),
            -(T::from_f64(3.0) * lambda),
        ],
    ]);

    let kappa = T::from_f64(5.0 / 3.0) * process_variance / length_sq;
    let corner = process_variance / length_scale.powi(4) * T::from_f64(25.0);
    let stationary_covariance = SmallMat::from_rows([
        [process_variance, zero, -kappa],
        [zero, kappa, zero],
        [-kappa, zero, corner],
    ]);

    let transition = generator.hadamard_square();
    let observation_map = SmallVec::from_array([one, zero, zero]);

    MaternStateSpace {
        process_variance,
        length_scale,
        generator,
        transition,
        stationary_covariance,
        observation_map,
    }
}

impl<T: Scalar> MaternStateSpace<T> {
    /// Same as [`build_state_space`].
    pub fn new(process_variance: T, length_scale: T) -> Self {
        build_state_space(process_variance, length_scale)
    }

    /// Process (prior) variance `σ²` the model was built from.
    pub fn process_variance(&self) -> T {
        self.process_variance
    }

    /// Length scale `ℓ` the model was built from.
    pub fn length_scale(&self) -> T {
        self.length_scale
    }

    /// Continuous-time generator `F`.
    pub fn generator(&self) -> &Mat3<T> {
        &self.generator
    }

    /// One-step transition `A = F ∘ F`.
    pub fn transition(&self) -> &Mat3<T> {
        &self.transition
    }

    /// Stationary covariance `Pinf`.
    pub fn stationary_covariance(&self) -> &Mat3<T> {
        &self.stationary_covariance
    }

    /// Observation row `H = [1, 0, 0]`.
    pub fn observation_map(&self) -> &Vec3<T> {
        &self.observation_map
    }
}
