//! # matern-statespace
//!
//! State-space form of a Gaussian process with a Matérn-5/2 covariance.
//!
//! ## Construction
//!
//! ```mermaid
//! graph LR
//!     A["(σ², ℓ)"] -->|"build_state_space()"| B["MaternStateSpace"]
//!     B --> C[".generator(): F"]
//!     B --> D[".transition(): A = F ∘ F"]
//!     B --> E[".stationary_covariance(): Pinf"]
//!     B --> F[".observation_map(): H"]
//! ```
//!
//! ## Quick start
//!
//! ```
//! use matern_statespace::build_state_space;
//!
//! let model = build_state_space(1.0_f64, 1.0);
//! assert_eq!(model.stationary_covariance().get(2, 2), 25.0);
//! assert_eq!(model.observation_map().as_array(), &[1.0, 0.0, 0.0]);
//! ```
//!
//! Everything is generic over [`Scalar`], so the same construction runs in
//! `f32`, `f64`, or a caller-supplied automatic-differentiation type.

mod scalar;
mod small_linalg;
mod state_space;

pub use scalar::Scalar;
pub use small_linalg::{SmallMat, SmallVec};
pub use state_space::{Mat3, MaternStateSpace, STATE_DIM, Vec3, build_state_space};
