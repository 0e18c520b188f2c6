//! Forward-mode differentiation through the recursion with a caller-side
//! dual number.

use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::assert_relative_eq;
use matern_kalman::{Scalar, evaluate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Value plus one directional derivative.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Dual {
    val: f64,
    der: f64,
}

impl Dual {
    fn variable(val: f64) -> Self {
        Self { val, der: 1.0 }
    }

    fn constant(val: f64) -> Self {
        Self { val, der: 0.0 }
    }
}

impl Add for Dual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            val: self.val + rhs.val,
            der: self.der + rhs.der,
        }
    }
}

impl Sub for Dual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            val: self.val - rhs.val,
            der: self.der - rhs.der,
        }
    }
}

impl Mul for Dual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            val: self.val * rhs.val,
            der: self.der * rhs.val + self.val * rhs.der,
        }
    }
}

impl Div for Dual {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self {
            val: self.val / rhs.val,
            der: (self.der * rhs.val - self.val * rhs.der) / (rhs.val * rhs.val),
        }
    }
}

impl Neg for Dual {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            val: -self.val,
            der: -self.der,
        }
    }
}

impl Scalar for Dual {
    fn from_f64(v: f64) -> Self {
        Self::constant(v)
    }

    fn value(&self) -> f64 {
        self.val
    }

    fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        Self {
            val: s,
            der: self.der / (2.0 * s),
        }
    }

    fn ln(self) -> Self {
        Self {
            val: self.val.ln(),
            der: self.der / self.val,
        }
    }

    fn powi(self, n: i32) -> Self {
        Self {
            val: self.val.powi(n),
            der: f64::from(n) * self.val.powi(n - 1) * self.der,
        }
    }
}

fn data(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(11);
    (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
}

fn lift(y: &[f64]) -> Vec<Dual> {
    y.iter().map(|&v| Dual::constant(v)).collect()
}

/// Central finite difference of `f` at `x`.
fn central_diff(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = 1e-6 * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}

const R: f64 = 0.1;
const SIGMA2: f64 = 1.0;
const ELL: f64 = 10.0;

#[test]
fn primal_matches_plain_evaluation() {
    let y = data(200);
    let dual = evaluate(
        &lift(&y),
        Dual::variable(R),
        Dual::constant(SIGMA2),
        Dual::constant(ELL),
    );
    assert_eq!(dual.val, evaluate(&y, R, SIGMA2, ELL));
}

#[test]
fn derivative_wrt_noise_variance() {
    let y = data(200);
    let dual = evaluate(
        &lift(&y),
        Dual::variable(R),
        Dual::constant(SIGMA2),
        Dual::constant(ELL),
    );
    let fd = central_diff(|r| evaluate(&y, r, SIGMA2, ELL), R);
    assert_relative_eq!(dual.der, fd, max_relative = 1e-4);
}

#[test]
fn derivative_wrt_process_variance() {
    let y = data(200);
    let dual = evaluate(
        &lift(&y),
        Dual::constant(R),
        Dual::variable(SIGMA2),
        Dual::constant(ELL),
    );
    let fd = central_diff(|s| evaluate(&y, R, s, ELL), SIGMA2);
    assert_relative_eq!(dual.der, fd, max_relative = 1e-4);
}

#[test]
fn derivative_wrt_length_scale() {
    let y = data(200);
    let dual = evaluate(
        &lift(&y),
        Dual::constant(R),
        Dual::constant(SIGMA2),
        Dual::variable(ELL),
    );
    let fd = central_diff(|l| evaluate(&y, R, SIGMA2, l), ELL);
    assert_relative_eq!(dual.der, fd, max_relative = 1e-4);
}

#[test]
fn single_observation_noise_derivative_closed_form() {
    // d/dr of -0.5 (y²/S + ln 2πS) with S = r + σ².
    let y = 0.8;
    let dual = evaluate(
        &[Dual::constant(y)],
        Dual::variable(R),
        Dual::constant(SIGMA2),
        Dual::constant(ELL),
    );
    let s = R + SIGMA2;
    let expected = -0.5 * (1.0 / s - y * y / (s * s));
    assert_relative_eq!(dual.der, expected, max_relative = 1e-12);
}
