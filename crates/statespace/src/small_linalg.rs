//! Stack-allocated small linear algebra types for the Kalman filter hot loop.
//!
//! The Matérn-5/2 model has a fixed state dimension of 3, so every vector and
//! matrix lives on the stack. All operations return new values; nothing is
//! updated in place, which keeps each filter step a pure composition that AD
//! scalars can flow through.

use crate::scalar::Scalar;

/// Stack-allocated vector of dimension `R`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmallVec<T, const R: usize> {
    data: [T; R],
}

/// Stack-allocated R x R matrix stored in column-major order.
///
/// `cols[c][r]` = element at row r, column c.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmallMat<T, const R: usize> {
    cols: [[T; R]; R],
}

impl<T: Scalar, const R: usize> SmallVec<T, R> {
    /// Returns a zero-initialized vector.
    #[inline(always)]
    pub fn zeros() -> Self {
        Self {
            data: [T::zero(); R],
        }
    }

    /// Wraps an array of components.
    #[inline(always)]
    pub fn from_array(data: [T; R]) -> Self {
        Self { data }
    }

    /// Number of components.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        R
    }

    /// `true` only for the degenerate zero-dimensional vector.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        R == 0
    }

    /// Returns component `i`.
    #[inline(always)]
    pub fn get(&self, i: usize) -> T {
        self.data[i]
    }

    /// Borrows the components.
    #[inline(always)]
    pub fn as_array(&self) -> &[T; R] {
        &self.data
    }

    /// Inner product `selfᵀ · other`.
    #[inline(always)]
    pub fn dot(&self, other: &Self) -> T {
        let mut sum = T::zero();
        for i in 0..R {
            sum = sum + self.data[i] * other.data[i];
        }
        sum
    }

    /// Component-wise sum.
    #[inline(always)]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            data: std::array::from_fn(|i| self.data[i] + other.data[i]),
        }
    }

    /// Multiplies every component by `k`.
    #[inline(always)]
    pub fn scale(&self, k: T) -> Self {
        Self {
            data: std::array::from_fn(|i| self.data[i] * k),
        }
    }

    /// Divides every component by `k`.
    #[inline(always)]
    pub fn div_scalar(&self, k: T) -> Self {
        Self {
            data: std::array::from_fn(|i| self.data[i] / k),
        }
    }
}

impl<T: Scalar, const R: usize> SmallMat<T, R> {
    /// Returns a zero-initialized matrix.
    #[inline(always)]
    pub fn zeros() -> Self {
        Self {
            cols: [[T::zero(); R]; R],
        }
    }

    /// Builds a matrix from row-major literals.
    pub fn from_rows(rows: [[T; R]; R]) -> Self {
        Self {
            cols: std::array::from_fn(|c| std::array::from_fn(|r| rows[r][c])),
        }
    }

    /// `(rows, cols)`.
    #[inline(always)]
    pub const fn shape(&self) -> (usize, usize) {
        (R, R)
    }

    /// Returns the element at `(row, col)`.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.cols[col][row]
    }

    /// Returns column `col` as a vector.
    #[inline(always)]
    pub fn column(&self, col: usize) -> SmallVec<T, R> {
        SmallVec::from_array(self.cols[col])
    }

    /// Returns row `row` as a vector.
    #[inline(always)]
    pub fn row(&self, row: usize) -> SmallVec<T, R> {
        SmallVec::from_array(std::array::from_fn(|c| self.cols[c][row]))
    }

    /// Matrix transpose.
    #[inline(always)]
    pub fn transpose(&self) -> Self {
        Self {
            cols: std::array::from_fn(|c| std::array::from_fn(|r| self.cols[r][c])),
        }
    }

    /// Element-wise sum.
    #[inline(always)]
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise difference.
    #[inline(always)]
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Element-wise (Hadamard) square, `self ∘ self`.
    #[inline(always)]
    pub fn hadamard_square(&self) -> Self {
        self.zip_with(self, |a, b| a * b)
    }

    /// Computes the matrix-vector product `self * v`.
    #[inline(always)]
    pub fn mul_vec(&self, v: &SmallVec<T, R>) -> SmallVec<T, R> {
        SmallVec::from_array(std::array::from_fn(|i| {
            let mut sum = T::zero();
            for k in 0..R {
                sum = sum + self.get(i, k) * v.get(k);
            }
            sum
        }))
    }

    /// Computes the matrix product `self * other`.
    #[inline(always)]
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self {
            cols: std::array::from_fn(|c| self.mul_vec(&other.column(c)).data),
        }
    }

    /// Outer product `u · vᵀ`.
    #[inline(always)]
    pub fn outer(u: &SmallVec<T, R>, v: &SmallVec<T, R>) -> Self {
        Self {
            cols: std::array::from_fn(|c| std::array::from_fn(|r| u.get(r) * v.get(c))),
        }
    }

    /// Largest absolute difference between `self` and its transpose.
    pub fn max_asymmetry(&self) -> f64 {
        let mut worst = 0.0_f64;
        for r in 0..R {
            for c in 0..R {
                worst = worst.max((self.get(r, c).value() - self.get(c, r).value()).abs());
            }
        }
        worst
    }

    #[inline(always)]
    fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        Self {
            cols: std::array::from_fn(|c| {
                std::array::from_fn(|r| f(self.cols[c][r], other.cols[c][r]))
            }),
        }
    }
}
