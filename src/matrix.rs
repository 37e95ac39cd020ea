#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{CountingError, CountingResult};
use crate::into_iter;
use crate::utils::get_flat_index;
use crate::{Complex, Precision};
use num_traits::{One, Zero};

/// A dense `2^nindices` by `2^nindices` complex matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<P: Precision> {
    nindices: usize,
    data: Vec<Complex<P>>,
}

impl<P: Precision> SquareMatrix<P> {
    /// Wrap row-major `data` for a matrix acting on `nindices` qubits.
    pub fn new(nindices: usize, data: Vec<Complex<P>>) -> CountingResult<Self> {
        let expected = 1 << (2 * nindices);
        if data.len() != expected {
            let message = format!(
                "Matrix data has {:?} entries versus expected 2^2*{:?}",
                data.len(),
                nindices
            );
            Err(CountingError::new(message))
        } else {
            Ok(Self { nindices, data })
        }
    }

    /// Build a matrix from a function of `(row, col)`.
    pub fn from_fn<F>(nindices: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> Complex<P>,
    {
        let side = 1 << nindices;
        let data = (0..side * side).map(|i| f(i / side, i % side)).collect();
        Self { nindices, data }
    }

    /// The identity on `nindices` qubits.
    pub fn identity(nindices: usize) -> Self {
        Self::from_fn(nindices, |row, col| {
            if row == col {
                Complex::one()
            } else {
                Complex::zero()
            }
        })
    }

    /// Number of qubits the matrix acts on.
    pub fn nindices(&self) -> usize {
        self.nindices
    }

    /// Length of a side, `2^nindices`.
    pub fn dim(&self) -> usize {
        1 << self.nindices
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Complex<P> {
        self.data[get_flat_index(self.nindices, row, col)]
    }

    /// Main diagonal.
    pub fn diagonal(&self) -> Vec<Complex<P>> {
        (0..self.dim()).map(|i| self.get(i, i)).collect()
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[Complex<P>] {
        &self.data
    }

    /// Ordinary matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &Self) -> CountingResult<Self> {
        if self.nindices != rhs.nindices {
            let message = format!(
                "Cannot multiply matrices on {:?} and {:?} qubits",
                self.nindices, rhs.nindices
            );
            Err(CountingError::new(message))
        } else {
            Ok(self.product(rhs))
        }
    }

    /// `self^exponent` by repeated squaring.
    pub fn pow(&self, mut exponent: usize) -> Self {
        let mut result = Self::identity(self.nindices);
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.product(&base);
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.product(&base);
            }
        }
        result
    }

    // Shapes must already agree.
    fn product(&self, rhs: &Self) -> Self {
        let side = self.dim();
        let r = 0..side * side;
        let data = into_iter!(r)
            .map(|i| {
                let (row, col) = (i / side, i % side);
                (0..side)
                    .map(|k| self.get(row, k) * rhs.get(k, col))
                    .fold(Complex::zero(), |acc, x| acc + x)
            })
            .collect();
        Self {
            nindices: self.nindices,
            data,
        }
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        Self::from_fn(self.nindices, |row, col| self.get(col, row).conj())
    }

    /// Largest absolute entry of `self^dagger · self - I`.
    pub fn unitarity_deviation(&self) -> P {
        let product = self.adjoint().product(self);
        let side = self.dim();
        (0..side * side)
            .map(|i| {
                let (row, col) = (i / side, i % side);
                let expected = if row == col {
                    Complex::one()
                } else {
                    Complex::zero()
                };
                (product.get(row, col) - expected).norm()
            })
            .fold(P::zero(), |acc, x| if x > acc { x } else { acc })
    }

    /// Check unitarity within `tolerance`.
    pub fn check_unitary(&self, tolerance: P) -> CountingResult<()> {
        let deviation = self.unitarity_deviation();
        if deviation <= tolerance {
            Ok(())
        } else {
            Err(CountingError::NonUnitary {
                deviation: deviation.to_f64().unwrap_or(f64::NAN),
                tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
            })
        }
    }
}
