use std::collections::HashSet;

use crate::config::basis_index;
use crate::errors::CountingResult;
use crate::matrix::SquareMatrix;
use crate::{cast_usize, Complex, Precision};
use num_traits::{One, Zero};

/// Oracle for the `marked` basis states of a `target_qubits` wide register: the identity with
/// `-1` on the diagonal of every marked index.
///
/// Negative indices and those at or beyond `2^target_qubits` address no basis state and are
/// ignored, a repeated index flips its sign only once.
///
/// # Example
/// ```
/// use qcount::operators::oracle_matrix;
/// use qcount::Complex;
///
/// let o = oracle_matrix::<f64>(2, &[1]);
/// assert_eq!(o.get(1, 1), Complex::new(-1.0, 0.0));
/// assert_eq!(o.get(0, 0), Complex::new(1.0, 0.0));
/// ```
pub fn oracle_matrix<P: Precision>(target_qubits: usize, marked: &[i64]) -> SquareMatrix<P> {
    let size = 1 << target_qubits;
    let flipped = marked
        .iter()
        .filter_map(|index| basis_index(*index, size))
        .collect::<HashSet<_>>();
    SquareMatrix::from_fn(target_qubits, |row, col| {
        if row != col {
            Complex::zero()
        } else if flipped.contains(&row) {
            -Complex::one()
        } else {
            Complex::one()
        }
    })
}

/// Inversion about the mean, `2|s><s| - I` with `|s>` the uniform superposition over
/// `2^target_qubits` states. Every entry is `2/N - delta_ij`.
pub fn diffusion_matrix<P: Precision>(target_qubits: usize) -> SquareMatrix<P> {
    let two_over_n = cast_usize::<P>(2) / cast_usize::<P>(1 << target_qubits);
    SquareMatrix::from_fn(target_qubits, |row, col| {
        let delta = if row == col { P::one() } else { P::zero() };
        Complex::new(two_over_n - delta, P::zero())
    })
}

/// One Grover iteration, the product `diffusion · oracle`.
pub fn grover_operator<P: Precision>(
    diffusion: &SquareMatrix<P>,
    oracle: &SquareMatrix<P>,
) -> CountingResult<SquareMatrix<P>> {
    diffusion.matmul(oracle)
}
