#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{CountingError, CountingResult};
use crate::utils::sub_to_full;
use crate::{cast, into_iter};
use crate::{Complex, Precision};
use rand::Rng;

/// Calculate the probability of a given measurement. `measured` gives the bits (as a usize) which
/// would be read from the wires at `indices`, the first wire being the most significant bit.
/// `input` is the state of all `n` wires.
///
/// Keep in mind that wires are big-endian to match kron product standards.
/// `|abc>` means `q0=a`, `q1=b`, `q2=c`
///
/// # Examples
/// ```
/// use qcount::state_ops::matrix_ops::from_reals;
/// use qcount::state_ops::measurement_ops::measure_prob;
///
/// // Make the state |10>, wire 0 is always |1> and wire 1 is always |0>
/// let input = from_reals(&[0.0, 0.0, 1.0, 0.0]);
///
/// assert_eq!(measure_prob(2, 0, &[0], &input), 0.0);
/// assert_eq!(measure_prob(2, 1, &[0], &input), 1.0);
/// assert_eq!(measure_prob(2, 0b10, &[0, 1], &input), 1.0);
/// assert_eq!(measure_prob(2, 0b01, &[1, 0], &input), 1.0);
/// ```
pub fn measure_prob<P: Precision>(
    n: usize,
    measured: usize,
    indices: &[usize],
    input: &[Complex<P>],
) -> P {
    let template = sub_to_full(n, indices, measured, 0);
    let remaining_indices: Vec<usize> = (0..n).filter(|i| !indices.contains(i)).collect();
    (0usize..1 << remaining_indices.len())
        .map(|rest| sub_to_full(n, &remaining_indices, rest, template))
        .map(|index| input[index].norm_sqr())
        .sum()
}

/// Get probability for each possible measurement of `indices` on `input`.
pub fn measure_probs<P: Precision>(n: usize, indices: &[usize], input: &[Complex<P>]) -> Vec<P> {
    let r = 0usize..1 << indices.len();
    into_iter!(r)
        .map(|measured| measure_prob(n, measured, indices, input))
        .collect()
}

/// Draw `shots` outcomes from the distribution `probs` and return how often each outcome was
/// drawn. Probabilities need not be normalized.
pub fn sample_counts<P: Precision, R: Rng>(
    probs: &[P],
    shots: usize,
    rng: &mut R,
) -> CountingResult<Vec<usize>> {
    let total: P = probs.iter().cloned().sum();
    if probs.iter().any(|p| p.is_nan() || *p < P::zero()) || !(total > P::zero()) {
        return Err(CountingError::new(
            "Cannot sample from a distribution without positive mass",
        ));
    }
    let mut counts = vec![0; probs.len()];
    for _ in 0..shots {
        let mut r = cast::<P>(rng.gen::<f64>()) * total;
        // Rounding may leave a little mass at the end, which goes to the last nonzero outcome.
        let mut measured = probs.iter().rposition(|p| *p > P::zero()).unwrap_or(0);
        for (i, p) in probs.iter().enumerate() {
            r -= *p;
            if r < P::zero() {
                measured = i;
                break;
            }
        }
        counts[measured] += 1;
    }
    Ok(counts)
}
