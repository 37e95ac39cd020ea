use crate::errors::{CountingError, CountingResult};
use std::collections::HashSet;

/// Largest total number of simulated wires. The state vector holds `2^MAX_QUBITS` amplitudes.
pub const MAX_QUBITS: usize = 24;

/// How marked indices which do not describe a proper set of basis states are treated.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Out of range indices, negative ones included, are left out of the oracle but still
    /// counted as solutions. Repeats are counted every time they appear.
    #[default]
    Tolerant,
    /// Out of range and repeated indices are rejected.
    Strict,
}

impl IndexPolicy {
    /// Check `marked` against a search space of `size` elements.
    pub fn check(self, marked: &[i64], size: usize) -> CountingResult<()> {
        match self {
            IndexPolicy::Tolerant => Ok(()),
            IndexPolicy::Strict => {
                let mut seen = HashSet::with_capacity(marked.len());
                marked.iter().try_for_each(|index| {
                    if basis_index(*index, size).is_none() {
                        Err(CountingError::IndexOutOfRange {
                            index: *index,
                            size,
                        })
                    } else if !seen.insert(*index) {
                        Err(CountingError::DuplicateIndex(*index))
                    } else {
                        Ok(())
                    }
                })
            }
        }
    }
}

/// The basis state addressed by `index` in a space of `size` elements, if there is one.
pub fn basis_index(index: i64, size: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|i| *i < size)
}

/// Width of both registers together, refusing sums which do not fit a `usize`.
pub(crate) fn total_qubits(
    target_qubits: usize,
    estimation_qubits: usize,
) -> CountingResult<usize> {
    target_qubits.checked_add(estimation_qubits).ok_or_else(|| {
        CountingError::InvalidConfig(format!(
            "{} target and {} estimation qubits overflow the register width",
            target_qubits, estimation_qubits
        ))
    })
}

/// Settings for a counting run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountingConfig {
    /// Width of the register searched, the space holds `2^target_qubits` elements.
    pub target_qubits: usize,
    /// Width of the phase register, giving `2^estimation_qubits` phase buckets.
    pub estimation_qubits: usize,
    /// Treatment of out of range and repeated indices.
    pub index_policy: IndexPolicy,
    /// Take the peak from this many sampled measurements instead of the exact distribution.
    pub shots: Option<usize>,
    /// Seed for sampled measurements. Without one, sampling draws from system entropy.
    pub seed: Option<u64>,
    /// Allowed deviation of `G^dagger G` from the identity before a Grover operator is refused.
    pub unitary_tolerance: f64,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            target_qubits: 4,
            estimation_qubits: 4,
            index_policy: IndexPolicy::default(),
            shots: None,
            seed: None,
            unitary_tolerance: 1e-9,
        }
    }
}

impl CountingConfig {
    /// Number of elements in the search space.
    pub fn search_space(&self) -> usize {
        1 << self.target_qubits
    }

    /// Number of phase buckets.
    pub fn phase_buckets(&self) -> usize {
        1 << self.estimation_qubits
    }

    /// Reject layouts which cannot be simulated.
    pub fn validate(&self) -> CountingResult<()> {
        if self.target_qubits == 0 || self.estimation_qubits == 0 {
            return Err(CountingError::InvalidConfig(format!(
                "registers need at least one qubit, got {} target and {} estimation",
                self.target_qubits, self.estimation_qubits
            )));
        }
        let total = total_qubits(self.target_qubits, self.estimation_qubits)?;
        if total > MAX_QUBITS {
            return Err(CountingError::InvalidConfig(format!(
                "{} qubits requested, at most {} can be simulated",
                total, MAX_QUBITS
            )));
        }
        if self.shots == Some(0) {
            return Err(CountingError::InvalidConfig(
                "shots must be positive".to_string(),
            ));
        }
        if !(self.unitary_tolerance >= 0.0) {
            return Err(CountingError::InvalidConfig(format!(
                "unitary tolerance must be non-negative, got {}",
                self.unitary_tolerance
            )));
        }
        Ok(())
    }
}
