use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::circuit::Circuit;
use crate::config::{total_qubits, CountingConfig, MAX_QUBITS};
use crate::errors::{CountingError, CountingResult};
use crate::matrix::SquareMatrix;
use crate::qfft::inverse_qfft;
use crate::state_ops::measurement_ops::measure_probs;
use crate::Precision;

/// Exact state vector simulation of phase estimation on a target register of `target_qubits`
/// wires followed by an estimation register of `estimation_qubits` wires.
///
/// Wire `0` is the most significant bit of a state index. Target wires are `0..t` and estimation
/// wires are `t..t+m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Simulator<P: Precision> {
    target_qubits: usize,
    estimation_qubits: usize,
    phantom: PhantomData<P>,
}

impl<P: Precision> Simulator<P> {
    /// Make a simulator for the given register widths.
    pub fn new(target_qubits: usize, estimation_qubits: usize) -> CountingResult<Self> {
        let total = total_qubits(target_qubits, estimation_qubits)?;
        if target_qubits == 0 || estimation_qubits == 0 {
            Err(CountingError::InvalidConfig(
                "simulator registers need at least one qubit".to_string(),
            ))
        } else if total > MAX_QUBITS {
            Err(CountingError::InvalidConfig(format!(
                "{} qubits requested, at most {} can be simulated",
                total, MAX_QUBITS
            )))
        } else {
            Ok(Self {
                target_qubits,
                estimation_qubits,
                phantom: PhantomData,
            })
        }
    }

    /// Make a simulator with the register widths of `config`.
    pub fn from_config(config: &CountingConfig) -> CountingResult<Self> {
        Self::new(config.target_qubits, config.estimation_qubits)
    }

    /// Total number of wires.
    pub fn n(&self) -> usize {
        self.target_qubits + self.estimation_qubits
    }

    /// Width of the target register.
    pub fn target_qubits(&self) -> usize {
        self.target_qubits
    }

    /// Width of the estimation register.
    pub fn estimation_qubits(&self) -> usize {
        self.estimation_qubits
    }

    /// Wires of the target register.
    pub fn target_wires(&self) -> Vec<usize> {
        (0..self.target_qubits).collect()
    }

    /// Wires of the estimation register, most significant first.
    pub fn estimation_wires(&self) -> Vec<usize> {
        (self.target_qubits..self.n()).collect()
    }

    /// Build the phase estimation circuit of `unitary` with the target register prepared in the
    /// uniform superposition.
    ///
    /// Estimation wire `j` controls `unitary^(2^(m-1-j))`, and the inverse QFT on the estimation
    /// register leaves the outcome `k` most likely when `unitary` has eigenphase `2 pi k / 2^m`.
    pub fn phase_estimation_circuit(
        &self,
        unitary: &SquareMatrix<P>,
    ) -> CountingResult<Circuit<P>> {
        if unitary.nindices() != self.target_qubits {
            let message = format!(
                "Unitary acts on {:?} qubits but the target register has {:?}",
                unitary.nindices(),
                self.target_qubits
            );
            return Err(CountingError::new(message));
        }
        let target_wires = self.target_wires();
        let estimation_wires = self.estimation_wires();

        let mut c = Circuit::new(self.n());
        c.h_all(&target_wires)?;
        c.h_all(&estimation_wires)?;

        // powers[p] = unitary^(2^p)
        let m = self.estimation_qubits;
        let mut powers = Vec::with_capacity(m);
        powers.push(unitary.clone());
        for p in 1..m {
            let next = powers[p - 1].pow(2);
            powers.push(next);
        }
        for (j, wire) in estimation_wires.iter().enumerate() {
            c.controlled_unitary(*wire, &target_wires, &powers[m - 1 - j])?;
        }

        inverse_qfft(&mut c, &estimation_wires)?;
        debug!(
            wires = c.n(),
            depth = c.pipeline_depth(),
            "built phase estimation circuit"
        );
        Ok(c)
    }

    /// Probability of each outcome of the estimation register after phase estimation of
    /// `unitary`. The result has `2^m` entries summing to one.
    pub fn estimation_probabilities(&self, unitary: &SquareMatrix<P>) -> CountingResult<Vec<P>> {
        let c = self.phase_estimation_circuit(unitary)?;
        let state = c.calculate_state();
        let probs = measure_probs(self.n(), &self.estimation_wires(), &state);
        trace!(?probs, "estimation register distribution");
        Ok(probs)
    }
}

#[cfg(test)]
mod simulator_tests {
    use super::*;
    use crate::Complex;
    use approx::assert_relative_eq;

    #[test]
    fn test_wire_layout() {
        let sim = Simulator::<f64>::new(4, 3).unwrap();
        assert_eq!(sim.n(), 7);
        assert_eq!(sim.target_wires(), vec![0, 1, 2, 3]);
        assert_eq!(sim.estimation_wires(), vec![4, 5, 6]);
    }

    #[test]
    fn test_bad_layouts() {
        assert!(Simulator::<f64>::new(0, 4).is_err());
        assert!(Simulator::<f64>::new(4, 0).is_err());
        assert!(Simulator::<f64>::new(MAX_QUBITS, 1).is_err());
        assert!(matches!(
            Simulator::<f64>::new(usize::MAX, 1),
            Err(CountingError::InvalidConfig(_))
        ));
        assert!(Simulator::<f64>::new(1, usize::MAX).is_err());
    }

    #[test]
    fn test_identity_peaks_at_zero() {
        let sim = Simulator::<f64>::new(2, 3).unwrap();
        let probs = sim
            .estimation_probabilities(&SquareMatrix::identity(2))
            .unwrap();
        assert_relative_eq!(probs[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_exact_phase() {
        // diag(e^{2 pi i 3/8}) on every basis state, any input is an eigenstate.
        let phase = Complex::from_polar(1.0, 2.0 * std::f64::consts::PI * 3.0 / 8.0);
        let u = SquareMatrix::from_fn(1, |r, c| {
            if r == c {
                phase
            } else {
                Complex::new(0.0, 0.0)
            }
        });
        let sim = Simulator::<f64>::new(1, 3).unwrap();
        let probs = sim.estimation_probabilities(&u).unwrap();
        assert_relative_eq!(probs[3], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_minus_identity_peaks_at_half() {
        let u = SquareMatrix::from_fn(3, |r, c| {
            if r == c {
                Complex::new(-1.0, 0.0)
            } else {
                Complex::new(0.0, 0.0)
            }
        });
        let sim = Simulator::<f64>::new(3, 4).unwrap();
        let probs = sim.estimation_probabilities(&u).unwrap();
        assert_relative_eq!(probs[8], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_wrong_unitary_width() {
        let sim = Simulator::<f64>::new(4, 4).unwrap();
        assert!(sim
            .estimation_probabilities(&SquareMatrix::identity(3))
            .is_err());
    }
}
