use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::config::CountingConfig;
use crate::errors::{CountingError, CountingResult};
use crate::matrix::SquareMatrix;
use crate::operators::{diffusion_matrix, grover_operator, oracle_matrix};
use crate::simulator::Simulator;
use crate::state_ops::measurement_ops::sample_counts;
use crate::utils::argmax_first;
use crate::{cast, cast_usize, Precision};

/// Index of the most likely outcome. Among equal maxima the lowest index wins.
pub fn peak_index<P: Precision>(probs: &[P]) -> CountingResult<usize> {
    argmax_first(probs).ok_or_else(|| CountingError::new("No outcome has a defined probability"))
}

/// Rotation angle read from phase bucket `k` of a `estimation_qubits` wide register,
/// `theta = 2 pi k / 2^m`.
pub fn estimated_angle<P: Precision>(k: usize, estimation_qubits: usize) -> P {
    cast::<P>(2.0) * P::PI() * cast_usize::<P>(k) / cast_usize::<P>(1 << estimation_qubits)
}

/// Number of solutions out of `search_space` implied by a Grover rotation of `theta`,
/// `N sin^2(theta / 2)`.
pub fn estimated_count<P: Precision>(theta: P, search_space: usize) -> P {
    let half = (theta / cast::<P>(2.0)).sin();
    cast_usize::<P>(search_space) * half * half
}

/// Relative error in percent of `estimate` against a nonzero `true_count`.
pub fn percent_error<P: Precision>(estimate: P, true_count: usize) -> CountingResult<P> {
    if true_count == 0 {
        Err(CountingError::EmptyMarkedSet)
    } else {
        let t = cast_usize::<P>(true_count);
        Ok(cast::<P>(100.0) * (estimate - t) / t)
    }
}

/// The outcome of phase estimation turned into a solution count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountEstimate<P: Precision> {
    /// Most likely (or most often sampled) phase bucket.
    pub peak: usize,
    /// Exact probability of the peak bucket.
    pub probability: P,
    /// Grover rotation angle read from the peak.
    pub theta: P,
    /// Estimated number of solutions.
    pub count: P,
}

/// Estimate, ground truth, and the error between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountingReport<P: Precision> {
    /// The quantum counting estimate.
    pub estimate: CountEstimate<P>,
    /// Number of supplied indices.
    pub true_count: usize,
    /// `100 (estimate - true) / true`.
    pub relative_error: P,
}

/// Quantum counting over a search space of `2^t` elements with `m` bits of phase resolution.
///
/// The diffusion operator does not depend on the marked set and is built once.
#[derive(Debug, Clone)]
pub struct QuantumCounter<P: Precision> {
    config: CountingConfig,
    simulator: Simulator<P>,
    diffusion: SquareMatrix<P>,
}

impl<P: Precision> QuantumCounter<P> {
    /// Validate `config` and prepare a counter for it.
    pub fn new(config: CountingConfig) -> CountingResult<Self> {
        config.validate()?;
        let simulator = Simulator::from_config(&config)?;
        Self::with_simulator(config, simulator)
    }

    /// Use an already constructed simulator, whose register widths override those of `config`.
    pub fn with_simulator(
        mut config: CountingConfig,
        simulator: Simulator<P>,
    ) -> CountingResult<Self> {
        config.target_qubits = simulator.target_qubits();
        config.estimation_qubits = simulator.estimation_qubits();
        config.validate()?;
        let diffusion = diffusion_matrix(config.target_qubits);
        Ok(Self {
            config,
            simulator,
            diffusion,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &CountingConfig {
        &self.config
    }

    /// The simulation handle in use.
    pub fn simulator(&self) -> &Simulator<P> {
        &self.simulator
    }

    /// The cached diffusion operator.
    pub fn diffusion(&self) -> &SquareMatrix<P> {
        &self.diffusion
    }

    /// Oracle for `marked`, after checking it against the index policy.
    pub fn oracle(&self, marked: &[i64]) -> CountingResult<SquareMatrix<P>> {
        self.config
            .index_policy
            .check(marked, self.config.search_space())?;
        Ok(oracle_matrix(self.config.target_qubits, marked))
    }

    /// Grover operator `D · O` for `marked`.
    pub fn grover(&self, marked: &[i64]) -> CountingResult<SquareMatrix<P>> {
        let g = grover_operator(&self.diffusion, &self.oracle(marked)?)?;
        g.check_unitary(cast(self.config.unitary_tolerance))?;
        Ok(g)
    }

    /// Distribution over the estimation register after phase estimation of the Grover operator.
    pub fn probabilities(&self, marked: &[i64]) -> CountingResult<Vec<P>> {
        let g = self.grover(marked)?;
        self.simulator.estimation_probabilities(&g)
    }

    /// Turn the phase estimate into a solution count.
    #[instrument(level = "debug", skip(self))]
    pub fn estimate(&self, marked: &[i64]) -> CountingResult<CountEstimate<P>> {
        let probs = self.probabilities(marked)?;
        let peak = match self.config.shots {
            Some(shots) => {
                let counts = match self.config.seed {
                    Some(seed) => sample_counts(&probs, shots, &mut StdRng::seed_from_u64(seed)),
                    None => sample_counts(&probs, shots, &mut StdRng::from_entropy()),
                }?;
                debug!(?counts, "sampled estimation register");
                argmax_first(&counts.iter().map(|c| *c as f64).collect::<Vec<_>>())
                    .ok_or_else(|| CountingError::new("No measurement was sampled"))?
            }
            None => peak_index(&probs)?,
        };
        let theta = estimated_angle::<P>(peak, self.config.estimation_qubits);
        let count = estimated_count(theta, self.config.search_space());
        debug!(peak, %theta, %count, "phase estimate");
        Ok(CountEstimate {
            peak,
            probability: probs[peak],
            theta,
            count,
        })
    }

    /// Relative error in percent between the estimated count and the number of supplied indices.
    pub fn relative_error(&self, marked: &[i64]) -> CountingResult<P> {
        self.report(marked).map(|r| r.relative_error)
    }

    /// Estimate the count for `marked` and compare it with the number of supplied indices.
    #[instrument(level = "debug", skip(self))]
    pub fn report(&self, marked: &[i64]) -> CountingResult<CountingReport<P>> {
        // Every supplied index counts, repeats and out of range ones included.
        let true_count = marked.len();
        if true_count == 0 {
            return Err(CountingError::EmptyMarkedSet);
        }
        let estimate = self.estimate(marked)?;
        let relative_error = percent_error(estimate.count, true_count)?;
        info!(
            true_count,
            estimate = %estimate.count,
            %relative_error,
            "quantum counting finished"
        );
        Ok(CountingReport {
            estimate,
            true_count,
            relative_error,
        })
    }
}
