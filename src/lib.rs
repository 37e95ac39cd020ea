#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    missing_docs
)]

//! Quantum counting of marked elements in an unstructured search space.
//!
//! The number of solutions `M` out of `N = 2^t` candidates is recovered from the rotation angle
//! of the Grover operator `G = D·O`, where `O` flips the sign of marked states and `D` inverts
//! about the mean. The angle is read off with quantum phase estimation on an exact state vector
//! simulation of `t` target qubits and `m` estimation qubits.
//!
//! # Example
//! ```
//! use qcount::prelude::*;
//!
//! # fn main() -> CountingResult<()> {
//! // 4 target qubits and 4 estimation qubits, the classic 16 element problem.
//! let counter = QuantumCounter::<f64>::new(CountingConfig::default())?;
//!
//! // Every element is marked, the Grover operator is -D and the estimate is exact.
//! let marked = (0..16).collect::<Vec<i64>>();
//! let estimate = counter.estimate(&marked)?;
//! assert_eq!(estimate.peak, 8);
//! assert!((estimate.count - 16.0).abs() < 1e-9);
//!
//! let err = counter.relative_error(&marked)?;
//! assert!(err.abs() < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! # Lower level pieces
//! The operators and the simulator may be used on their own, the counter only wires them
//! together.
//! ```
//! use qcount::prelude::*;
//! use qcount::operators::{diffusion_matrix, grover_operator, oracle_matrix};
//!
//! # fn main() -> CountingResult<()> {
//! let sim = Simulator::<f64>::new(4, 4)?;
//! let oracle = oracle_matrix::<f64>(4, &[0, 1, 2, 3]);
//! let grover = grover_operator(&diffusion_matrix(4), &oracle)?;
//! let probs = sim.estimation_probabilities(&grover)?;
//! assert_eq!(probs.len(), 16);
//! assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

/// A circuit of matrix operations over a fixed number of wires.
pub mod circuit;
/// Run configuration for the counting pipeline.
pub mod config;
/// Counting estimator and error reporter.
pub mod counting;
/// Error types.
pub mod errors;
/// Parsing of marked indices.
pub mod input;
/// Dense square complex matrices.
pub mod matrix;
/// Oracle, diffusion, and Grover operators.
pub mod operators;
/// Standard quantum fourier transform implementation.
pub mod qfft;
/// Helpers for converting from synchronous to parallel iterators.
pub mod rayon_helper;
/// Phase estimation simulator.
pub mod simulator;
/// Lower-level state vector operations.
pub mod state_ops;
/// Reusable types.
pub mod types;
/// Utility functions for bit and index manipulation
pub mod utils;

pub use num_complex::Complex;
pub use rand;
pub use types::*;

/// Commonly used types and traits.
/// ```
/// use qcount::prelude::*;
/// ```
pub mod prelude {
    pub use super::*;
    pub use crate::circuit::Circuit;
    pub use crate::config::{CountingConfig, IndexPolicy};
    pub use crate::counting::{CountEstimate, CountingReport, QuantumCounter};
    pub use crate::errors::*;
    pub use crate::input::parse_marked_indices;
    pub use crate::matrix::SquareMatrix;
    pub use crate::simulator::Simulator;
}
