/// Construction, application, and inversion of matrix operations on a state vector.
pub mod matrix_ops;
/// Probabilities and sampled measurements of a state vector.
pub mod measurement_ops;
