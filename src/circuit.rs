use crate::errors::{CountingError, CountingResult};
use crate::matrix::SquareMatrix;
use crate::state_ops::matrix_ops::{
    apply_op, invert_op, make_control_op, make_matrix_op, make_unitary_op, MatrixOp,
};
use crate::{cast, Complex, Precision};
use num_traits::{One, Zero};

/// A sequence of matrix operations over `n` wires, applied to a dense state vector.
#[derive(Debug, Clone, Default)]
pub struct Circuit<P: Precision> {
    n: usize,
    pipeline: Vec<MatrixOp<Complex<P>>>,
}

impl<P: Precision> Circuit<P> {
    /// An empty circuit on `n` wires.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            pipeline: vec![],
        }
    }

    /// Number of wires.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the depth of the current circuit (pipeline).
    pub fn pipeline_depth(&self) -> usize {
        self.pipeline.len()
    }

    /// Append an op, checking that it only touches wires of this circuit.
    pub fn push(&mut self, op: MatrixOp<Complex<P>>) -> CountingResult<()> {
        match op.indices().iter().find(|i| **i >= self.n) {
            Some(i) => {
                let message = format!("Wire {:?} does not exist in a {:?} wire circuit", i, self.n);
                Err(CountingError::new(message))
            }
            None => {
                self.pipeline.push(op);
                Ok(())
            }
        }
    }

    /// Hadamard on `wire`.
    pub fn h(&mut self, wire: usize) -> CountingResult<()> {
        let nl = Complex::one() * cast::<P>(std::f64::consts::FRAC_1_SQRT_2);
        self.push(make_matrix_op(vec![wire], vec![nl, nl, nl, -nl])?)
    }

    /// Hadamard on each of `wires`.
    pub fn h_all(&mut self, wires: &[usize]) -> CountingResult<()> {
        wires.iter().try_for_each(|w| self.h(*w))
    }

    /// Phase `e^{i theta}` applied to `target` when `control` is `|1>`.
    pub fn controlled_phase(&mut self, control: usize, target: usize, theta: P) -> CountingResult<()> {
        self.push(make_control_op(vec![control], make_phase_op(target, theta)?)?)
    }

    /// Exchange two wires.
    pub fn swap(&mut self, a: usize, b: usize) -> CountingResult<()> {
        let l = Complex::one();
        let o = Complex::zero();
        #[rustfmt::skip]
        let dat = vec![
            l, o, o, o,
            o, o, l, o,
            o, l, o, o,
            o, o, o, l,
        ];
        self.push(make_matrix_op(vec![a, b], dat)?)
    }

    /// Apply `mat` to `wires` when `control` is `|1>`.
    pub fn controlled_unitary(
        &mut self,
        control: usize,
        wires: &[usize],
        mat: &SquareMatrix<P>,
    ) -> CountingResult<()> {
        let op = make_unitary_op(wires.to_vec(), mat)?;
        self.push(make_control_op(vec![control], op)?)
    }

    /// Append all ops of `other`, which must not be wider than this circuit.
    pub fn append(&mut self, other: Circuit<P>) -> CountingResult<()> {
        other.pipeline.into_iter().try_for_each(|op| self.push(op))
    }

    /// The circuit which undoes this one.
    pub fn inverse(&self) -> Self {
        let pipeline = self.pipeline.iter().rev().cloned().map(invert_op).collect();
        Self {
            n: self.n,
            pipeline,
        }
    }

    /// Run the circuit from `|0...0>`.
    pub fn calculate_state(&self) -> Vec<Complex<P>> {
        self.calculate_state_with_init(0)
    }

    /// Run the circuit from the basis state with index `initial_index`.
    pub fn calculate_state_with_init(&self, initial_index: usize) -> Vec<Complex<P>> {
        let mut state = vec![Complex::zero(); 1 << self.n];
        let len = state.len();
        state[initial_index % len] = Complex::one();
        self.apply(state)
    }

    /// Run the circuit on an arbitrary `state` of length `2^n`.
    pub fn apply(&self, state: Vec<Complex<P>>) -> Vec<Complex<P>> {
        let arena = state.clone();
        let (state, _) = self
            .pipeline
            .iter()
            .fold((state, arena), |(state, mut arena), op| {
                apply_op(self.n, op, &state, &mut arena);
                (arena, state)
            });
        state
    }
}

fn make_phase_op<P: Precision>(wire: usize, theta: P) -> CountingResult<MatrixOp<Complex<P>>> {
    let l = Complex::one();
    let o = Complex::zero();
    make_matrix_op(vec![wire], vec![l, o, o, Complex::from_polar(P::one(), theta)])
}

#[cfg(test)]
mod circuit_tests {
    use super::*;
    use crate::state_ops::matrix_ops::from_reals;
    use approx::assert_relative_eq;

    fn assert_state_eq(a: &[Complex<f64>], b: &[Complex<f64>]) {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).for_each(|(x, y)| {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-10);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-10);
        });
    }

    #[test]
    fn test_h_all_uniform() {
        let mut c = Circuit::<f64>::new(3);
        c.h_all(&[0, 1, 2]).unwrap();
        let state = c.calculate_state();
        let amp = 1.0 / 8f64.sqrt();
        assert_state_eq(&state, &from_reals(&[amp; 8]));
    }

    #[test]
    fn test_swap() {
        let mut c = Circuit::<f64>::new(3);
        c.swap(0, 2).unwrap();
        let state = c.calculate_state_with_init(0b100);
        let mut expected = [0.0; 8];
        expected[0b001] = 1.0;
        assert_state_eq(&state, &from_reals(&expected));
    }

    #[test]
    fn test_controlled_phase() {
        let mut c = Circuit::<f64>::new(2);
        c.controlled_phase(0, 1, std::f64::consts::PI).unwrap();
        let state = c.calculate_state_with_init(0b11);
        assert_relative_eq!(state[3].re, -1.0, epsilon = 1e-12);
        let state = c.calculate_state_with_init(0b01);
        assert_relative_eq!(state[1].re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_restores() {
        let mut c = Circuit::<f64>::new(2);
        c.h(0).unwrap();
        c.controlled_phase(1, 0, 0.3).unwrap();
        c.controlled_phase(0, 1, 1.1).unwrap();
        c.h(1).unwrap();
        let mut full = c.clone();
        full.append(c.inverse()).unwrap();
        let state = full.calculate_state_with_init(0b10);
        assert_state_eq(&state, &from_reals(&[0.0, 0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_missing_wire() {
        let mut c = Circuit::<f64>::new(2);
        assert!(c.h(2).is_err());
        assert_eq!(c.pipeline_depth(), 0);
    }

    #[test]
    fn test_controlled_unitary() {
        let x = SquareMatrix::new(1, from_reals(&[0.0, 1.0, 1.0, 0.0])).unwrap();
        let mut c = Circuit::<f64>::new(2);
        c.controlled_unitary(1, &[0], &x).unwrap();
        let state = c.calculate_state_with_init(0b01);
        assert_state_eq(&state, &from_reals(&[0.0, 0.0, 0.0, 1.0]));
    }
}
