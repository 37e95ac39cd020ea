#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{CountingError, CountingResult};
use crate::iter_mut;
use crate::matrix::SquareMatrix;
use crate::utils::{full_to_sub, get_flat_index, sub_to_full};
use crate::{Complex, Precision};
use num_traits::{One, Zero};

/// An operation on a subset of the wires of a state vector.
///
/// Keep in mind that wires are big-endian to match kron product standards.
/// `|abc>` means `q0=a`, `q1=b`, `q2=c`
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixOp<P> {
    /// Dense row-major matrix acting on the listed wires, the first wire being the most
    /// significant bit of the matrix row/column.
    Matrix(Vec<usize>, Vec<P>),
    /// Apply the inner op when the first `usize` wires of the list are all `|1>`. The remaining
    /// wires are the inner op's wires.
    Control(usize, Vec<usize>, Box<MatrixOp<P>>),
}

impl<P> MatrixOp<P> {
    /// All wires touched by the op, controls first.
    pub fn indices(&self) -> &[usize] {
        match self {
            MatrixOp::Matrix(indices, _) => indices,
            MatrixOp::Control(_, indices, _) => indices,
        }
    }

    /// Number of wires touched by the op.
    pub fn num_indices(&self) -> usize {
        self.indices().len()
    }
}

impl<P: Precision> MatrixOp<Complex<P>> {
    /// Sum `f(col, op[row, col])` over the nonzero columns of `row`, both expressed in the op's
    /// own index space.
    fn sum_for_row(&self, row: usize, f: &dyn Fn(usize, Complex<P>) -> Complex<P>) -> Complex<P> {
        match self {
            MatrixOp::Matrix(indices, data) => {
                let nindices = indices.len();
                (0..1 << nindices)
                    .map(|col| (col, data[get_flat_index(nindices, row, col)]))
                    .filter(|(_, val)| !val.is_zero())
                    .map(|(col, val)| f(col, val))
                    .fold(Complex::zero(), |acc, x| acc + x)
            }
            MatrixOp::Control(num_c, indices, op) => {
                let num_c = *num_c;
                let num_o = indices.len() - num_c;
                let control_mask = ((1 << num_c) - 1) << num_o;
                if row & control_mask == control_mask {
                    let sub_row = row & !control_mask;
                    op.sum_for_row(sub_row, &|col, val| f(control_mask | col, val))
                } else {
                    f(row, Complex::one())
                }
            }
        }
    }
}

/// Make a Matrix MatrixOp
pub fn make_matrix_op<P: Precision>(
    indices: Vec<usize>,
    dat: Vec<Complex<P>>,
) -> CountingResult<MatrixOp<Complex<P>>> {
    let n = indices.len();
    let expected_mat_size = 1 << (2 * n);
    if indices.is_empty() {
        Err(CountingError::new("Must supply at least one op index"))
    } else if dat.len() != expected_mat_size {
        let message = format!(
            "Matrix data has {:?} entries versus expected 2^2*{:?}",
            dat.len(),
            n
        );
        Err(CountingError::new(message))
    } else if has_repeats(&indices) {
        let message = format!("Op indices must be distinct, found {:?}", indices);
        Err(CountingError::new(message))
    } else {
        Ok(MatrixOp::Matrix(indices, dat))
    }
}

/// Make a Matrix MatrixOp applying `mat` to the wires `indices`.
pub fn make_unitary_op<P: Precision>(
    indices: Vec<usize>,
    mat: &SquareMatrix<P>,
) -> CountingResult<MatrixOp<Complex<P>>> {
    if indices.len() != mat.nindices() {
        let message = format!(
            "Matrix acts on {:?} qubits but {:?} indices were given",
            mat.nindices(),
            indices.len()
        );
        Err(CountingError::new(message))
    } else {
        make_matrix_op(indices, mat.as_slice().to_vec())
    }
}

/// Make a Control MatrixOp
pub fn make_control_op<P>(
    mut c_indices: Vec<usize>,
    op: MatrixOp<P>,
) -> CountingResult<MatrixOp<P>> {
    if c_indices.is_empty() {
        Err(CountingError::new("Must supply at least one control index"))
    } else if c_indices.iter().any(|c| op.indices().contains(c)) || has_repeats(&c_indices) {
        let message = format!(
            "Control indices {:?} overlap with op indices {:?}",
            c_indices,
            op.indices()
        );
        Err(CountingError::new(message))
    } else {
        let num_c_indices = c_indices.len();
        match op {
            MatrixOp::Control(num_oc_indices, oo_indices, op) => {
                c_indices.extend(oo_indices);
                Ok(MatrixOp::Control(num_c_indices + num_oc_indices, c_indices, op))
            }
            op => {
                c_indices.extend(op.indices());
                Ok(MatrixOp::Control(num_c_indices, c_indices, Box::new(op)))
            }
        }
    }
}

fn has_repeats(indices: &[usize]) -> bool {
    indices
        .iter()
        .enumerate()
        .any(|(i, a)| indices[i + 1..].contains(a))
}

/// Invert a unitary op (equivalent to conjugate transpose).
pub fn invert_op<P: Precision>(op: MatrixOp<Complex<P>>) -> MatrixOp<Complex<P>> {
    match op {
        MatrixOp::Matrix(indices, mut mat) => {
            let n = indices.len();
            (0..1 << n).for_each(|row| {
                (0..row).for_each(|col| {
                    mat.swap(get_flat_index(n, row, col), get_flat_index(n, col, row));
                })
            });
            let mat = mat.into_iter().map(|v| v.conj()).collect();
            MatrixOp::Matrix(indices, mat)
        }
        MatrixOp::Control(c_indices, op_indices, op) => {
            MatrixOp::Control(c_indices, op_indices, Box::new(invert_op(*op)))
        }
    }
}

/// Apply `op` to the `n` wire state `input`, storing the results in `output`.
pub fn apply_op<P: Precision>(
    n: usize,
    op: &MatrixOp<Complex<P>>,
    input: &[Complex<P>],
    output: &mut [Complex<P>],
) {
    let mat_indices = op.indices();

    let row_fn = |(row, outputloc): (usize, &mut Complex<P>)| {
        let matrow = full_to_sub(n, mat_indices, row);
        // Maps from an op matrix column to the input amplitude at the matching full index.
        let f = |col: usize, val: Complex<P>| -> Complex<P> {
            val * input[sub_to_full(n, mat_indices, col, row)]
        };
        *outputloc = op.sum_for_row(matrow, &f);
    };

    iter_mut!(output).enumerate().for_each(row_fn);
}

/// Make a vector of complex numbers whose reals are given by `data`
pub fn from_reals<P: Precision>(data: &[P]) -> Vec<Complex<P>> {
    data.iter().map(|x| Complex::new(*x, P::zero())).collect()
}
