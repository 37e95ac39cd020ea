use crate::circuit::Circuit;
use crate::errors::CountingResult;
use crate::{cast, Precision};

/// Applies a quantum fourier transform to `wires` of `c`, the first wire being the most
/// significant bit: `|x> -> 2^{-m/2} sum_k e^{2 pi i x k / 2^m} |k>`.
pub fn qfft<P: Precision>(c: &mut Circuit<P>, wires: &[usize]) -> CountingResult<()> {
    let m = wires.len();
    for i in 0..m {
        c.h(wires[i])?;
        for j in i + 1..m {
            c.controlled_phase(wires[j], wires[i], rotation_angle(j - i + 1))?;
        }
    }
    for i in 0..m / 2 {
        c.swap(wires[i], wires[m - 1 - i])?;
    }
    Ok(())
}

/// Applies the inverse quantum fourier transform to `wires` of `c`.
pub fn inverse_qfft<P: Precision>(c: &mut Circuit<P>, wires: &[usize]) -> CountingResult<()> {
    let mut forward = Circuit::new(c.n());
    qfft(&mut forward, wires)?;
    c.append(forward.inverse())
}

// Angle of the R_k rotation, 2 pi / 2^k.
fn rotation_angle<P: Precision>(k: usize) -> P {
    cast::<P>(2.0) * P::PI() / cast::<P>(2f64.powi(k as i32))
}
