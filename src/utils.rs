use crate::Precision;

/// Index into a row-major flattened `2^nindices` by `2^nindices` matrix.
#[inline]
pub fn get_flat_index(nindices: usize, i: usize, j: usize) -> usize {
    let mat_side = 1 << nindices;
    (i * mat_side) + j
}

/// Set the `bit_index` bit in `num` to `value`.
///
/// # Example
/// ```
/// use qcount::utils::set_bit;
/// assert_eq!(set_bit(0, 1, true), 2);
/// assert_eq!(set_bit(1, 1, true), 3);
/// assert_eq!(set_bit(1, 0, false), 0);
/// ```
#[inline]
pub fn set_bit(num: usize, bit_index: usize, value: bool) -> usize {
    let v = 1 << bit_index;
    if value {
        num | v
    } else {
        num & !v
    }
}

/// Get the `bit_index` bit value from `num`.
///
/// # Example
/// ```
/// use qcount::utils::get_bit;
/// assert!(get_bit(2, 1));
/// assert!(!get_bit(2, 0));
/// ```
#[inline]
pub fn get_bit(num: usize, bit_index: usize) -> bool {
    ((num >> bit_index) & 1) != 0
}

/// Collect the bits of the state index `full_index` over `n` wires which belong to the wires in
/// `wires`, the first wire landing in the most significant position.
///
/// # Example
/// ```
/// use qcount::utils::full_to_sub;
/// // Wire 0 is the most significant bit of a 3 wire index.
/// assert_eq!(full_to_sub(3, &[0], 0b100), 1);
/// assert_eq!(full_to_sub(3, &[2, 0], 0b100), 0b01);
/// ```
pub fn full_to_sub(n: usize, wires: &[usize], full_index: usize) -> usize {
    let nwires = wires.len();
    wires.iter().enumerate().fold(0, |acc, (j, wire)| {
        let bit = get_bit(full_index, n - 1 - *wire);
        set_bit(acc, nwires - 1 - j, bit)
    })
}

/// Overwrite the bits of `base` belonging to `wires` with the bits of `sub_index`. Inverse of
/// `full_to_sub` on the selected wires.
///
/// # Example
/// ```
/// use qcount::utils::sub_to_full;
/// assert_eq!(sub_to_full(3, &[0], 1, 0b001), 0b101);
/// assert_eq!(sub_to_full(3, &[2, 0], 0b01, 0b000), 0b100);
/// ```
pub fn sub_to_full(n: usize, wires: &[usize], sub_index: usize, base: usize) -> usize {
    let nwires = wires.len();
    wires.iter().enumerate().fold(base, |acc, (j, wire)| {
        let bit = get_bit(sub_index, nwires - 1 - j);
        set_bit(acc, n - 1 - *wire, bit)
    })
}

/// Position of the largest value in `values`. Among equal maxima the lowest index wins, NaN
/// entries are never selected. Returns `None` if there is no comparable entry.
///
/// # Example
/// ```
/// use qcount::utils::argmax_first;
/// assert_eq!(argmax_first(&[0.1, 0.4, 0.4, 0.1]), Some(1));
/// assert_eq!(argmax_first(&[f64::NAN, 0.2]), Some(1));
/// assert_eq!(argmax_first::<f64>(&[]), None);
/// ```
pub fn argmax_first<P: Precision>(values: &[P]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, P)>, (i, v)| match best {
            Some((_, bv)) if *v <= bv => best,
            _ => Some((i, *v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod utils_tests {
    use super::*;

    #[test]
    fn test_sub_full_inverse() {
        let n = 5;
        let wires = [4, 1, 2];
        for full in 0..1 << n {
            let sub = full_to_sub(n, &wires, full);
            assert_eq!(sub_to_full(n, &wires, sub, full), full);
        }
    }

    #[test]
    fn test_argmax_ties_lowest() {
        assert_eq!(argmax_first(&[0.25, 0.25, 0.25, 0.25]), Some(0));
        assert_eq!(argmax_first(&[0.0, 0.3, 0.1, 0.3]), Some(1));
    }

    #[test]
    fn test_argmax_all_nan() {
        assert_eq!(argmax_first(&[f64::NAN, f64::NAN]), None);
    }

    #[test]
    fn test_flat_index() {
        assert_eq!(get_flat_index(2, 1, 3), 7);
    }
}
