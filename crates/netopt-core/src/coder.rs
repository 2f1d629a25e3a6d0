//! Bitmask encoding of element subsets.

use crate::problem::Value;

/// A set of element indices, bit `v` set for element `v`.
pub type Mask = u32;

/// Largest element count a [`Mask`] can address.
pub const MAX_ELEMENTS: usize = Mask::BITS as usize;

/// Bijection between ordered value subsets and canonical bitmasks.
///
/// `decode` always keeps the first value on the include side, so the
/// `2^(k-1)` masks below [`SubsetCoder::bipartitions`] cover every distinct
/// split of a `k`-element set exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetCoder;

impl SubsetCoder {
    /// Sets bit `v` for every value present.
    pub fn encode(values: &[Value]) -> Mask {
        values.iter().fold(0, |mask, &v| {
            debug_assert!(v < MAX_ELEMENTS, "value {v} does not fit a mask");
            mask | (1 << v)
        })
    }

    /// Splits `values` in order: the anchor goes to `include`, every later
    /// value follows the next mask bit (LSB first), set meaning include.
    pub fn decode(
        mut mask: Mask,
        values: &[Value],
        include: &mut Vec<Value>,
        exclude: &mut Vec<Value>,
    ) {
        let mut iter = values.iter();
        if let Some(&anchor) = iter.next() {
            include.push(anchor);
        }
        for &v in iter {
            if mask & 1 == 1 {
                include.push(v);
            } else {
                exclude.push(v);
            }
            mask >>= 1;
        }
    }

    /// Number of canonical bipartition masks for a set of `len` values.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or exceeds [`MAX_ELEMENTS`].
    pub fn bipartitions(len: usize) -> u64 {
        assert!(
            (1..=MAX_ELEMENTS).contains(&len),
            "cannot bipartition {len} values"
        );
        1u64 << (len - 1)
    }
}
