//! Little-endian bit views of decimal magnitudes.
//!
//! [`BitSequence`] materializes a non-negative magnitude as explicit bits so
//! the bitwise operators can synthesize two's-complement semantics over the
//! decimal representation. A sequence lives for a single operator call:
//! created from one operand's magnitude, padded and possibly complemented
//! inside an [`AlignedBits`] pair, combined, and decoded back into digits.

use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::arithmetic::{digit::Digit, ops};

/// Bits of a non-negative magnitude, least significant first, with no
/// high-order zero bits on construction. Zero is the empty sequence.
///
/// A sign is never encoded here except transiently through
/// [`BitSequence::twos_complement`].
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub(crate) struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    /// Decomposes a decimal magnitude by repeated halving, appending each
    /// remainder bit.
    pub(crate) fn from_magnitude(digits: &[Digit]) -> Self {
        let mut quotient = digits.to_vec();
        let mut bits = Vec::new();
        while !quotient.is_empty() {
            bits.push(ops::div2_assign(&mut quotient));
        }
        Self { bits }
    }

    /// Reassembles the decimal magnitude, accumulating `bit[i] * 2^i`.
    ///
    /// Inverse of [`BitSequence::from_magnitude`]; high-order zero bits left
    /// over from padding are harmless.
    pub(crate) fn into_magnitude(self) -> Vec<Digit> {
        let mut digits = Vec::new();
        for &bit in self.bits.iter().rev() {
            ops::mul2_assign(&mut digits);
            if bit {
                ops::incr(&mut digits);
            }
        }
        digits
    }

    pub(crate) fn len(&self) -> usize {
        self.bits.len()
    }

    /// Two's-complement transform: flips every bit, then adds one with a
    /// ripple carry from the least significant end. The length never
    /// changes; a carry out of the top bit is dropped, which keeps the
    /// encoding inside the working width shared by both operands.
    ///
    /// Applying the transform twice returns the original sequence; the
    /// all-zero sequence maps to itself.
    pub(crate) fn twos_complement(&mut self) {
        for bit in &mut self.bits {
            *bit = !*bit;
        }
        for bit in &mut self.bits {
            if *bit {
                *bit = false;
            } else {
                *bit = true;
                return;
            }
        }
    }

    /// Extends with high-order zero bits up to `len`.
    fn pad_to(&mut self, len: usize) {
        debug_assert!(self.bits.len() <= len);
        self.bits.resize(len, false);
    }
}

/// Two bit sequences padded to one working width, the precondition for any
/// elementwise combination.
///
/// The width is the longer operand's length, plus one extra slot when an
/// operand will be complemented: the sign bit of a two's-complement
/// encoding must survive inside the width, or results equal to the width's
/// own power of two collapse to zero.
pub(crate) struct AlignedBits {
    lhs: BitSequence,
    rhs: BitSequence,
}

impl AlignedBits {
    /// The single align step: pads both sequences at the high-order end.
    /// `signed` reserves the extra sign slot.
    pub(crate) fn new(
        mut lhs: BitSequence,
        mut rhs: BitSequence,
        signed: bool,
    ) -> Self {
        let width = lhs.len().max(rhs.len()) + usize::from(signed);
        lhs.pad_to(width);
        rhs.pad_to(width);
        Self { lhs, rhs }
    }

    /// Encodes the left operand as its two's complement.
    pub(crate) fn complement_lhs(&mut self) {
        self.lhs.twos_complement();
    }

    /// Encodes the right operand as its two's complement.
    pub(crate) fn complement_rhs(&mut self) {
        self.rhs.twos_complement();
    }

    /// Applies `op` to each aligned bit pair.
    ///
    /// # Panics
    ///
    /// Panics if the sequences disagree on length. The constructor makes
    /// that impossible, so a mismatch is a crate defect, not a runtime
    /// condition.
    pub(crate) fn combine(self, op: impl Fn(bool, bool) -> bool) -> BitSequence {
        assert_eq!(
            self.lhs.len(),
            self.rhs.len(),
            "operand bit widths must match"
        );
        let mut bits = Vec::with_capacity(self.rhs.len());
        for i in 0..self.rhs.len() {
            bits.push(op(self.lhs.bits[i], self.rhs.bits[i]));
        }
        BitSequence { bits }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::arithmetic::BigInt;

    fn bits_of(value: u64) -> BitSequence {
        BitSequence::from_magnitude(&BigInt::from(value).digits)
    }

    #[test]
    fn zero_is_the_empty_sequence() {
        assert_eq!(bits_of(0).len(), 0);
        assert!(bits_of(0).into_magnitude().is_empty());
    }

    #[test]
    fn decomposition_is_little_endian_and_minimal() {
        // 13 = 0b1101.
        assert_eq!(bits_of(13).bits, vec![true, false, true, true]);
        assert_eq!(bits_of(1).bits, vec![true]);
        assert_eq!(bits_of(8).bits, vec![false, false, false, true]);
    }

    #[test]
    fn complement_encodes_negatives_at_fixed_width() {
        // -5 at width 3 is 0b011.
        let mut bits = bits_of(5);
        bits.twos_complement();
        assert_eq!(bits.bits, vec![true, true, false]);
    }

    #[test]
    fn complement_of_all_zero_is_identity() {
        let mut bits = BitSequence { bits: vec![false; 4] };
        bits.twos_complement();
        assert_eq!(bits.bits, vec![false; 4]);
    }

    #[test]
    fn align_pads_the_shorter_operand() {
        let pair = AlignedBits::new(bits_of(1), bits_of(200), false);
        assert_eq!(pair.lhs.len(), 8);
        assert_eq!(pair.rhs.len(), 8);

        let pair = AlignedBits::new(bits_of(1), bits_of(200), true);
        assert_eq!(pair.lhs.len(), 9);
        assert_eq!(pair.rhs.len(), 9);
    }

    #[test]
    fn combine_is_elementwise() {
        let pair = AlignedBits::new(bits_of(12), bits_of(10), false);
        let xor = pair.combine(|a, b| a ^ b);
        assert_eq!(
            BigInt::from_sign_magnitude(
                crate::arithmetic::Sign::Positive,
                xor.into_magnitude(),
            ),
            BigInt::from(6),
        );
    }
}

#[cfg(all(test, feature = "std"))]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::arithmetic::BigInt;

    proptest! {
        #[test]
        fn round_trips_through_bits(n: u128) {
            let digits = BigInt::from(n).digits;
            let bits = BitSequence::from_magnitude(&digits);
            prop_assert_eq!(bits.len(), (128 - n.leading_zeros()) as usize);
            prop_assert_eq!(bits.clone().into_magnitude(), digits);
        }

        #[test]
        fn bits_match_the_native_encoding(n: u64) {
            let bits = BitSequence::from_magnitude(&BigInt::from(n).digits);
            for (i, &bit) in bits.bits.iter().enumerate() {
                prop_assert_eq!(bit, (n >> i) & 1 == 1);
            }
        }

        #[test]
        fn double_complement_is_identity(raw in prop::collection::vec(any::<bool>(), 0..200)) {
            let original = BitSequence { bits: raw };
            let mut transformed = original.clone();
            transformed.twos_complement();
            transformed.twos_complement();
            prop_assert_eq!(transformed, original);
        }

        #[test]
        fn complement_matches_native(n in 1u64..i64::MAX as u64, width in 0usize..16) {
            // At any width holding the magnitude, the transform encodes
            // `2^width - n`, exactly the native wrapping negation.
            let mut bits = BitSequence::from_magnitude(&BigInt::from(n).digits);
            let width = bits.len() + width;
            bits.pad_to(width);
            bits.twos_complement();
            let expected = (1u128 << width) - u128::from(n);
            prop_assert_eq!(
                BigInt::from_sign_magnitude(
                    crate::arithmetic::Sign::Positive,
                    bits.into_magnitude(),
                ),
                BigInt::from(expected),
            );
        }
    }
}
