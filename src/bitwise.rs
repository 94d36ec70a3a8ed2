//! Bitwise operators with hardware-consistent two's-complement semantics.
//!
//! Every operator selects one of two strategies up front. When both
//! operands fit a signed 64-bit integer, the native instruction is the
//! answer. Otherwise the decimal magnitudes are decomposed into bit
//! sequences, negative operands are encoded by the two's-complement
//! transform at the pair's working width, the bits are combined
//! elementwise, and a negative result is decoded by applying the transform
//! again before the sign is restored. The two strategies agree bit for bit
//! on every value in native range.
//!
//! `!x` needs no bit sequence at all: it is `-x - 1` at any width. Shifts
//! are multiplication and division by a power of two.

use core::{
    borrow::Borrow,
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not,
        Shl, ShlAssign, Shr, ShrAssign,
    },
};

use crate::{
    arithmetic::{BigInt, Sign},
    bits::{AlignedBits, BitSequence},
};

/// Both operands as native integers, when both are in range.
fn native_pair(lhs: &BigInt, rhs: &BigInt) -> Option<(i64, i64)> {
    Some((lhs.to_i64()?, rhs.to_i64()?))
}

/// Generic slow path for `|`, `&` and `^`.
///
/// `op` combines one aligned bit pair. `negative` decides the result sign
/// from the operand signs: the sign bit of a two's-complement encoding
/// behaves like an implicit high bit that is one for negatives, so it
/// obeys the same table as the explicit bits.
fn combine(
    lhs: &BigInt,
    rhs: &BigInt,
    op: fn(bool, bool) -> bool,
    negative: fn(bool, bool) -> bool,
) -> BigInt {
    let signed = lhs.is_negative() || rhs.is_negative();
    let mut pair = AlignedBits::new(
        BitSequence::from_magnitude(&lhs.digits),
        BitSequence::from_magnitude(&rhs.digits),
        signed,
    );
    if lhs.is_negative() {
        pair.complement_lhs();
    }
    if rhs.is_negative() {
        pair.complement_rhs();
    }
    let mut result = pair.combine(op);
    let sign = if negative(lhs.is_negative(), rhs.is_negative()) {
        result.twos_complement();
        Sign::Negative
    } else {
        Sign::Positive
    };
    BigInt::from_sign_magnitude(sign, result.into_magnitude())
}

/// Narrows a shift amount to the native exponent type.
///
/// # Panics
///
/// Panics when the amount is negative or exceeds `u32`. Such shifts are
/// outside the operator contract; wrapping them silently would hide the
/// defect.
fn shift_amount(rhs: &BigInt) -> u32 {
    assert!(!rhs.is_negative(), "unsupported shift: negative amount");
    match rhs.to_u32() {
        Some(amount) => amount,
        None => panic!("unsupported shift: amount exceeds native range"),
    }
}

/// Arbitrary-width left shift: multiplication by a power of two.
fn shl_slow(value: &BigInt, amount: u32) -> BigInt {
    value.clone() * BigInt::from(2).pow(amount)
}

/// Arbitrary-width right shift: truncating division by a power of two.
fn shr_slow(value: &BigInt, amount: u32) -> BigInt {
    value.clone() / BigInt::from(2).pow(amount)
}

impl<B: Borrow<BigInt>> BitOrAssign<B> for BigInt {
    fn bitor_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        *self = match native_pair(self, rhs) {
            Some((a, b)) => Self::from(a | b),
            None => combine(self, rhs, |a, b| a | b, |a, b| a | b),
        };
    }
}

impl<B: Borrow<BigInt>> BitOr<B> for BigInt {
    type Output = Self;

    fn bitor(mut self, rhs: B) -> Self::Output {
        self |= rhs;
        self
    }
}

impl<B: Borrow<BigInt>> BitAndAssign<B> for BigInt {
    fn bitand_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        *self = match native_pair(self, rhs) {
            Some((a, b)) => Self::from(a & b),
            None => combine(self, rhs, |a, b| a & b, |a, b| a & b),
        };
    }
}

impl<B: Borrow<BigInt>> BitAnd<B> for BigInt {
    type Output = Self;

    fn bitand(mut self, rhs: B) -> Self::Output {
        self &= rhs;
        self
    }
}

impl<B: Borrow<BigInt>> BitXorAssign<B> for BigInt {
    fn bitxor_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        *self = match native_pair(self, rhs) {
            Some((a, b)) => Self::from(a ^ b),
            None => combine(self, rhs, |a, b| a ^ b, |a, b| a ^ b),
        };
    }
}

impl<B: Borrow<BigInt>> BitXor<B> for BigInt {
    type Output = Self;

    fn bitxor(mut self, rhs: B) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl Not for BigInt {
    type Output = Self;

    /// Bitwise complement: `!x` is `-x - 1`, the two's-complement
    /// inversion at any width.
    fn not(self) -> Self::Output {
        -self - BigInt::from(1)
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        !self.clone()
    }
}

impl<B: Borrow<BigInt>> ShlAssign<B> for BigInt {
    /// Left shift: zero fills, with arbitrary width limited only by
    /// available memory.
    ///
    /// # Panics
    ///
    /// Panics when the shift amount is negative or exceeds `u32`.
    fn shl_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        if let Some((value, amount)) = native_pair(self, rhs) {
            if (0..64).contains(&amount) {
                // A result pushed past the i64 boundary falls back to the
                // arbitrary-width path instead of truncating.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let wide = i128::from(value) << amount as u32;
                if let Ok(shifted) = i64::try_from(wide) {
                    *self = Self::from(shifted);
                    return;
                }
            }
        }
        let amount = shift_amount(rhs);
        *self = shl_slow(self, amount);
    }
}

impl<B: Borrow<BigInt>> Shl<B> for BigInt {
    type Output = Self;

    fn shl(mut self, rhs: B) -> Self::Output {
        self <<= rhs;
        self
    }
}

impl<B: Borrow<BigInt>> ShrAssign<B> for BigInt {
    /// Right shift: division by a power of two. In-range operands use the
    /// native arithmetic shift; past native range the decimal division's
    /// truncation decides the rounding.
    ///
    /// # Panics
    ///
    /// Panics when the shift amount is negative or exceeds `u32`.
    fn shr_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        if let Some((value, amount)) = native_pair(self, rhs) {
            if (0..64).contains(&amount) {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let shifted = value >> amount as u32;
                *self = Self::from(shifted);
                return;
            }
        }
        let amount = shift_amount(rhs);
        *self = shr_slow(self, amount);
    }
}

impl<B: Borrow<BigInt>> Shr<B> for BigInt {
    type Output = Self;

    fn shr(mut self, rhs: B) -> Self::Output {
        self >>= rhs;
        self
    }
}


#[cfg(all(test, feature = "std"))]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn operators_match_native(a: i64, b: i64) {
            prop_assert_eq!(BigInt::from(a) | BigInt::from(b), BigInt::from(a | b));
            prop_assert_eq!(BigInt::from(a) & BigInt::from(b), BigInt::from(a & b));
            prop_assert_eq!(BigInt::from(a) ^ BigInt::from(b), BigInt::from(a ^ b));
        }

        #[test]
        fn slow_path_matches_the_fast_path(a: i64, b: i64) {
            // The shared contract between the two strategies: driving
            // in-range operands through the bit-sequence pipeline must
            // reproduce the native instruction exactly.
            let (x, y) = (BigInt::from(a), BigInt::from(b));
            prop_assert_eq!(
                combine(&x, &y, |a, b| a | b, |a, b| a | b),
                BigInt::from(a | b)
            );
            prop_assert_eq!(
                combine(&x, &y, |a, b| a & b, |a, b| a & b),
                BigInt::from(a & b)
            );
            prop_assert_eq!(
                combine(&x, &y, |a, b| a ^ b, |a, b| a ^ b),
                BigInt::from(a ^ b)
            );
        }

        #[test]
        fn not_is_minus_x_minus_one(x: i64) {
            prop_assert_eq!(!BigInt::from(x), BigInt::from(!x));
        }

        #[test]
        fn shl_matches_native(a: i64, s in 0u32..64) {
            prop_assert_eq!(
                BigInt::from(a) << BigInt::from(s),
                BigInt::from(i128::from(a) << s)
            );
        }

        #[test]
        fn shr_matches_native(a: i64, s in 0u32..64) {
            prop_assert_eq!(
                BigInt::from(a) >> BigInt::from(s),
                BigInt::from(a >> s)
            );
        }

        #[test]
        fn slow_shl_matches_native(a: i64, s in 0u32..64) {
            prop_assert_eq!(
                shl_slow(&BigInt::from(a), s),
                BigInt::from(i128::from(a) << s)
            );
        }

        #[test]
        fn slow_shr_matches_native_for_nonnegative(a in 0i64.., s in 0u32..64) {
            prop_assert_eq!(
                shr_slow(&BigInt::from(a), s),
                BigInt::from(a >> s)
            );
        }
    }
}
